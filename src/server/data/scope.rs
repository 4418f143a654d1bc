//! Scope repository and scope resolution.
//!
//! Resolution walks `user_role → role_scope → scope` (or `app_scope → scope` for apps) with
//! one query per hop, collecting ids and filtering the next table with `IN (...)`.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    pagination::{Page, PageParams},
    scope::{CreateScopeParams, Scope, ScopeSet},
};

pub struct ScopeRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ScopeRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateScopeParams) -> Result<Scope, DbErr> {
        let entity = entity::scope::ActiveModel {
            app_name: ActiveValue::Set(params.app_name),
            value: ActiveValue::Set(params.value),
            description: ActiveValue::Set(params.description),
            protected: ActiveValue::Set(params.protected),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Scope::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Scope>, DbErr> {
        let entity = entity::prelude::Scope::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Scope::from_entity))
    }

    pub async fn find_by_name(&self, app_name: &str, value: &str) -> Result<Option<Scope>, DbErr> {
        let entity = entity::prelude::Scope::find()
            .filter(entity::scope::Column::AppName.eq(app_name))
            .filter(entity::scope::Column::Value.eq(value))
            .one(self.db)
            .await?;

        Ok(entity.map(Scope::from_entity))
    }

    /// Returns the scopes with the given ids; unknown ids are skipped.
    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<entity::scope::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Scope::find()
            .filter(entity::scope::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(entity::scope::Column::AppName)
            .order_by_asc(entity::scope::Column::Value)
            .all(self.db)
            .await
    }

    /// Every scope id, used to grant the full catalogue to the admin role.
    pub async fn get_all_ids(&self) -> Result<Vec<i32>, DbErr> {
        let ids = entity::prelude::Scope::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();

        Ok(ids)
    }

    /// Ids of the scopes named by `names` (`app:value`); unknown names are skipped.
    pub async fn get_ids_by_names(&self, names: &[&str]) -> Result<Vec<i32>, DbErr> {
        let mut ids = Vec::new();

        for name in names {
            let Some((app_name, value)) = name.split_once(':') else {
                continue;
            };

            if let Some(scope) = self.find_by_name(app_name, value).await? {
                ids.push(scope.id);
            }
        }

        Ok(ids)
    }

    pub async fn get_paginated(&self, params: PageParams) -> Result<Page<Scope>, DbErr> {
        let paginator = entity::prelude::Scope::find()
            .order_by_asc(entity::scope::Column::AppName)
            .order_by_asc(entity::scope::Column::Value)
            .paginate(self.db, params.per_page);

        let total = paginator.num_items().await?;
        let scopes = paginator.fetch_page(params.page).await?;

        Ok(Page::new(
            scopes.into_iter().map(Scope::from_entity).collect(),
            total,
            params,
        ))
    }

    /// Updates the description; returns `None` when the scope does not exist.
    pub async fn update_description(
        &self,
        id: i32,
        description: String,
    ) -> Result<Option<Scope>, DbErr> {
        let Some(existing) = entity::prelude::Scope::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::scope::ActiveModel = existing.into();
        active.description = ActiveValue::Set(description);
        let updated = active.update(self.db).await?;

        Ok(Some(Scope::from_entity(updated)))
    }

    /// Deletes the scope; role and app grants cascade.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::RoleScope::delete_many()
            .filter(entity::role_scope::Column::ScopeId.eq(id))
            .exec(self.db)
            .await?;
        entity::prelude::AppScope::delete_many()
            .filter(entity::app_scope::Column::ScopeId.eq(id))
            .exec(self.db)
            .await?;
        entity::prelude::Scope::delete_by_id(id).exec(self.db).await?;

        Ok(())
    }

    /// Resolves every scope granted to a user through their roles.
    ///
    /// # Returns
    /// - `Ok(ScopeSet)` - Union of the scopes of all assigned roles; empty without roles
    /// - `Err(DbErr)` - Database error during any of the lookups
    pub async fn get_names_for_user(&self, user_id: i32) -> Result<ScopeSet, DbErr> {
        let role_ids: Vec<i32> = entity::prelude::UserRole::find()
            .filter(entity::user_role::Column::UserId.eq(user_id))
            .all(self.db)
            .await?
            .into_iter()
            .map(|ur| ur.role_id)
            .collect();

        if role_ids.is_empty() {
            return Ok(ScopeSet::new());
        }

        let scope_ids: Vec<i32> = entity::prelude::RoleScope::find()
            .filter(entity::role_scope::Column::RoleId.is_in(role_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|rs| rs.scope_id)
            .collect();

        self.names_for_ids(scope_ids).await
    }

    /// Resolves the scope subset assigned to a client application.
    pub async fn get_names_for_app(&self, app_id: i32) -> Result<ScopeSet, DbErr> {
        let scope_ids: Vec<i32> = entity::prelude::AppScope::find()
            .filter(entity::app_scope::Column::AppId.eq(app_id))
            .all(self.db)
            .await?
            .into_iter()
            .map(|a| a.scope_id)
            .collect();

        self.names_for_ids(scope_ids).await
    }

    async fn names_for_ids(&self, scope_ids: Vec<i32>) -> Result<ScopeSet, DbErr> {
        if scope_ids.is_empty() {
            return Ok(ScopeSet::new());
        }

        let names = entity::prelude::Scope::find()
            .filter(entity::scope::Column::Id.is_in(scope_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|s| format!("{}:{}", s.app_name, s.value))
            .collect();

        Ok(names)
    }
}
