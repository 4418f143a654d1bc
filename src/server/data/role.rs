//! Role repository, role/scope grants and user/role assignments.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    pagination::{Page, PageParams},
    role::{CreateRoleParams, Role, UpdateRoleParams},
};

pub struct RoleRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoleRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates the role and grants it `params.scope_ids`.
    ///
    /// Callers validate the scope ids beforehand; unknown ids fail the foreign key.
    pub async fn create(&self, params: CreateRoleParams) -> Result<Role, DbErr> {
        let role = entity::role::ActiveModel {
            name: ActiveValue::Set(params.name),
            color: ActiveValue::Set(params.color),
            protected: ActiveValue::Set(params.protected),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.set_scopes(role.id, &params.scope_ids).await?;

        self.find_by_id(role.id).await?.ok_or(DbErr::RecordNotFound(format!(
            "Role with id {} not found after creation",
            role.id
        )))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Role>, DbErr> {
        let Some(role) = entity::prelude::Role::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let scopes = self.get_scopes(role.id).await?;

        Ok(Some(Role::from_entity(role, scopes)))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<entity::role::Model>, DbErr> {
        entity::prelude::Role::find()
            .filter(entity::role::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    /// Existing role rows among `ids`.
    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<entity::role::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Role::find()
            .filter(entity::role::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(entity::role::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn get_paginated(&self, params: PageParams) -> Result<Page<Role>, DbErr> {
        let paginator = entity::prelude::Role::find()
            .order_by_asc(entity::role::Column::Id)
            .paginate(self.db, params.per_page);

        let total = paginator.num_items().await?;
        let roles = paginator.fetch_page(params.page).await?;

        let role_ids: Vec<i32> = roles.iter().map(|r| r.id).collect();
        let mut scopes_by_role = self.get_scopes_for_roles(&role_ids).await?;

        let items = roles
            .into_iter()
            .map(|role| {
                let scopes = scopes_by_role.remove(&role.id).unwrap_or_default();
                Role::from_entity(role, scopes)
            })
            .collect();

        Ok(Page::new(items, total, params))
    }

    /// Returns `None` when the role does not exist.
    pub async fn update(&self, id: i32, params: UpdateRoleParams) -> Result<Option<Role>, DbErr> {
        let Some(existing) = entity::prelude::Role::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::role::ActiveModel = existing.into();
        active.name = ActiveValue::Set(params.name);
        active.color = ActiveValue::Set(params.color);
        active.update(self.db).await?;

        self.find_by_id(id).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::RoleScope::delete_many()
            .filter(entity::role_scope::Column::RoleId.eq(id))
            .exec(self.db)
            .await?;
        entity::prelude::UserRole::delete_many()
            .filter(entity::user_role::Column::RoleId.eq(id))
            .exec(self.db)
            .await?;
        entity::prelude::Role::delete_by_id(id).exec(self.db).await?;

        Ok(())
    }

    /// Replaces every scope granted to the role with `scope_ids`.
    pub async fn set_scopes(&self, role_id: i32, scope_ids: &[i32]) -> Result<(), DbErr> {
        entity::prelude::RoleScope::delete_many()
            .filter(entity::role_scope::Column::RoleId.eq(role_id))
            .exec(self.db)
            .await?;

        let mut seen = Vec::with_capacity(scope_ids.len());
        for scope_id in scope_ids {
            if seen.contains(scope_id) {
                continue;
            }
            seen.push(*scope_id);

            entity::role_scope::ActiveModel {
                role_id: ActiveValue::Set(role_id),
                scope_id: ActiveValue::Set(*scope_id),
            }
            .insert(self.db)
            .await?;
        }

        Ok(())
    }

    pub async fn get_scopes(&self, role_id: i32) -> Result<Vec<entity::scope::Model>, DbErr> {
        let mut by_role = self.get_scopes_for_roles(&[role_id]).await?;

        Ok(by_role.remove(&role_id).unwrap_or_default())
    }

    /// Scopes of several roles at once, keyed by role id.
    pub async fn get_scopes_for_roles(
        &self,
        role_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<entity::scope::Model>>, DbErr> {
        if role_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let grants = entity::prelude::RoleScope::find()
            .filter(entity::role_scope::Column::RoleId.is_in(role_ids.iter().copied()))
            .all(self.db)
            .await?;

        let scope_ids: Vec<i32> = grants.iter().map(|g| g.scope_id).collect();
        let scopes: HashMap<i32, entity::scope::Model> = if scope_ids.is_empty() {
            HashMap::new()
        } else {
            entity::prelude::Scope::find()
                .filter(entity::scope::Column::Id.is_in(scope_ids))
                .order_by_asc(entity::scope::Column::AppName)
                .order_by_asc(entity::scope::Column::Value)
                .all(self.db)
                .await?
                .into_iter()
                .map(|s| (s.id, s))
                .collect()
        };

        let mut by_role: HashMap<i32, Vec<entity::scope::Model>> = HashMap::new();
        for grant in grants {
            if let Some(scope) = scopes.get(&grant.scope_id) {
                by_role.entry(grant.role_id).or_default().push(scope.clone());
            }
        }

        for scopes in by_role.values_mut() {
            scopes.sort_by(|a, b| (&a.app_name, &a.value).cmp(&(&b.app_name, &b.value)));
        }

        Ok(by_role)
    }

    /// Roles assigned to a user, ordered by id.
    pub async fn get_for_user(&self, user_id: i32) -> Result<Vec<entity::role::Model>, DbErr> {
        let mut by_user = self.get_for_users(&[user_id]).await?;

        Ok(by_user.remove(&user_id).unwrap_or_default())
    }

    /// Roles of several users at once, keyed by user id.
    pub async fn get_for_users(
        &self,
        user_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<entity::role::Model>>, DbErr> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let assignments = entity::prelude::UserRole::find()
            .filter(entity::user_role::Column::UserId.is_in(user_ids.iter().copied()))
            .all(self.db)
            .await?;

        let role_ids: Vec<i32> = assignments.iter().map(|a| a.role_id).collect();
        let roles: HashMap<i32, entity::role::Model> = self
            .find_by_ids(&role_ids)
            .await?
            .into_iter()
            .map(|r| (r.id, r))
            .collect();

        let mut by_user: HashMap<i32, Vec<entity::role::Model>> = HashMap::new();
        for assignment in assignments {
            if let Some(role) = roles.get(&assignment.role_id) {
                by_user
                    .entry(assignment.user_id)
                    .or_default()
                    .push(role.clone());
            }
        }

        for roles in by_user.values_mut() {
            roles.sort_by_key(|r| r.id);
        }

        Ok(by_user)
    }

    /// Assigns the role unless the user already holds it.
    pub async fn add_user_role(&self, user_id: i32, role_id: i32) -> Result<(), DbErr> {
        let existing = entity::prelude::UserRole::find_by_id((user_id, role_id))
            .one(self.db)
            .await?;

        if existing.is_none() {
            entity::user_role::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                role_id: ActiveValue::Set(role_id),
            }
            .insert(self.db)
            .await?;
        }

        Ok(())
    }

    /// Replaces every role assigned to the user with `role_ids`.
    pub async fn set_user_roles(&self, user_id: i32, role_ids: &[i32]) -> Result<(), DbErr> {
        entity::prelude::UserRole::delete_many()
            .filter(entity::user_role::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        for role_id in role_ids {
            self.add_user_role(user_id, *role_id).await?;
        }

        Ok(())
    }

    /// Whether at least one user holds the role.
    pub async fn has_members(&self, role_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::UserRole::find()
            .filter(entity::user_role::Column::RoleId.eq(role_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
