//! Client application repository.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::scope::ScopeRepository,
    model::{
        app::{App, CreateAppParams, UpdateAppParams},
        pagination::{Page, PageParams},
    },
};

pub struct AppRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AppRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts the app with an already generated client id and hashed secret.
    pub async fn create(
        &self,
        params: CreateAppParams,
        client_id: String,
        secret_hash: String,
    ) -> Result<App, DbErr> {
        let app = entity::app::ActiveModel {
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            client_id: ActiveValue::Set(client_id),
            secret_hash: ActiveValue::Set(secret_hash),
            owner_id: ActiveValue::Set(params.owner_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.set_scopes(app.id, &params.scope_ids).await?;

        self.find_by_id(app.id).await?.ok_or(DbErr::RecordNotFound(format!(
            "App with id {} not found after creation",
            app.id
        )))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<App>, DbErr> {
        let Some(app) = entity::prelude::App::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let scopes = self.get_scopes(app.id).await?;

        Ok(Some(App::from_entity(app, scopes)))
    }

    /// Raw row including the secret hash, for client authentication.
    pub async fn find_by_client_id(
        &self,
        client_id: &str,
    ) -> Result<Option<entity::app::Model>, DbErr> {
        entity::prelude::App::find()
            .filter(entity::app::Column::ClientId.eq(client_id))
            .one(self.db)
            .await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<entity::app::Model>, DbErr> {
        entity::prelude::App::find()
            .filter(entity::app::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    /// Lists apps, restricted to one owner when `owner_id` is set.
    pub async fn get_paginated(
        &self,
        owner_id: Option<i32>,
        params: PageParams,
    ) -> Result<Page<App>, DbErr> {
        let mut query = entity::prelude::App::find().order_by_asc(entity::app::Column::Id);
        if let Some(owner_id) = owner_id {
            query = query.filter(entity::app::Column::OwnerId.eq(owner_id));
        }

        let paginator = query.paginate(self.db, params.per_page);
        let total = paginator.num_items().await?;
        let apps = paginator.fetch_page(params.page).await?;

        let app_ids: Vec<i32> = apps.iter().map(|a| a.id).collect();
        let grants = if app_ids.is_empty() {
            Vec::new()
        } else {
            entity::prelude::AppScope::find()
                .filter(entity::app_scope::Column::AppId.is_in(app_ids))
                .all(self.db)
                .await?
        };

        let scope_ids: Vec<i32> = grants.iter().map(|g| g.scope_id).collect();
        let scopes: HashMap<i32, entity::scope::Model> = ScopeRepository::new(self.db)
            .find_by_ids(&scope_ids)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let mut scopes_by_app: HashMap<i32, Vec<entity::scope::Model>> = HashMap::new();
        for grant in grants {
            if let Some(scope) = scopes.get(&grant.scope_id) {
                scopes_by_app
                    .entry(grant.app_id)
                    .or_default()
                    .push(scope.clone());
            }
        }

        let items = apps
            .into_iter()
            .map(|app| {
                let mut scopes = scopes_by_app.remove(&app.id).unwrap_or_default();
                scopes.sort_by(|a, b| (&a.app_name, &a.value).cmp(&(&b.app_name, &b.value)));
                App::from_entity(app, scopes)
            })
            .collect();

        Ok(Page::new(items, total, params))
    }

    pub async fn update(&self, id: i32, params: UpdateAppParams) -> Result<Option<App>, DbErr> {
        let Some(existing) = entity::prelude::App::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::app::ActiveModel = existing.into();
        active.name = ActiveValue::Set(params.name);
        active.description = ActiveValue::Set(params.description);
        active.update(self.db).await?;

        self.find_by_id(id).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::AppScope::delete_many()
            .filter(entity::app_scope::Column::AppId.eq(id))
            .exec(self.db)
            .await?;
        entity::prelude::App::delete_by_id(id).exec(self.db).await?;

        Ok(())
    }

    /// Replaces the app's scope subset with `scope_ids`.
    pub async fn set_scopes(&self, app_id: i32, scope_ids: &[i32]) -> Result<(), DbErr> {
        entity::prelude::AppScope::delete_many()
            .filter(entity::app_scope::Column::AppId.eq(app_id))
            .exec(self.db)
            .await?;

        let mut seen = Vec::with_capacity(scope_ids.len());
        for scope_id in scope_ids {
            if seen.contains(scope_id) {
                continue;
            }
            seen.push(*scope_id);

            entity::app_scope::ActiveModel {
                app_id: ActiveValue::Set(app_id),
                scope_id: ActiveValue::Set(*scope_id),
            }
            .insert(self.db)
            .await?;
        }

        Ok(())
    }

    async fn get_scopes(&self, app_id: i32) -> Result<Vec<entity::scope::Model>, DbErr> {
        let scope_ids: Vec<i32> = entity::prelude::AppScope::find()
            .filter(entity::app_scope::Column::AppId.eq(app_id))
            .all(self.db)
            .await?
            .into_iter()
            .map(|g| g.scope_id)
            .collect();

        ScopeRepository::new(self.db).find_by_ids(&scope_ids).await
    }
}
