use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    pagination::{Page, PageParams},
    sourcemod::ServerParams,
};

pub struct ServerRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ServerRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: ServerParams,
    ) -> Result<entity::sourcemod_server::Model, DbErr> {
        entity::sourcemod_server::ActiveModel {
            name: ActiveValue::Set(params.name),
            ip: ActiveValue::Set(params.ip),
            port: ActiveValue::Set(i32::from(params.port)),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<entity::sourcemod_server::Model>, DbErr> {
        entity::prelude::SourcemodServer::find_by_id(id)
            .one(self.db)
            .await
    }

    /// Returns raw rows; ports are converted by the service.
    pub async fn get_paginated(
        &self,
        params: PageParams,
    ) -> Result<Page<entity::sourcemod_server::Model>, DbErr> {
        let paginator = entity::prelude::SourcemodServer::find()
            .order_by_asc(entity::sourcemod_server::Column::Id)
            .paginate(self.db, params.per_page);

        let total = paginator.num_items().await?;
        let servers = paginator.fetch_page(params.page).await?;

        Ok(Page::new(servers, total, params))
    }

    pub async fn update(
        &self,
        id: i32,
        params: ServerParams,
    ) -> Result<Option<entity::sourcemod_server::Model>, DbErr> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::sourcemod_server::ActiveModel = existing.into();
        active.name = ActiveValue::Set(params.name);
        active.ip = ActiveValue::Set(params.ip);
        active.port = ActiveValue::Set(i32::from(params.port));

        Ok(Some(active.update(self.db).await?))
    }

    /// Deletes the server and the admins scoped to it. Global admins are untouched.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::SourcemodAdmin::delete_many()
            .filter(entity::sourcemod_admin::Column::ServerId.eq(id))
            .exec(self.db)
            .await?;
        entity::prelude::SourcemodServer::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }
}
