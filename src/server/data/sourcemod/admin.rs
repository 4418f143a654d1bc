use sea_orm::{
    sea_query::Condition, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    pagination::{Page, PageParams},
    sourcemod::{Admin, AdminParams},
};

pub struct AdminRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AdminRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: AdminParams) -> Result<Admin, DbErr> {
        let admin = entity::sourcemod_admin::ActiveModel {
            name: ActiveValue::Set(params.name),
            identity: ActiveValue::Set(params.identity),
            flags: ActiveValue::Set(params.flags),
            immunity_level: ActiveValue::Set(params.immunity_level),
            group_id: ActiveValue::Set(params.group_id),
            server_id: ActiveValue::Set(params.server_id),
            user_id: ActiveValue::Set(params.user_id),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.find_by_id(admin.id)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "Admin with id {} not found after creation",
                admin.id
            )))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Admin>, DbErr> {
        let admin = entity::prelude::SourcemodAdmin::find_by_id(id)
            .find_also_related(entity::prelude::SourcemodGroup)
            .one(self.db)
            .await?;

        Ok(admin.map(|(admin, group)| Admin::from_entity(admin, group.as_ref())))
    }

    pub async fn get_paginated(&self, params: PageParams) -> Result<Page<Admin>, DbErr> {
        let paginator = entity::prelude::SourcemodAdmin::find()
            .order_by_asc(entity::sourcemod_admin::Column::Id)
            .find_also_related(entity::prelude::SourcemodGroup)
            .paginate(self.db, params.per_page);

        let total = paginator.num_items().await?;
        let admins = paginator.fetch_page(params.page).await?;

        Ok(Page::new(
            admins
                .into_iter()
                .map(|(admin, group)| Admin::from_entity(admin, group.as_ref()))
                .collect(),
            total,
            params,
        ))
    }

    /// Admins scoped to the server plus global admins (`server_id IS NULL`).
    pub async fn get_for_server(&self, server_id: i32) -> Result<Vec<Admin>, DbErr> {
        let admins = entity::prelude::SourcemodAdmin::find()
            .filter(
                Condition::any()
                    .add(entity::sourcemod_admin::Column::ServerId.eq(server_id))
                    .add(entity::sourcemod_admin::Column::ServerId.is_null()),
            )
            .order_by_desc(entity::sourcemod_admin::Column::ImmunityLevel)
            .order_by_asc(entity::sourcemod_admin::Column::Id)
            .find_also_related(entity::prelude::SourcemodGroup)
            .all(self.db)
            .await?;

        Ok(admins
            .into_iter()
            .map(|(admin, group)| Admin::from_entity(admin, group.as_ref()))
            .collect())
    }

    pub async fn update(&self, id: i32, params: AdminParams) -> Result<Option<Admin>, DbErr> {
        let Some(existing) = entity::prelude::SourcemodAdmin::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::sourcemod_admin::ActiveModel = existing.into();
        active.name = ActiveValue::Set(params.name);
        active.identity = ActiveValue::Set(params.identity);
        active.flags = ActiveValue::Set(params.flags);
        active.immunity_level = ActiveValue::Set(params.immunity_level);
        active.group_id = ActiveValue::Set(params.group_id);
        active.server_id = ActiveValue::Set(params.server_id);
        active.user_id = ActiveValue::Set(params.user_id);
        active.update(self.db).await?;

        self.find_by_id(id).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::SourcemodAdmin::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }
}
