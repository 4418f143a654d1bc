use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    pagination::{Page, PageParams},
    sourcemod::{Group, GroupParams},
};

pub struct GroupRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GroupRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: GroupParams) -> Result<Group, DbErr> {
        let entity = entity::sourcemod_group::ActiveModel {
            name: ActiveValue::Set(params.name),
            flags: ActiveValue::Set(params.flags),
            immunity_level: ActiveValue::Set(params.immunity_level),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Group::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Group>, DbErr> {
        let entity = entity::prelude::SourcemodGroup::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(Group::from_entity))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Group>, DbErr> {
        let entity = entity::prelude::SourcemodGroup::find()
            .filter(entity::sourcemod_group::Column::Name.eq(name))
            .one(self.db)
            .await?;

        Ok(entity.map(Group::from_entity))
    }

    pub async fn get_paginated(&self, params: PageParams) -> Result<Page<Group>, DbErr> {
        let paginator = entity::prelude::SourcemodGroup::find()
            .order_by_asc(entity::sourcemod_group::Column::Name)
            .paginate(self.db, params.per_page);

        let total = paginator.num_items().await?;
        let groups = paginator.fetch_page(params.page).await?;

        Ok(Page::new(
            groups.into_iter().map(Group::from_entity).collect(),
            total,
            params,
        ))
    }

    pub async fn update(&self, id: i32, params: GroupParams) -> Result<Option<Group>, DbErr> {
        let Some(existing) = entity::prelude::SourcemodGroup::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::sourcemod_group::ActiveModel = existing.into();
        active.name = ActiveValue::Set(params.name);
        active.flags = ActiveValue::Set(params.flags);
        active.immunity_level = ActiveValue::Set(params.immunity_level);
        let updated = active.update(self.db).await?;

        Ok(Some(Group::from_entity(updated)))
    }

    /// Deletes the group; member admins keep their own flags and lose the group link.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::SourcemodAdmin::update_many()
            .filter(entity::sourcemod_admin::Column::GroupId.eq(id))
            .col_expr(
                entity::sourcemod_admin::Column::GroupId,
                sea_orm::sea_query::Expr::value(Option::<i32>::None),
            )
            .exec(self.db)
            .await?;
        entity::prelude::SourcemodGroup::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }
}
