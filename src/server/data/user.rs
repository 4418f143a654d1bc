//! User repository.
//!
//! Raw `entity::user::Model` rows are returned where the caller needs the password hash
//! (login, auth guard); listing methods return `User` domain models with roles attached.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::role::RoleRepository,
    model::{
        pagination::{Page, PageParams},
        user::User,
    },
};

pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts an active user with the given bcrypt hash.
    pub async fn create(
        &self,
        username: String,
        email: String,
        password_hash: String,
    ) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            username: ActiveValue::Set(username),
            email: ActiveValue::Set(email),
            password_hash: ActiveValue::Set(password_hash),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now()),
            last_login_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(id).one(self.db).await
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Username.eq(username))
            .one(self.db)
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    /// Loads the user with their roles.
    pub async fn get_user(&self, id: i32) -> Result<Option<User>, DbErr> {
        let Some(user) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let roles = RoleRepository::new(self.db).get_for_user(id).await?;

        Ok(Some(User::from_entity(user, roles)))
    }

    pub async fn get_paginated(&self, params: PageParams) -> Result<Page<User>, DbErr> {
        let paginator = entity::prelude::User::find()
            .order_by_asc(entity::user::Column::Id)
            .paginate(self.db, params.per_page);

        let total = paginator.num_items().await?;
        let users = paginator.fetch_page(params.page).await?;

        let user_ids: Vec<i32> = users.iter().map(|u| u.id).collect();
        let mut roles_by_user = RoleRepository::new(self.db)
            .get_for_users(&user_ids)
            .await?;

        let items = users
            .into_iter()
            .map(|user| {
                let roles = roles_by_user.remove(&user.id).unwrap_or_default();
                User::from_entity(user, roles)
            })
            .collect();

        Ok(Page::new(items, total, params))
    }

    /// Returns `None` when the user does not exist.
    pub async fn set_active(
        &self,
        id: i32,
        is_active: bool,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = existing.into();
        active.is_active = ActiveValue::Set(is_active);

        Ok(Some(active.update(self.db).await?))
    }

    /// Updates whichever of email and password hash is `Some`.
    pub async fn update_credentials(
        &self,
        id: i32,
        email: Option<String>,
        password_hash: Option<String>,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        if email.is_none() && password_hash.is_none() {
            return Ok(Some(existing));
        }

        let mut active: entity::user::ActiveModel = existing.into();
        if let Some(email) = email {
            active.email = ActiveValue::Set(email);
        }
        if let Some(password_hash) = password_hash {
            active.password_hash = ActiveValue::Set(password_hash);
        }

        Ok(Some(active.update(self.db).await?))
    }

    pub async fn update_last_login(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(
                entity::user::Column::LastLoginAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::UserRole::delete_many()
            .filter(entity::user_role::Column::UserId.eq(id))
            .exec(self.db)
            .await?;
        entity::prelude::User::delete_by_id(id).exec(self.db).await?;

        Ok(())
    }
}
