use chrono::Utc;
use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};

use crate::server::{model::steam::PlayerSummary, util::steam_id::SteamId};

pub struct SteamProfileRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SteamProfileRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_user(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::steam_profile::Model>, DbErr> {
        entity::prelude::SteamProfile::find()
            .filter(entity::steam_profile::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    pub async fn find_by_steam_id(
        &self,
        steam_id: SteamId,
    ) -> Result<Option<entity::steam_profile::Model>, DbErr> {
        entity::prelude::SteamProfile::find()
            .filter(entity::steam_profile::Column::Steamid64.eq(steam_id.id64() as i64))
            .one(self.db)
            .await
    }

    /// Inserts or replaces the user's linked profile.
    pub async fn upsert(
        &self,
        user_id: i32,
        steam_id: SteamId,
        summary: PlayerSummary,
    ) -> Result<entity::steam_profile::Model, DbErr> {
        let model = entity::steam_profile::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            steamid64: ActiveValue::Set(steam_id.id64() as i64),
            steam2: ActiveValue::Set(steam_id.steam2()),
            steam3: ActiveValue::Set(steam_id.steam3()),
            username: ActiveValue::Set(summary.personaname),
            profile_url: ActiveValue::Set(summary.profileurl),
            avatar_url: ActiveValue::Set(summary.avatarfull),
            country_code: ActiveValue::Set(summary.loccountrycode),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };

        entity::prelude::SteamProfile::insert(model)
            .on_conflict(
                OnConflict::column(entity::steam_profile::Column::UserId)
                    .update_columns([
                        entity::steam_profile::Column::Steamid64,
                        entity::steam_profile::Column::Steam2,
                        entity::steam_profile::Column::Steam3,
                        entity::steam_profile::Column::Username,
                        entity::steam_profile::Column::ProfileUrl,
                        entity::steam_profile::Column::AvatarUrl,
                        entity::steam_profile::Column::CountryCode,
                        entity::steam_profile::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }

    /// Returns whether a profile was removed.
    pub async fn delete_by_user(&self, user_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::SteamProfile::delete_many()
            .filter(entity::steam_profile::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
