use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ServerDto {
    pub id: i32,
    pub name: String,
    pub ip: String,
    pub port: u16,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ServerPayloadDto {
    pub name: String,
    pub ip: String,
    pub port: u16,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct GroupDto {
    pub id: i32,
    pub name: String,
    pub flags: String,
    pub immunity_level: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct GroupPayloadDto {
    pub name: String,
    #[serde(default)]
    pub flags: String,
    #[serde(default)]
    pub immunity_level: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct AdminDto {
    pub id: i32,
    pub name: String,
    /// Steam2 id (`STEAM_0:Y:Z`).
    pub identity: String,
    pub flags: String,
    pub immunity_level: i32,
    pub group_id: Option<i32>,
    pub group_name: Option<String>,
    pub server_id: Option<i32>,
    pub user_id: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct AdminPayloadDto {
    pub name: String,
    /// Any Steam id format; stored as steam2.
    pub identity: String,
    #[serde(default)]
    pub flags: String,
    #[serde(default)]
    pub immunity_level: i32,
    pub group_id: Option<i32>,
    pub server_id: Option<i32>,
    pub user_id: Option<i32>,
}
