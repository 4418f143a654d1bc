//! SourceMod server, admin group and admin models.
//!
//! Admin flags use SourceMod's single-letter permission flags. `z` (root) implies every
//! other flag but is stored as given.

use crate::{
    model::sourcemod::{
        AdminDto, AdminPayloadDto, GroupDto, GroupPayloadDto, ServerDto, ServerPayloadDto,
    },
    server::{error::AppError, util::parse::parse_stored_port, util::steam_id::SteamId},
};

/// Every flag letter SourceMod understands.
pub const VALID_FLAGS: &str = "abcdefghijklmnopqrstz";
pub const MAX_IMMUNITY: i32 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Server {
    pub id: i32,
    pub name: String,
    pub ip: String,
    pub port: u16,
}

impl Server {
    pub fn from_entity(entity: entity::sourcemod_server::Model) -> Result<Self, AppError> {
        Ok(Self {
            port: parse_stored_port(entity.id, entity.port)?,
            id: entity.id,
            name: entity.name,
            ip: entity.ip,
        })
    }

    pub fn into_dto(self) -> ServerDto {
        ServerDto {
            id: self.id,
            name: self.name,
            ip: self.ip,
            port: self.port,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: i32,
    pub name: String,
    pub flags: String,
    pub immunity_level: i32,
}

impl Group {
    pub fn from_entity(entity: entity::sourcemod_group::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            flags: entity.flags,
            immunity_level: entity.immunity_level,
        }
    }

    pub fn into_dto(self) -> GroupDto {
        GroupDto {
            id: self.id,
            name: self.name,
            flags: self.flags,
            immunity_level: self.immunity_level,
        }
    }
}

/// Admin entry with its group name resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Admin {
    pub id: i32,
    pub name: String,
    /// Steam2 id.
    pub identity: String,
    pub flags: String,
    pub immunity_level: i32,
    pub group_id: Option<i32>,
    pub group_name: Option<String>,
    pub server_id: Option<i32>,
    pub user_id: Option<i32>,
}

impl Admin {
    pub fn from_entity(
        entity: entity::sourcemod_admin::Model,
        group: Option<&entity::sourcemod_group::Model>,
    ) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            identity: entity.identity,
            flags: entity.flags,
            immunity_level: entity.immunity_level,
            group_id: entity.group_id,
            group_name: group.map(|g| g.name.clone()),
            server_id: entity.server_id,
            user_id: entity.user_id,
        }
    }

    pub fn into_dto(self) -> AdminDto {
        AdminDto {
            id: self.id,
            name: self.name,
            identity: self.identity,
            flags: self.flags,
            immunity_level: self.immunity_level,
            group_id: self.group_id,
            group_name: self.group_name,
            server_id: self.server_id,
            user_id: self.user_id,
        }
    }

    /// One `admins_simple.ini` line.
    ///
    /// Admins with their own flags render `"<id>" "<immunity>:<flags>"`; admins that only
    /// inherit from a group render `"<id>" "@<group>"`.
    pub fn to_simple_ini_line(&self) -> String {
        match (&self.group_name, self.flags.is_empty()) {
            (Some(group), true) => {
                format!("\"{}\" \"@{}\"", self.identity, single_line(group))
            }
            _ => format!(
                "\"{}\" \"{}:{}\"",
                self.identity, self.immunity_level, self.flags
            ),
        }
    }
}

/// Renders a full `admins_simple.ini` file for the given admins.
pub fn render_admins_simple(server_name: &str, admins: &[Admin]) -> String {
    let mut out = format!("// admins_simple.ini for {}\n", single_line(server_name));

    for admin in admins {
        out.push_str(&format!("// {}\n", single_line(&admin.name)));
        out.push_str(&admin.to_simple_ini_line());
        out.push('\n');
    }

    out
}

/// Replaces control characters so a stored name can never start a new ini line.
fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Trims a display name and rejects empty names or names containing control characters.
fn validate_name(kind: &str, name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() || name.contains(char::is_control) {
        return Err(AppError::BadRequest(format!(
            "{} name must be non-empty and on a single line",
            kind
        )));
    }
    Ok(name.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerParams {
    pub name: String,
    pub ip: String,
    pub port: u16,
}

impl ServerParams {
    pub fn from_dto(dto: ServerPayloadDto) -> Result<Self, AppError> {
        let name = validate_name("Server", &dto.name)?;

        let ip = dto.ip.trim().to_string();
        if ip.is_empty() || ip.contains(char::is_whitespace) {
            return Err(AppError::BadRequest(format!("Invalid server address '{}'", ip)));
        }

        if dto.port == 0 {
            return Err(AppError::BadRequest("Server port must not be 0".to_string()));
        }

        Ok(Self {
            name,
            ip,
            port: dto.port,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupParams {
    pub name: String,
    pub flags: String,
    pub immunity_level: i32,
}

impl GroupParams {
    pub fn from_dto(dto: GroupPayloadDto) -> Result<Self, AppError> {
        let name = validate_name("Group", &dto.name)?;
        if name.contains('"') {
            return Err(AppError::BadRequest(format!("Invalid group name '{}'", name)));
        }

        Ok(Self {
            name,
            flags: normalize_flags(&dto.flags)?,
            immunity_level: validate_immunity(dto.immunity_level)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminParams {
    pub name: String,
    pub identity: String,
    pub flags: String,
    pub immunity_level: i32,
    pub group_id: Option<i32>,
    pub server_id: Option<i32>,
    pub user_id: Option<i32>,
}

impl AdminParams {
    /// Normalises the identity to steam2 and the flags to sorted unique letters.
    pub fn from_dto(dto: AdminPayloadDto) -> Result<Self, AppError> {
        let name = validate_name("Admin", &dto.name)?;

        Ok(Self {
            name,
            identity: SteamId::parse(&dto.identity)?.steam2(),
            flags: normalize_flags(&dto.flags)?,
            immunity_level: validate_immunity(dto.immunity_level)?,
            group_id: dto.group_id,
            server_id: dto.server_id,
            user_id: dto.user_id,
        })
    }
}

/// Deduplicates and sorts flag letters, rejecting any outside `VALID_FLAGS`.
pub fn normalize_flags(flags: &str) -> Result<String, AppError> {
    if let Some(invalid) = flags.chars().find(|c| !VALID_FLAGS.contains(*c)) {
        return Err(AppError::BadRequest(format!(
            "Invalid admin flag '{}': allowed flags are {}",
            invalid, VALID_FLAGS
        )));
    }

    let mut letters: Vec<char> = flags.chars().collect();
    letters.sort_unstable();
    letters.dedup();

    Ok(letters.into_iter().collect())
}

pub fn validate_immunity(level: i32) -> Result<i32, AppError> {
    if !(0..=MAX_IMMUNITY).contains(&level) {
        return Err(AppError::BadRequest(format!(
            "Immunity level must be between 0 and {}",
            MAX_IMMUNITY
        )));
    }
    Ok(level)
}
