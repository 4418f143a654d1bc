pub mod parse;
pub mod password;
pub mod steam_id;
pub mod token;
