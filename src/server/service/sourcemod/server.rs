use sea_orm::DatabaseConnection;

use crate::server::{
    data::sourcemod::{admin::AdminRepository, server::ServerRepository},
    error::AppError,
    model::{
        pagination::{Page, PageParams},
        sourcemod::{render_admins_simple, Admin, Server, ServerParams},
    },
};

pub struct ServerService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ServerService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: ServerParams) -> Result<Server, AppError> {
        let server = ServerRepository::new(self.db).create(params).await?;

        Server::from_entity(server)
    }

    pub async fn get_paginated(&self, params: PageParams) -> Result<Page<Server>, AppError> {
        ServerRepository::new(self.db)
            .get_paginated(params)
            .await?
            .try_map(Server::from_entity)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Server>, AppError> {
        ServerRepository::new(self.db)
            .find_by_id(id)
            .await?
            .map(Server::from_entity)
            .transpose()
    }

    pub async fn update(&self, id: i32, params: ServerParams) -> Result<Option<Server>, AppError> {
        ServerRepository::new(self.db)
            .update(id, params)
            .await?
            .map(Server::from_entity)
            .transpose()
    }

    /// Deletes the server and every admin scoped to it. Global admins are kept.
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let repo = ServerRepository::new(self.db);

        if repo.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        repo.delete(id).await?;

        Ok(true)
    }

    /// Admins effective on a server: its own admins plus global ones, highest immunity
    /// first.
    ///
    /// # Returns
    /// - `Ok(Some((Server, Vec<Admin>)))` - Server and its admins
    /// - `Ok(None)` - Server not found
    pub async fn get_admins(&self, id: i32) -> Result<Option<(Server, Vec<Admin>)>, AppError> {
        let Some(server) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let admins = AdminRepository::new(self.db).get_for_server(id).await?;

        Ok(Some((server, admins)))
    }

    /// Renders the server's admins in `admins_simple.ini` format.
    pub async fn render_admins_simple(&self, id: i32) -> Result<Option<String>, AppError> {
        Ok(self
            .get_admins(id)
            .await?
            .map(|(server, admins)| render_admins_simple(&server.name, &admins)))
    }
}
