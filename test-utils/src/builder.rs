use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Fluent builder for a `TestContext` with a chosen set of tables.
///
/// Tables are created from the SeaORM entities rather than the migrations, in the order
/// they were added. Add parents before children so foreign keys resolve.
///
/// ```rust,ignore
/// let test = TestBuilder::new()
///     .with_auth_tables()
///     .with_table(ForumCategory)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Queues the CREATE TABLE statement for a single entity.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Users, roles, scopes and the two join tables scope resolution walks through.
    pub fn with_auth_tables(self) -> Self {
        self.with_table(User)
            .with_table(Role)
            .with_table(Scope)
            .with_table(UserRole)
            .with_table(RoleScope)
    }

    /// Auth tables plus client applications and their scope subsets.
    pub fn with_app_tables(self) -> Self {
        self.with_auth_tables().with_table(App).with_table(AppScope)
    }

    /// Auth tables plus forum categories, threads and posts.
    pub fn with_forum_tables(self) -> Self {
        self.with_auth_tables()
            .with_table(ForumCategory)
            .with_table(ForumThread)
            .with_table(ForumPost)
    }

    /// Auth and app tables plus SourceMod servers, groups and admins.
    pub fn with_sourcemod_tables(self) -> Self {
        self.with_app_tables()
            .with_table(SourcemodServer)
            .with_table(SourcemodGroup)
            .with_table(SourcemodAdmin)
    }

    /// Every table in the schema.
    pub fn with_all_tables(self) -> Self {
        self.with_sourcemod_tables()
            .with_table(ForumCategory)
            .with_table(ForumThread)
            .with_table(ForumPost)
            .with_table(ChatMessage)
            .with_table(SteamProfile)
    }

    /// Connects to a fresh in-memory database and creates the queued tables.
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
