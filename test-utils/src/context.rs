use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use std::sync::Arc;
use time::Duration;
use tower_sessions::{Expiry, Session};
use tower_sessions_sqlx_store::SqliteStore;

use crate::error::TestError;

/// Isolated test environment backed by a private in-memory SQLite database.
///
/// The connection and the session are both created on first use. The session store lives
/// in the same database, so a test that logs a user in and then runs repository queries
/// only ever touches one connection.
pub struct TestContext {
    /// In-memory database, created by `database()`.
    pub db: Option<DatabaseConnection>,

    /// Session stored in the `tower_sessions` table of `db`, created by `session()`.
    pub session: Option<Session>,
}

impl TestContext {
    /// Creates an empty context without touching the database.
    pub fn new() -> Self {
        Self {
            db: None,
            session: None,
        }
    }

    /// Returns the context's database, connecting on the first call.
    ///
    /// # Returns
    /// - `Ok(&DatabaseConnection)` - The in-memory connection
    /// - `Err(TestError::Database)` - SQLite could not be opened
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        if self.db.is_none() {
            let db = Database::connect("sqlite::memory:").await?;
            self.db = Some(db);
        }

        match self.db.as_ref() {
            Some(db) => Ok(db),
            None => Err(sea_orm::DbErr::Custom("database not initialized".to_string()).into()),
        }
    }

    /// Runs the given CREATE TABLE statements in order.
    ///
    /// Called by `TestBuilder::build()`; parents must come before tables referencing them.
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;

        for stmt in stmts {
            db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Returns the context's session, creating the session table on the first call.
    ///
    /// ```rust,ignore
    /// let mut test = TestContext::new();
    /// let session = test.session().await?;
    /// session.insert("auth:user", 1).await?;
    /// ```
    pub async fn session(&mut self) -> Result<&Session, TestError> {
        if self.session.is_none() {
            let db = self.database().await?;

            let store = SqliteStore::new(db.get_sqlite_connection_pool().clone());
            store
                .migrate()
                .await
                .map_err(|e| sea_orm::DbErr::Custom(e.to_string()))?;

            self.session = Some(Session::new(
                None,
                Arc::new(store),
                Some(Expiry::OnInactivity(Duration::days(7))),
            ));
        }

        match self.session.as_ref() {
            Some(session) => Ok(session),
            None => Err(sea_orm::DbErr::Custom("session not initialized".to_string()).into()),
        }
    }

    /// Returns both the database and the session, initializing whichever is missing.
    ///
    /// Avoids holding two mutable borrows when a test needs both at once.
    pub async fn db_and_session(&mut self) -> Result<(&DatabaseConnection, &Session), TestError> {
        self.database().await?;
        self.session().await?;

        match (self.db.as_ref(), self.session.as_ref()) {
            (Some(db), Some(session)) => Ok((db, session)),
            _ => Err(sea_orm::DbErr::Custom("test context not initialized".to_string()).into()),
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
