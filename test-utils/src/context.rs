use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use std::sync::Arc;
use time::Duration;
use tower_sessions::{Expiry, Session};
use tower_sessions_sqlx_store::{sqlx::SqlitePool, SqliteStore};

use crate::error::TestError;

/// Test environment holding an in-memory SQLite connection and an optional session.
///
/// Both are created lazily and live as long as the context.
#[derive(Default)]
pub struct TestContext {
    /// Connection to the in-memory database, created on first use.
    pub db: Option<DatabaseConnection>,

    /// Session backed by its own in-memory store, created on first use.
    pub session: Option<Session>,
}

impl TestContext {
    /// Creates an empty context with no connection opened yet.
    pub fn new() -> Self {
        Self {
            db: None,
            session: None,
        }
    }

    /// Returns the in-memory database connection, opening it on first call.
    ///
    /// # Returns
    /// - `Ok(&DatabaseConnection)` - The shared connection
    /// - `Err(TestError::Database)` - SQLite could not be opened
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        if self.db.is_none() {
            self.db = Some(Database::connect("sqlite::memory:").await?);
        }

        match self.db {
            Some(ref db) => Ok(db),
            None => Err(TestError::Database(sea_orm::DbErr::Custom(
                "in-memory database was not initialised".to_string(),
            ))),
        }
    }

    /// Executes the given CREATE TABLE statements in order.
    ///
    /// # Arguments
    /// - `stmts` - Statements produced by `TestBuilder::with_table`
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;

        for stmt in stmts {
            db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Returns a session held in an in-memory store, creating the store on first call.
    ///
    /// Sessions expire after seven days of inactivity, matching the web service.
    ///
    /// # Returns
    /// - `Ok(&Session)` - The shared session
    /// - `Err(TestError)` - Database or session store setup failed
    pub async fn session(&mut self) -> Result<&Session, TestError> {
        if self.session.is_none() {
            self.database().await?;
            let pool = SqlitePool::connect("sqlite::memory:")
                .await
                .map_err(|e| TestError::Session(e.to_string()))?;
            let store = SqliteStore::new(pool);

            store
                .migrate()
                .await
                .map_err(|e| TestError::Session(e.to_string()))?;

            self.session = Some(Session::new(
                None,
                Arc::new(store),
                Some(Expiry::OnInactivity(Duration::days(7))),
            ));
        }

        match self.session {
            Some(ref session) => Ok(session),
            None => Err(TestError::Session("session was not initialised".to_string())),
        }
    }

    /// Returns both the database and the session, initialising either as needed.
    ///
    /// # Returns
    /// - `Ok((&DatabaseConnection, &Session))` - Shared database and session
    /// - `Err(TestError)` - Database or session store setup failed
    pub async fn db_and_session(&mut self) -> Result<(&DatabaseConnection, &Session), TestError> {
        self.session().await?;

        match (&self.db, &self.session) {
            (Some(db), Some(session)) => Ok((db, session)),
            _ => Err(TestError::Session("session was not initialised".to_string())),
        }
    }
}
