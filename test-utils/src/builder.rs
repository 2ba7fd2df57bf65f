use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Tables are generated from SeaORM entities using the SQLite backend and created
/// in the order they were added once `build()` is called.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{ModerationAction, AuditChannel};
///
/// let test = TestBuilder::new()
///     .with_table(ModerationAction)
///     .with_table(AuditChannel)
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to generate a CREATE TABLE statement for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds every table touched by moderation commands and audit views.
    ///
    /// Includes `ModerationAction`, `SoftBan`, `ReloadAudit` and `AuditChannel`.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_moderation_tables(self) -> Self {
        self.with_table(ModerationAction)
            .with_table(SoftBan)
            .with_table(ReloadAudit)
            .with_table(AuditChannel)
    }

    /// Adds every table in the schema.
    ///
    /// Used by tests that exercise the whole bot context rather than a single repository.
    pub fn with_all_tables(self) -> Self {
        self.with_moderation_tables()
            .with_table(OauthUser)
            .with_table(Apprenticeship)
    }

    /// Builds the test context and creates the configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with the in-memory database ready
    /// - `Err(TestError::Database)` - Failed to connect or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}
