//! Test context structure and utilities.
//!
//! This module provides the `TestContext` returned by `TestBuilder`. The context owns an
//! in-memory SQLite database and exposes lookups for the fixtures inserted during `build()`.

use sea_orm::{
    sea_query::TableCreateStatement, ColumnTrait, ConnectionTrait, Database, DatabaseConnection,
    EntityTrait, QueryFilter,
};

use crate::error::TestError;

/// Test context structure returned by `TestBuilder`
///
/// ```ignore
/// let test = TestBuilder::new().with_course_tables().build().await?;
///
/// let course = test.course(TEST_COURSE_SLUG).await?;
/// let wiki = test.wiki(Some("en"), "wikipedia").await?;
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
}

impl TestContext {
    pub(crate) async fn new() -> Result<Self, TestError> {
        let db = Database::connect("sqlite::memory:").await?;

        Ok(Self { db })
    }

    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Look up a course fixture by its slug.
    pub async fn course(&self, slug: &str) -> Result<entity::course::Model, TestError> {
        entity::prelude::Course::find()
            .filter(entity::course::Column::Slug.eq(slug))
            .one(&self.db)
            .await?
            .ok_or_else(|| TestError::UnknownCourse(slug.to_string()))
    }

    /// Look up a wiki fixture by language and project.
    pub async fn wiki(
        &self,
        language: Option<&str>,
        project: &str,
    ) -> Result<entity::wiki::Model, TestError> {
        let query = entity::prelude::Wiki::find()
            .filter(entity::wiki::Column::Project.eq(project));
        let query = match language {
            Some(language) => query.filter(entity::wiki::Column::Language.eq(language)),
            None => query.filter(entity::wiki::Column::Language.is_null()),
        };

        query
            .one(&self.db)
            .await?
            .ok_or_else(|| TestError::UnknownWiki(format!("{:?}/{}", language, project)))
    }
}
