//! Declarative test builder.
//!
//! This module provides the `TestBuilder` API for configuring test environments before execution.
//! The builder pattern allows chaining multiple configuration methods together, with all operations
//! queued and executed during the final `build()` call.

use entity::course_user::CourseRole;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, fixtures::factory::CourseFixture, TestContext};

/// Builder for declarative test initialization.
///
/// Provides an interface for setting up test environments with database tables and course
/// fixtures. Methods can be chained together and finalized with `build()`.
pub struct TestBuilder {
    // Tables to create
    tables: Vec<TableCreateStatement>,
    include_course_tables: bool,

    // Database fixtures to insert
    courses: Vec<CourseFixture>,
    wikis: Vec<(Option<String>, String)>,
    course_wikis: Vec<(String, Option<String>, String)>, // (slug, language, project)
    participants: Vec<(String, i64, CourseRole)>,        // (slug, user_id, role)
    articles: Vec<(String, Option<String>, String, i64, bool)>, // (slug, language, project, article_id, tracked)
}

impl TestBuilder {
    /// Create a new TestBuilder.
    ///
    /// Initializes an empty builder with no tables or fixtures configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_course_tables: false,
            courses: Vec::new(),
            wikis: Vec::new(),
            course_wikis: Vec::new(),
            participants: Vec::new(),
            articles: Vec::new(),
        }
    }

    /// Add every course statistics table to the test database.
    ///
    /// Tables are created in foreign key order: Course, Wiki, CourseWiki, CourseUser,
    /// CourseWikiTimeslice, CourseUserWikiTimeslice, ArticlesCourses, ArticleCourseTimeslice
    /// and CourseUpdateLog.
    pub fn with_course_tables(mut self) -> Self {
        self.include_course_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// Generates a CREATE TABLE statement for the entity, which will be executed during `build()`.
    /// Chain multiple calls to add multiple tables.
    ///
    /// ```no_run
    /// use coursestats_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), coursestats_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(Course)
    ///     .with_table(CourseUpdateLog)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a course.
    ///
    /// Use [`factory::course`](crate::fixtures::factory::course) to describe the fixture.
    pub fn with_course(mut self, course: CourseFixture) -> Self {
        self.courses.push(course);
        self
    }

    /// Insert a wiki not yet associated with any course.
    pub fn with_wiki(mut self, language: Option<&str>, project: &str) -> Self {
        self.wikis
            .push((language.map(str::to_string), project.to_string()));
        self
    }

    /// Associate a wiki with a course; the wiki is created when missing.
    pub fn with_course_wiki(mut self, slug: &str, language: Option<&str>, project: &str) -> Self {
        self.course_wikis.push((
            slug.to_string(),
            language.map(str::to_string),
            project.to_string(),
        ));
        self
    }

    /// Enroll a student in a course.
    pub fn with_student(mut self, slug: &str, user_id: i64) -> Self {
        self.participants
            .push((slug.to_string(), user_id, CourseRole::Student));
        self
    }

    /// Enroll an instructor in a course.
    pub fn with_instructor(mut self, slug: &str, user_id: i64) -> Self {
        self.participants
            .push((slug.to_string(), user_id, CourseRole::Instructor));
        self
    }

    /// Associate an article with a course before any revision touches it.
    pub fn with_article(
        mut self,
        slug: &str,
        language: Option<&str>,
        project: &str,
        article_id: i64,
        tracked: bool,
    ) -> Self {
        self.articles.push((
            slug.to_string(),
            language.map(str::to_string),
            project.to_string(),
            article_id,
            tracked,
        ));
        self
    }

    /// Build the test setup by creating all configured tables and fixtures.
    ///
    /// Executes all queued operations in the following order:
    /// 1. Creates database tables (course tables if specified, then custom tables)
    /// 2. Inserts courses, wikis, associations, participants and articles
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError)` - Table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let setup = TestContext::new().await?;

        // 1. Create tables
        let mut all_tables = Vec::new();

        if self.include_course_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::Course),
                schema.create_table_from_entity(entity::prelude::Wiki),
                schema.create_table_from_entity(entity::prelude::CourseWiki),
                schema.create_table_from_entity(entity::prelude::CourseUser),
                schema.create_table_from_entity(entity::prelude::CourseWikiTimeslice),
                schema.create_table_from_entity(entity::prelude::CourseUserWikiTimeslice),
                schema.create_table_from_entity(entity::prelude::ArticlesCourses),
                schema.create_table_from_entity(entity::prelude::ArticleCourseTimeslice),
                schema.create_table_from_entity(entity::prelude::CourseUpdateLog),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        // 2. Insert database fixtures
        for course in &self.courses {
            setup.courses().insert_course(course).await?;
        }

        for (language, project) in &self.wikis {
            setup
                .courses()
                .insert_wiki(language.as_deref(), project)
                .await?;
        }

        for (slug, language, project) in &self.course_wikis {
            setup
                .courses()
                .insert_course_wiki(slug, language.as_deref(), project)
                .await?;
        }

        for (slug, user_id, role) in &self.participants {
            setup
                .courses()
                .insert_participant(slug, *user_id, *role)
                .await?;
        }

        for (slug, language, project, article_id, tracked) in &self.articles {
            setup
                .courses()
                .insert_article(slug, language.as_deref(), project, *article_id, *tracked)
                .await?;
        }

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
