//! Course, participant and article fixture utilities.

use chrono::Utc;
use entity::course_user::CourseRole;
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, QueryFilter};

use crate::{error::TestError, fixtures::factory::CourseFixture, TestContext};

impl TestContext {
    pub fn courses(&self) -> CourseFixtures<'_> {
        CourseFixtures { setup: self }
    }
}

pub struct CourseFixtures<'a> {
    pub setup: &'a TestContext,
}

impl<'a> CourseFixtures<'a> {
    /// Insert a course with zeroed cached statistics.
    pub async fn insert_course(
        &self,
        fixture: &CourseFixture,
    ) -> Result<entity::course::Model, TestError> {
        let now = Utc::now().naive_utc();

        let course = entity::course::ActiveModel {
            slug: ActiveValue::Set(fixture.slug.clone()),
            title: ActiveValue::Set(fixture.slug.clone()),
            start: ActiveValue::Set(fixture.start),
            end: ActiveValue::Set(fixture.end),
            debug_updates: ActiveValue::Set(fixture.debug_updates),
            longest_update_secs: ActiveValue::Set(fixture.longest_update_secs),
            character_sum: ActiveValue::Set(0),
            references_count: ActiveValue::Set(0),
            revision_count: ActiveValue::Set(0),
            upload_count: ActiveValue::Set(0),
            uploads_in_use_count: ActiveValue::Set(0),
            upload_usages_count: ActiveValue::Set(0),
            user_count: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        Ok(course.insert(&self.setup.db).await?)
    }

    /// Insert a wiki if no wiki with the same language and project exists.
    pub async fn insert_wiki(
        &self,
        language: Option<&str>,
        project: &str,
    ) -> Result<entity::wiki::Model, TestError> {
        if let Ok(existing) = self.setup.wiki(language, project).await {
            return Ok(existing);
        }

        let wiki = entity::wiki::ActiveModel {
            language: ActiveValue::Set(language.map(str::to_string)),
            project: ActiveValue::Set(project.to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        Ok(wiki.insert(&self.setup.db).await?)
    }

    /// Associate a wiki with a course, inserting the wiki when needed.
    pub async fn insert_course_wiki(
        &self,
        slug: &str,
        language: Option<&str>,
        project: &str,
    ) -> Result<entity::course_wiki::Model, TestError> {
        let course = self.setup.course(slug).await?;
        let wiki = self.insert_wiki(language, project).await?;

        let course_wiki = entity::course_wiki::ActiveModel {
            course_id: ActiveValue::Set(course.id),
            wiki_id: ActiveValue::Set(wiki.id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        Ok(course_wiki.insert(&self.setup.db).await?)
    }

    /// Enroll a participant with the given role.
    pub async fn insert_participant(
        &self,
        slug: &str,
        user_id: i64,
        role: CourseRole,
    ) -> Result<entity::course_user::Model, TestError> {
        let course = self.setup.course(slug).await?;
        let now = Utc::now().naive_utc();

        let course_user = entity::course_user::ActiveModel {
            course_id: ActiveValue::Set(course.id),
            user_id: ActiveValue::Set(user_id),
            role: ActiveValue::Set(role),
            character_sum_ms: ActiveValue::Set(0),
            character_sum_us: ActiveValue::Set(0),
            character_sum_draft: ActiveValue::Set(0),
            references_count: ActiveValue::Set(0),
            revision_count: ActiveValue::Set(0),
            total_uploads: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        Ok(course_user.insert(&self.setup.db).await?)
    }

    /// Insert an article association with an explicit tracked state.
    pub async fn insert_article(
        &self,
        slug: &str,
        language: Option<&str>,
        project: &str,
        article_id: i64,
        tracked: bool,
    ) -> Result<entity::articles_courses::Model, TestError> {
        let course = self.setup.course(slug).await?;
        let wiki = self.insert_wiki(language, project).await?;
        let now = Utc::now().naive_utc();

        let article = entity::articles_courses::ActiveModel {
            course_id: ActiveValue::Set(course.id),
            wiki_id: ActiveValue::Set(wiki.id),
            article_id: ActiveValue::Set(article_id),
            tracked: ActiveValue::Set(tracked),
            character_sum: ActiveValue::Set(0),
            references_count: ActiveValue::Set(0),
            revision_count: ActiveValue::Set(0),
            user_ids: ActiveValue::Set(serde_json::to_string(&Vec::<i64>::new())?),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        Ok(article.insert(&self.setup.db).await?)
    }

    /// Fetch the article association for a course, wiki and article id.
    pub async fn article(
        &self,
        course_id: i32,
        wiki_id: i32,
        article_id: i64,
    ) -> Result<Option<entity::articles_courses::Model>, TestError> {
        Ok(entity::prelude::ArticlesCourses::find()
            .filter(entity::articles_courses::Column::CourseId.eq(course_id))
            .filter(entity::articles_courses::Column::WikiId.eq(wiki_id))
            .filter(entity::articles_courses::Column::ArticleId.eq(article_id))
            .one(&self.setup.db)
            .await?)
    }
}
