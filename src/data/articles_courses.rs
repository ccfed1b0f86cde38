use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::model::db::ArticlesCoursesModel;

pub struct ArticlesCoursesRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ArticlesCoursesRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find(
        &self,
        course_id: i32,
        wiki_id: i32,
        article_id: i64,
    ) -> Result<Option<ArticlesCoursesModel>, DbErr> {
        entity::prelude::ArticlesCourses::find()
            .filter(entity::articles_courses::Column::CourseId.eq(course_id))
            .filter(entity::articles_courses::Column::WikiId.eq(wiki_id))
            .filter(entity::articles_courses::Column::ArticleId.eq(article_id))
            .one(self.db)
            .await
    }

    /// Return the association for an article, creating a tracked one the first time a
    /// course touches the article
    pub async fn get_or_create(
        &self,
        course_id: i32,
        wiki_id: i32,
        article_id: i64,
    ) -> Result<ArticlesCoursesModel, DbErr> {
        if let Some(existing) = self.find(course_id, wiki_id, article_id).await? {
            return Ok(existing);
        }

        let now = Utc::now().naive_utc();
        let association = entity::articles_courses::ActiveModel {
            course_id: ActiveValue::Set(course_id),
            wiki_id: ActiveValue::Set(wiki_id),
            article_id: ActiveValue::Set(article_id),
            tracked: ActiveValue::Set(true),
            character_sum: ActiveValue::Set(0),
            references_count: ActiveValue::Set(0),
            revision_count: ActiveValue::Set(0),
            user_ids: ActiveValue::Set("[]".to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        association.insert(self.db).await
    }

    /// Associations of a course, ordered by wiki then article
    pub async fn list(&self, course_id: i32) -> Result<Vec<ArticlesCoursesModel>, DbErr> {
        entity::prelude::ArticlesCourses::find()
            .filter(entity::articles_courses::Column::CourseId.eq(course_id))
            .order_by_asc(entity::articles_courses::Column::WikiId)
            .order_by_asc(entity::articles_courses::Column::ArticleId)
            .all(self.db)
            .await
    }

    /// Article IDs of the tracked associations of a course
    pub async fn tracked_article_ids(&self, course_id: i32) -> Result<Vec<i64>, DbErr> {
        let tracked = entity::prelude::ArticlesCourses::find()
            .filter(entity::articles_courses::Column::CourseId.eq(course_id))
            .filter(entity::articles_courses::Column::Tracked.eq(true))
            .order_by_asc(entity::articles_courses::Column::ArticleId)
            .all(self.db)
            .await?;

        Ok(tracked.into_iter().map(|ac| ac.article_id).collect())
    }
}
