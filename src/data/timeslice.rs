//! Timeslice cache repositories.
//!
//! One repository per cache granularity: course and wiki, course user and wiki, and articles
//! course association. Each provides an idempotent `get_or_create` keyed by window plus read
//! access for reporting.
//!
//! Windows are located by their start. A final window that was truncated to "now" on an earlier
//! run is widened in place when a later run computes a longer final window, so records for one
//! scope stay contiguous and non-overlapping.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::model::{
    db::{ArticleCourseTimesliceModel, CourseUserWikiTimesliceModel, CourseWikiTimesliceModel},
    timeslice::Window,
};

pub struct CourseWikiTimesliceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CourseWikiTimesliceRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Return the window record, inserting a zero-valued one when absent
    pub async fn get_or_create(
        &self,
        course_id: i32,
        wiki_id: i32,
        window: &Window,
    ) -> Result<CourseWikiTimesliceModel, DbErr> {
        let existing = entity::prelude::CourseWikiTimeslice::find()
            .filter(entity::course_wiki_timeslice::Column::CourseId.eq(course_id))
            .filter(entity::course_wiki_timeslice::Column::WikiId.eq(wiki_id))
            .filter(entity::course_wiki_timeslice::Column::Start.eq(window.start))
            .one(self.db)
            .await?;

        if let Some(timeslice) = existing {
            if timeslice.end == window.end {
                return Ok(timeslice);
            }

            let mut timeslice = timeslice.into_active_model();
            timeslice.end = ActiveValue::Set(window.end);
            timeslice.updated_at = ActiveValue::Set(Utc::now().naive_utc());
            return timeslice.update(self.db).await;
        }

        let now = Utc::now().naive_utc();
        let timeslice = entity::course_wiki_timeslice::ActiveModel {
            course_id: ActiveValue::Set(course_id),
            wiki_id: ActiveValue::Set(wiki_id),
            start: ActiveValue::Set(window.start),
            end: ActiveValue::Set(window.end),
            last_mw_rev_id: ActiveValue::Set(None),
            last_mw_rev_at: ActiveValue::Set(None),
            last_upload_at: ActiveValue::Set(None),
            character_sum: ActiveValue::Set(0),
            references_count: ActiveValue::Set(0),
            revision_count: ActiveValue::Set(0),
            upload_count: ActiveValue::Set(0),
            uploads_in_use_count: ActiveValue::Set(0),
            upload_usages_count: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        timeslice.insert(self.db).await
    }

    /// Window records of one course and wiki, in increasing time order
    pub async fn list(
        &self,
        course_id: i32,
        wiki_id: i32,
    ) -> Result<Vec<CourseWikiTimesliceModel>, DbErr> {
        entity::prelude::CourseWikiTimeslice::find()
            .filter(entity::course_wiki_timeslice::Column::CourseId.eq(course_id))
            .filter(entity::course_wiki_timeslice::Column::WikiId.eq(wiki_id))
            .order_by_asc(entity::course_wiki_timeslice::Column::Start)
            .all(self.db)
            .await
    }

    /// Window records of every wiki of a course
    pub async fn list_for_course(
        &self,
        course_id: i32,
    ) -> Result<Vec<CourseWikiTimesliceModel>, DbErr> {
        entity::prelude::CourseWikiTimeslice::find()
            .filter(entity::course_wiki_timeslice::Column::CourseId.eq(course_id))
            .order_by_asc(entity::course_wiki_timeslice::Column::WikiId)
            .order_by_asc(entity::course_wiki_timeslice::Column::Start)
            .all(self.db)
            .await
    }
}

pub struct CourseUserWikiTimesliceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CourseUserWikiTimesliceRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Return the window record for one participant, inserting a zero-valued one when absent
    pub async fn get_or_create(
        &self,
        course_id: i32,
        user_id: i64,
        wiki_id: i32,
        window: &Window,
    ) -> Result<CourseUserWikiTimesliceModel, DbErr> {
        let existing = entity::prelude::CourseUserWikiTimeslice::find()
            .filter(entity::course_user_wiki_timeslice::Column::CourseId.eq(course_id))
            .filter(entity::course_user_wiki_timeslice::Column::UserId.eq(user_id))
            .filter(entity::course_user_wiki_timeslice::Column::WikiId.eq(wiki_id))
            .filter(entity::course_user_wiki_timeslice::Column::Start.eq(window.start))
            .one(self.db)
            .await?;

        if let Some(timeslice) = existing {
            if timeslice.end == window.end {
                return Ok(timeslice);
            }

            let mut timeslice = timeslice.into_active_model();
            timeslice.end = ActiveValue::Set(window.end);
            timeslice.updated_at = ActiveValue::Set(Utc::now().naive_utc());
            return timeslice.update(self.db).await;
        }

        let now = Utc::now().naive_utc();
        let timeslice = entity::course_user_wiki_timeslice::ActiveModel {
            course_id: ActiveValue::Set(course_id),
            user_id: ActiveValue::Set(user_id),
            wiki_id: ActiveValue::Set(wiki_id),
            start: ActiveValue::Set(window.start),
            end: ActiveValue::Set(window.end),
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

        timeslice.insert(self.db).await
    }

    /// Window records of one participant across all wikis of a course
    pub async fn list_for_user(
        &self,
        course_id: i32,
        user_id: i64,
    ) -> Result<Vec<CourseUserWikiTimesliceModel>, DbErr> {
        entity::prelude::CourseUserWikiTimeslice::find()
            .filter(entity::course_user_wiki_timeslice::Column::CourseId.eq(course_id))
            .filter(entity::course_user_wiki_timeslice::Column::UserId.eq(user_id))
            .order_by_asc(entity::course_user_wiki_timeslice::Column::WikiId)
            .order_by_asc(entity::course_user_wiki_timeslice::Column::Start)
            .all(self.db)
            .await
    }

    /// Window records of every participant of a course
    pub async fn list_for_course(
        &self,
        course_id: i32,
    ) -> Result<Vec<CourseUserWikiTimesliceModel>, DbErr> {
        entity::prelude::CourseUserWikiTimeslice::find()
            .filter(entity::course_user_wiki_timeslice::Column::CourseId.eq(course_id))
            .order_by_asc(entity::course_user_wiki_timeslice::Column::UserId)
            .order_by_asc(entity::course_user_wiki_timeslice::Column::Start)
            .all(self.db)
            .await
    }
}

pub struct ArticleCourseTimesliceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ArticleCourseTimesliceRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Return the window record for an article association, inserting an empty one when absent
    pub async fn get_or_create(
        &self,
        articles_courses_id: i32,
        window: &Window,
    ) -> Result<ArticleCourseTimesliceModel, DbErr> {
        let existing = entity::prelude::ArticleCourseTimeslice::find()
            .filter(
                entity::article_course_timeslice::Column::ArticlesCoursesId.eq(articles_courses_id),
            )
            .filter(entity::article_course_timeslice::Column::Start.eq(window.start))
            .one(self.db)
            .await?;

        if let Some(timeslice) = existing {
            if timeslice.end == window.end {
                return Ok(timeslice);
            }

            let mut timeslice = timeslice.into_active_model();
            timeslice.end = ActiveValue::Set(window.end);
            timeslice.updated_at = ActiveValue::Set(Utc::now().naive_utc());
            return timeslice.update(self.db).await;
        }

        let now = Utc::now().naive_utc();
        let timeslice = entity::article_course_timeslice::ActiveModel {
            articles_courses_id: ActiveValue::Set(articles_courses_id),
            start: ActiveValue::Set(window.start),
            end: ActiveValue::Set(window.end),
            character_sum: ActiveValue::Set(0),
            references_count: ActiveValue::Set(0),
            revision_count: ActiveValue::Set(0),
            user_ids: ActiveValue::Set("[]".to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        timeslice.insert(self.db).await
    }

    /// Window records of one article association, in increasing time order
    pub async fn list(
        &self,
        articles_courses_id: i32,
    ) -> Result<Vec<ArticleCourseTimesliceModel>, DbErr> {
        entity::prelude::ArticleCourseTimeslice::find()
            .filter(
                entity::article_course_timeslice::Column::ArticlesCoursesId.eq(articles_courses_id),
            )
            .order_by_asc(entity::article_course_timeslice::Column::Start)
            .all(self.db)
            .await
    }
}
