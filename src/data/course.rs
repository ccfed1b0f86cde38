use chrono::{Duration, NaiveDateTime, Utc};
use entity::course_user::CourseRole;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, ModelTrait, QueryFilter, QueryOrder,
};

use crate::model::{
    course::CourseFlags,
    db::{CourseModel, CourseUserModel, WikiModel},
};

/// Cached course statistics recomputed after each run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CourseTotals {
    pub character_sum: i64,
    pub references_count: i64,
    pub revision_count: i64,
    pub upload_count: i64,
    pub uploads_in_use_count: i64,
    pub upload_usages_count: i64,
    pub user_count: i32,
}

/// Cached per-participant statistics recomputed after each run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CourseUserTotals {
    pub character_sum_ms: i64,
    pub character_sum_us: i64,
    pub character_sum_draft: i64,
    pub references_count: i64,
    pub revision_count: i64,
    pub total_uploads: i64,
}

pub struct CourseRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CourseRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, course_id: i32) -> Result<Option<CourseModel>, DbErr> {
        entity::prelude::Course::find_by_id(course_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<CourseModel>, DbErr> {
        entity::prelude::Course::find()
            .filter(entity::course::Column::Slug.eq(slug))
            .one(self.db)
            .await
    }

    /// Courses whose period overlaps `[from, to]`, ordered by ID
    pub async fn find_active_between(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<CourseModel>, DbErr> {
        entity::prelude::Course::find()
            .filter(entity::course::Column::Start.lte(to))
            .filter(entity::course::Column::End.gte(from))
            .order_by_asc(entity::course::Column::Id)
            .all(self.db)
            .await
    }

    /// Wiki IDs associated with a course, in association order
    ///
    /// Returns raw IDs rather than wiki models so a dangling association can be reported
    /// for the affected wiki alone.
    pub async fn wiki_ids(&self, course_id: i32) -> Result<Vec<i32>, DbErr> {
        let associations = entity::prelude::CourseWiki::find()
            .filter(entity::course_wiki::Column::CourseId.eq(course_id))
            .order_by_asc(entity::course_wiki::Column::Id)
            .all(self.db)
            .await?;

        Ok(associations.into_iter().map(|cw| cw.wiki_id).collect())
    }

    /// Wikis associated with a course
    pub async fn wikis(&self, course: &CourseModel) -> Result<Vec<WikiModel>, DbErr> {
        course
            .find_related(entity::prelude::Wiki)
            .order_by_asc(entity::wiki::Column::Id)
            .all(self.db)
            .await
    }

    /// Participants of a course with the given role, ordered by user ID
    pub async fn participants(
        &self,
        course_id: i32,
        role: CourseRole,
    ) -> Result<Vec<CourseUserModel>, DbErr> {
        entity::prelude::CourseUser::find()
            .filter(entity::course_user::Column::CourseId.eq(course_id))
            .filter(entity::course_user::Column::Role.eq(role))
            .order_by_asc(entity::course_user::Column::UserId)
            .all(self.db)
            .await
    }

    /// Typed flags of a course including its audit log
    pub async fn flags(&self, course: &CourseModel) -> Result<CourseFlags, DbErr> {
        let update_logs = entity::prelude::CourseUpdateLog::find()
            .filter(entity::course_update_log::Column::CourseId.eq(course.id))
            .order_by_asc(entity::course_update_log::Column::Id)
            .all(self.db)
            .await?;

        Ok(CourseFlags::new(course, update_logs))
    }

    /// Overwrite the cached course statistics
    pub async fn update_totals(
        &self,
        course: CourseModel,
        totals: &CourseTotals,
    ) -> Result<CourseModel, DbErr> {
        let mut course = course.into_active_model();
        course.character_sum = ActiveValue::Set(totals.character_sum);
        course.references_count = ActiveValue::Set(totals.references_count);
        course.revision_count = ActiveValue::Set(totals.revision_count);
        course.upload_count = ActiveValue::Set(totals.upload_count);
        course.uploads_in_use_count = ActiveValue::Set(totals.uploads_in_use_count);
        course.upload_usages_count = ActiveValue::Set(totals.upload_usages_count);
        course.user_count = ActiveValue::Set(totals.user_count);
        course.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        course.update(self.db).await
    }

    /// Overwrite the cached statistics of one participant
    pub async fn update_user_totals(
        &self,
        course_user: CourseUserModel,
        totals: &CourseUserTotals,
    ) -> Result<CourseUserModel, DbErr> {
        let mut course_user = course_user.into_active_model();
        course_user.character_sum_ms = ActiveValue::Set(totals.character_sum_ms);
        course_user.character_sum_us = ActiveValue::Set(totals.character_sum_us);
        course_user.character_sum_draft = ActiveValue::Set(totals.character_sum_draft);
        course_user.references_count = ActiveValue::Set(totals.references_count);
        course_user.revision_count = ActiveValue::Set(totals.revision_count);
        course_user.total_uploads = ActiveValue::Set(totals.total_uploads);
        course_user.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        course_user.update(self.db).await
    }

    /// Record a new longest update duration if `duration` exceeds the stored one
    ///
    /// Returns true when the flag was raised.
    pub async fn raise_longest_update(
        &self,
        course_id: i32,
        duration: Duration,
    ) -> Result<bool, DbErr> {
        let Some(course) = self.get_by_id(course_id).await? else {
            return Ok(false);
        };

        let secs = duration.num_seconds();
        if course.longest_update_secs.is_some_and(|longest| longest >= secs) {
            return Ok(false);
        }

        let mut course = course.into_active_model();
        course.longest_update_secs = ActiveValue::Set(Some(secs));
        course.updated_at = ActiveValue::Set(Utc::now().naive_utc());
        course.update(self.db).await?;

        Ok(true)
    }

    /// Delete a course; every owned row is removed by cascade
    ///
    /// Returns true when a course was deleted.
    pub async fn delete(&self, course_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Course::delete_by_id(course_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
