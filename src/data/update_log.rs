//! Append-only audit log of course update runs.
//!
//! Entries are only ever inserted. They are removed only by the cascade when their course is
//! deleted.

use chrono::{Duration, NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::model::db::CourseUpdateLogModel;

/// Values recorded for one finished update run.
#[derive(Clone, Debug)]
pub struct NewUpdateLog {
    pub course_id: i32,
    pub correlation_id: String,
    pub error_count: i32,
    pub duration: Duration,
    pub started_at: NaiveDateTime,
}

pub struct CourseUpdateLogRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CourseUpdateLogRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Append an entry for a finished run
    pub async fn append(&self, entry: NewUpdateLog) -> Result<CourseUpdateLogModel, DbErr> {
        let log = entity::course_update_log::ActiveModel {
            course_id: ActiveValue::Set(entry.course_id),
            correlation_id: ActiveValue::Set(entry.correlation_id),
            error_count: ActiveValue::Set(entry.error_count),
            duration_ms: ActiveValue::Set(entry.duration.num_milliseconds()),
            started_at: ActiveValue::Set(entry.started_at),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        log.insert(self.db).await
    }

    /// All entries for a course, oldest first
    pub async fn list(&self, course_id: i32) -> Result<Vec<CourseUpdateLogModel>, DbErr> {
        entity::prelude::CourseUpdateLog::find()
            .filter(entity::course_update_log::Column::CourseId.eq(course_id))
            .order_by_asc(entity::course_update_log::Column::Id)
            .all(self.db)
            .await
    }

    /// Most recently appended entry for a course
    pub async fn latest(&self, course_id: i32) -> Result<Option<CourseUpdateLogModel>, DbErr> {
        entity::prelude::CourseUpdateLog::find()
            .filter(entity::course_update_log::Column::CourseId.eq(course_id))
            .order_by_desc(entity::course_update_log::Column::Id)
            .one(self.db)
            .await
    }

    /// Longest logged run duration for a course
    pub async fn longest_duration(&self, course_id: i32) -> Result<Option<Duration>, DbErr> {
        let longest = entity::prelude::CourseUpdateLog::find()
            .filter(entity::course_update_log::Column::CourseId.eq(course_id))
            .order_by_desc(entity::course_update_log::Column::DurationMs)
            .one(self.db)
            .await?;

        Ok(longest.map(|log| Duration::milliseconds(log.duration_ms)))
    }
}
