//! Update orchestrator driving one course statistics run.
//!
//! A run goes through `START`, then `FETCH`, `AGGREGATE` and `PERSIST` for each wiki, then
//! `ROLLUP`, an optional `STATUS-ANNOTATION` step and `FINALIZE`. Every external call and every
//! persistence step is isolated: a failure is captured through the injected [`ErrorTracker`],
//! counted for the audit log entry, and the run continues with the next step. Only an unknown
//! course or a concurrent run for the same course fails the whole update.

mod annotation;
mod lock;
mod run;
mod wiki;

use std::{collections::HashSet, sync::Arc};

use chrono::{Duration, NaiveDateTime, Utc};
use dioxus_logger::tracing;
use entity::course_user::CourseRole;
use sea_orm::DatabaseConnection;

use crate::{
    adapter::{
        ConfiguredFeatures, ErrorTracker, FeatureLookup, RevisionSource, StatusAnnotator,
        TracingErrorTracker, UploadSource,
    },
    config::UpdateConfig,
    data::{
        course::CourseRepository,
        update_log::{CourseUpdateLogRepository, NewUpdateLog},
    },
    error::Error,
    model::{
        db::{CourseModel, CourseUpdateLogModel},
        timeslice::Window,
    },
    service::rollup::RollupService,
    util::time::enumerate_windows,
};

pub use annotation::{estimate_update_duration, AnnotationDecision};
pub use lock::CourseLocks;
pub use wiki::WikiSummary;

use self::run::UpdateRun;

/// Collaborators and settings shared by every update run.
#[derive(Clone)]
pub struct UpdateContext {
    pub db: DatabaseConnection,
    pub config: UpdateConfig,
    pub revisions: Arc<dyn RevisionSource>,
    pub uploads: Arc<dyn UploadSource>,
    pub annotator: Arc<dyn StatusAnnotator>,
    pub error_tracker: Arc<dyn ErrorTracker>,
    pub features: Arc<dyn FeatureLookup>,
    pub locks: CourseLocks,
}

impl UpdateContext {
    /// Build a context logging captured errors through `tracing` and supporting every feature.
    pub fn new(
        db: DatabaseConnection,
        config: UpdateConfig,
        revisions: Arc<dyn RevisionSource>,
        uploads: Arc<dyn UploadSource>,
        annotator: Arc<dyn StatusAnnotator>,
    ) -> Self {
        Self {
            db,
            config,
            revisions,
            uploads,
            annotator,
            error_tracker: Arc::new(TracingErrorTracker),
            features: Arc::new(ConfiguredFeatures {
                status_annotation: true,
            }),
            locks: CourseLocks::new(),
        }
    }

    pub fn with_error_tracker(mut self, error_tracker: Arc<dyn ErrorTracker>) -> Self {
        self.error_tracker = error_tracker;
        self
    }

    pub fn with_features(mut self, features: Arc<dyn FeatureLookup>) -> Self {
        self.features = features;
        self
    }
}

/// Summary of a finished update run.
#[derive(Clone, Debug)]
pub struct UpdateOutcome {
    pub course_id: i32,
    pub correlation_id: String,
    pub error_count: i32,
    pub duration: Duration,
    pub wikis: Vec<WikiSummary>,
    pub annotation: AnnotationDecision,
    /// Audit log entry, absent when appending it failed.
    pub log: Option<CourseUpdateLogModel>,
}

pub struct CourseUpdateService {
    ctx: UpdateContext,
}

impl CourseUpdateService {
    /// Creates a new instance of [`CourseUpdateService`]
    pub fn new(ctx: UpdateContext) -> Self {
        Self { ctx }
    }

    /// Update a course over its whole active period
    pub async fn update_course(&self, course_id: i32) -> Result<UpdateOutcome, Error> {
        self.update(course_id, None).await
    }

    /// Update a course over `[start, end]`, clamped to the course period
    pub async fn update_course_window(
        &self,
        course_id: i32,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<UpdateOutcome, Error> {
        self.update(course_id, Some((start, end))).await
    }

    async fn update(
        &self,
        course_id: i32,
        range: Option<(NaiveDateTime, NaiveDateTime)>,
    ) -> Result<UpdateOutcome, Error> {
        let _guard = self.ctx.locks.try_acquire(course_id).await?;

        let course = CourseRepository::new(&self.ctx.db)
            .get_by_id(course_id)
            .await?
            .ok_or(Error::CourseNotFound(course_id))?;

        // START
        let mut run = UpdateRun::start(&course, self.ctx.error_tracker.clone());
        run.debug_event("Course update started", &run.tags);
        tracing::info!(
            course_id = course.id,
            correlation_id = %run.correlation_id,
            "Starting course update"
        );

        let windows = match self.select_windows(&course, range) {
            Ok(windows) => windows,
            Err(e) => {
                run.report(&e, run.tags.clone().with("step", "windows"));
                Vec::new()
            }
        };

        let course_repo = CourseRepository::new(&self.ctx.db);
        let students: HashSet<i64> = match course_repo
            .participants(course.id, CourseRole::Student)
            .await
        {
            Ok(students) => students.into_iter().map(|s| s.user_id).collect(),
            Err(e) => {
                run.report(&e.into(), run.tags.clone().with("step", "students"));
                HashSet::new()
            }
        };
        let wiki_ids = match course_repo.wiki_ids(course.id).await {
            Ok(wiki_ids) => wiki_ids,
            Err(e) => {
                run.report(&e.into(), run.tags.clone().with("step", "wikis"));
                Vec::new()
            }
        };

        // FETCH, AGGREGATE and PERSIST per wiki
        let mut wikis = Vec::with_capacity(wiki_ids.len());
        for wiki_id in wiki_ids {
            let summary = self
                .update_wiki(&mut run, &course, wiki_id, &windows, &students)
                .await;

            run.debug_event(
                &format!(
                    "Processed wiki {}: {} revisions, {} uploads, {} anomalies",
                    summary.wiki_id,
                    summary.revisions_applied,
                    summary.uploads_applied,
                    summary.anomalies
                ),
                &run.tags.clone().with("wiki_id", summary.wiki_id),
            );
            wikis.push(summary);
        }

        // ROLLUP
        let course = match RollupService::new(&self.ctx.db).recompute(course.clone()).await {
            Ok(course) => course,
            Err(e) => {
                run.report(&e, run.tags.clone().with("step", "rollup"));
                course
            }
        };

        // STATUS-ANNOTATION
        let annotation = self.annotate(&mut run, &course).await;

        // FINALIZE
        Ok(self.finalize(run, &course, wikis, annotation).await)
    }

    /// Windows of the course period that overlap the requested range
    fn select_windows(
        &self,
        course: &CourseModel,
        range: Option<(NaiveDateTime, NaiveDateTime)>,
    ) -> Result<Vec<Window>, Error> {
        let windows = enumerate_windows(
            course.start,
            course.end,
            Utc::now().naive_utc(),
            self.ctx.config.timeslice_duration,
        )?;

        let Some((start, end)) = range else {
            return Ok(windows);
        };
        if end < start {
            return Err(Error::InvalidCoursePeriod { start, end });
        }

        let start = start.max(course.start);
        let end = end.min(course.end);

        Ok(windows
            .into_iter()
            .filter(|window| window.start <= end && (window.end > start || window.contains(start)))
            .collect())
    }

    async fn finalize(
        &self,
        mut run: UpdateRun,
        course: &CourseModel,
        wikis: Vec<WikiSummary>,
        annotation: AnnotationDecision,
    ) -> UpdateOutcome {
        let duration = Utc::now().naive_utc() - run.started_at;

        match CourseRepository::new(&self.ctx.db)
            .raise_longest_update(course.id, duration)
            .await
        {
            Ok(true) => tracing::info!(
                course_id = course.id,
                duration_secs = duration.num_seconds(),
                "Recorded new longest course update"
            ),
            Ok(false) => {}
            Err(e) => run.report(&e.into(), run.tags.clone().with("step", "finalize")),
        }

        let log = match CourseUpdateLogRepository::new(&self.ctx.db)
            .append(NewUpdateLog {
                course_id: course.id,
                correlation_id: run.correlation_id.clone(),
                error_count: run.error_count,
                duration,
                started_at: run.started_at,
            })
            .await
        {
            Ok(log) => Some(log),
            Err(e) => {
                run.report(&e.into(), run.tags.clone().with("step", "audit_log"));
                None
            }
        };

        run.debug_event(
            &format!(
                "Course update finished with {} errors in {} ms",
                run.error_count,
                duration.num_milliseconds()
            ),
            &run.tags,
        );
        tracing::info!(
            course_id = course.id,
            correlation_id = %run.correlation_id,
            error_count = run.error_count,
            duration_ms = duration.num_milliseconds(),
            "Finished course update"
        );

        UpdateOutcome {
            course_id: course.id,
            correlation_id: run.correlation_id,
            error_count: run.error_count,
            duration,
            wikis,
            annotation,
            log,
        }
    }
}
