use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use dioxus_logger::tracing;
use uuid::Uuid;

use crate::{
    adapter::{ErrorTags, ErrorTracker},
    error::Error,
    model::db::CourseModel,
};

/// State of one course update run.
pub(super) struct UpdateRun {
    pub correlation_id: String,
    pub started_at: NaiveDateTime,
    pub tags: ErrorTags,
    pub error_count: i32,
    debug_updates: bool,
    error_tracker: Arc<dyn ErrorTracker>,
}

impl UpdateRun {
    pub fn start(course: &CourseModel, error_tracker: Arc<dyn ErrorTracker>) -> Self {
        let correlation_id = Uuid::new_v4().to_string();

        Self {
            tags: ErrorTags::new(&correlation_id, &course.slug),
            correlation_id,
            started_at: Utc::now().naive_utc(),
            error_count: 0,
            debug_updates: course.debug_updates,
            error_tracker,
        }
    }

    /// Count an error and report it to the error tracker.
    pub fn report(&mut self, error: &Error, tags: ErrorTags) {
        self.error_count += 1;

        tracing::warn!(
            correlation_id = %self.correlation_id,
            kind = error.kind(),
            "Course update step failed: {}",
            error
        );
        self.error_tracker.capture_exception(error, &tags);
    }

    /// Emit a progress event when the course has debug updates enabled.
    pub fn debug_event(&self, message: &str, tags: &ErrorTags) {
        if self.debug_updates {
            self.error_tracker.capture_message(message, tags);
        }
    }
}
