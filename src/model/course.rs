//! Typed course flags.

use chrono::Duration;

use crate::model::db::{CourseModel, CourseUpdateLogModel};

/// Per-course update settings and history.
#[derive(Clone, Debug, PartialEq)]
pub struct CourseFlags {
    /// Emit structured progress events through the error tracker during updates.
    pub debug_updates: bool,
    /// Longest update run observed for the course.
    pub longest_update: Option<Duration>,
    /// Audit log entries, oldest first.
    pub update_logs: Vec<CourseUpdateLogModel>,
}

impl CourseFlags {
    pub fn new(course: &CourseModel, update_logs: Vec<CourseUpdateLogModel>) -> Self {
        Self {
            debug_updates: course.debug_updates,
            longest_update: course.longest_update_secs.map(Duration::seconds),
            update_logs,
        }
    }

    /// Longest duration recorded in the audit log.
    pub fn longest_logged_update(&self) -> Option<Duration> {
        self.update_logs
            .iter()
            .map(|log| Duration::milliseconds(log.duration_ms))
            .max()
    }
}
