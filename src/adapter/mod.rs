//! Contracts for the external collaborators of a course update.
//!
//! Revision histories, upload logs and article status annotation live in external services
//! reached over unreliable transports. The update engine only sees these traits, which are
//! injected through [`UpdateContext`](crate::service::orchestrator::UpdateContext). Error
//! tracking and product feature lookup are injected the same way, with default
//! implementations backed by `tracing` and by configuration.

use std::{collections::BTreeMap, fmt};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use dioxus_logger::tracing;

use crate::{
    error::{adapter::AdapterError, Error},
    model::{
        activity::{FetchedRevision, FetchedUpload, RevisionMarker},
        db::{CourseModel, WikiModel},
    },
};

/// Revision history of a wiki.
#[async_trait]
pub trait RevisionSource: Send + Sync {
    /// Revisions made after `since`, or the whole history when the marker is empty.
    async fn fetch_revisions(
        &self,
        wiki: &WikiModel,
        since: RevisionMarker,
    ) -> Result<Vec<FetchedRevision>, AdapterError>;
}

/// Media-upload log of a wiki.
#[async_trait]
pub trait UploadSource: Send + Sync {
    /// Uploads made after `since`, or every upload when `since` is `None`.
    ///
    /// Uploads sharing a timestamp must be returned in the same response. An upload at the
    /// timestamp of an already applied one is not admitted by a later run.
    async fn fetch_uploads(
        &self,
        wiki: &WikiModel,
        since: Option<NaiveDateTime>,
    ) -> Result<Vec<FetchedUpload>, AdapterError>;
}

/// External article status annotation.
#[async_trait]
pub trait StatusAnnotator: Send + Sync {
    async fn annotate(&self, article_ids: &[i64]) -> Result<(), AdapterError>;
}

/// Tags attached to every captured error and progress event of one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorTags(BTreeMap<String, String>);

impl ErrorTags {
    pub fn new(correlation_id: &str, course_slug: &str) -> Self {
        let mut tags = BTreeMap::new();
        tags.insert("correlation_id".to_string(), correlation_id.to_string());
        tags.insert("course".to_string(), course_slug.to_string());
        Self(tags)
    }

    pub fn with(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.0.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

impl fmt::Display for ErrorTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in &self.0 {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}={}", key, value)?;
            first = false;
        }
        Ok(())
    }
}

/// Error and progress event reporting.
pub trait ErrorTracker: Send + Sync {
    fn capture_exception(&self, error: &Error, tags: &ErrorTags);

    fn capture_message(&self, message: &str, tags: &ErrorTags);
}

/// Error tracker that writes captures to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingErrorTracker;

impl ErrorTracker for TracingErrorTracker {
    fn capture_exception(&self, error: &Error, tags: &ErrorTags) {
        tracing::error!(
            kind = error.kind(),
            tags = %tags,
            "Course update error: {}",
            error
        );
    }

    fn capture_message(&self, message: &str, tags: &ErrorTags) {
        tracing::info!(tags = %tags, "{}", message);
    }
}

/// Optional product capabilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    StatusAnnotation,
}

/// Capability lookup for the product variant a course belongs to.
pub trait FeatureLookup: Send + Sync {
    fn product_supports(&self, feature: Feature, course: &CourseModel) -> bool;
}

/// Feature lookup answered from configuration, identical for every course.
#[derive(Clone, Copy, Debug)]
pub struct ConfiguredFeatures {
    pub status_annotation: bool,
}

impl FeatureLookup for ConfiguredFeatures {
    fn product_supports(&self, feature: Feature, _course: &CourseModel) -> bool {
        match feature {
            Feature::StatusAnnotation => self.status_annotation,
        }
    }
}
