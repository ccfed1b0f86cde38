//! Validation and window grouping of fetched activity.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDateTime;
use dioxus_logger::tracing;

use crate::{
    model::{
        activity::{FetchedRevision, FetchedUpload, Namespace},
        timeslice::Window,
    },
    util::time::window_for,
};

/// Valid activity that falls into one window.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WindowBatch {
    pub revisions: Vec<FetchedRevision>,
    pub uploads: Vec<FetchedUpload>,
}

/// Fetched activity grouped by containing window.
#[derive(Clone, Debug, Default)]
pub struct GroupedActivity {
    /// Batches keyed by window, iterated in increasing time order.
    pub batches: BTreeMap<Window, WindowBatch>,
    /// Records skipped as malformed.
    pub anomalies: usize,
    /// Valid records left for a later run, see [`ActivityFilter::group`].
    pub deferred: usize,
}

/// Validation context for the fetched activity of one course and wiki.
pub struct ActivityFilter<'a> {
    pub windows: &'a [Window],
    pub students: &'a HashSet<i64>,
    /// End of the course period.
    pub period_end: NaiveDateTime,
}

enum Placement {
    Window(Window),
    /// After the last selected window but within the course period.
    Later,
}

impl<'a> ActivityFilter<'a> {
    /// Validate fetched records and group the valid ones by containing window.
    ///
    /// Malformed records are logged at `warn` and counted as anomalies. Records after the last
    /// selected window but within the course period are deferred, together with every revision
    /// numbered above the first of them, so no window mark passes activity that was not applied.
    pub fn group(
        &self,
        revisions: Vec<FetchedRevision>,
        uploads: Vec<FetchedUpload>,
    ) -> GroupedActivity {
        let mut grouped = GroupedActivity::default();
        let mut deferred_from: Option<i64> = None;

        for revision in revisions {
            match self.revision_window(&revision) {
                Ok(Placement::Window(window)) => grouped
                    .batches
                    .entry(window)
                    .or_default()
                    .revisions
                    .push(revision),
                Ok(Placement::Later) => {
                    grouped.deferred += 1;
                    deferred_from = Some(
                        deferred_from
                            .map_or(revision.revision_id, |id| id.min(revision.revision_id)),
                    );
                }
                Err(reason) => {
                    tracing::warn!(
                        revision_id = revision.revision_id,
                        user_id = revision.user_id,
                        "Skipping malformed revision: {}",
                        reason
                    );
                    grouped.anomalies += 1;
                }
            }
        }

        for upload in uploads {
            match self.upload_window(&upload) {
                Ok(Placement::Window(window)) => grouped
                    .batches
                    .entry(window)
                    .or_default()
                    .uploads
                    .push(upload),
                Ok(Placement::Later) => grouped.deferred += 1,
                Err(reason) => {
                    tracing::warn!(
                        user_id = upload.user_id,
                        timestamp = %upload.timestamp,
                        "Skipping malformed upload: {}",
                        reason
                    );
                    grouped.anomalies += 1;
                }
            }
        }

        if let Some(cap) = deferred_from {
            for batch in grouped.batches.values_mut() {
                let before = batch.revisions.len();
                batch.revisions.retain(|r| r.revision_id < cap);
                grouped.deferred += before - batch.revisions.len();
            }
            tracing::debug!(
                revision_id = cap,
                deferred = grouped.deferred,
                "Deferring revisions after the refreshed period"
            );
        }

        for batch in grouped.batches.values_mut() {
            batch.revisions.sort_by_key(|r| r.revision_id);
            batch.uploads.sort_by_key(|u| u.timestamp);
        }

        grouped
    }

    fn revision_window(&self, revision: &FetchedRevision) -> Result<Placement, &'static str> {
        if revision.revision_id <= 0 {
            return Err("non-positive revision id");
        }
        if revision.namespace() == Namespace::Main && revision.article_id.is_none() {
            return Err("mainspace revision without article id");
        }
        if !self.students.contains(&revision.user_id) {
            return Err("author is not an enrolled student");
        }

        self.place(revision.timestamp)
    }

    fn upload_window(&self, upload: &FetchedUpload) -> Result<Placement, &'static str> {
        if upload.usage_count < 0 {
            return Err("negative usage count");
        }
        if !self.students.contains(&upload.user_id) {
            return Err("uploader is not an enrolled student");
        }

        self.place(upload.timestamp)
    }

    fn place(&self, timestamp: NaiveDateTime) -> Result<Placement, &'static str> {
        if let Some(window) = window_for(self.windows, timestamp) {
            return Ok(Placement::Window(window));
        }

        match self.windows.last() {
            Some(last) if timestamp >= last.end && timestamp <= self.period_end => {
                Ok(Placement::Later)
            }
            _ => Err("timestamp outside the refreshed period"),
        }
    }
}
