use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use dioxus_logger::tracing;

use crate::{
    data::{timeslice::CourseWikiTimesliceRepository, wiki::WikiRepository},
    error::Error,
    model::{
        db::{CourseModel, WikiModel},
        timeslice::{HighWaterMark, Window},
    },
    service::{
        aggregation::{ActivityFilter, AggregationService},
        orchestrator::{run::UpdateRun, CourseUpdateService},
    },
};

/// What one run did for one wiki of a course.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WikiSummary {
    pub wiki_id: i32,
    pub windows_processed: usize,
    pub revisions_applied: usize,
    pub uploads_applied: usize,
    pub anomalies: usize,
    /// Valid records left for a later run.
    pub deferred: usize,
    /// A fetch or persistence step failed for this wiki.
    pub failed: bool,
}

impl CourseUpdateService {
    /// Fetch, aggregate and persist the new activity of one wiki.
    ///
    /// Failures are reported through `run` and end processing of this wiki only.
    pub(super) async fn update_wiki(
        &self,
        run: &mut UpdateRun,
        course: &CourseModel,
        wiki_id: i32,
        windows: &[Window],
        students: &HashSet<i64>,
    ) -> WikiSummary {
        let mut summary = WikiSummary {
            wiki_id,
            ..Default::default()
        };
        let tags = run.tags.clone().with("wiki_id", wiki_id);

        let wiki = match WikiRepository::new(&self.ctx.db).get_by_id(wiki_id).await {
            Ok(Some(wiki)) => wiki,
            Ok(None) => {
                run.report(
                    &Error::WikiNotFound {
                        course_id: course.id,
                        wiki_id,
                    },
                    tags,
                );
                summary.failed = true;
                return summary;
            }
            Err(e) => {
                run.report(&e.into(), tags);
                summary.failed = true;
                return summary;
            }
        };
        let tags = tags.with("wiki", wiki_label(&wiki));

        if windows.is_empty() {
            return summary;
        }

        // FETCH
        let mark = match self.fetch_mark(course.id, wiki.id, windows).await {
            Ok(mark) => mark,
            Err(e) => {
                run.report(&e, tags.with("step", "fetch_mark"));
                summary.failed = true;
                return summary;
            }
        };

        let revisions = match self
            .ctx
            .revisions
            .fetch_revisions(&wiki, mark.revision_marker())
            .await
        {
            Ok(revisions) => Some(revisions),
            Err(e) => {
                run.report(&e.into(), tags.clone().with("step", "fetch_revisions"));
                summary.failed = true;
                None
            }
        };
        let uploads = match self.ctx.uploads.fetch_uploads(&wiki, mark.upload_at).await {
            Ok(uploads) => Some(uploads),
            Err(e) => {
                run.report(&e.into(), tags.clone().with("step", "fetch_uploads"));
                summary.failed = true;
                None
            }
        };

        if revisions.is_none() && uploads.is_none() {
            return summary;
        }

        // AGGREGATE
        let mut grouped = ActivityFilter {
            windows,
            students,
            period_end: course.end,
        }
        .group(revisions.unwrap_or_default(), uploads.unwrap_or_default());
        summary.anomalies = grouped.anomalies;
        summary.deferred = grouped.deferred;

        // PERSIST
        let aggregation = AggregationService::new(&self.ctx.db);
        for window in windows {
            let batch = grouped.batches.remove(window).unwrap_or_default();

            match aggregation
                .apply_window(course.id, wiki.id, window, batch)
                .await
            {
                Ok(outcome) => {
                    summary.windows_processed += 1;
                    summary.revisions_applied += outcome.revisions_applied;
                    summary.uploads_applied += outcome.uploads_applied;
                }
                Err(e) => {
                    run.report(
                        &e,
                        tags.clone()
                            .with("step", "persist")
                            .with("window_start", window.start),
                    );
                    summary.failed = true;
                    break;
                }
            }
        }

        tracing::debug!(
            course_id = course.id,
            wiki_id = wiki.id,
            windows = summary.windows_processed,
            revisions = summary.revisions_applied,
            uploads = summary.uploads_applied,
            anomalies = summary.anomalies,
            deferred = summary.deferred,
            "Processed course wiki"
        );

        summary
    }

    /// Fetch marker for the windows being refreshed
    ///
    /// Only the leading run of windows that already have a stored record contributes. A window
    /// without a record may hold activity older than the marks of later windows, so the marker
    /// never moves past it.
    async fn fetch_mark(
        &self,
        course_id: i32,
        wiki_id: i32,
        windows: &[Window],
    ) -> Result<HighWaterMark, Error> {
        let timeslices: HashMap<NaiveDateTime, HighWaterMark> =
            CourseWikiTimesliceRepository::new(&self.ctx.db)
                .list(course_id, wiki_id)
                .await?
                .iter()
                .map(|timeslice| (timeslice.start, HighWaterMark::from_timeslice(timeslice)))
                .collect();

        Ok(windows
            .iter()
            .map_while(|window| timeslices.get(&window.start).copied())
            .fold(HighWaterMark::default(), HighWaterMark::max))
    }
}

fn wiki_label(wiki: &WikiModel) -> String {
    match &wiki.language {
        Some(language) => format!("{}.{}", language, wiki.project),
        None => wiki.project.clone(),
    }
}
