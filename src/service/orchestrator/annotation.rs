use chrono::Duration;
use dioxus_logger::tracing;

use crate::{
    adapter::Feature,
    data::{articles_courses::ArticlesCoursesRepository, course::CourseRepository},
    model::{course::CourseFlags, db::CourseModel},
    service::orchestrator::{run::UpdateRun, CourseUpdateService},
    util::time::span_days,
};

/// What the status annotation step did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnnotationDecision {
    /// Annotation ran for the tracked articles.
    Ran { article_count: usize },
    /// Unsupported for the product and estimated to exceed the duration ceiling.
    Skipped { estimate: Duration },
    /// Annotation was attempted and failed.
    Failed,
}

/// Estimated duration of a full update of a course.
///
/// The largest of the span-based estimate, the longest observed duration and the longest
/// duration in the audit log.
pub fn estimate_update_duration(
    course: &CourseModel,
    flags: &CourseFlags,
    secs_per_day: i64,
) -> Duration {
    let span_estimate = Duration::seconds(span_days(course.start, course.end) * secs_per_day);

    [
        Some(span_estimate),
        flags.longest_update,
        flags.longest_logged_update(),
    ]
    .into_iter()
    .flatten()
    .max()
    .unwrap_or_else(Duration::zero)
}

impl CourseUpdateService {
    pub(super) async fn annotate(
        &self,
        run: &mut UpdateRun,
        course: &CourseModel,
    ) -> AnnotationDecision {
        let tags = run.tags.clone().with("step", "status_annotation");

        let supported = self
            .ctx
            .features
            .product_supports(Feature::StatusAnnotation, course);

        if !supported {
            let flags = match CourseRepository::new(&self.ctx.db).flags(course).await {
                Ok(flags) => flags,
                Err(e) => {
                    run.report(&e.into(), tags.clone());
                    CourseFlags::new(course, Vec::new())
                }
            };
            let estimate =
                estimate_update_duration(course, &flags, self.ctx.config.estimated_secs_per_day);

            if estimate > self.ctx.config.update_duration_ceiling {
                tracing::info!(
                    course_id = course.id,
                    estimate_secs = estimate.num_seconds(),
                    "Skipping status annotation for long running course"
                );
                run.debug_event(
                    &format!(
                        "Skipped status annotation, estimated {} s exceeds ceiling",
                        estimate.num_seconds()
                    ),
                    &tags,
                );
                return AnnotationDecision::Skipped { estimate };
            }
        }

        let article_ids = match ArticlesCoursesRepository::new(&self.ctx.db)
            .tracked_article_ids(course.id)
            .await
        {
            Ok(article_ids) => article_ids,
            Err(e) => {
                run.report(&e.into(), tags);
                return AnnotationDecision::Failed;
            }
        };

        run.debug_event(
            &format!("Running status annotation for {} articles", article_ids.len()),
            &tags,
        );

        match self.ctx.annotator.annotate(&article_ids).await {
            Ok(()) => AnnotationDecision::Ran {
                article_count: article_ids.len(),
            },
            Err(e) => {
                run.report(&e.into(), tags);
                AnnotationDecision::Failed
            }
        }
    }
}
