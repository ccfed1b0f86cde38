use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use dioxus_logger::tracing;
use futures::StreamExt;

use crate::{
    config::SchedulerConfig,
    data::course::CourseRepository,
    error::Error,
    service::orchestrator::{CourseUpdateService, UpdateContext},
};

/// Update every course whose period overlaps `[now - grace period, now]`
///
/// At most `max_concurrent_updates` courses update at once. Courses that are already being
/// updated are skipped.
///
/// # Returns
/// - `Ok(usize)` - Number of course updates that ran
/// - `Err(Error::DbErr)` - Selecting the active courses failed
pub async fn update_active_courses(
    ctx: &UpdateContext,
    config: &SchedulerConfig,
) -> Result<usize, Error> {
    let now = Utc::now().naive_utc();
    let courses = CourseRepository::new(&ctx.db)
        .find_active_between(now - config.grace_period, now)
        .await?;

    let completed = AtomicUsize::new(0);
    let service = CourseUpdateService::new(ctx.clone());

    futures::stream::iter(courses)
        .for_each_concurrent(config.max_concurrent_updates, |course| {
            let service = &service;
            let completed = &completed;

            async move {
                match service.update_course(course.id).await {
                    Ok(outcome) => {
                        completed.fetch_add(1, Ordering::Relaxed);
                        tracing::info!(
                            course_id = course.id,
                            correlation_id = %outcome.correlation_id,
                            error_count = outcome.error_count,
                            duration_ms = outcome.duration.num_milliseconds(),
                            "Scheduled course update finished"
                        );
                    }
                    Err(Error::UpdateInProgress(course_id)) => tracing::info!(
                        course_id = course_id,
                        "Skipping scheduled update; course update already in progress"
                    ),
                    Err(e) => tracing::error!(
                        course_id = course.id,
                        "Scheduled course update failed: {:?}",
                        e
                    ),
                }
            }
        })
        .await;

    Ok(completed.into_inner())
}
