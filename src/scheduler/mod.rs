//! Scheduler for periodic course statistics updates.
//!
//! A single cron job selects the courses that are running or ended within the grace period and
//! updates them with bounded concurrency. Each run isolates its own failures, so one course
//! failing never prevents the others from updating.

pub mod course_update;

use dioxus_logger::tracing;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    config::SchedulerConfig, error::Error, scheduler::course_update::update_active_courses,
    service::orchestrator::UpdateContext,
};

/// Initialize and start the cron job scheduler
pub async fn start_scheduler(
    ctx: UpdateContext,
    config: SchedulerConfig,
) -> Result<JobScheduler, Error> {
    let sched = JobScheduler::new().await?;
    let cron_expression = config.cron_expression.clone();

    sched
        .add(Job::new_async(cron_expression.as_str(), move |_, _| {
            let ctx = ctx.clone();
            let config = config.clone();

            Box::pin(async move {
                match update_active_courses(&ctx, &config).await {
                    Ok(count) => tracing::info!("Ran {} scheduled course update(s)", count),
                    Err(e) => tracing::error!("Error scheduling course updates: {:?}", e),
                }
            })
        })?)
        .await?;

    sched.start().await?;

    tracing::info!(cron = %cron_expression, "Started course update scheduler");

    Ok(sched)
}
