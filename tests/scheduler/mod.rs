use chrono::{Duration, Utc};
use coursestats::{
    config::SchedulerConfig, data::update_log::CourseUpdateLogRepository,
    scheduler::course_update::update_active_courses,
};
use coursestats_test_utils::prelude::*;

use crate::util::Doubles;

const ACTIVE_SLUG: &str = "Test_University/Active_Course";
const ENDED_SLUG: &str = "Test_University/Ended_Course";

fn relative_timestamp(offset: Duration) -> String {
    (Utc::now().naive_utc() + offset)
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}

/// Tests a scheduled run over one running and one long finished course.
///
/// Expected: only the running course updates and gets an audit log entry
#[tokio::test]
async fn updates_only_active_courses() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .with_course(factory::course(
            ACTIVE_SLUG,
            &relative_timestamp(-Duration::days(3)),
            &relative_timestamp(Duration::days(3)),
        ))
        .with_course(factory::course(
            ENDED_SLUG,
            &relative_timestamp(-Duration::days(400)),
            &relative_timestamp(-Duration::days(300)),
        ))
        .with_course_wiki(ACTIVE_SLUG, Some(TEST_LANGUAGE), TEST_PROJECT)
        .with_course_wiki(ENDED_SLUG, Some(TEST_LANGUAGE), TEST_PROJECT)
        .build()
        .await?;
    let active = test.course(ACTIVE_SLUG).await?;
    let ended = test.course(ENDED_SLUG).await?;
    let doubles = Doubles::new();

    let result = update_active_courses(&doubles.context(&test), &SchedulerConfig::default()).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(result.unwrap(), 1);

    let log_repo = CourseUpdateLogRepository::new(&test.db);
    assert_eq!(log_repo.list(active.id).await?.len(), 1);
    assert!(log_repo.list(ended.id).await?.is_empty());

    Ok(())
}

/// Tests a scheduled run for a course that ended within the grace period.
///
/// Expected: the course still updates
#[tokio::test]
async fn updates_recently_ended_course() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .with_course(factory::course(
            ENDED_SLUG,
            &relative_timestamp(-Duration::days(20)),
            &relative_timestamp(-Duration::days(5)),
        ))
        .build()
        .await?;
    let doubles = Doubles::new();
    let config = SchedulerConfig {
        grace_period: Duration::days(7),
        ..SchedulerConfig::default()
    };

    let result = update_active_courses(&doubles.context(&test), &config).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(result.unwrap(), 1);

    Ok(())
}

/// Tests a scheduled run with no courses.
///
/// Expected: nothing updates
#[tokio::test]
async fn no_courses_updates_nothing() -> Result<(), TestError> {
    let test = TestBuilder::new().with_course_tables().build().await?;
    let doubles = Doubles::new();

    let result = update_active_courses(&doubles.context(&test), &SchedulerConfig::default()).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(result.unwrap(), 0);
    assert!(doubles.revisions.markers().is_empty());

    Ok(())
}
