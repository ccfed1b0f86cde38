//! Tests for failure isolation between the external dependencies of an update run.

use coursestats::{
    data::{course::CourseRepository, update_log::CourseUpdateLogRepository},
    error::adapter::AdapterError,
    service::orchestrator::CourseUpdateService,
};

use super::*;
use crate::util::Doubles;

/// Course on three wikis with activity by student A on each.
async fn three_wiki_setup(doubles: &Doubles) -> Result<(TestContext, i32), TestError> {
    let test = course_builder()
        .with_course_wiki(TEST_COURSE_SLUG, Some("es"), TEST_PROJECT)
        .with_course_wiki(TEST_COURSE_SLUG, Some("fr"), TEST_PROJECT)
        .build()
        .await?;
    let course = test.course(TEST_COURSE_SLUG).await?;

    for (index, language) in [TEST_LANGUAGE, "es", "fr"].into_iter().enumerate() {
        let base = 1000 * (index as i64 + 1);
        doubles.revisions.set(
            language,
            TEST_PROJECT,
            vec![revision(base + 1, base + 1, factory::timestamp("2018-11-24T10:00:00"), 100, 1)],
        );
        doubles.uploads.set(
            language,
            TEST_PROJECT,
            vec![upload(factory::timestamp("2018-11-24T11:00:00"), 1)],
        );
    }

    Ok((test, course.id))
}

/// Tests one revision failure and one upload failure on different wikis.
///
/// Expected: error count 2 in the outcome and the audit log, the healthy fetches are applied
/// and both errors are captured with the run's correlation id and course tags
#[tokio::test]
async fn counts_each_failed_dependency_and_continues() -> Result<(), TestError> {
    let doubles = Doubles::new();
    let (test, course_id) = three_wiki_setup(&doubles).await?;
    doubles.revisions.fail(
        "es",
        TEST_PROJECT,
        AdapterError::Connectivity("connection reset".to_string()),
    );
    doubles.uploads.fail(
        "fr",
        TEST_PROJECT,
        AdapterError::Protocol("unexpected response".to_string()),
    );

    let result = CourseUpdateService::new(doubles.context(&test))
        .update_course(course_id)
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let outcome = result.unwrap();
    assert_eq!(outcome.error_count, 2);

    let logs = CourseUpdateLogRepository::new(&test.db)
        .list(course_id)
        .await?;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].error_count, 2);

    assert_eq!(
        doubles.tracker.exception_kinds(),
        vec!["AdapterConnectivityError", "AdapterProtocolError"]
    );
    for (_, tags) in doubles.tracker.exceptions.lock().unwrap().iter() {
        assert_eq!(tags.get("correlation_id"), Some(outcome.correlation_id.as_str()));
        assert_eq!(tags.get("course"), Some(TEST_COURSE_SLUG));
    }

    // en: everything, es: uploads only, fr: revisions only
    let course = CourseRepository::new(&test.db)
        .get_by_id(course_id)
        .await?
        .unwrap();
    assert_eq!(course.revision_count, 2);
    assert_eq!(course.character_sum, 200);
    assert_eq!(course.upload_count, 2);

    Ok(())
}

/// Tests a failed revision fetch followed by a healthy run.
///
/// Expected: the failed wiki's revisions are applied by the next run
#[tokio::test]
async fn failed_fetch_is_retried_by_next_run() -> Result<(), TestError> {
    let doubles = Doubles::new();
    let (test, course_id) = three_wiki_setup(&doubles).await?;
    doubles.revisions.fail(
        "es",
        TEST_PROJECT,
        AdapterError::Connectivity("timeout".to_string()),
    );

    let service = CourseUpdateService::new(doubles.context(&test));
    let first = service.update_course(course_id).await;
    assert!(first.is_ok(), "Error: {:?}", first);
    assert_eq!(first.unwrap().error_count, 1);

    doubles.revisions.set(
        "es",
        TEST_PROJECT,
        vec![revision(2001, 2001, factory::timestamp("2018-11-24T10:00:00"), 100, 1)],
    );
    let second = service.update_course(course_id).await;
    assert!(second.is_ok(), "Error: {:?}", second);
    assert_eq!(second.unwrap().error_count, 0);

    let course = CourseRepository::new(&test.db)
        .get_by_id(course_id)
        .await?
        .unwrap();
    assert_eq!(course.revision_count, 3);
    assert_eq!(course.upload_count, 3);

    Ok(())
}
