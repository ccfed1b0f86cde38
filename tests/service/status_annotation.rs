//! Tests for the optional status annotation step and debug progress events.

use coursestats::service::orchestrator::{AnnotationDecision, CourseUpdateService};

use super::*;
use crate::util::Doubles;

/// Tests a product with status annotation support.
///
/// Expected: annotate is called once with the tracked article IDs
#[tokio::test]
async fn annotates_tracked_articles_when_supported() -> Result<(), TestError> {
    let test = course_builder()
        .with_article(TEST_COURSE_SLUG, Some(TEST_LANGUAGE), TEST_PROJECT, 30, false)
        .build()
        .await?;
    let course = test.course(TEST_COURSE_SLUG).await?;
    let doubles = Doubles::new();

    let result = CourseUpdateService::new(doubles.context(&test))
        .update_course(course.id)
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(
        result.unwrap().annotation,
        AnnotationDecision::Ran { article_count: 1 }
    );
    assert_eq!(*doubles.annotator.calls.lock().unwrap(), vec![vec![ARTICLE_X]]);

    Ok(())
}

/// Tests an unsupported product with a course known to update slowly.
///
/// Expected: annotation is skipped without calling the annotator
#[tokio::test]
async fn skips_annotation_when_unsupported_and_over_ceiling() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .with_course(
            factory::course(TEST_COURSE_SLUG, "2018-11-23T00:00:00", "2018-11-30T00:00:00")
                .longest_update_secs(7200),
        )
        .with_course_wiki(TEST_COURSE_SLUG, Some(TEST_LANGUAGE), TEST_PROJECT)
        .with_article(TEST_COURSE_SLUG, Some(TEST_LANGUAGE), TEST_PROJECT, ARTICLE_X, true)
        .build()
        .await?;
    let course = test.course(TEST_COURSE_SLUG).await?;
    let doubles = Doubles::new().without_status_annotation();

    let result = CourseUpdateService::new(doubles.context(&test))
        .update_course(course.id)
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let outcome = result.unwrap();
    assert!(matches!(outcome.annotation, AnnotationDecision::Skipped { .. }));
    assert_eq!(doubles.annotator.call_count(), 0);
    assert_eq!(outcome.error_count, 0);

    Ok(())
}

/// Tests an unsupported product with a course estimated under the ceiling.
///
/// Expected: annotation still runs
#[tokio::test]
async fn annotates_when_unsupported_but_within_ceiling() -> Result<(), TestError> {
    let test = course_builder().build().await?;
    let course = test.course(TEST_COURSE_SLUG).await?;
    let doubles = Doubles::new().without_status_annotation();

    let result = CourseUpdateService::new(doubles.context(&test))
        .update_course(course.id)
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(doubles.annotator.call_count(), 1);

    Ok(())
}

/// Tests progress events for a course with debug updates.
///
/// Expected: start, one per wiki, annotation decision and end events
#[tokio::test]
async fn emits_progress_events_in_debug_mode() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .with_course(
            factory::course(TEST_COURSE_SLUG, "2018-11-23T00:00:00", "2018-11-30T00:00:00")
                .debug_updates(),
        )
        .with_course_wiki(TEST_COURSE_SLUG, Some(TEST_LANGUAGE), TEST_PROJECT)
        .with_course_wiki(TEST_COURSE_SLUG, Some("es"), TEST_PROJECT)
        .with_student(TEST_COURSE_SLUG, STUDENT_A)
        .build()
        .await?;
    let course = test.course(TEST_COURSE_SLUG).await?;
    let doubles = Doubles::new();

    let result = CourseUpdateService::new(doubles.context(&test))
        .update_course(course.id)
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let outcome = result.unwrap();
    assert_eq!(doubles.tracker.message_count(), 5);
    for (_, tags) in doubles.tracker.messages.lock().unwrap().iter() {
        assert_eq!(tags.get("correlation_id"), Some(outcome.correlation_id.as_str()));
    }

    Ok(())
}

/// Tests progress events for a course without debug updates.
///
/// Expected: no events
#[tokio::test]
async fn emits_no_progress_events_by_default() -> Result<(), TestError> {
    let (revisions, uploads) = reference_activity();
    let test = course_builder().build().await?;
    let course = test.course(TEST_COURSE_SLUG).await?;
    let doubles = Doubles::new();
    doubles.revisions.set(TEST_LANGUAGE, TEST_PROJECT, revisions);
    doubles.uploads.set(TEST_LANGUAGE, TEST_PROJECT, uploads);

    let result = CourseUpdateService::new(doubles.context(&test))
        .update_course(course.id)
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(doubles.tracker.message_count(), 0);

    Ok(())
}
