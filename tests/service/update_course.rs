//! Tests for CourseUpdateService::update_course and update_course_window.

use coursestats::{
    data::{
        articles_courses::ArticlesCoursesRepository, course::CourseRepository,
        timeslice::CourseWikiTimesliceRepository, update_log::CourseUpdateLogRepository,
    },
    error::Error,
    service::orchestrator::CourseUpdateService,
};
use entity::course_user::CourseRole;

use super::*;
use crate::util::Doubles;

/// Tests a full update over the reference week.
///
/// Expected: course totals of 9010 characters, 7 references, 3 revisions, 2 uploads in use
/// on 7 pages, a tracked association for Y and one audit log entry without errors
#[tokio::test]
async fn updates_reference_week() -> Result<(), TestError> {
    let test = course_builder().build().await?;
    let course = test.course(TEST_COURSE_SLUG).await?;
    let wiki = test.wiki(Some(TEST_LANGUAGE), TEST_PROJECT).await?;

    let doubles = Doubles::new();
    let (revisions, uploads) = reference_activity();
    doubles.revisions.set(TEST_LANGUAGE, TEST_PROJECT, revisions);
    doubles.uploads.set(TEST_LANGUAGE, TEST_PROJECT, uploads);

    let result = CourseUpdateService::new(doubles.context(&test))
        .update_course(course.id)
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let outcome = result.unwrap();
    assert_eq!(outcome.error_count, 0);
    assert_eq!(outcome.wikis.len(), 1);
    assert_eq!(outcome.wikis[0].revisions_applied, 4);
    assert_eq!(outcome.wikis[0].uploads_applied, 2);
    assert_eq!(outcome.wikis[0].windows_processed, 7);

    let course_repo = CourseRepository::new(&test.db);
    let course = course_repo.get_by_id(course.id).await?.unwrap();
    assert_eq!(course.character_sum, 9010);
    assert_eq!(course.references_count, 7);
    assert_eq!(course.revision_count, 3);
    assert_eq!(course.upload_count, 2);
    assert_eq!(course.uploads_in_use_count, 2);
    assert_eq!(course.upload_usages_count, 7);
    assert_eq!(course.user_count, 1);

    let students = course_repo
        .participants(course.id, CourseRole::Student)
        .await?;
    assert_eq!(students[0].character_sum_ms, 9010);
    assert_eq!(students[0].revision_count, 3);
    assert_eq!(students[0].total_uploads, 2);

    let articles_repo = ArticlesCoursesRepository::new(&test.db);
    let x = articles_repo
        .find(course.id, wiki.id, ARTICLE_X)
        .await?
        .unwrap();
    assert_eq!(x.revision_count, 2);
    assert_eq!(x.character_sum, 6998);
    let y = articles_repo
        .find(course.id, wiki.id, ARTICLE_Y)
        .await?
        .unwrap();
    assert!(y.tracked);
    assert_eq!(y.revision_count, 1);

    let logs = CourseUpdateLogRepository::new(&test.db)
        .list(course.id)
        .await?;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].error_count, 0);
    assert_eq!(logs[0].correlation_id, outcome.correlation_id);
    assert!(course.longest_update_secs.is_some());

    Ok(())
}

/// Tests running the same update twice without new activity.
///
/// Expected: identical totals, second fetch asks only for revisions after 104, two log entries
#[tokio::test]
async fn second_run_is_idempotent() -> Result<(), TestError> {
    let test = course_builder().build().await?;
    let course = test.course(TEST_COURSE_SLUG).await?;

    let doubles = Doubles::new();
    let (revisions, uploads) = reference_activity();
    doubles.revisions.set(TEST_LANGUAGE, TEST_PROJECT, revisions);
    doubles.uploads.set(TEST_LANGUAGE, TEST_PROJECT, uploads);

    let service = CourseUpdateService::new(doubles.context(&test));
    assert!(service.update_course(course.id).await.is_ok());
    let second = service.update_course(course.id).await;

    assert!(second.is_ok(), "Error: {:?}", second);
    let second = second.unwrap();
    assert_eq!(second.wikis[0].revisions_applied, 0);
    assert_eq!(second.wikis[0].uploads_applied, 0);

    let markers = doubles.revisions.markers();
    assert_eq!(markers[0].revision_id, None);
    assert_eq!(markers[1].revision_id, Some(104));

    let course = CourseRepository::new(&test.db)
        .get_by_id(course.id)
        .await?
        .unwrap();
    assert_eq!(course.character_sum, 9010);
    assert_eq!(course.revision_count, 3);
    assert_eq!(course.upload_usages_count, 7);

    let logs = CourseUpdateLogRepository::new(&test.db)
        .list(course.id)
        .await?;
    assert_eq!(logs.len(), 2);
    assert_ne!(logs[0].correlation_id, logs[1].correlation_id);

    Ok(())
}

/// Tests activity arriving between two runs.
///
/// Expected: only the new revision is added by the second run
#[tokio::test]
async fn later_run_adds_only_new_activity() -> Result<(), TestError> {
    let test = course_builder().build().await?;
    let course = test.course(TEST_COURSE_SLUG).await?;

    let doubles = Doubles::new();
    let (mut revisions, _) = reference_activity();
    doubles
        .revisions
        .set(TEST_LANGUAGE, TEST_PROJECT, revisions.clone());

    let service = CourseUpdateService::new(doubles.context(&test));
    assert!(service.update_course(course.id).await.is_ok());

    revisions.push(revision(
        105,
        ARTICLE_X,
        factory::timestamp("2018-11-29T12:00:00"),
        40,
        1,
    ));
    doubles.revisions.set(TEST_LANGUAGE, TEST_PROJECT, revisions);
    let result = service.update_course(course.id).await;
    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(result.unwrap().wikis[0].revisions_applied, 1);

    let course = CourseRepository::new(&test.db)
        .get_by_id(course.id)
        .await?
        .unwrap();
    assert_eq!(course.character_sum, 9050);
    assert_eq!(course.references_count, 8);
    assert_eq!(course.revision_count, 4);

    Ok(())
}

/// Tests malformed and foreign records in a fetched batch.
///
/// Expected: skipped as anomalies without counting as run errors
#[tokio::test]
async fn skips_malformed_records_without_errors() -> Result<(), TestError> {
    let test = course_builder().build().await?;
    let course = test.course(TEST_COURSE_SLUG).await?;

    let doubles = Doubles::new();
    doubles.revisions.set(
        TEST_LANGUAGE,
        TEST_PROJECT,
        vec![
            revision(-1, ARTICLE_X, factory::timestamp("2018-11-23T10:00:00"), 10, 0),
            FetchedRevision {
                user_id: 99,
                ..revision(201, ARTICLE_X, factory::timestamp("2018-11-23T11:00:00"), 10, 0)
            },
            revision(202, ARTICLE_X, factory::timestamp("2019-01-01T00:00:00"), 10, 0),
            revision(203, ARTICLE_X, factory::timestamp("2018-11-23T12:00:00"), 10, 0),
        ],
    );
    doubles.uploads.set(
        TEST_LANGUAGE,
        TEST_PROJECT,
        vec![upload(factory::timestamp("2018-11-23T12:00:00"), -3)],
    );

    let result = CourseUpdateService::new(doubles.context(&test))
        .update_course(course.id)
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let outcome = result.unwrap();
    assert_eq!(outcome.error_count, 0);
    assert_eq!(outcome.wikis[0].anomalies, 4);
    assert_eq!(outcome.wikis[0].revisions_applied, 1);

    let course = CourseRepository::new(&test.db)
        .get_by_id(course.id)
        .await?
        .unwrap();
    assert_eq!(course.character_sum, 10);
    assert_eq!(course.upload_count, 0);

    Ok(())
}

/// Tests updating a sub-range of the course period.
///
/// Expected: only windows overlapping the range are refreshed
#[tokio::test]
async fn update_course_window_refreshes_selected_windows() -> Result<(), TestError> {
    let test = course_builder().build().await?;
    let course = test.course(TEST_COURSE_SLUG).await?;
    let wiki = test.wiki(Some(TEST_LANGUAGE), TEST_PROJECT).await?;

    let doubles = Doubles::new();
    let (revisions, _) = reference_activity();
    doubles.revisions.set(TEST_LANGUAGE, TEST_PROJECT, revisions);

    let result = CourseUpdateService::new(doubles.context(&test))
        .update_course_window(
            course.id,
            factory::timestamp("2018-11-20T00:00:00"),
            factory::timestamp("2018-11-23T12:00:00"),
        )
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let outcome = result.unwrap();
    assert_eq!(outcome.wikis[0].windows_processed, 1);
    assert_eq!(outcome.wikis[0].revisions_applied, 1);

    let timeslices = CourseWikiTimesliceRepository::new(&test.db)
        .list(course.id, wiki.id)
        .await?;
    assert_eq!(timeslices.len(), 1);
    assert_eq!(timeslices[0].start, course.start);
    assert_eq!(timeslices[0].character_sum, 5000);

    Ok(())
}

/// Tests a refresh of the last days followed by a full update.
///
/// Expected: the full update fetches from the start again and reaches the reference totals
#[tokio::test]
async fn full_update_after_late_range_keeps_earlier_activity() -> Result<(), TestError> {
    let test = course_builder().build().await?;
    let course = test.course(TEST_COURSE_SLUG).await?;

    let doubles = Doubles::new();
    let (revisions, uploads) = reference_activity();
    doubles.revisions.set(TEST_LANGUAGE, TEST_PROJECT, revisions);
    doubles.uploads.set(TEST_LANGUAGE, TEST_PROJECT, uploads);

    let service = CourseUpdateService::new(doubles.context(&test));
    let range = service
        .update_course_window(
            course.id,
            factory::timestamp("2018-11-28T00:00:00"),
            factory::timestamp("2018-11-30T00:00:00"),
        )
        .await;
    assert!(range.is_ok(), "Error: {:?}", range);
    let range = range.unwrap();
    assert_eq!(range.wikis[0].revisions_applied, 1);
    assert_eq!(range.wikis[0].uploads_applied, 1);

    let full = service.update_course(course.id).await;

    assert!(full.is_ok(), "Error: {:?}", full);
    let full = full.unwrap();
    assert_eq!(full.wikis[0].revisions_applied, 3);
    assert_eq!(full.wikis[0].uploads_applied, 1);
    assert_eq!(doubles.revisions.markers()[1].revision_id, None);

    let course = CourseRepository::new(&test.db)
        .get_by_id(course.id)
        .await?
        .unwrap();
    assert_eq!(course.character_sum, 9010);
    assert_eq!(course.references_count, 7);
    assert_eq!(course.revision_count, 3);
    assert_eq!(course.upload_count, 2);
    assert_eq!(course.uploads_in_use_count, 2);
    assert_eq!(course.upload_usages_count, 7);

    Ok(())
}

/// Tests updating a course that does not exist.
///
/// Expected: Err(CourseNotFound)
#[tokio::test]
async fn unknown_course_fails() -> Result<(), TestError> {
    let test = course_builder().build().await?;
    let doubles = Doubles::new();

    let result = CourseUpdateService::new(doubles.context(&test))
        .update_course(999)
        .await;

    assert!(matches!(result, Err(Error::CourseNotFound(999))));

    Ok(())
}

/// Tests starting an update while another run holds the course lock.
///
/// Expected: Err(UpdateInProgress) and no audit log entry
#[tokio::test]
async fn concurrent_update_is_rejected() -> Result<(), TestError> {
    let test = course_builder().build().await?;
    let course = test.course(TEST_COURSE_SLUG).await?;
    let doubles = Doubles::new();
    let ctx = doubles.context(&test);

    let _guard = ctx.locks.try_acquire(course.id).await.unwrap();
    let result = CourseUpdateService::new(ctx.clone())
        .update_course(course.id)
        .await;

    assert!(matches!(result, Err(Error::UpdateInProgress(id)) if id == course.id));
    assert!(CourseUpdateLogRepository::new(&test.db)
        .list(course.id)
        .await?
        .is_empty());

    Ok(())
}

/// Tests deleting a course after an update.
///
/// Expected: every cached row of the course is removed
#[tokio::test]
async fn deleting_course_removes_caches() -> Result<(), TestError> {
    use sea_orm::{EntityTrait, PaginatorTrait};

    let test = course_builder().build().await?;
    let course = test.course(TEST_COURSE_SLUG).await?;

    let doubles = Doubles::new();
    let (revisions, uploads) = reference_activity();
    doubles.revisions.set(TEST_LANGUAGE, TEST_PROJECT, revisions);
    doubles.uploads.set(TEST_LANGUAGE, TEST_PROJECT, uploads);
    assert!(CourseUpdateService::new(doubles.context(&test))
        .update_course(course.id)
        .await
        .is_ok());

    assert!(CourseRepository::new(&test.db).delete(course.id).await?);

    assert_eq!(
        entity::prelude::CourseWikiTimeslice::find().count(&test.db).await?,
        0
    );
    assert_eq!(
        entity::prelude::ArticleCourseTimeslice::find()
            .count(&test.db)
            .await?,
        0
    );
    assert_eq!(
        entity::prelude::CourseUpdateLog::find().count(&test.db).await?,
        0
    );

    Ok(())
}
