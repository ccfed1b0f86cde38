mod failure_isolation;
mod status_annotation;
mod update_course;

use chrono::NaiveDateTime;
use coursestats::model::activity::{FetchedRevision, FetchedUpload, Namespace};
use coursestats_test_utils::prelude::*;

/// Student user ID used across update tests.
pub const STUDENT_A: i64 = 1;
/// Article tracked by the course before any update.
pub const ARTICLE_X: i64 = 10;
/// Article the course has not touched before the update.
pub const ARTICLE_Y: i64 = 20;

pub fn revision(
    revision_id: i64,
    article_id: i64,
    timestamp: NaiveDateTime,
    char_delta: i64,
    ref_delta: i64,
) -> FetchedRevision {
    FetchedRevision {
        revision_id,
        article_id: Some(article_id),
        user_id: STUDENT_A,
        timestamp,
        char_delta,
        ref_delta,
        deleted: false,
        namespace: Namespace::MAIN_ID,
    }
}

pub fn upload(timestamp: NaiveDateTime, usage_count: i64) -> FetchedUpload {
    FetchedUpload {
        user_id: STUDENT_A,
        timestamp,
        usage_count,
    }
}

/// One week course on the test wiki with student A and tracked article X.
pub fn course_builder() -> TestBuilder {
    TestBuilder::new()
        .with_course_tables()
        .with_course(factory::course(
            TEST_COURSE_SLUG,
            "2018-11-23T00:00:00",
            "2018-11-30T00:00:00",
        ))
        .with_course_wiki(TEST_COURSE_SLUG, Some(TEST_LANGUAGE), TEST_PROJECT)
        .with_student(TEST_COURSE_SLUG, STUDENT_A)
        .with_article(TEST_COURSE_SLUG, Some(TEST_LANGUAGE), TEST_PROJECT, ARTICLE_X, true)
}

/// Revisions and uploads of the reference week.
///
/// Two revisions on X, one on the untouched Y and one deleted revision on X, plus two uploads
/// in use on 3 and 4 pages.
pub fn reference_activity() -> (Vec<FetchedRevision>, Vec<FetchedUpload>) {
    let revisions = vec![
        revision(101, ARTICLE_X, factory::timestamp("2018-11-23T10:00:00"), 5000, 4),
        revision(102, ARTICLE_X, factory::timestamp("2018-11-24T10:00:00"), 2000, 3),
        revision(103, ARTICLE_Y, factory::timestamp("2018-11-26T10:00:00"), 2012, 2),
        FetchedRevision {
            deleted: true,
            ..revision(104, ARTICLE_X, factory::timestamp("2018-11-28T10:00:00"), -2, -2)
        },
    ];
    let uploads = vec![
        upload(factory::timestamp("2018-11-25T09:00:00"), 3),
        upload(factory::timestamp("2018-11-29T09:00:00"), 4),
    ];

    (revisions, uploads)
}
