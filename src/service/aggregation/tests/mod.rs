
use chrono::{Duration, NaiveDateTime};
use coursestats_test_utils::prelude::*;

use super::*;
use crate::{
    model::{
        activity::{FetchedRevision, FetchedUpload, Namespace},
        db::{CourseModel, WikiModel},
        timeslice::Window,
    },
    util::time::enumerate_windows,
};

const STUDENT_ID: i64 = 1;
const TRACKED_ARTICLE_ID: i64 = 100;
const UNTRACKED_ARTICLE_ID: i64 = 200;

/// Course running 2018-11-23 to 2018-11-30 with one wiki, one student and two known articles.
async fn setup() -> Result<(TestContext, CourseModel, WikiModel, Vec<Window>), TestError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .with_course(factory::course(
            TEST_COURSE_SLUG,
            "2018-11-23T00:00:00",
            "2018-11-30T00:00:00",
        ))
        .with_course_wiki(TEST_COURSE_SLUG, Some(TEST_LANGUAGE), TEST_PROJECT)
        .with_student(TEST_COURSE_SLUG, STUDENT_ID)
        .with_article(
            TEST_COURSE_SLUG,
            Some(TEST_LANGUAGE),
            TEST_PROJECT,
            TRACKED_ARTICLE_ID,
            true,
        )
        .with_article(
            TEST_COURSE_SLUG,
            Some(TEST_LANGUAGE),
            TEST_PROJECT,
            UNTRACKED_ARTICLE_ID,
            false,
        )
        .build()
        .await?;

    let course = test.course(TEST_COURSE_SLUG).await?;
    let wiki = test.wiki(Some(TEST_LANGUAGE), TEST_PROJECT).await?;
    let windows = enumerate_windows(course.start, course.end, course.end, Duration::days(1))
        .expect("fixture course period is valid");

    Ok((test, course, wiki, windows))
}

fn revision(
    revision_id: i64,
    article_id: i64,
    timestamp: NaiveDateTime,
    char_delta: i64,
    ref_delta: i64,
) -> FetchedRevision {
    FetchedRevision {
        revision_id,
        article_id: Some(article_id),
        user_id: STUDENT_ID,
        timestamp,
        char_delta,
        ref_delta,
        deleted: false,
        namespace: Namespace::MAIN_ID,
    }
}

fn upload(timestamp: NaiveDateTime, usage_count: i64) -> FetchedUpload {
    FetchedUpload {
        user_id: STUDENT_ID,
        timestamp,
        usage_count,
    }
}
