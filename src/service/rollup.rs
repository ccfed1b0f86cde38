//! Recomputation of cached course and participant totals from the timeslice tables.

use std::collections::HashMap;

use entity::course_user::CourseRole;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    data::{
        course::{CourseRepository, CourseTotals, CourseUserTotals},
        timeslice::{CourseUserWikiTimesliceRepository, CourseWikiTimesliceRepository},
    },
    error::Error,
    model::db::{CourseModel, CourseUserWikiTimesliceModel, CourseWikiTimesliceModel},
};

pub struct RollupService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RollupService<'a> {
    /// Creates a new instance of [`RollupService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Recompute the cached totals of a course and its students
    pub async fn recompute(&self, course: CourseModel) -> Result<CourseModel, Error> {
        let txn = self.db.begin().await?;

        let course_repo = CourseRepository::new(&txn);
        let students = course_repo
            .participants(course.id, CourseRole::Student)
            .await?;

        let wiki_timeslices = CourseWikiTimesliceRepository::new(&txn)
            .list_for_course(course.id)
            .await?;
        let mut totals = course_totals(&wiki_timeslices);
        totals.user_count = students.len() as i32;

        let user_timeslices = CourseUserWikiTimesliceRepository::new(&txn)
            .list_for_course(course.id)
            .await?;
        let mut user_totals = user_totals(&user_timeslices);

        for student in students {
            let totals = user_totals.remove(&student.user_id).unwrap_or_default();
            course_repo.update_user_totals(student, &totals).await?;
        }

        let course = course_repo.update_totals(course, &totals).await?;
        txn.commit().await?;

        Ok(course)
    }
}

fn course_totals(timeslices: &[CourseWikiTimesliceModel]) -> CourseTotals {
    timeslices
        .iter()
        .fold(CourseTotals::default(), |mut totals, timeslice| {
            totals.character_sum += timeslice.character_sum;
            totals.references_count += timeslice.references_count;
            totals.revision_count += timeslice.revision_count;
            totals.upload_count += timeslice.upload_count;
            totals.uploads_in_use_count += timeslice.uploads_in_use_count;
            totals.upload_usages_count += timeslice.upload_usages_count;
            totals
        })
}

fn user_totals(timeslices: &[CourseUserWikiTimesliceModel]) -> HashMap<i64, CourseUserTotals> {
    let mut totals: HashMap<i64, CourseUserTotals> = HashMap::new();

    for timeslice in timeslices {
        let user = totals.entry(timeslice.user_id).or_default();
        user.character_sum_ms += timeslice.character_sum_ms;
        user.character_sum_us += timeslice.character_sum_us;
        user.character_sum_draft += timeslice.character_sum_draft;
        user.references_count += timeslice.references_count;
        user.revision_count += timeslice.revision_count;
        user.total_uploads += timeslice.total_uploads;
    }

    totals
}
