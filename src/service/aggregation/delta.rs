//! Delta derivation and the four per-scope merge functions.
//!
//! One window pass derives a [`TimesliceDelta`] for the course-wiki scope, one per participant
//! and one per article. Each merge function folds a delta into the stored record of its scope
//! and returns the active model to persist, without touching the database itself.

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use sea_orm::{ActiveValue, IntoActiveModel};

use crate::{
    data::{decode_user_ids, encode_user_ids},
    model::{
        activity::Namespace,
        db::{
            ArticleCourseTimesliceModel, ArticlesCoursesModel, CourseUserWikiTimesliceModel,
            CourseWikiTimesliceModel,
        },
        timeslice::{HighWaterMark, TimesliceDelta},
    },
    service::aggregation::batch::WindowBatch,
};

/// Deltas derived from one window batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WindowDeltas {
    pub course_wiki: TimesliceDelta,
    /// Keyed by user ID.
    pub users: BTreeMap<i64, TimesliceDelta>,
    /// Keyed by article ID, mainspace only.
    pub articles: BTreeMap<i64, TimesliceDelta>,
}

/// Derive per-scope deltas for a batch of not yet applied activity.
///
/// `tracked` maps article IDs to their tracked flag; articles missing from it are new
/// associations, which start out tracked.
pub fn derive_deltas(batch: &WindowBatch, tracked: &HashMap<i64, bool>) -> WindowDeltas {
    let mut deltas = WindowDeltas::default();

    for revision in &batch.revisions {
        deltas
            .course_wiki
            .mark
            .advance_revision(revision.revision_id, revision.timestamp);
        let live = i64::from(!revision.deleted);

        match revision.namespace() {
            Namespace::Main => {
                let Some(article_id) = revision.article_id else {
                    continue;
                };
                let counted = live * i64::from(tracked.get(&article_id).copied().unwrap_or(true));

                let course_wiki = &mut deltas.course_wiki;
                course_wiki.character_sum += revision.char_delta;
                course_wiki.references_count += revision.ref_delta;
                course_wiki.revision_count += counted;

                let user = deltas.users.entry(revision.user_id).or_default();
                user.character_sum += revision.char_delta;
                user.references_count += revision.ref_delta;
                user.revision_count += counted;

                let article = deltas.articles.entry(article_id).or_default();
                article.character_sum += revision.char_delta;
                article.references_count += revision.ref_delta;
                article.revision_count += counted;
                article.user_ids.insert(revision.user_id);
            }
            Namespace::User | Namespace::UserTalk => {
                let user = deltas.users.entry(revision.user_id).or_default();
                user.character_sum_us += revision.char_delta;
                user.revision_count += live;
            }
            Namespace::Draft => {
                let user = deltas.users.entry(revision.user_id).or_default();
                user.character_sum_draft += revision.char_delta;
                user.revision_count += live;
            }
            Namespace::Other(_) => {}
        }
    }

    for upload in &batch.uploads {
        let course_wiki = &mut deltas.course_wiki;
        course_wiki.mark.advance_upload(upload.timestamp);
        course_wiki.upload_count += 1;
        course_wiki.uploads_in_use_count += i64::from(upload.usage_count > 0);
        course_wiki.upload_usages_count += upload.usage_count;

        deltas.users.entry(upload.user_id).or_default().upload_count += 1;
    }

    deltas
}

/// Merge a delta into a course-wiki window.
///
/// Returns `None` when the delta's mark is not ahead of the stored mark, so replaying an
/// already applied range changes nothing.
pub fn merge_course_wiki(
    timeslice: CourseWikiTimesliceModel,
    delta: &TimesliceDelta,
) -> Option<entity::course_wiki_timeslice::ActiveModel> {
    let stored = HighWaterMark::from_timeslice(&timeslice);
    if !delta.mark.is_ahead_of(&stored) {
        return None;
    }
    let mark = stored.max(delta.mark);

    let totals = (
        timeslice.character_sum + delta.character_sum,
        timeslice.references_count + delta.references_count,
        timeslice.revision_count + delta.revision_count,
        timeslice.upload_count + delta.upload_count,
        timeslice.uploads_in_use_count + delta.uploads_in_use_count,
        timeslice.upload_usages_count + delta.upload_usages_count,
    );

    let mut active = timeslice.into_active_model();
    active.character_sum = ActiveValue::Set(totals.0);
    active.references_count = ActiveValue::Set(totals.1);
    active.revision_count = ActiveValue::Set(totals.2);
    active.upload_count = ActiveValue::Set(totals.3);
    active.uploads_in_use_count = ActiveValue::Set(totals.4);
    active.upload_usages_count = ActiveValue::Set(totals.5);
    active.last_mw_rev_id = ActiveValue::Set(mark.revision_id);
    active.last_mw_rev_at = ActiveValue::Set(mark.revision_at);
    active.last_upload_at = ActiveValue::Set(mark.upload_at);
    active.updated_at = ActiveValue::Set(Utc::now().naive_utc());

    Some(active)
}

/// Merge a participant's delta into their course-user-wiki window.
pub fn merge_user_wiki(
    timeslice: CourseUserWikiTimesliceModel,
    delta: &TimesliceDelta,
) -> entity::course_user_wiki_timeslice::ActiveModel {
    let totals = (
        timeslice.character_sum_ms + delta.character_sum,
        timeslice.character_sum_us + delta.character_sum_us,
        timeslice.character_sum_draft + delta.character_sum_draft,
        timeslice.references_count + delta.references_count,
        timeslice.revision_count + delta.revision_count,
        timeslice.total_uploads + delta.upload_count,
    );

    let mut active = timeslice.into_active_model();
    active.character_sum_ms = ActiveValue::Set(totals.0);
    active.character_sum_us = ActiveValue::Set(totals.1);
    active.character_sum_draft = ActiveValue::Set(totals.2);
    active.references_count = ActiveValue::Set(totals.3);
    active.revision_count = ActiveValue::Set(totals.4);
    active.total_uploads = ActiveValue::Set(totals.5);
    active.updated_at = ActiveValue::Set(Utc::now().naive_utc());

    active
}

/// Merge an article's delta into its course association totals.
pub fn merge_articles_courses(
    association: ArticlesCoursesModel,
    delta: &TimesliceDelta,
) -> Result<entity::articles_courses::ActiveModel, serde_json::Error> {
    let mut user_ids = decode_user_ids(&association.user_ids)?;
    user_ids.extend(delta.user_ids.iter().copied());
    let user_ids = encode_user_ids(&user_ids)?;

    let totals = (
        association.character_sum + delta.character_sum,
        association.references_count + delta.references_count,
        association.revision_count + delta.revision_count,
    );

    let mut active = association.into_active_model();
    active.character_sum = ActiveValue::Set(totals.0);
    active.references_count = ActiveValue::Set(totals.1);
    active.revision_count = ActiveValue::Set(totals.2);
    active.user_ids = ActiveValue::Set(user_ids);
    active.updated_at = ActiveValue::Set(Utc::now().naive_utc());

    Ok(active)
}

/// Merge an article's delta into its per-window record.
pub fn merge_article_course_timeslice(
    timeslice: ArticleCourseTimesliceModel,
    delta: &TimesliceDelta,
) -> Result<entity::article_course_timeslice::ActiveModel, serde_json::Error> {
    let mut user_ids = decode_user_ids(&timeslice.user_ids)?;
    user_ids.extend(delta.user_ids.iter().copied());
    let user_ids = encode_user_ids(&user_ids)?;

    let totals = (
        timeslice.character_sum + delta.character_sum,
        timeslice.references_count + delta.references_count,
        timeslice.revision_count + delta.revision_count,
    );

    let mut active = timeslice.into_active_model();
    active.character_sum = ActiveValue::Set(totals.0);
    active.references_count = ActiveValue::Set(totals.1);
    active.revision_count = ActiveValue::Set(totals.2);
    active.user_ids = ActiveValue::Set(user_ids);
    active.updated_at = ActiveValue::Set(Utc::now().naive_utc());

    Ok(active)
}
