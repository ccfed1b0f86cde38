//! Database model type aliases.
//!
//! Aliases for the SeaORM entity models used throughout the crate, so signatures do not need
//! to reach into the generated `entity` crate directly.

/// Course with its period, typed flags and cached totals.
pub type CourseModel = entity::course::Model;

/// Course participant with role and cached per-user totals.
pub type CourseUserModel = entity::course_user::Model;

/// Content site identified by (language, project).
pub type WikiModel = entity::wiki::Model;

/// Per course and wiki cache window holding the high-water marks.
///
/// # Fields (from `entity::course_wiki_timeslice::Model`)
/// - `start`, `end` - Window boundaries
/// - `last_mw_rev_id`, `last_mw_rev_at` - Revision high-water mark
/// - `last_upload_at` - Upload high-water mark
/// - `character_sum`, `references_count`, `revision_count` - Revision statistics
/// - `upload_count`, `uploads_in_use_count`, `upload_usages_count` - Upload statistics
pub type CourseWikiTimesliceModel = entity::course_wiki_timeslice::Model;

/// Per course, user and wiki cache window.
pub type CourseUserWikiTimesliceModel = entity::course_user_wiki_timeslice::Model;

/// Article association with a course and its running totals.
pub type ArticlesCoursesModel = entity::articles_courses::Model;

/// Per article association cache window.
pub type ArticleCourseTimesliceModel = entity::article_course_timeslice::Model;

/// Audit log entry appended once per update run.
pub type CourseUpdateLogModel = entity::course_update_log::Model;
