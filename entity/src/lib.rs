//! SeaORM entities for course statistics.

pub mod prelude;

pub mod article_course_timeslice;
pub mod articles_courses;
pub mod course;
pub mod course_update_log;
pub mod course_user;
pub mod course_user_wiki_timeslice;
pub mod course_wiki;
pub mod course_wiki_timeslice;
pub mod wiki;
