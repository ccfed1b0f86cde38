pub use super::article_course_timeslice::Entity as ArticleCourseTimeslice;
pub use super::articles_courses::Entity as ArticlesCourses;
pub use super::course::Entity as Course;
pub use super::course_update_log::Entity as CourseUpdateLog;
pub use super::course_user::Entity as CourseUser;
pub use super::course_user_wiki_timeslice::Entity as CourseUserWikiTimeslice;
pub use super::course_wiki::Entity as CourseWiki;
pub use super::course_wiki_timeslice::Entity as CourseWikiTimeslice;
pub use super::wiki::Entity as Wiki;
