pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_course_table;
mod m20260301_000002_create_wiki_table;
mod m20260301_000003_create_course_wiki_table;
mod m20260301_000004_create_course_user_table;
mod m20260301_000005_create_course_wiki_timeslice_table;
mod m20260301_000006_create_course_user_wiki_timeslice_table;
mod m20260301_000007_create_articles_courses_table;
mod m20260301_000008_create_article_course_timeslice_table;
mod m20260301_000009_create_course_update_log_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_course_table::Migration),
            Box::new(m20260301_000002_create_wiki_table::Migration),
            Box::new(m20260301_000003_create_course_wiki_table::Migration),
            Box::new(m20260301_000004_create_course_user_table::Migration),
            Box::new(m20260301_000005_create_course_wiki_timeslice_table::Migration),
            Box::new(m20260301_000006_create_course_user_wiki_timeslice_table::Migration),
            Box::new(m20260301_000007_create_articles_courses_table::Migration),
            Box::new(m20260301_000008_create_article_course_timeslice_table::Migration),
            Box::new(m20260301_000009_create_course_update_log_table::Migration),
        ]
    }
}
