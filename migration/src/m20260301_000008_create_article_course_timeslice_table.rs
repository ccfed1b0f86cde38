use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260301_000007_create_articles_courses_table::ArticlesCourses;

static IDX_ARTICLE_COURSE_TIMESLICE_WINDOW: &str = "idx_article_course_timeslice_window";
static FK_ARTICLE_COURSE_TIMESLICE_ARTICLES_COURSES_ID: &str =
    "fk_article_course_timeslice_articles_courses_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ArticleCourseTimeslice::Table)
                    .if_not_exists()
                    .col(pk_auto(ArticleCourseTimeslice::Id))
                    .col(integer(ArticleCourseTimeslice::ArticlesCoursesId))
                    .col(timestamp(ArticleCourseTimeslice::Start))
                    .col(timestamp(ArticleCourseTimeslice::End))
                    .col(big_integer(ArticleCourseTimeslice::CharacterSum))
                    .col(big_integer(ArticleCourseTimeslice::ReferencesCount))
                    .col(big_integer(ArticleCourseTimeslice::RevisionCount))
                    .col(text(ArticleCourseTimeslice::UserIds))
                    .col(timestamp(ArticleCourseTimeslice::CreatedAt))
                    .col(timestamp(ArticleCourseTimeslice::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ARTICLE_COURSE_TIMESLICE_ARTICLES_COURSES_ID)
                            .from(
                                ArticleCourseTimeslice::Table,
                                ArticleCourseTimeslice::ArticlesCoursesId,
                            )
                            .to(ArticlesCourses::Table, ArticlesCourses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ARTICLE_COURSE_TIMESLICE_WINDOW)
                    .table(ArticleCourseTimeslice::Table)
                    .col(ArticleCourseTimeslice::ArticlesCoursesId)
                    .col(ArticleCourseTimeslice::Start)
                    .col(ArticleCourseTimeslice::End)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ARTICLE_COURSE_TIMESLICE_WINDOW)
                    .table(ArticleCourseTimeslice::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(ArticleCourseTimeslice::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum ArticleCourseTimeslice {
    Table,
    Id,
    ArticlesCoursesId,
    Start,
    End,
    CharacterSum,
    ReferencesCount,
    RevisionCount,
    UserIds,
    CreatedAt,
    UpdatedAt,
}
