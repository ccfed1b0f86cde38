use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260301_000001_create_course_table::Course, m20260301_000002_create_wiki_table::Wiki,
};

static IDX_ARTICLES_COURSES_ARTICLE: &str = "idx_articles_courses_course_id_wiki_id_article_id";
static FK_ARTICLES_COURSES_COURSE_ID: &str = "fk_articles_courses_course_id";
static FK_ARTICLES_COURSES_WIKI_ID: &str = "fk_articles_courses_wiki_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ArticlesCourses::Table)
                    .if_not_exists()
                    .col(pk_auto(ArticlesCourses::Id))
                    .col(integer(ArticlesCourses::CourseId))
                    .col(integer(ArticlesCourses::WikiId))
                    .col(big_integer(ArticlesCourses::ArticleId))
                    .col(boolean(ArticlesCourses::Tracked))
                    .col(big_integer(ArticlesCourses::CharacterSum))
                    .col(big_integer(ArticlesCourses::ReferencesCount))
                    .col(big_integer(ArticlesCourses::RevisionCount))
                    .col(text(ArticlesCourses::UserIds))
                    .col(timestamp(ArticlesCourses::CreatedAt))
                    .col(timestamp(ArticlesCourses::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ARTICLES_COURSES_COURSE_ID)
                            .from(ArticlesCourses::Table, ArticlesCourses::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ARTICLES_COURSES_WIKI_ID)
                            .from(ArticlesCourses::Table, ArticlesCourses::WikiId)
                            .to(Wiki::Table, Wiki::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ARTICLES_COURSES_ARTICLE)
                    .table(ArticlesCourses::Table)
                    .col(ArticlesCourses::CourseId)
                    .col(ArticlesCourses::WikiId)
                    .col(ArticlesCourses::ArticleId)
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
                    .name(IDX_ARTICLES_COURSES_ARTICLE)
                    .table(ArticlesCourses::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ArticlesCourses::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ArticlesCourses {
    Table,
    Id,
    CourseId,
    WikiId,
    ArticleId,
    Tracked,
    CharacterSum,
    ReferencesCount,
    RevisionCount,
    UserIds,
    CreatedAt,
    UpdatedAt,
}
