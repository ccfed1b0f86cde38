use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260301_000001_create_course_table::Course, m20260301_000002_create_wiki_table::Wiki,
};

static IDX_COURSE_WIKI_COURSE_ID_WIKI_ID: &str = "idx_course_wiki_course_id_wiki_id";
static FK_COURSE_WIKI_COURSE_ID: &str = "fk_course_wiki_course_id";
static FK_COURSE_WIKI_WIKI_ID: &str = "fk_course_wiki_wiki_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CourseWiki::Table)
                    .if_not_exists()
                    .col(pk_auto(CourseWiki::Id))
                    .col(integer(CourseWiki::CourseId))
                    .col(integer(CourseWiki::WikiId))
                    .col(timestamp(CourseWiki::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COURSE_WIKI_COURSE_ID)
                            .from(CourseWiki::Table, CourseWiki::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COURSE_WIKI_WIKI_ID)
                            .from(CourseWiki::Table, CourseWiki::WikiId)
                            .to(Wiki::Table, Wiki::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_COURSE_WIKI_COURSE_ID_WIKI_ID)
                    .table(CourseWiki::Table)
                    .col(CourseWiki::CourseId)
                    .col(CourseWiki::WikiId)
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
                    .name(IDX_COURSE_WIKI_COURSE_ID_WIKI_ID)
                    .table(CourseWiki::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CourseWiki::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CourseWiki {
    Table,
    Id,
    CourseId,
    WikiId,
    CreatedAt,
}
