use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260301_000001_create_course_table::Course, m20260301_000002_create_wiki_table::Wiki,
};

static IDX_COURSE_WIKI_TIMESLICE_WINDOW: &str = "idx_course_wiki_timeslice_window";
static FK_COURSE_WIKI_TIMESLICE_COURSE_ID: &str = "fk_course_wiki_timeslice_course_id";
static FK_COURSE_WIKI_TIMESLICE_WIKI_ID: &str = "fk_course_wiki_timeslice_wiki_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CourseWikiTimeslice::Table)
                    .if_not_exists()
                    .col(pk_auto(CourseWikiTimeslice::Id))
                    .col(integer(CourseWikiTimeslice::CourseId))
                    .col(integer(CourseWikiTimeslice::WikiId))
                    .col(timestamp(CourseWikiTimeslice::Start))
                    .col(timestamp(CourseWikiTimeslice::End))
                    .col(big_integer_null(CourseWikiTimeslice::LastMwRevId))
                    .col(timestamp_null(CourseWikiTimeslice::LastMwRevAt))
                    .col(timestamp_null(CourseWikiTimeslice::LastUploadAt))
                    .col(big_integer(CourseWikiTimeslice::CharacterSum))
                    .col(big_integer(CourseWikiTimeslice::ReferencesCount))
                    .col(big_integer(CourseWikiTimeslice::RevisionCount))
                    .col(big_integer(CourseWikiTimeslice::UploadCount))
                    .col(big_integer(CourseWikiTimeslice::UploadsInUseCount))
                    .col(big_integer(CourseWikiTimeslice::UploadUsagesCount))
                    .col(timestamp(CourseWikiTimeslice::CreatedAt))
                    .col(timestamp(CourseWikiTimeslice::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COURSE_WIKI_TIMESLICE_COURSE_ID)
                            .from(CourseWikiTimeslice::Table, CourseWikiTimeslice::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COURSE_WIKI_TIMESLICE_WIKI_ID)
                            .from(CourseWikiTimeslice::Table, CourseWikiTimeslice::WikiId)
                            .to(Wiki::Table, Wiki::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_COURSE_WIKI_TIMESLICE_WINDOW)
                    .table(CourseWikiTimeslice::Table)
                    .col(CourseWikiTimeslice::CourseId)
                    .col(CourseWikiTimeslice::WikiId)
                    .col(CourseWikiTimeslice::Start)
                    .col(CourseWikiTimeslice::End)
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
                    .name(IDX_COURSE_WIKI_TIMESLICE_WINDOW)
                    .table(CourseWikiTimeslice::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CourseWikiTimeslice::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CourseWikiTimeslice {
    Table,
    Id,
    CourseId,
    WikiId,
    Start,
    End,
    LastMwRevId,
    LastMwRevAt,
    LastUploadAt,
    CharacterSum,
    ReferencesCount,
    RevisionCount,
    UploadCount,
    UploadsInUseCount,
    UploadUsagesCount,
    CreatedAt,
    UpdatedAt,
}
