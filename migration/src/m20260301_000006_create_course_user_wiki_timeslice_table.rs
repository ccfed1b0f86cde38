use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260301_000001_create_course_table::Course, m20260301_000002_create_wiki_table::Wiki,
};

static IDX_COURSE_USER_WIKI_TIMESLICE_WINDOW: &str = "idx_course_user_wiki_timeslice_window";
static FK_COURSE_USER_WIKI_TIMESLICE_COURSE_ID: &str = "fk_course_user_wiki_timeslice_course_id";
static FK_COURSE_USER_WIKI_TIMESLICE_WIKI_ID: &str = "fk_course_user_wiki_timeslice_wiki_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CourseUserWikiTimeslice::Table)
                    .if_not_exists()
                    .col(pk_auto(CourseUserWikiTimeslice::Id))
                    .col(integer(CourseUserWikiTimeslice::CourseId))
                    .col(big_integer(CourseUserWikiTimeslice::UserId))
                    .col(integer(CourseUserWikiTimeslice::WikiId))
                    .col(timestamp(CourseUserWikiTimeslice::Start))
                    .col(timestamp(CourseUserWikiTimeslice::End))
                    .col(big_integer(CourseUserWikiTimeslice::CharacterSumMs))
                    .col(big_integer(CourseUserWikiTimeslice::CharacterSumUs))
                    .col(big_integer(CourseUserWikiTimeslice::CharacterSumDraft))
                    .col(big_integer(CourseUserWikiTimeslice::ReferencesCount))
                    .col(big_integer(CourseUserWikiTimeslice::RevisionCount))
                    .col(big_integer(CourseUserWikiTimeslice::TotalUploads))
                    .col(timestamp(CourseUserWikiTimeslice::CreatedAt))
                    .col(timestamp(CourseUserWikiTimeslice::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COURSE_USER_WIKI_TIMESLICE_COURSE_ID)
                            .from(
                                CourseUserWikiTimeslice::Table,
                                CourseUserWikiTimeslice::CourseId,
                            )
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COURSE_USER_WIKI_TIMESLICE_WIKI_ID)
                            .from(
                                CourseUserWikiTimeslice::Table,
                                CourseUserWikiTimeslice::WikiId,
                            )
                            .to(Wiki::Table, Wiki::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_COURSE_USER_WIKI_TIMESLICE_WINDOW)
                    .table(CourseUserWikiTimeslice::Table)
                    .col(CourseUserWikiTimeslice::CourseId)
                    .col(CourseUserWikiTimeslice::UserId)
                    .col(CourseUserWikiTimeslice::WikiId)
                    .col(CourseUserWikiTimeslice::Start)
                    .col(CourseUserWikiTimeslice::End)
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
                    .name(IDX_COURSE_USER_WIKI_TIMESLICE_WINDOW)
                    .table(CourseUserWikiTimeslice::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(CourseUserWikiTimeslice::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CourseUserWikiTimeslice {
    Table,
    Id,
    CourseId,
    UserId,
    WikiId,
    Start,
    End,
    CharacterSumMs,
    CharacterSumUs,
    CharacterSumDraft,
    ReferencesCount,
    RevisionCount,
    TotalUploads,
    CreatedAt,
    UpdatedAt,
}
