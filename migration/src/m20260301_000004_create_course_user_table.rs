use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260301_000001_create_course_table::Course;

static IDX_COURSE_USER_COURSE_ID_USER_ID: &str = "idx_course_user_course_id_user_id";
static FK_COURSE_USER_COURSE_ID: &str = "fk_course_user_course_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CourseUser::Table)
                    .if_not_exists()
                    .col(pk_auto(CourseUser::Id))
                    .col(integer(CourseUser::CourseId))
                    .col(big_integer(CourseUser::UserId))
                    .col(text(CourseUser::Role))
                    .col(big_integer(CourseUser::CharacterSumMs))
                    .col(big_integer(CourseUser::CharacterSumUs))
                    .col(big_integer(CourseUser::CharacterSumDraft))
                    .col(big_integer(CourseUser::ReferencesCount))
                    .col(big_integer(CourseUser::RevisionCount))
                    .col(big_integer(CourseUser::TotalUploads))
                    .col(timestamp(CourseUser::CreatedAt))
                    .col(timestamp(CourseUser::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COURSE_USER_COURSE_ID)
                            .from(CourseUser::Table, CourseUser::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_COURSE_USER_COURSE_ID_USER_ID)
                    .table(CourseUser::Table)
                    .col(CourseUser::CourseId)
                    .col(CourseUser::UserId)
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
                    .name(IDX_COURSE_USER_COURSE_ID_USER_ID)
                    .table(CourseUser::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CourseUser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CourseUser {
    Table,
    Id,
    CourseId,
    UserId,
    Role,
    CharacterSumMs,
    CharacterSumUs,
    CharacterSumDraft,
    ReferencesCount,
    RevisionCount,
    TotalUploads,
    CreatedAt,
    UpdatedAt,
}
