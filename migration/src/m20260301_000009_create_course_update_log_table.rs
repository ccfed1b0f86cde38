use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260301_000001_create_course_table::Course;

static IDX_COURSE_UPDATE_LOG_COURSE_ID: &str = "idx_course_update_log_course_id";
static FK_COURSE_UPDATE_LOG_COURSE_ID: &str = "fk_course_update_log_course_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CourseUpdateLog::Table)
                    .if_not_exists()
                    .col(pk_auto(CourseUpdateLog::Id))
                    .col(integer(CourseUpdateLog::CourseId))
                    .col(string(CourseUpdateLog::CorrelationId))
                    .col(integer(CourseUpdateLog::ErrorCount))
                    .col(big_integer(CourseUpdateLog::DurationMs))
                    .col(timestamp(CourseUpdateLog::StartedAt))
                    .col(timestamp(CourseUpdateLog::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COURSE_UPDATE_LOG_COURSE_ID)
                            .from(CourseUpdateLog::Table, CourseUpdateLog::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_COURSE_UPDATE_LOG_COURSE_ID)
                    .table(CourseUpdateLog::Table)
                    .col(CourseUpdateLog::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_COURSE_UPDATE_LOG_COURSE_ID)
                    .table(CourseUpdateLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CourseUpdateLog::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CourseUpdateLog {
    Table,
    Id,
    CourseId,
    CorrelationId,
    ErrorCount,
    DurationMs,
    StartedAt,
    CreatedAt,
}
