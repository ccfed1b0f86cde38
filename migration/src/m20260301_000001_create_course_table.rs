use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Course::Table)
                    .if_not_exists()
                    .col(pk_auto(Course::Id))
                    .col(string_uniq(Course::Slug))
                    .col(string(Course::Title))
                    .col(timestamp(Course::Start))
                    .col(timestamp(Course::End))
                    .col(boolean(Course::DebugUpdates))
                    .col(big_integer_null(Course::LongestUpdateSecs))
                    .col(big_integer(Course::CharacterSum))
                    .col(big_integer(Course::ReferencesCount))
                    .col(big_integer(Course::RevisionCount))
                    .col(big_integer(Course::UploadCount))
                    .col(big_integer(Course::UploadsInUseCount))
                    .col(big_integer(Course::UploadUsagesCount))
                    .col(integer(Course::UserCount))
                    .col(timestamp(Course::CreatedAt))
                    .col(timestamp(Course::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Course::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Course {
    Table,
    Id,
    Slug,
    Title,
    Start,
    End,
    DebugUpdates,
    LongestUpdateSecs,
    CharacterSum,
    ReferencesCount,
    RevisionCount,
    UploadCount,
    UploadsInUseCount,
    UploadUsagesCount,
    UserCount,
    CreatedAt,
    UpdatedAt,
}
