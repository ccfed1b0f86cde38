use sea_orm_migration::{prelude::*, schema::*};

static IDX_WIKI_LANGUAGE_PROJECT: &str = "idx_wiki_language_project";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Wiki::Table)
                    .if_not_exists()
                    .col(pk_auto(Wiki::Id))
                    .col(string_null(Wiki::Language))
                    .col(string(Wiki::Project))
                    .col(timestamp(Wiki::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_WIKI_LANGUAGE_PROJECT)
                    .table(Wiki::Table)
                    .col(Wiki::Language)
                    .col(Wiki::Project)
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
                    .name(IDX_WIKI_LANGUAGE_PROJECT)
                    .table(Wiki::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Wiki::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Wiki {
    Table,
    Id,
    Language,
    Project,
    CreatedAt,
}
