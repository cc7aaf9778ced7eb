use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Venue::Table)
                    .if_not_exists()
                    .col(pk_auto(Venue::Id))
                    .col(string_len(Venue::Name, 120).not_null())
                    .col(string_len(Venue::City, 120).not_null())
                    .col(string_len(Venue::State, 120).not_null())
                    .col(string_len(Venue::Address, 120).not_null())
                    .col(string_len_null(Venue::Phone, 120))
                    .col(string_len_null(Venue::ImageLink, 500))
                    .col(string_len_null(Venue::FacebookLink, 120))
                    .col(string_len_null(Venue::Website, 120))
                    .col(ColumnDef::new(Venue::Genres).array(ColumnType::Text).not_null())
                    .col(boolean(Venue::SeekingTalent).default(false))
                    .col(text_null(Venue::SeekingDescription))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Venue::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Venue {
    Table,
    Id,
    Name,
    City,
    State,
    Address,
    Phone,
    ImageLink,
    FacebookLink,
    Website,
    Genres,
    SeekingTalent,
    SeekingDescription,
}
