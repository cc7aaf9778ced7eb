use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Show::Table)
                    .if_not_exists()
                    .col(pk_auto(Show::Id))
                    .col(timestamp_with_time_zone(Show::StartTime).not_null())
                    .col(integer(Show::VenueId).not_null())
                    .col(integer(Show::ArtistId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_show_venue")
                            .from(Show::Table, Show::VenueId)
                            .to(Venue::Table, Venue::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_show_artist")
                            .from(Show::Table, Show::ArtistId)
                            .to(Artist::Table, Artist::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Show::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Show {
    Table,
    Id,
    StartTime,
    VenueId,
    ArtistId,
}

#[derive(DeriveIden)]
enum Venue { Table, Id }

#[derive(DeriveIden)]
enum Artist { Table, Id }
