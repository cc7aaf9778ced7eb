use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Venue: unique name
        manager
            .create_index(
                Index::create()
                    .name("uniq_venue_name")
                    .table(Venue::Table)
                    .col(Venue::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Artist: unique name
        manager
            .create_index(
                Index::create()
                    .name("uniq_artist_name")
                    .table(Artist::Table)
                    .col(Artist::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Show: a start time can only be booked once
        manager
            .create_index(
                Index::create()
                    .name("uniq_show_start_time")
                    .table(Show::Table)
                    .col(Show::StartTime)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Show: lookup indexes on both foreign keys
        manager
            .create_index(
                Index::create()
                    .name("idx_show_venue")
                    .table(Show::Table)
                    .col(Show::VenueId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_show_artist")
                    .table(Show::Table)
                    .col(Show::ArtistId)
                    .to_owned(),
            )
            .await?;

        // Question: index on category
        manager
            .create_index(
                Index::create()
                    .name("idx_question_category")
                    .table(Question::Table)
                    .col(Question::Category)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_venue_name").table(Venue::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_artist_name").table(Artist::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_show_start_time").table(Show::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_show_venue").table(Show::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_show_artist").table(Show::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_question_category").table(Question::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Venue { Table, Name }

#[derive(DeriveIden)]
enum Artist { Table, Name }

#[derive(DeriveIden)]
enum Show { Table, StartTime, VenueId, ArtistId }

#[derive(DeriveIden)]
enum Question { Table, Category }
