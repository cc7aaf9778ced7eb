use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{artist, venue};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "show")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub start_time: DateTimeWithTimeZone,
    pub venue_id: i32,
    pub artist_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Venue, Artist }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Venue => Entity::belongs_to(venue::Entity)
                .from(Column::VenueId)
                .to(venue::Column::Id)
                .into(),
            Relation::Artist => Entity::belongs_to(artist::Entity)
                .from(Column::ArtistId)
                .to(artist::Column::Id)
                .into(),
        }
    }
}

impl Related<venue::Entity> for Entity {
    fn to() -> RelationDef { Relation::Venue.def() }
}

impl Related<artist::Entity> for Entity {
    fn to() -> RelationDef { Relation::Artist.def() }
}

impl ActiveModelBehavior for ActiveModel {}
