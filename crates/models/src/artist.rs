use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors, show};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "artist")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Show }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Show => Entity::has_many(show::Entity).into(),
        }
    }
}

impl Related<show::Entity> for Entity {
    fn to() -> RelationDef { Relation::Show.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::validation("name required"));
    }
    Ok(())
}
