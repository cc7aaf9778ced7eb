use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use models::{artist, show, venue};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

use crate::errors::{map_write_err, ServiceError};
use crate::shows::{count_by_venue, format_start_time};

/// Request body for creating or replacing a venue. Everything except the
/// name may be omitted; required fields are checked in the service so the
/// caller gets a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VenueInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub seeking_talent: bool,
    #[serde(default)]
    pub seeking_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

#[derive(Debug, Serialize)]
pub struct CityGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

#[derive(Debug, Serialize)]
pub struct VenueSearchOutcome {
    pub count: usize,
    pub data: Vec<VenueSummary>,
}

#[derive(Debug, Serialize)]
pub struct VenueShowEntry {
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

#[derive(Debug, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: venue::Model,
    pub past_shows: Vec<VenueShowEntry>,
    pub upcoming_shows: Vec<VenueShowEntry>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Group venue summaries under their city and state, cities in lexical
/// order. Venue order within a group follows the input order.
pub fn group_by_city(rows: Vec<(venue::Model, i64)>) -> Vec<CityGroup> {
    let mut grouped: BTreeMap<(String, String), Vec<VenueSummary>> = BTreeMap::new();
    for (v, upcoming) in rows {
        grouped.entry((v.city, v.state)).or_default().push(VenueSummary {
            id: v.id,
            name: v.name,
            num_upcoming_shows: upcoming,
        });
    }
    grouped
        .into_iter()
        .map(|((city, state), venues)| CityGroup { city, state, venues })
        .collect()
}

pub async fn list_venues(db: &DatabaseConnection) -> Result<Vec<CityGroup>, ServiceError> {
    let venues = venue::Entity::find()
        .order_by_asc(venue::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let now: DateTimeWithTimeZone = Utc::now().into();
    let upcoming = show::Entity::find()
        .filter(show::Column::StartTime.gt(now))
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let counts = count_by_venue(&upcoming);
    let rows = venues
        .into_iter()
        .map(|v| {
            let n = counts.get(&v.id).copied().unwrap_or(0);
            (v, n)
        })
        .collect();
    Ok(group_by_city(rows))
}

/// Case-insensitive substring match on the venue name.
pub async fn search_venues(
    db: &DatabaseConnection,
    term: &str,
) -> Result<VenueSearchOutcome, ServiceError> {
    let pattern = format!("%{}%", term.to_lowercase());
    let matches = venue::Entity::find()
        .filter(Expr::expr(Func::lower(Expr::col((venue::Entity, venue::Column::Name)))).like(pattern))
        .order_by_asc(venue::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let ids: Vec<i32> = matches.iter().map(|v| v.id).collect();
    let counts = if ids.is_empty() {
        HashMap::new()
    } else {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let upcoming = show::Entity::find()
            .filter(show::Column::VenueId.is_in(ids))
            .filter(show::Column::StartTime.gt(now))
            .all(db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        count_by_venue(&upcoming)
    };
    let data: Vec<VenueSummary> = matches
        .into_iter()
        .map(|v| VenueSummary {
            id: v.id,
            num_upcoming_shows: counts.get(&v.id).copied().unwrap_or(0),
            name: v.name,
        })
        .collect();
    Ok(VenueSearchOutcome { count: data.len(), data })
}

/// The venue page: every stored field plus its bookings split around now.
pub async fn venue_detail(db: &DatabaseConnection, id: i32) -> Result<VenueDetail, ServiceError> {
    let v = venue::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found(format!("venue {id}")))?;
    let bookings = show::Entity::find()
        .filter(show::Column::VenueId.eq(id))
        .find_also_related(artist::Entity)
        .order_by_asc(show::Column::StartTime)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let now: DateTimeWithTimeZone = Utc::now().into();
    let mut past = Vec::new();
    let mut upcoming = Vec::new();
    for (s, related) in bookings {
        let a = match related {
            Some(a) => a,
            None => continue,
        };
        let entry = VenueShowEntry {
            artist_name: a.name,
            artist_image_link: a.image_link,
            start_time: format_start_time(&s.start_time),
        };
        if s.start_time > now {
            upcoming.push(entry);
        } else {
            past.push(entry);
        }
    }
    Ok(VenueDetail {
        venue: v,
        past_shows_count: past.len(),
        upcoming_shows_count: upcoming.len(),
        past_shows: past,
        upcoming_shows: upcoming,
    })
}

pub async fn create_venue(
    db: &DatabaseConnection,
    input: VenueInput,
) -> Result<venue::Model, ServiceError> {
    venue::validate_name(&input.name)?;
    if input.city.trim().is_empty() || input.state.trim().is_empty() || input.address.trim().is_empty()
    {
        return Err(ServiceError::validation("city, state and address are required"));
    }
    let am = venue::ActiveModel {
        name: Set(input.name),
        city: Set(input.city),
        state: Set(input.state),
        address: Set(input.address),
        phone: Set(input.phone),
        image_link: Set(input.image_link),
        facebook_link: Set(input.facebook_link),
        website: Set(input.website),
        genres: Set(input.genres),
        seeking_talent: Set(input.seeking_talent),
        seeking_description: Set(input.seeking_description),
        ..Default::default()
    };
    am.insert(db)
        .await
        .map_err(|e| map_write_err(e, "a venue with that name already exists"))
}

/// Replace every stored field of an existing venue.
pub async fn update_venue(
    db: &DatabaseConnection,
    id: i32,
    input: VenueInput,
) -> Result<venue::Model, ServiceError> {
    venue::validate_name(&input.name)?;
    if input.city.trim().is_empty() || input.state.trim().is_empty() || input.address.trim().is_empty()
    {
        return Err(ServiceError::validation("city, state and address are required"));
    }
    let existing = venue::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found(format!("venue {id}")))?;
    let mut am: venue::ActiveModel = existing.into();
    am.name = Set(input.name);
    am.city = Set(input.city);
    am.state = Set(input.state);
    am.address = Set(input.address);
    am.phone = Set(input.phone);
    am.image_link = Set(input.image_link);
    am.facebook_link = Set(input.facebook_link);
    am.website = Set(input.website);
    am.genres = Set(input.genres);
    am.seeking_talent = Set(input.seeking_talent);
    am.seeking_description = Set(input.seeking_description);
    am.update(db)
        .await
        .map_err(|e| map_write_err(e, "a venue with that name already exists"))
}

pub async fn delete_venue(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = venue::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found(format!("venue {id}")));
    }
    Ok(())
}
