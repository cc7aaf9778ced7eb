use std::collections::HashMap;

use chrono::Utc;
use models::{artist, show, venue};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

use crate::errors::{map_write_err, ServiceError};
use crate::shows::{count_by_artist, format_start_time};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
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
    pub seeking_venue: bool,
    #[serde(default)]
    pub seeking_description: Option<String>,
}

/// The roster page shows names only.
#[derive(Debug, Serialize)]
pub struct ArtistRef {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

#[derive(Debug, Serialize)]
pub struct ArtistSearchOutcome {
    pub count: usize,
    pub data: Vec<ArtistSummary>,
}

#[derive(Debug, Serialize)]
pub struct ArtistShowEntry {
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

#[derive(Debug, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: artist::Model,
    pub past_shows: Vec<ArtistShowEntry>,
    pub upcoming_shows: Vec<ArtistShowEntry>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

pub async fn list_artists(db: &DatabaseConnection) -> Result<Vec<ArtistRef>, ServiceError> {
    let artists = artist::Entity::find()
        .order_by_asc(artist::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(artists
        .into_iter()
        .map(|a| ArtistRef { id: a.id, name: a.name })
        .collect())
}

/// Case-insensitive substring match on the artist name.
pub async fn search_artists(
    db: &DatabaseConnection,
    term: &str,
) -> Result<ArtistSearchOutcome, ServiceError> {
    let pattern = format!("%{}%", term.to_lowercase());
    let matches = artist::Entity::find()
        .filter(Expr::expr(Func::lower(Expr::col((artist::Entity, artist::Column::Name)))).like(pattern))
        .order_by_asc(artist::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let ids: Vec<i32> = matches.iter().map(|a| a.id).collect();
    let counts = if ids.is_empty() {
        HashMap::new()
    } else {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let upcoming = show::Entity::find()
            .filter(show::Column::ArtistId.is_in(ids))
            .filter(show::Column::StartTime.gt(now))
            .all(db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        count_by_artist(&upcoming)
    };
    let data: Vec<ArtistSummary> = matches
        .into_iter()
        .map(|a| ArtistSummary {
            id: a.id,
            num_upcoming_shows: counts.get(&a.id).copied().unwrap_or(0),
            name: a.name,
        })
        .collect();
    Ok(ArtistSearchOutcome { count: data.len(), data })
}

/// The artist page: every stored field plus bookings split around now.
pub async fn artist_detail(db: &DatabaseConnection, id: i32) -> Result<ArtistDetail, ServiceError> {
    let a = artist::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found(format!("artist {id}")))?;
    let bookings = show::Entity::find()
        .filter(show::Column::ArtistId.eq(id))
        .find_also_related(venue::Entity)
        .order_by_asc(show::Column::StartTime)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let now: DateTimeWithTimeZone = Utc::now().into();
    let mut past = Vec::new();
    let mut upcoming = Vec::new();
    for (s, related) in bookings {
        let v = match related {
            Some(v) => v,
            None => continue,
        };
        let entry = ArtistShowEntry {
            venue_name: v.name,
            venue_image_link: v.image_link,
            start_time: format_start_time(&s.start_time),
        };
        if s.start_time > now {
            upcoming.push(entry);
        } else {
            past.push(entry);
        }
    }
    Ok(ArtistDetail {
        artist: a,
        past_shows_count: past.len(),
        upcoming_shows_count: upcoming.len(),
        past_shows: past,
        upcoming_shows: upcoming,
    })
}

pub async fn create_artist(
    db: &DatabaseConnection,
    input: ArtistInput,
) -> Result<artist::Model, ServiceError> {
    artist::validate_name(&input.name)?;
    if input.city.trim().is_empty() || input.state.trim().is_empty() {
        return Err(ServiceError::validation("city and state are required"));
    }
    let am = artist::ActiveModel {
        name: Set(input.name),
        city: Set(input.city),
        state: Set(input.state),
        phone: Set(input.phone),
        image_link: Set(input.image_link),
        facebook_link: Set(input.facebook_link),
        website: Set(input.website),
        genres: Set(input.genres),
        seeking_venue: Set(input.seeking_venue),
        seeking_description: Set(input.seeking_description),
        ..Default::default()
    };
    am.insert(db)
        .await
        .map_err(|e| map_write_err(e, "an artist with that name already exists"))
}

/// Replace every stored field of an existing artist.
pub async fn update_artist(
    db: &DatabaseConnection,
    id: i32,
    input: ArtistInput,
) -> Result<artist::Model, ServiceError> {
    artist::validate_name(&input.name)?;
    if input.city.trim().is_empty() || input.state.trim().is_empty() {
        return Err(ServiceError::validation("city and state are required"));
    }
    let existing = artist::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found(format!("artist {id}")))?;
    let mut am: artist::ActiveModel = existing.into();
    am.name = Set(input.name);
    am.city = Set(input.city);
    am.state = Set(input.state);
    am.phone = Set(input.phone);
    am.image_link = Set(input.image_link);
    am.facebook_link = Set(input.facebook_link);
    am.website = Set(input.website);
    am.genres = Set(input.genres);
    am.seeking_venue = Set(input.seeking_venue);
    am.seeking_description = Set(input.seeking_description);
    am.update(db)
        .await
        .map_err(|e| map_write_err(e, "an artist with that name already exists"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn artist_input_defaults_everything_but_name() {
        let input: ArtistInput =
            serde_json::from_value(serde_json::json!({ "name": "Guns N Petals" })).unwrap();
        assert_eq!(input.name, "Guns N Petals");
        assert_eq!(input.state, "");
        assert!(!input.seeking_venue);
    }

    #[tokio::test]
    async fn artist_lifecycle_round_trip() -> anyhow::Result<()> {
        let db = match crate::test_support::test_db().await? {
            Some(db) => db,
            None => return Ok(()),
        };

        let suffix = Uuid::new_v4().to_string();
        let name = format!("Guns N Petals {suffix}");
        let created = create_artist(
            &db,
            ArtistInput {
                name: name.clone(),
                city: "San Francisco".to_string(),
                state: "CA".to_string(),
                genres: vec!["Rock n Roll".to_string()],
                seeking_venue: true,
                ..Default::default()
            },
        )
        .await?;
        assert!(created.id > 0);

        let dup = create_artist(
            &db,
            ArtistInput {
                name: name.clone(),
                city: "San Francisco".to_string(),
                state: "CA".to_string(),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));

        let found = search_artists(&db, &suffix).await?;
        assert_eq!(found.count, 1);
        assert_eq!(found.data[0].num_upcoming_shows, 0);

        let updated = update_artist(
            &db,
            created.id,
            ArtistInput {
                name: name.clone(),
                city: "Oakland".to_string(),
                state: "CA".to_string(),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(updated.city, "Oakland");

        let detail = artist_detail(&db, created.id).await?;
        assert_eq!(detail.artist.id, created.id);
        assert!(detail.upcoming_shows.is_empty());

        artist::Entity::delete_by_id(created.id).exec(&db).await?;
        Ok(())
    }
}
