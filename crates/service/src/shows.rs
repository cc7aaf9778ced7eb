use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use models::{artist, show, venue};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryOrder,
    QuerySelect, RelationTrait, Set, TransactionTrait,
};
use serde::Serialize;

use crate::errors::{map_write_err, ServiceError};

/// Wire format for show times, shared by the venue and artist detail pages.
pub const SHOW_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Accept RFC 3339 or the plain wire format. Plain times are taken as UTC.
pub fn parse_start_time(raw: &str) -> Result<DateTimeWithTimeZone, ServiceError> {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Ok(t);
    }
    let naive = NaiveDateTime::parse_from_str(raw, SHOW_TIME_FORMAT)
        .map_err(|_| ServiceError::validation(format!("invalid start_time: {raw}")))?;
    Ok(Utc.from_utc_datetime(&naive).into())
}

pub fn format_start_time(t: &DateTimeWithTimeZone) -> String {
    t.format(SHOW_TIME_FORMAT).to_string()
}

pub fn count_by_venue(shows: &[show::Model]) -> HashMap<i32, i64> {
    let mut counts = HashMap::new();
    for s in shows {
        *counts.entry(s.venue_id).or_insert(0) += 1;
    }
    counts
}

pub fn count_by_artist(shows: &[show::Model]) -> HashMap<i32, i64> {
    let mut counts = HashMap::new();
    for s in shows {
        *counts.entry(s.artist_id).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, FromQueryResult)]
struct ShowRow {
    venue_id: i32,
    venue_name: String,
    artist_id: i32,
    artist_name: String,
    artist_image_link: Option<String>,
    start_time: DateTimeWithTimeZone,
}

#[derive(Debug, Serialize)]
pub struct ShowListEntry {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// All booked shows in chronological order, each row carrying the names
/// resolved through a single joined query.
pub async fn list_shows(db: &DatabaseConnection) -> Result<Vec<ShowListEntry>, ServiceError> {
    let rows = show::Entity::find()
        .select_only()
        .column(show::Column::VenueId)
        .column_as(venue::Column::Name, "venue_name")
        .column(show::Column::ArtistId)
        .column_as(artist::Column::Name, "artist_name")
        .column_as(artist::Column::ImageLink, "artist_image_link")
        .column(show::Column::StartTime)
        .join(JoinType::InnerJoin, show::Relation::Venue.def())
        .join(JoinType::InnerJoin, show::Relation::Artist.def())
        .order_by_asc(show::Column::StartTime)
        .into_model::<ShowRow>()
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows
        .into_iter()
        .map(|r| ShowListEntry {
            venue_id: r.venue_id,
            venue_name: r.venue_name,
            artist_id: r.artist_id,
            artist_name: r.artist_name,
            artist_image_link: r.artist_image_link,
            start_time: format_start_time(&r.start_time),
        })
        .collect())
}

/// Book a show. Both references are checked up front so a bad id reads as a
/// validation error instead of a driver error.
pub async fn create_show(
    db: &DatabaseConnection,
    venue_id: i32,
    artist_id: i32,
    start_time: &str,
) -> Result<show::Model, ServiceError> {
    let when = parse_start_time(start_time)?;
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;

    let venue_exists = venue::Entity::find_by_id(venue_id)
        .one(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .is_some();
    if !venue_exists {
        return Err(ServiceError::validation(format!("venue {venue_id} does not exist")));
    }
    let artist_exists = artist::Entity::find_by_id(artist_id)
        .one(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .is_some();
    if !artist_exists {
        return Err(ServiceError::validation(format!("artist {artist_id} does not exist")));
    }

    let created = show::ActiveModel {
        start_time: Set(when),
        venue_id: Set(venue_id),
        artist_id: Set(artist_id),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(|e| map_write_err(e, "a show is already booked at that time"))?;
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show_at(id: i32, venue_id: i32, artist_id: i32) -> show::Model {
        show::Model {
            id,
            start_time: Utc::now().into(),
            venue_id,
            artist_id,
        }
    }

    #[test]
    fn parses_plain_start_times_as_utc() {
        let t = parse_start_time("2035-06-15 21:30:00").unwrap();
        assert_eq!(format_start_time(&t), "2035-06-15 21:30:00");
    }

    #[test]
    fn parses_rfc3339_start_times() {
        let t = parse_start_time("2035-06-15T21:30:00+00:00").unwrap();
        assert_eq!(format_start_time(&t), "2035-06-15 21:30:00");
    }

    #[test]
    fn rejects_malformed_start_times() {
        assert!(parse_start_time("next tuesday").is_err());
        assert!(parse_start_time("").is_err());
    }

    #[test]
    fn tallies_shows_per_venue_and_artist() {
        let shows = vec![show_at(1, 10, 20), show_at(2, 10, 21), show_at(3, 11, 20)];
        let by_venue = count_by_venue(&shows);
        assert_eq!(by_venue.get(&10), Some(&2));
        assert_eq!(by_venue.get(&11), Some(&1));
        assert_eq!(by_venue.get(&12), None);
        let by_artist = count_by_artist(&shows);
        assert_eq!(by_artist.get(&20), Some(&2));
        assert_eq!(by_artist.get(&21), Some(&1));
    }
}
