use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use service::shows::{self, ShowListEntry};
use tracing::info;

use crate::errors::ListingError;
use crate::routes::ServerState;

#[derive(Debug, Deserialize)]
pub struct ShowInput {
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: String,
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<ShowListEntry>>, ListingError> {
    let entries = shows::list_shows(&state.db).await?;
    Ok(Json(entries))
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ShowInput>, JsonRejection>,
) -> Result<Json<models::show::Model>, ListingError> {
    let Json(input) = payload.map_err(|e| ListingError::bad_request(e.body_text()))?;
    let created =
        shows::create_show(&state.db, input.venue_id, input.artist_id, &input.start_time).await?;
    info!(show_id = created.id, venue_id = created.venue_id, "show booked");
    Ok(Json(created))
}
