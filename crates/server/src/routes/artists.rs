use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use service::artists::{self, ArtistDetail, ArtistInput, ArtistRef, ArtistSearchOutcome};
use tracing::info;

use crate::errors::ListingError;
use crate::routes::ServerState;

#[derive(Debug, Deserialize)]
pub struct SearchInput {
    #[serde(default)]
    pub search_term: String,
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ArtistRef>>, ListingError> {
    let roster = artists::list_artists(&state.db).await?;
    Ok(Json(roster))
}

pub async fn search(
    State(state): State<ServerState>,
    payload: Result<Json<SearchInput>, JsonRejection>,
) -> Result<Json<ArtistSearchOutcome>, ListingError> {
    let Json(input) = payload.map_err(|e| ListingError::bad_request(e.body_text()))?;
    let outcome = artists::search_artists(&state.db, &input.search_term).await?;
    Ok(Json(outcome))
}

pub async fn detail(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<ArtistDetail>, ListingError> {
    let detail = artists::artist_detail(&state.db, id).await?;
    Ok(Json(detail))
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ArtistInput>, JsonRejection>,
) -> Result<Json<models::artist::Model>, ListingError> {
    let Json(input) = payload.map_err(|e| ListingError::bad_request(e.body_text()))?;
    let created = artists::create_artist(&state.db, input).await?;
    info!(artist_id = created.id, name = %created.name, "artist created");
    Ok(Json(created))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    payload: Result<Json<ArtistInput>, JsonRejection>,
) -> Result<Json<models::artist::Model>, ListingError> {
    let Json(input) = payload.map_err(|e| ListingError::bad_request(e.body_text()))?;
    let updated = artists::update_artist(&state.db, id, input).await?;
    Ok(Json(updated))
}
