use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use service::venues::{self, CityGroup, VenueDetail, VenueInput, VenueSearchOutcome};
use tracing::info;

use crate::errors::ListingError;
use crate::routes::ServerState;

#[derive(Debug, Deserialize)]
pub struct SearchInput {
    #[serde(default)]
    pub search_term: String,
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<CityGroup>>, ListingError> {
    let groups = venues::list_venues(&state.db).await?;
    Ok(Json(groups))
}

pub async fn search(
    State(state): State<ServerState>,
    payload: Result<Json<SearchInput>, JsonRejection>,
) -> Result<Json<VenueSearchOutcome>, ListingError> {
    let Json(input) = payload.map_err(|e| ListingError::bad_request(e.body_text()))?;
    let outcome = venues::search_venues(&state.db, &input.search_term).await?;
    Ok(Json(outcome))
}

pub async fn detail(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<VenueDetail>, ListingError> {
    let detail = venues::venue_detail(&state.db, id).await?;
    Ok(Json(detail))
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<VenueInput>, JsonRejection>,
) -> Result<Json<models::venue::Model>, ListingError> {
    let Json(input) = payload.map_err(|e| ListingError::bad_request(e.body_text()))?;
    let created = venues::create_venue(&state.db, input).await?;
    info!(venue_id = created.id, name = %created.name, "venue created");
    Ok(Json(created))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    payload: Result<Json<VenueInput>, JsonRejection>,
) -> Result<Json<models::venue::Model>, ListingError> {
    let Json(input) = payload.map_err(|e| ListingError::bad_request(e.body_text()))?;
    let updated = venues::update_venue(&state.db, id, input).await?;
    Ok(Json(updated))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ListingError> {
    venues::delete_venue(&state.db, id).await?;
    info!(venue_id = id, "venue deleted");
    Ok(StatusCode::NO_CONTENT)
}
