use axum::{
    http::StatusCode,
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use configs::AppConfig;
use sea_orm::DatabaseConnection;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::observability;

pub mod artists;
pub mod categories;
pub mod questions;
pub mod quizzes;
pub mod shows;
pub mod venues;

/// Shared handler state: the connection pool plus the loaded config.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> (StatusCode, String) {
    observability::encode_metrics()
}

fn trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
        .on_failure(DefaultOnFailure::new().level(Level::ERROR))
}

/// Router for the listing service: venues, artists and shows.
pub fn listing_router(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/venues", get(venues::list))
        .route("/venues/search", post(venues::search))
        .route("/venues/create", post(venues::create))
        .route(
            "/venues/:id",
            get(venues::detail).put(venues::update).delete(venues::remove),
        )
        .route("/artists", get(artists::list))
        .route("/artists/search", post(artists::search))
        .route("/artists/create", post(artists::create))
        .route("/artists/:id", get(artists::detail).put(artists::update))
        .route("/shows", get(shows::list))
        .route("/shows/create", post(shows::create))
        .route_layer(middleware::from_fn(observability::track_listing))
        .with_state(state)
        .layer(CorsLayer::very_permissive())
        .layer(trace_layer())
}

/// Router for the trivia service: categories, questions and the quiz.
pub fn trivia_router(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/categories", get(categories::list))
        .route("/categories/:id/questions", get(categories::questions))
        .route("/questions", get(questions::list).post(questions::search))
        .route("/questions/:id", delete(questions::remove))
        .route("/create_questions", post(questions::create))
        .route("/quizzes", post(quizzes::play))
        .route_layer(middleware::from_fn(observability::track_trivia))
        .with_state(state)
        .layer(CorsLayer::very_permissive())
        .layer(trace_layer())
}
