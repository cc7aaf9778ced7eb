use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use service::questions;
use tracing::info;

use crate::errors::TriviaError;
use crate::routes::ServerState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<String>,
}

// Unreadable page values fall back to the first page; zero and negative
// pages stay out of range so the list answers not-found for them
fn page_number(q: &PageQuery) -> usize {
    match q.page.as_deref().map(|raw| raw.parse::<i64>()) {
        None => 1,
        Some(Ok(n)) if n <= 0 => 0,
        Some(Ok(n)) => usize::try_from(n).unwrap_or(usize::MAX),
        Some(Err(_)) => 1,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<Value>, TriviaError> {
    let page = questions::list_questions(&state.db, page_number(&q)).await?;
    Ok(Json(json!({
        "success": true,
        "questions": page.questions,
        "total_questions": page.total_questions,
        "categories": page.categories,
        "current_category": page.current_category,
    })))
}

#[derive(Debug, Deserialize)]
pub struct SearchInput {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

pub async fn search(
    State(state): State<ServerState>,
    payload: Result<Json<SearchInput>, JsonRejection>,
) -> Result<Json<Value>, TriviaError> {
    let Json(input) = payload.map_err(|_| TriviaError::bad_request())?;
    let term = match input.search_term {
        Some(term) => term,
        None => return Err(TriviaError::bad_request()),
    };
    let outcome = questions::search_questions(&state.db, &term).await?;
    Ok(Json(json!({
        "success": true,
        "questions": outcome.questions,
        "total_questions": outcome.total_questions,
        "current_category": outcome.current_category,
    })))
}

#[derive(Debug, Deserialize)]
pub struct CreateQuestionInput {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<i32>,
    pub difficulty: Option<i32>,
}

/// Any failure to file the question reads as a bad request, missing texts
/// included.
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<CreateQuestionInput>, JsonRejection>,
) -> Result<Json<Value>, TriviaError> {
    let Json(input) = payload.map_err(|_| TriviaError::bad_request())?;
    let question = input.question.unwrap_or_default();
    let answer = input.answer.unwrap_or_default();
    let created = questions::create_question(
        &state.db,
        &question,
        &answer,
        input.category,
        input.difficulty,
    )
    .await
    .map_err(|_| TriviaError::bad_request())?;
    info!(question_id = created.id, "question created");
    Ok(Json(json!({ "success": true, "created_question": created })))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, TriviaError> {
    let removed = questions::delete_question(&state.db, id).await?;
    info!(question_id = id, "question deleted");
    Ok(Json(json!({ "success": true, "deleted": removed })))
}
