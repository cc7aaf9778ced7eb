use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use service::categories;

use crate::errors::TriviaError;
use crate::routes::ServerState;

pub async fn list(State(state): State<ServerState>) -> Result<Json<Value>, TriviaError> {
    let map = categories::category_map(&state.db).await?;
    Ok(Json(json!({ "success": true, "categories": map })))
}

pub async fn questions(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, TriviaError> {
    let filed = categories::questions_by_category(&state.db, id).await?;
    Ok(Json(json!({
        "success": true,
        "questions": filed.questions,
        "total_questions": filed.total_questions,
        "current_category": filed.current_category,
    })))
}
