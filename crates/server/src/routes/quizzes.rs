use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use service::quiz;

use crate::errors::TriviaError;
use crate::routes::ServerState;

#[derive(Debug, Deserialize)]
pub struct QuizCategory {
    pub id: i32,
}

#[derive(Debug, Deserialize)]
pub struct QuizInput {
    #[serde(default)]
    pub previous_questions: Vec<i32>,
    pub quiz_category: Option<QuizCategory>,
}

/// One round of the quiz. The category is mandatory (id 0 plays across all
/// categories); an exhausted pool ends the game with question=false.
pub async fn play(
    State(state): State<ServerState>,
    payload: Result<Json<QuizInput>, JsonRejection>,
) -> Result<Json<Value>, TriviaError> {
    let Json(input) = payload.map_err(|_| TriviaError::bad_request())?;
    let category = match input.quiz_category {
        Some(c) => c,
        None => return Err(TriviaError::bad_request()),
    };
    let drawn = quiz::next_question(&state.db, category.id, &input.previous_questions).await?;
    let body = match drawn {
        Some(question) => json!({ "success": true, "question": question }),
        None => json!({ "success": true, "question": false }),
    };
    Ok(Json(body))
}
