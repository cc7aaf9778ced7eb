use std::collections::BTreeMap;

use models::question;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};
use serde::Serialize;

use crate::categories::category_map;
use crate::errors::ServiceError;

pub const QUESTIONS_PER_PAGE: usize = 10;

/// Take the requested page out of the full ordered list. Page numbers start
/// at one; anything out of range comes back empty.
pub fn page_slice<T>(items: &[T], page: usize) -> &[T] {
    if page == 0 {
        return &items[..0];
    }
    let start = (page - 1).saturating_mul(QUESTIONS_PER_PAGE);
    if start >= items.len() {
        return &items[..0];
    }
    let end = start.saturating_add(QUESTIONS_PER_PAGE).min(items.len());
    &items[start..end]
}

#[derive(Debug, Serialize)]
pub struct QuestionPage {
    pub questions: Vec<question::Model>,
    pub total_questions: usize,
    pub categories: BTreeMap<i32, String>,
    pub current_category: Vec<Option<String>>,
}

/// One page of questions plus the category labels the page touches.
/// `current_category` lines up with `questions`; uncategorized entries
/// carry a null there.
pub async fn list_questions(
    db: &DatabaseConnection,
    page: usize,
) -> Result<QuestionPage, ServiceError> {
    let all = question::Entity::find()
        .order_by_asc(question::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let page_items = page_slice(&all, page).to_vec();
    if page_items.is_empty() {
        return Err(ServiceError::not_found(format!("no questions on page {page}")));
    }
    let categories = category_map(db).await?;
    let current_category = page_items
        .iter()
        .map(|q| q.category.and_then(|id| categories.get(&id).cloned()))
        .collect();
    Ok(QuestionPage {
        total_questions: page_items.len(),
        questions: page_items,
        categories,
        current_category,
    })
}

#[derive(Debug, Serialize)]
pub struct QuestionSearchOutcome {
    pub questions: Vec<question::Model>,
    pub total_questions: usize,
    pub current_category: Option<String>,
}

/// Case-insensitive substring match on the question text. No hits is a
/// not-found, matching the paging behavior.
pub async fn search_questions(
    db: &DatabaseConnection,
    term: &str,
) -> Result<QuestionSearchOutcome, ServiceError> {
    let pattern = format!("%{}%", term.to_lowercase());
    let matches = question::Entity::find()
        .filter(
            Expr::expr(Func::lower(Expr::col((question::Entity, question::Column::Question))))
                .like(pattern),
        )
        .order_by_asc(question::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if matches.is_empty() {
        return Err(ServiceError::not_found(format!("no questions match {term}")));
    }
    Ok(QuestionSearchOutcome {
        total_questions: matches.len(),
        questions: matches,
        current_category: None,
    })
}

pub async fn create_question(
    db: &DatabaseConnection,
    question_text: &str,
    answer: &str,
    category: Option<i32>,
    difficulty: Option<i32>,
) -> Result<question::Model, ServiceError> {
    let created = question::create(db, question_text, answer, category, difficulty).await?;
    Ok(created)
}

/// Remove a question and hand back what was removed.
pub async fn delete_question(
    db: &DatabaseConnection,
    id: i32,
) -> Result<question::Model, ServiceError> {
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let q = question::Entity::find_by_id(id)
        .one(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found(format!("question {id}")))?;
    question::Entity::delete_by_id(id)
        .exec(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(q)
}
