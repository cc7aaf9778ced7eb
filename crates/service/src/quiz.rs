use models::question;
use rand::seq::SliceRandom;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::errors::ServiceError;

/// Uniform draw from the unseen part of the pool. None means every question
/// in the pool has already been played.
pub fn pick_unseen(pool: Vec<question::Model>, previous: &[i32]) -> Option<question::Model> {
    let fresh: Vec<question::Model> = pool
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();
    fresh.choose(&mut rand::thread_rng()).cloned()
}

/// Draw the next quiz question. Category 0 plays across all categories. A
/// scope that holds no questions at all cannot be played.
pub async fn next_question(
    db: &DatabaseConnection,
    category_id: i32,
    previous: &[i32],
) -> Result<Option<question::Model>, ServiceError> {
    let pool = if category_id == 0 {
        question::Entity::find().all(db).await
    } else {
        question::Entity::find()
            .filter(question::Column::Category.eq(category_id))
            .all(db)
            .await
    }
    .map_err(|e| ServiceError::Db(e.to_string()))?;
    if pool.is_empty() {
        return Err(ServiceError::Unprocessable(format!(
            "no questions to play in category {category_id}"
        )));
    }
    Ok(pick_unseen(pool, previous))
}
