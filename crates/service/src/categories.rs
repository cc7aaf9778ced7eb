use std::collections::BTreeMap;

use models::{category, question};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;

use crate::errors::ServiceError;

/// All categories keyed by id. Serde turns the keys into strings on the
/// wire, which is the shape clients expect.
pub async fn category_map(db: &DatabaseConnection) -> Result<BTreeMap<i32, String>, ServiceError> {
    let categories = category::Entity::find()
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(categories.into_iter().map(|c| (c.id, c.kind)).collect())
}

#[derive(Debug, Serialize)]
pub struct CategoryQuestions {
    pub questions: Vec<question::Model>,
    pub total_questions: usize,
    pub current_category: String,
}

/// Every question filed under one category. The category itself must
/// exist; an empty question list is fine.
pub async fn questions_by_category(
    db: &DatabaseConnection,
    id: i32,
) -> Result<CategoryQuestions, ServiceError> {
    let cat = category::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found(format!("category {id}")))?;
    let questions = question::Entity::find()
        .filter(question::Column::Category.eq(id))
        .order_by_asc(question::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(CategoryQuestions {
        total_questions: questions.len(),
        questions,
        current_category: cat.kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ActiveModelTrait, Set};
    use uuid::Uuid;

    #[tokio::test]
    async fn stock_categories_are_present() -> anyhow::Result<()> {
        let db = match crate::test_support::test_db().await? {
            Some(db) => db,
            None => return Ok(()),
        };
        let map = category_map(&db).await?;
        assert!(map.values().any(|label| label == "Science"));
        assert!(map.values().any(|label| label == "Sports"));
        Ok(())
    }

    #[tokio::test]
    async fn category_questions_require_a_known_category() -> anyhow::Result<()> {
        let db = match crate::test_support::test_db().await? {
            Some(db) => db,
            None => return Ok(()),
        };

        let missing = questions_by_category(&db, i32::MAX).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));

        let cat = category::ActiveModel {
            kind: Set(format!("category_{}", Uuid::new_v4())),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let empty = questions_by_category(&db, cat.id).await?;
        assert_eq!(empty.total_questions, 0);
        assert!(empty.questions.is_empty());

        let q = models::question::create(&db, "Who scored?", "Nobody", Some(cat.id), Some(1)).await?;
        let filed = questions_by_category(&db, cat.id).await?;
        assert_eq!(filed.total_questions, 1);
        assert_eq!(filed.questions[0].id, q.id);
        assert_eq!(filed.current_category, cat.kind);

        question::Entity::delete_by_id(q.id).exec(&db).await?;
        category::Entity::delete_by_id(cat.id).exec(&db).await?;
        Ok(())
    }
}
