use sea_orm::{entity::prelude::*, DatabaseConnection, Set, SqlErr};
use serde::{Deserialize, Serialize};

use crate::{category, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "question")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub category: Option<i32>,
    pub difficulty: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Category }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::Category)
                .to(category::Column::Id)
                .into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert a new question. Both texts are mandatory; a dangling category
/// reference surfaces as a validation error rather than a driver error.
pub async fn create(
    db: &DatabaseConnection,
    question: &str,
    answer: &str,
    category: Option<i32>,
    difficulty: Option<i32>,
) -> Result<Model, errors::ModelError> {
    if question.trim().is_empty() {
        return Err(errors::ModelError::validation("question required"));
    }
    if answer.trim().is_empty() {
        return Err(errors::ModelError::validation("answer required"));
    }
    let am = ActiveModel {
        question: Set(question.to_string()),
        answer: Set(answer.to_string()),
        category: Set(category),
        difficulty: Set(difficulty),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            errors::ModelError::validation("category does not exist")
        }
        _ => errors::ModelError::Db(e.to_string()),
    })
}
