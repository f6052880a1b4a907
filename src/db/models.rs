use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Stored recipe row. Ingredients are persisted as a JSON array.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeRow {
    pub id: i64,
    pub title: String,
    pub ingredients: Json<Vec<String>>,
    pub instructions: String,
    pub cooking_time: i64,
    pub difficulty: String,
    pub created_at: DateTime<Utc>,
}

/// A recipe as seen by the search engine and returned over the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub cooking_time: i64,
    pub difficulty: String,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            ingredients: row.ingredients.0,
            instructions: row.instructions,
            cooking_time: row.cooking_time,
            difficulty: row.difficulty,
        }
    }
}

/// Input for creating a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecipe {
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: String,
    pub cooking_time: i64,
    pub difficulty: String,
}
