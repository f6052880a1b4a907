use crate::db::{models::*, DbPool};
use crate::error::{Error, Result};
use crate::search::RecipeStore;
use crate::utils::validation::validate_new_recipe;
use chrono::Utc;
use futures::TryStreamExt;
use sqlx::types::Json;
use tokio_util::sync::CancellationToken;

/// Create a new recipe on a pool or inside a transaction
pub async fn create_recipe<'e, E>(executor: E, new_recipe: &NewRecipe) -> Result<Recipe>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let NewRecipe {
        title,
        ingredients,
        instructions,
        cooking_time,
        difficulty,
    } = validate_new_recipe(new_recipe)?;

    let row = sqlx::query_as::<_, RecipeRow>(
        r#"
        INSERT INTO recipes (title, ingredients, instructions, cooking_time, difficulty, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(title)
    .bind(Json(ingredients))
    .bind(instructions)
    .bind(cooking_time)
    .bind(difficulty)
    .bind(Utc::now())
    .fetch_one(executor)
    .await?;

    Ok(row.into())
}

/// Get recipe by ID
pub async fn get_recipe(pool: &DbPool, recipe_id: i64) -> Result<Recipe> {
    let row = sqlx::query_as::<_, RecipeRow>("SELECT * FROM recipes WHERE id = ?")
        .bind(recipe_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Recipe {recipe_id} not found")))?;

    Ok(row.into())
}

/// List recipes in id order with pagination
pub async fn list_recipes(pool: &DbPool, limit: i64, offset: i64) -> Result<Vec<Recipe>> {
    let rows = sqlx::query_as::<_, RecipeRow>(
        "SELECT * FROM recipes ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Recipe::from).collect())
}

/// Stream every recipe in id order, stopping early once `cancel` fires.
///
/// A single SELECT runs against one SQLite read snapshot, so concurrent
/// inserts are either fully visible or not at all.
pub async fn list_all_recipes(pool: &DbPool, cancel: &CancellationToken) -> Result<Vec<Recipe>> {
    let mut rows = sqlx::query_as::<_, RecipeRow>("SELECT * FROM recipes ORDER BY id").fetch(pool);

    let mut recipes = Vec::new();
    while let Some(row) = rows.try_next().await? {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        recipes.push(row.into());
    }

    Ok(recipes)
}

/// Count all recipes
pub async fn count_all_recipes(pool: &DbPool) -> Result<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes")
        .fetch_one(pool)
        .await?;
    Ok(count.0)
}

/// Recipe store backed by the SQLite pool
#[derive(Clone)]
pub struct SqliteRecipeStore {
    pool: DbPool,
}

impl SqliteRecipeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl RecipeStore for SqliteRecipeStore {
    async fn list_all(&self, cancel: &CancellationToken) -> Result<Vec<Recipe>> {
        list_all_recipes(&self.pool, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_pool, run_migrations};

    fn new_recipe(title: &str, ingredients: &[&str]) -> NewRecipe {
        NewRecipe {
            title: title.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            instructions: "Mix and cook".to_string(),
            cooking_time: 20,
            difficulty: "Easy".to_string(),
        }
    }

    #[tokio::test]
    async fn test_recipe_crud() {
        let pool = init_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();

        let recipe = create_recipe(&pool, &new_recipe("Omelette", &["eggs", "salt"]))
            .await
            .unwrap();
        assert_eq!(recipe.title, "Omelette");
        assert_eq!(recipe.ingredients, vec!["eggs", "salt"]);
        // Difficulty is stored lower-case
        assert_eq!(recipe.difficulty, "easy");

        let retrieved = get_recipe(&pool, recipe.id).await.unwrap();
        assert_eq!(retrieved, recipe);

        assert_eq!(count_all_recipes(&pool).await.unwrap(), 1);

        let missing = get_recipe(&pool, recipe.id + 100).await;
        assert!(matches!(missing, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_recipe() {
        let pool = init_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();

        let mut recipe = new_recipe("  ", &[]);
        assert!(matches!(
            create_recipe(&pool, &recipe).await,
            Err(Error::Validation(_))
        ));

        recipe.title = "Soup".to_string();
        recipe.cooking_time = 0;
        assert!(matches!(
            create_recipe(&pool, &recipe).await,
            Err(Error::Validation(_))
        ));

        assert_eq!(count_all_recipes(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_all_in_id_order() {
        let pool = init_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();

        for title in ["First", "Second", "Third"] {
            create_recipe(&pool, &new_recipe(title, &["water"]))
                .await
                .unwrap();
        }

        let store = SqliteRecipeStore::new(pool.clone());
        let all = store.list_all(&CancellationToken::new()).await.unwrap();
        let titles: Vec<_> = all.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);

        let page = list_recipes(&pool, 1, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].title, "Second");
    }

    #[tokio::test]
    async fn test_list_all_honors_cancellation() {
        let pool = init_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        create_recipe(&pool, &new_recipe("Tea", &["water"]))
            .await
            .unwrap();

        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = list_all_recipes(&pool, &cancel).await;
        assert!(matches!(result, Err(Error::Cancelled)));
    }
}
