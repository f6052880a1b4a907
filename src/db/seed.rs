use crate::db::{models::NewRecipe, recipes, DbPool};
use crate::error::Result;
use tracing::info;

/// Sample recipes loaded into an empty store
pub fn sample_recipes() -> Vec<NewRecipe> {
    fn recipe(
        title: &str,
        ingredients: &[&str],
        instructions: &str,
        cooking_time: i64,
        difficulty: &str,
    ) -> NewRecipe {
        NewRecipe {
            title: title.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            instructions: instructions.to_string(),
            cooking_time,
            difficulty: difficulty.to_string(),
        }
    }

    vec![
        recipe(
            "Курица с картошкой",
            &["курица", "картошка", "лук", "морковь", "соль", "перец"],
            "1. Нарезать курицу и овощи\n2. Обжарить курицу\n3. Добавить овощи\n4. Тушить 30 минут",
            40,
            "easy",
        ),
        recipe(
            "Яичница с помидорами",
            &["яйца", "помидоры", "соль", "перец", "масло"],
            "1. Нарезать помидоры\n2. Разбить яйца\n3. Жарить 5-7 минут",
            10,
            "easy",
        ),
        recipe(
            "Суп куриный",
            &["курица", "картошка", "лук", "морковь", "вермишель", "соль"],
            "1. Сварить бульон из курицы\n2. Добавить овощи\n3. Добавить вермишель\n4. Варить 20 минут",
            60,
            "medium",
        ),
        recipe(
            "Салат овощной",
            &["помидоры", "огурцы", "лук", "масло", "соль", "перец"],
            "1. Нарезать овощи\n2. Посолить, поперчить\n3. Заправить маслом",
            15,
            "easy",
        ),
        recipe(
            "Плов",
            &["рис", "курица", "лук", "морковь", "чеснок", "специи"],
            "1. Обжарить курицу с овощами\n2. Добавить рис и воду\n3. Тушить 40 минут",
            60,
            "medium",
        ),
    ]
}

/// Insert the sample recipes unless the store already has data.
///
/// Returns the number of recipes inserted.
pub async fn seed_database(pool: &DbPool) -> Result<usize> {
    let existing = recipes::count_all_recipes(pool).await?;
    if existing > 0 {
        info!("Store already holds {} recipes, skipping seed", existing);
        return Ok(0);
    }

    let samples = sample_recipes();
    let mut tx = pool.begin().await?;
    for recipe in &samples {
        recipes::create_recipe(&mut *tx, recipe).await?;
    }
    tx.commit().await?;

    info!("Seeded {} sample recipes", samples.len());
    Ok(samples.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_pool, run_migrations};

    #[tokio::test]
    async fn test_seed_only_once() {
        let pool = init_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();

        assert_eq!(seed_database(&pool).await.unwrap(), 5);
        assert_eq!(seed_database(&pool).await.unwrap(), 0);
        assert_eq!(recipes::count_all_recipes(&pool).await.unwrap(), 5);
    }
}
