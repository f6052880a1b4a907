use cookwizard::db::models::{NewRecipe, Recipe};
use cookwizard::db::recipes::{self, SqliteRecipeStore};
use cookwizard::db::seed::seed_database;
use cookwizard::search::{Difficulty, Query, SearchEngine};
use cookwizard::Error;
use sqlx::SqlitePool;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

async fn seeded_engine() -> SearchEngine<SqliteRecipeStore> {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    seed_database(&pool).await.expect("Failed to seed database");

    SearchEngine::new(SqliteRecipeStore::new(pool))
}

fn titles(recipes: &[Recipe]) -> Vec<&str> {
    recipes.iter().map(|r| r.title.as_str()).collect()
}

#[tokio::test]
async fn test_ingredient_search_orders_by_overlap_then_store_order() {
    let engine = seeded_engine().await;

    let results = engine
        .search(
            &Query::new().with_ingredients("курица, картошка"),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    // Both chicken dishes match two ingredients, Плов matches one
    assert_eq!(
        titles(&results),
        vec!["Курица с картошкой", "Суп куриный", "Плов"]
    );
}

#[tokio::test]
async fn test_ingredient_search_is_case_and_space_insensitive() {
    let engine = seeded_engine().await;
    let cancel = CancellationToken::new();

    let messy = engine
        .search(&Query::new().with_ingredients("  ПОМИДОРЫ ,огурцы,, "), &cancel)
        .await
        .unwrap();
    let clean = engine
        .search(&Query::new().with_ingredients("помидоры,огурцы"), &cancel)
        .await
        .unwrap();

    assert_eq!(messy, clean);
    assert_eq!(titles(&clean), vec!["Салат овощной", "Яичница с помидорами"]);
}

#[tokio::test]
async fn test_combined_filters() {
    let engine = seeded_engine().await;

    let query = Query::new()
        .with_ingredients("лук")
        .with_title("суп")
        .with_max_time(60)
        .with_difficulty(Difficulty::Medium);
    let results = engine.search(&query, &CancellationToken::new()).await.unwrap();
    assert_eq!(titles(&results), vec!["Суп куриный"]);

    let query = Query::new().with_ingredients("лук").with_max_time(30);
    let results = engine.search(&query, &CancellationToken::new()).await.unwrap();
    assert_eq!(titles(&results), vec!["Салат овощной"]);
}

#[tokio::test]
async fn test_unfiltered_search_returns_everything_in_store_order() {
    let engine = seeded_engine().await;

    let results = engine
        .search(&Query::new(), &CancellationToken::new())
        .await
        .unwrap();

    let ids: Vec<_> = results.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_no_match_is_empty_not_error() {
    let engine = seeded_engine().await;

    let results = engine
        .search(
            &Query::new().with_ingredients("трюфель"),
            &CancellationToken::new(),
        )
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_new_recipes_are_visible_to_later_searches() {
    let engine = seeded_engine().await;

    recipes::create_recipe(
        engine.store().pool(),
        &NewRecipe {
            title: "Рис с курицей".to_string(),
            ingredients: vec!["Рис".to_string(), "Курица".to_string()],
            instructions: "Сварить рис, обжарить курицу".to_string(),
            cooking_time: 35,
            difficulty: "easy".to_string(),
        },
    )
    .await
    .unwrap();

    let results = engine
        .search(
            &Query::new().with_ingredients("рис, курица"),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    // Плов was stored first, so it wins the tie
    assert_eq!(titles(&results)[..2], ["Плов", "Рис с курицей"]);
}

#[tokio::test]
async fn test_cancelled_search_returns_no_results() {
    let engine = seeded_engine().await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = engine.search(&Query::new(), &cancel).await;
    assert!(matches!(result, Err(Error::Cancelled)));
}

#[tokio::test]
async fn test_search_with_timeout_completes() {
    let engine = seeded_engine().await;

    let results = engine
        .search_with_timeout(&Query::new().with_title("плов"), Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(titles(&results), vec!["Плов"]);
}
