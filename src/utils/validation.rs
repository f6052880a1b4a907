// Validation utilities
use crate::db::models::NewRecipe;
use crate::error::{Error, Result};
use crate::search::Difficulty;

/// Maximum accepted title length, in characters
const MAX_TITLE_LENGTH: usize = 200;

/// Validate difficulty level and return its canonical lower-case form
pub fn validate_difficulty(difficulty: &str) -> Result<Difficulty> {
    difficulty.parse()
}

/// Validate a recipe before it is stored.
///
/// Returns a copy with the title and instructions trimmed, empty ingredient
/// tokens dropped and the difficulty lower-cased.
pub fn validate_new_recipe(recipe: &NewRecipe) -> Result<NewRecipe> {
    let title = recipe.title.trim();
    if title.is_empty() {
        return Err(Error::Validation("Recipe title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(Error::Validation(format!(
            "Recipe title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }

    if recipe.cooking_time <= 0 {
        return Err(Error::Validation(format!(
            "Cooking time must be a positive number of minutes, got {}",
            recipe.cooking_time
        )));
    }

    let difficulty = validate_difficulty(&recipe.difficulty)?;

    let ingredients = recipe
        .ingredients
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .map(str::to_string)
        .collect();

    Ok(NewRecipe {
        title: title.to_string(),
        ingredients,
        instructions: recipe.instructions.trim().to_string(),
        cooking_time: recipe.cooking_time,
        difficulty: difficulty.as_str().to_string(),
    })
}
