use crate::db::models::Recipe;
use crate::search::SearchParams;
use crate::utils::sanitize::truncate;
use crate::{Error, Result};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Where a search request should be sent
fn search_path(params: &SearchParams) -> String {
    let only_title = params.ingredients.is_none()
        && params.max_time.is_none()
        && params.difficulty.is_none();

    match params.title.as_deref().map(str::trim) {
        Some(title) if only_title && !title.is_empty() => {
            format!("/api/search/title/{}", urlencoding::encode(title))
        }
        _ => "/api/search".to_string(),
    }
}

/// Search a running server and print the ranked results
pub async fn search(server_url: &str, params: SearchParams) -> Result<()> {
    let client = Client::new();
    let url = format!("{}{}", server_url.trim_end_matches('/'), search_path(&params));

    let mut request = client.get(&url);
    if url.ends_with("/api/search") {
        request = request.query(&params);
    }

    let response = request.send().await?;
    let recipes: Vec<Recipe> = read_json(response).await?;

    print_search_results(&recipes);
    Ok(())
}

/// Decode a successful response, turning API error bodies into errors
async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .map(|body| body.error)
        .unwrap_or_else(|_| status.to_string());

    Err(match status {
        StatusCode::BAD_REQUEST => Error::Validation(message),
        StatusCode::NOT_FOUND => Error::NotFound(message),
        StatusCode::SERVICE_UNAVAILABLE => Error::Cancelled,
        _ => Error::Internal(format!("Server returned {status}: {message}")),
    })
}

fn print_search_results(recipes: &[Recipe]) {
    if recipes.is_empty() {
        println!("No recipes found");
        return;
    }

    println!("\nFound {} recipes:\n", recipes.len());
    println!("{:<5} {:<40} {:<10} {:<10}", "ID", "Title", "Time", "Difficulty");
    println!("{}", "-".repeat(68));

    for recipe in recipes {
        println!(
            "{:<5} {:<40} {:<10} {:<10}",
            recipe.id,
            truncate(&recipe.title, 40),
            format!("{} min", recipe.cooking_time),
            recipe.difficulty
        );
    }
}
