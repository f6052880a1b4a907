use crate::db::models::Recipe;
use crate::error::{Error, Result};
use crate::search::filter::{apply_filters, ScoredCandidate};
use crate::search::normalize::normalize_ingredients;
use crate::search::query::Query;
use crate::search::ranker::rank;
use crate::search::scorer::match_score;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// How many recipes are scored between cancellation checks
const CANCEL_CHECK_INTERVAL: usize = 256;

/// Read access to the full recipe collection.
///
/// `list_all` returns recipes in the store's enumeration order, which the
/// ranker preserves among equal scores. Implementations should stop early
/// with [`Error::Cancelled`] once `cancel` fires.
pub trait RecipeStore: Send + Sync {
    fn list_all(
        &self,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Vec<Recipe>>> + Send;
}

/// In-memory store, enumerated in vector order
impl RecipeStore for Vec<Recipe> {
    async fn list_all(&self, cancel: &CancellationToken) -> Result<Vec<Recipe>> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        Ok(self.clone())
    }
}

/// Stateless recipe search over a [`RecipeStore`]
pub struct SearchEngine<S> {
    store: Arc<S>,
}

impl<S> Clone for SearchEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RecipeStore> SearchEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run a search: score every stored recipe, filter, then rank.
    ///
    /// Returns either the complete ranked list or an error; a cancelled call
    /// never yields a partial result.
    pub async fn search(&self, query: &Query, cancel: &CancellationToken) -> Result<Vec<Recipe>> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let recipes = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            result = self.store.list_all(cancel) => result?,
        };
        let total = recipes.len();

        let candidates = score_all(recipes, query, cancel)?;
        let ranked = rank(apply_filters(candidates, query));

        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        debug!(
            "Search matched {} of {} recipes ({} ingredient terms)",
            ranked.len(),
            total,
            query.ingredient_terms.len()
        );

        Ok(ranked.into_iter().map(|candidate| candidate.recipe).collect())
    }

    /// Run a search that is cancelled once `timeout` elapses
    pub async fn search_with_timeout(&self, query: &Query, timeout: Duration) -> Result<Vec<Recipe>> {
        let cancel = CancellationToken::new();

        match tokio::time::timeout(timeout, self.search(query, &cancel)).await {
            Ok(result) => result,
            Err(_) => {
                cancel.cancel();
                debug!("Search exceeded {:?}, cancelled", timeout);
                Err(Error::Cancelled)
            }
        }
    }
}

/// Pair every recipe with its score. Scoring is skipped, leaving 0, when the
/// query has no ingredient terms.
fn score_all(
    recipes: Vec<Recipe>,
    query: &Query,
    cancel: &CancellationToken,
) -> Result<Vec<ScoredCandidate>> {
    let mut candidates = Vec::with_capacity(recipes.len());

    for (i, recipe) in recipes.into_iter().enumerate() {
        if i % CANCEL_CHECK_INTERVAL == 0 && cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let match_score = if query.has_ingredient_filter() {
            match_score(&normalize_ingredients(&recipe.ingredients), &query.ingredient_terms)
        } else {
            0
        };

        candidates.push(ScoredCandidate {
            recipe,
            match_score,
        });
    }

    Ok(candidates)
}
