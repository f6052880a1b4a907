use crate::db::models::Recipe;
use crate::search::normalize::normalize_token;
use crate::search::query::Query;

/// A recipe paired with its ingredient overlap, alive only while ranking
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub recipe: Recipe,
    pub match_score: usize,
}

/// Keep recipes sharing at least one ingredient with the query, when the
/// query names any ingredient
fn ingredient_filter(candidate: &ScoredCandidate, query: &Query) -> bool {
    !query.has_ingredient_filter() || candidate.match_score > 0
}

fn title_filter(candidate: &ScoredCandidate, query: &Query) -> bool {
    match &query.title_substring {
        Some(fragment) => normalize_token(&candidate.recipe.title).contains(fragment.as_str()),
        None => true,
    }
}

fn max_time_filter(candidate: &ScoredCandidate, query: &Query) -> bool {
    match query.max_time {
        // Limits beyond i64 exclude nothing
        Some(max_time) => i64::try_from(max_time)
            .map_or(true, |max_time| candidate.recipe.cooking_time <= max_time),
        None => true,
    }
}

fn difficulty_filter(candidate: &ScoredCandidate, query: &Query) -> bool {
    match query.difficulty {
        Some(difficulty) => difficulty.matches(&candidate.recipe.difficulty),
        None => true,
    }
}

/// Whether a candidate passes every active filter
pub fn passes(candidate: &ScoredCandidate, query: &Query) -> bool {
    ingredient_filter(candidate, query)
        && title_filter(candidate, query)
        && max_time_filter(candidate, query)
        && difficulty_filter(candidate, query)
}

/// Drop candidates failing any active filter, preserving order
pub fn apply_filters(candidates: Vec<ScoredCandidate>, query: &Query) -> Vec<ScoredCandidate> {
    candidates
        .into_iter()
        .filter(|candidate| passes(candidate, query))
        .collect()
}
