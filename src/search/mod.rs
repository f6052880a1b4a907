// Recipe matching and ranking
// normalize -> score -> filter -> rank

pub mod engine;
pub mod filter;
pub mod normalize;
pub mod query;
pub mod ranker;
pub mod scorer;

// Re-exports
pub use engine::{RecipeStore, SearchEngine};
pub use filter::ScoredCandidate;
pub use normalize::{normalize_ingredients, normalize_list, normalize_token};
pub use query::{Difficulty, Query, SearchParams};
