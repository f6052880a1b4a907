use std::collections::BTreeSet;

/// Number of query terms present in a recipe's normalized ingredient set
pub fn match_score(recipe_ingredients: &BTreeSet<String>, query_terms: &BTreeSet<String>) -> usize {
    // Walk the smaller set and probe the larger one
    let (small, large) = if recipe_ingredients.len() <= query_terms.len() {
        (recipe_ingredients, query_terms)
    } else {
        (query_terms, recipe_ingredients)
    };

    small.iter().filter(|term| large.contains(*term)).count()
}
