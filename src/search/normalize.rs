//! Ingredient and title normalization shared by queries and stored recipes.

use std::collections::BTreeSet;

/// Separator between ingredients in a raw list such as `"картошка, лук"`
pub const INGREDIENT_SEPARATOR: char = ',';

/// Trim surrounding whitespace and lower-case a single token
pub fn normalize_token(token: &str) -> String {
    token.trim().to_lowercase()
}

/// Normalize a comma-separated ingredient list into a token set.
///
/// Empty tokens are dropped, so input made only of separators and whitespace
/// yields an empty set.
pub fn normalize_list(raw: &str) -> BTreeSet<String> {
    raw.split(INGREDIENT_SEPARATOR)
        .map(normalize_token)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Normalize a stored ingredient sequence into the set used for matching
pub fn normalize_ingredients<S: AsRef<str>>(ingredients: &[S]) -> BTreeSet<String> {
    ingredients
        .iter()
        .map(|i| normalize_token(i.as_ref()))
        .filter(|token| !token.is_empty())
        .collect()
}

/// Normalize optional free text, mapping blank input to `None`
pub fn normalize_optional(raw: Option<&str>) -> Option<String> {
    raw.map(normalize_token).filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_token() {
        assert_eq!(normalize_token("  Картошка "), "картошка");
        assert_eq!(normalize_token("EGGS"), "eggs");
        assert_eq!(normalize_token("   "), "");
    }

    #[test]
    fn test_normalize_list() {
        let set = normalize_list(" Картошка,ЛУК ,, картошка ");
        assert_eq!(set.len(), 2);
        assert!(set.contains("картошка"));
        assert!(set.contains("лук"));
    }

    #[test]
    fn test_separators_only_is_empty() {
        assert!(normalize_list("").is_empty());
        assert!(normalize_list(" , ,, ").is_empty());
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let once = normalize_list("Курица, ЛУК, Морковь");
        let joined = once.iter().cloned().collect::<Vec<_>>().join(",");
        assert_eq!(normalize_list(&joined), once);

        for token in &once {
            assert_eq!(&normalize_token(token), token);
        }
    }

    #[test]
    fn test_normalize_ingredients_is_order_and_case_independent() {
        let a = normalize_ingredients(&["Соль", "перец", "соль"]);
        let b = normalize_ingredients(&["ПЕРЕЦ", "соль"]);
        assert_eq!(a, b);
        assert!(normalize_ingredients::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(Some(" Суп ")), Some("суп".to_string()));
        assert_eq!(normalize_optional(Some("  ")), None);
        assert_eq!(normalize_optional(None), None);
    }
}
