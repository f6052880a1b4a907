use crate::error::{Error, Result};
use crate::search::normalize::{normalize_list, normalize_optional, normalize_token};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Recognized recipe difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Whether a stored difficulty value denotes this level.
    ///
    /// Stored values outside the closed set never match.
    pub fn matches(&self, stored: &str) -> bool {
        normalize_token(stored) == self.as_str()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_token(s).as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(Error::Validation(format!(
                "Invalid difficulty level: {}. Must be easy, medium, or hard",
                s.trim()
            ))),
        }
    }
}

/// A normalized search request. Every filter is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Normalized ingredient tokens; empty means no ingredient filter
    pub ingredient_terms: BTreeSet<String>,
    /// Normalized title fragment
    pub title_substring: Option<String>,
    /// Maximum cooking time in minutes
    pub max_time: Option<u64>,
    pub difficulty: Option<Difficulty>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set ingredient terms from a comma-separated list
    pub fn with_ingredients(mut self, raw: &str) -> Self {
        self.ingredient_terms = normalize_list(raw);
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title_substring = normalize_optional(Some(title));
        self
    }

    pub fn with_max_time(mut self, minutes: u64) -> Self {
        self.max_time = Some(minutes);
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn has_ingredient_filter(&self) -> bool {
        !self.ingredient_terms.is_empty()
    }

    /// True when no filter is active and the whole collection matches
    pub fn is_unfiltered(&self) -> bool {
        !self.has_ingredient_filter()
            && self.title_substring.is_none()
            && self.max_time.is_none()
            && self.difficulty.is_none()
    }
}

/// Raw search parameters as received from HTTP or the command line
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchParams {
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "maxTime", alias = "max_time")]
    pub max_time: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

/// Parse a positive whole number of minutes. Values too large for `u64`
/// saturate, since no stored recipe can exceed them.
fn parse_max_time(raw: &str) -> Result<u64> {
    let invalid = || {
        Error::Validation(format!(
            "Invalid maxTime: {raw}. Must be a positive number of minutes"
        ))
    };

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let minutes = raw.parse::<u64>().unwrap_or(u64::MAX);
    if minutes == 0 {
        return Err(invalid());
    }
    Ok(minutes)
}

impl TryFrom<SearchParams> for Query {
    type Error = Error;

    fn try_from(params: SearchParams) -> Result<Self> {
        let ingredient_terms = params
            .ingredients
            .as_deref()
            .map(normalize_list)
            .unwrap_or_default();

        let title_substring = normalize_optional(params.title.as_deref());

        let max_time = match params.max_time.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_max_time(raw)?),
        };

        let difficulty = match params.difficulty.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse()?),
        };

        Ok(Query {
            ingredient_terms,
            title_substring,
            max_time,
            difficulty,
        })
    }
}
