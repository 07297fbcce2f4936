//! Free-text shopping list splitting
//!
//! "leite, ovos e café" -> ["leite", "ovos", "café"]. Items are separated by
//! commas or by the conjunctions " e " / " and ", then trimmed and lower-cased.

use crate::domain::error::NavError;

const CONJUNCTIONS: [&str; 2] = [" e ", " and "];

/// Split a spoken or typed list into normalized item texts
pub fn parse_shopping_list(text: &str) -> Result<Vec<String>, NavError> {
    let mut normalized = text.to_lowercase();
    for conjunction in CONJUNCTIONS {
        normalized = normalized.replace(conjunction, ",");
    }

    let items: Vec<String> = normalized
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if items.is_empty() {
        return Err(NavError::EmptyInput);
    }
    Ok(items)
}
