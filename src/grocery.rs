//! Extraction of the fragility-ordered list from free-form model text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Matches `"grocery_list": [ ... ]` and captures the array literal.
static GROCERY_LIST_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""grocery_list":\s*(\[[^\]]*\])"#).unwrap());

pub const EXTRACTION_FAILED: &str = "Failed to extract grocery list from response";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtractError {
    #[error("Failed to extract grocery list from response")]
    NotFound,

    #[error("grocery list is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("grocery list item {index} is not a string")]
    NonStringItem { index: usize },
}

/// Items ordered from most to least fragile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroceryList(Vec<String>);

impl GroceryList {
    pub fn items(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_items(self) -> Vec<String> {
        self.0
    }
}

/// Pulls the first `grocery_list` array out of `text`.
///
/// Every element must be a JSON string; anything else rejects the whole list
/// rather than showing a partial one.
pub fn extract_grocery_list(text: &str) -> Result<GroceryList, ExtractError> {
    let captures = GROCERY_LIST_PATTERN
        .captures(text)
        .ok_or(ExtractError::NotFound)?;

    let array: Vec<Value> = serde_json::from_str(&captures[1])
        .map_err(|e| ExtractError::InvalidJson(e.to_string()))?;

    array
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::String(item) => Ok(item),
            _ => Err(ExtractError::NonStringItem { index }),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(GroceryList)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_list_embedded_in_prose() {
        let text = r#"Sure! Here you go:
```json
{"grocery_list": ["eggs","bread"]}
```
Let me know if you need anything else."#;
        let list = extract_grocery_list(text).unwrap();
        assert_eq!(list.items(), ["eggs", "bread"]);
    }

    #[test]
    fn preserves_order_and_whitespace_in_items() {
        let text = "{\"grocery_list\":\n  [\"wine glasses\", \"tomatoes\", \"canned beans\"]}";
        let list = extract_grocery_list(text).unwrap();
        assert_eq!(
            list.into_items(),
            vec!["wine glasses", "tomatoes", "canned beans"]
        );
    }

    #[test]
    fn first_match_wins() {
        let text = r#""grocery_list": ["a"] and later "grocery_list": ["b"]"#;
        assert_eq!(extract_grocery_list(text).unwrap().items(), ["a"]);
    }

    #[test]
    fn empty_array_is_an_empty_list() {
        let list = extract_grocery_list(r#"{"grocery_list": []}"#).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn missing_key_is_not_found() {
        let err = extract_grocery_list("I could not read the list.").unwrap_err();
        assert_eq!(err, ExtractError::NotFound);
        assert_eq!(err.to_string(), EXTRACTION_FAILED);
    }

    #[test]
    fn differently_named_key_is_not_found() {
        let err = extract_grocery_list(r#"{"groceries": ["eggs"]}"#).unwrap_err();
        assert_eq!(err, ExtractError::NotFound);
    }

    #[test]
    fn broken_json_inside_brackets() {
        let err = extract_grocery_list(r#""grocery_list": [eggs, bread]"#).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidJson(_)));
    }

    #[test]
    fn non_string_entries_are_rejected() {
        let err = extract_grocery_list(r#""grocery_list": ["eggs", 12, "milk"]"#).unwrap_err();
        assert_eq!(err, ExtractError::NonStringItem { index: 1 });
    }
}
