//! The four query shapes issued against the store.

use serde_json::Value;

const ALL: &str = r#"*[_type == "stockItem"] | order(_createdAt desc)"#;
const BY_ID: &str = r#"*[_type == "stockItem" && _id == $id][0]"#;
const BY_IDS: &str = r#"*[_type == "stockItem" && _id in $ids] | order(_createdAt desc)"#;
const SEARCH: &str = r#"*[_type == "stockItem" && (name match $query || sku match $query || category match $query)] | order(_createdAt desc)"#;

/// A read against the record collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Query {
    /// Every record, newest first.
    All,
    /// One record or nothing.
    ById(String),
    /// Records whose identity is in the list, newest first.
    ByIds(Vec<String>),
    /// Records whose name, SKU or category matches the text, newest first.
    Search(String),
}

impl Query {
    pub fn groq(&self) -> &'static str {
        match self {
            Query::All => ALL,
            Query::ById(_) => BY_ID,
            Query::ByIds(_) => BY_IDS,
            Query::Search(_) => SEARCH,
        }
    }

    /// Query-string parameters, `$`-prefixed with JSON-encoded values.
    pub fn params(&self) -> Vec<(String, String)> {
        match self {
            Query::All => Vec::new(),
            Query::ById(id) => vec![param("id", Value::from(id.as_str()))],
            Query::ByIds(ids) => vec![param("ids", Value::from(ids.clone()))],
            Query::Search(text) => vec![param("query", Value::from(search_pattern(text)))],
        }
    }
}

/// Wildcard pattern for a substring match.
pub(crate) fn search_pattern(text: &str) -> String {
    format!("*{}*", text.trim())
}

fn param(name: &str, value: Value) -> (String, String) {
    (format!("${name}"), value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_has_no_params_and_orders_newest_first() {
        assert!(Query::All.params().is_empty());
        assert!(Query::All.groq().ends_with("order(_createdAt desc)"));
    }

    #[test]
    fn by_id_encodes_json_string() {
        let params = Query::ById("abc".to_string()).params();
        assert_eq!(params, vec![("$id".to_string(), "\"abc\"".to_string())]);
    }

    #[test]
    fn by_ids_encodes_json_array() {
        let params = Query::ByIds(vec!["a".to_string(), "b".to_string()]).params();
        assert_eq!(params[0].1, r#"["a","b"]"#);
    }

    #[test]
    fn search_wraps_text_in_wildcards() {
        let params = Query::Search(" bolt ".to_string()).params();
        assert_eq!(params[0].0, "$query");
        assert_eq!(params[0].1, "\"*bolt*\"");
        assert!(Query::Search(String::new()).groq().contains("sku match $query"));
    }

    #[test]
    fn quotes_in_values_are_escaped() {
        let params = Query::ById(r#"a"b"#.to_string()).params();
        assert_eq!(params[0].1, r#""a\"b""#);
    }
}
