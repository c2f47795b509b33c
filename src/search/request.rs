use serde::Serialize;

use crate::search::strategy::SearchStrategy;

/// A search ready to be sent: a non-blank query plus its strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    strategy: SearchStrategy,
}

impl SearchRequest {
    /// Returns `None` for an empty or whitespace-only query; such a query
    /// must never reach the engine. The query is otherwise kept verbatim.
    pub fn new(query: impl Into<String>, strategy: SearchStrategy) -> Option<Self> {
        let query = query.into();
        if query.trim().is_empty() {
            return None;
        }
        if !strategy.is_consistent() {
            tracing::warn!(
                "Aggregation method {} expects exactly one method family, got {:?} / {:?}",
                strategy.aggregation_method,
                strategy.syntactic_methods,
                strategy.semantic_methods
            );
        }
        Some(Self { query, strategy })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn strategy(&self) -> &SearchStrategy {
        &self.strategy
    }

    /// Canonical query-string parameters. List-valued fields are JSON
    /// arrays and are always present, `[]` when empty.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.query.clone()),
            (
                "aggregationMethod",
                self.strategy.aggregation_method.as_str().to_string(),
            ),
            (
                "syntacticMethods",
                json_array(&self.strategy.syntactic_methods),
            ),
            ("semanticMethods", json_array(&self.strategy.semantic_methods)),
            ("options", json_array(&self.strategy.options)),
        ]
    }
}

fn json_array<T: Serialize>(items: &[T]) -> String {
    // Unit enums with string renames cannot fail to serialize
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::strategy::{SearchOption, SearchPreset};

    fn pairs_for(query: &str, preset: SearchPreset) -> Vec<(&'static str, String)> {
        SearchRequest::new(query, preset.strategy(vec![SearchOption::Caching]))
            .unwrap()
            .query_pairs()
    }

    fn param<'a>(pairs: &'a [(&'static str, String)], key: &str) -> &'a str {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[test]
    fn test_hybrid_redis_encoding() {
        let pairs = pairs_for("redis", SearchPreset::Hybrid);
        assert_eq!(param(&pairs, "q"), "redis");
        assert_eq!(param(&pairs, "aggregationMethod"), "linear");
        assert_eq!(param(&pairs, "syntacticMethods"), r#"["bm25"]"#);
        assert_eq!(param(&pairs, "semanticMethods"), r#"["openai"]"#);
        assert_eq!(param(&pairs, "options"), r#"["caching"]"#);
    }

    #[test]
    fn test_bm25_encodes_empty_semantic_list() {
        let pairs = pairs_for("redis", SearchPreset::Bm25);
        assert_eq!(param(&pairs, "aggregationMethod"), "single");
        assert_eq!(param(&pairs, "semanticMethods"), "[]");
        assert_eq!(param(&pairs, "syntacticMethods"), r#"["bm25"]"#);
    }

    #[test]
    fn test_empty_options_still_encoded() {
        let req = SearchRequest::new("x", SearchPreset::OpenAi.strategy(Vec::new())).unwrap();
        let pairs = req.query_pairs();
        assert_eq!(param(&pairs, "options"), "[]");
        assert_eq!(param(&pairs, "syntacticMethods"), "[]");
        assert_eq!(pairs.len(), 5);
    }

    #[test]
    fn test_blank_queries_are_refused() {
        let strategy = SearchPreset::Hybrid.strategy(Vec::new());
        assert!(SearchRequest::new("", strategy.clone()).is_none());
        assert!(SearchRequest::new("  \t\n", strategy).is_none());
    }

    #[test]
    fn test_query_is_not_trimmed() {
        let req = SearchRequest::new("  redis cluster ", SearchPreset::Bm25.strategy(Vec::new()))
            .unwrap();
        assert_eq!(req.query(), "  redis cluster ");
    }
}
