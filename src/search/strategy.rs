//! Retrieval strategy presets and the descriptor they map to.
//!
//! A [`SearchStrategy`] tells the engine which scoring families to run and
//! how to combine them. Presets are fixed, so the aggregation/method
//! consistency rule holds by construction for them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Policy the engine uses to merge scores from several methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMethod {
    /// Exactly one scoring family contributes.
    Single,
    /// Weighted linear combination of every family's scores.
    Linear,
    /// Reciprocal rank fusion.
    RankFusion,
    /// First method whose results clear the engine's threshold wins.
    Cascade,
}

impl AggregationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Linear => "linear",
            Self::RankFusion => "rank_fusion",
            Self::Cascade => "cascade",
        }
    }
}

impl fmt::Display for AggregationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "linear" => Ok(Self::Linear),
            "rank_fusion" | "rank-fusion" | "rrf" => Ok(Self::RankFusion),
            "cascade" => Ok(Self::Cascade),
            other => Err(format!("unknown aggregation method: {other}")),
        }
    }
}

/// Lexical (term-matching) scoring methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntacticMethod {
    Bm25,
    Tfidf,
    Fulltext,
}

/// Embedding-similarity scoring methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SemanticMethod {
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "st_1")]
    SentenceTransformer1,
    #[serde(rename = "st_2")]
    SentenceTransformer2,
    #[serde(rename = "st_3")]
    SentenceTransformer3,
}

/// Engine feature flags that do not affect scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOption {
    /// The engine may answer from its result cache.
    Caching,
    /// The engine attaches a generated summary (`ai_response`).
    AiAssist,
}

/// Normalized request descriptor handed to the request builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStrategy {
    pub aggregation_method: AggregationMethod,
    pub syntactic_methods: Vec<SyntacticMethod>,
    pub semantic_methods: Vec<SemanticMethod>,
    pub options: Vec<SearchOption>,
}

impl SearchStrategy {
    /// A `single` descriptor must populate exactly one method family.
    /// Other aggregation methods accept any population.
    pub fn is_consistent(&self) -> bool {
        match self.aggregation_method {
            AggregationMethod::Single => {
                self.syntactic_methods.is_empty() != self.semantic_methods.is_empty()
            }
            _ => true,
        }
    }

    /// Replace the aggregation method, keeping the method lists.
    pub fn with_aggregation(mut self, method: AggregationMethod) -> Self {
        self.aggregation_method = method;
        self
    }

    pub fn with_options(mut self, options: Vec<SearchOption>) -> Self {
        self.options = options;
        self
    }
}

/// User-facing retrieval presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SearchPreset {
    /// BM25 and OpenAI embeddings blended linearly
    #[default]
    Hybrid,
    /// BM25 lexical ranking only
    Bm25,
    /// OpenAI embedding similarity only
    #[value(name = "openai")]
    #[serde(rename = "openai")]
    OpenAi,
}

impl SearchPreset {
    pub const ALL: [SearchPreset; 3] = [Self::Hybrid, Self::Bm25, Self::OpenAi];

    /// Pure mapping from preset to descriptor. `options` are attached as-is.
    pub fn strategy(&self, options: Vec<SearchOption>) -> SearchStrategy {
        let (aggregation_method, syntactic_methods, semantic_methods) = match self {
            Self::Hybrid => (
                AggregationMethod::Linear,
                vec![SyntacticMethod::Bm25],
                vec![SemanticMethod::OpenAi],
            ),
            Self::Bm25 => (
                AggregationMethod::Single,
                vec![SyntacticMethod::Bm25],
                Vec::new(),
            ),
            Self::OpenAi => (
                AggregationMethod::Single,
                Vec::new(),
                vec![SemanticMethod::OpenAi],
            ),
        };

        SearchStrategy {
            aggregation_method,
            syntactic_methods,
            semantic_methods,
            options,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Hybrid => "Hybrid Search",
            Self::Bm25 => "BM25",
            Self::OpenAi => "OpenAI",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hybrid => "hybrid",
            Self::Bm25 => "bm25",
            Self::OpenAi => "openai",
        }
    }
}

impl fmt::Display for SearchPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hybrid" => Ok(Self::Hybrid),
            "bm25" => Ok(Self::Bm25),
            "openai" => Ok(Self::OpenAi),
            other => Err(format!("unknown search method: {other}")),
        }
    }
}
