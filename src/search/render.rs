//! Display model for search output.
//!
//! Results are shown exactly as ranked by the engine. Only one view is
//! active at a time, chosen by priority: error, loading, empty, results.

use std::fmt;

use crate::models::{SearchResult, TrustedMarkup};

/// One result prepared for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResult {
    pub title: TrustedMarkup,
    pub snippet: TrustedMarkup,
    pub relevance_percent: i64,
}

impl From<&SearchResult> for RenderedResult {
    fn from(result: &SearchResult) -> Self {
        Self {
            title: result.highlighted_name.clone(),
            snippet: result.content_snippet.clone(),
            relevance_percent: relevance_percent(result.relevance_score),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchView {
    /// Nothing searched yet.
    Idle,
    Error(String),
    Loading,
    /// A finished search for a non-empty query came back with no hits.
    Empty { query: String },
    Results {
        ai_response: Option<String>,
        entries: Vec<RenderedResult>,
    },
}

impl SearchView {
    /// Pick the single view to show for the given session state.
    pub fn resolve(
        error: Option<&str>,
        loading: bool,
        completed_query: Option<&str>,
        results: &[SearchResult],
        ai_response: Option<&str>,
    ) -> Self {
        if let Some(message) = error {
            return Self::Error(message.to_string());
        }
        if loading {
            return Self::Loading;
        }
        match completed_query {
            Some(query) if results.is_empty() && !query.trim().is_empty() => Self::Empty {
                query: query.to_string(),
            },
            _ if results.is_empty() => Self::Idle,
            _ => Self::Results {
                ai_response: ai_response.map(str::to_string),
                entries: results.iter().map(RenderedResult::from).collect(),
            },
        }
    }
}

/// Integer percentage for a raw engine score, rounding halves up.
pub fn relevance_percent(score: f64) -> i64 {
    if !score.is_finite() {
        return 0;
    }
    (score + 0.5).floor() as i64
}

impl fmt::Display for SearchView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => Ok(()),
            Self::Error(message) => writeln!(f, "Error: {message}"),
            Self::Loading => writeln!(f, "Searching..."),
            Self::Empty { query } => writeln!(f, "No results found for \"{query}\""),
            Self::Results {
                ai_response,
                entries,
            } => {
                if let Some(summary) = ai_response {
                    writeln!(f, "{summary}")?;
                    writeln!(f)?;
                }
                for (i, entry) in entries.iter().enumerate() {
                    writeln!(f, "[{}] {}", i + 1, entry.title.to_plain_text())?;
                    writeln!(f, "    {}", entry.snippet.to_plain_text())?;
                    writeln!(f, "    Relevance Score: {}%", entry.relevance_percent)?;
                }
                Ok(())
            }
        }
    }
}
