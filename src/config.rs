use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::search::strategy::{SearchOption, SearchPreset};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the search engine API (no trailing slash)
    pub api_base_url: String,
    /// TCP connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Overall request timeout in seconds. `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,
    /// How long a finished reindex stays in `completed` before reverting to `idle`
    pub completed_display_ms: u64,
    /// Preset used when the caller does not pick one
    pub default_preset: SearchPreset,
    /// Ask the engine to serve cached result sets
    pub caching: bool,
    /// Ask the engine to attach a generated summary to search responses
    pub ai_assist: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5017".to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: None,
            completed_display_ms: 3_000,
            default_preset: SearchPreset::Hybrid,
            caching: true,
            ai_assist: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Overlay `CHANNEL_SEARCH_*` values from `lookup` onto the defaults.
    /// Values that fail to parse are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("CHANNEL_SEARCH_API_URL") {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(val) = lookup("CHANNEL_SEARCH_CONNECT_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                config.connect_timeout_secs = v;
            }
        }
        if let Some(val) = lookup("CHANNEL_SEARCH_REQUEST_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                // 0 means "no timeout", same as leaving it unset
                config.request_timeout_secs = (v > 0).then_some(v);
            }
        }
        if let Some(val) = lookup("CHANNEL_SEARCH_COMPLETED_DISPLAY_MS") {
            if let Ok(v) = val.parse() {
                config.completed_display_ms = v;
            }
        }
        if let Some(val) = lookup("CHANNEL_SEARCH_DEFAULT_METHOD") {
            match val.parse() {
                Ok(preset) => config.default_preset = preset,
                Err(e) => tracing::warn!("Ignoring CHANNEL_SEARCH_DEFAULT_METHOD: {e}"),
            }
        }
        if let Some(val) = lookup("CHANNEL_SEARCH_CACHING") {
            if let Some(v) = parse_flag(&val) {
                config.caching = v;
            }
        }
        if let Some(val) = lookup("CHANNEL_SEARCH_AI_ASSIST") {
            if let Some(v) = parse_flag(&val) {
                config.ai_assist = v;
            }
        }

        config
    }

    /// Feature options attached to every search request.
    pub fn search_options(&self) -> Vec<SearchOption> {
        let mut options = Vec::new();
        if self.caching {
            options.push(SearchOption::Caching);
        }
        if self.ai_assist {
            options.push(SearchOption::AiAssist);
        }
        options
    }

    pub fn completed_display_window(&self) -> Duration {
        Duration::from_millis(self.completed_display_ms)
    }

    pub fn channels_url(&self) -> String {
        format!("{}/youtube/channels", self.api_base_url)
    }

    pub fn reindex_url(&self) -> String {
        format!("{}/youtube/reindex", self.api_base_url)
    }

    pub fn search_url(&self) -> String {
        format!("{}/search", self.api_base_url)
    }

    pub fn autocomplete_url(&self) -> String {
        format!("{}/search/autocomplete", self.api_base_url)
    }

    pub fn click_count_url(&self) -> String {
        format!("{}/search/update_click_count", self.api_base_url)
    }
}

fn parse_flag(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
