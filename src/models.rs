use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which upstream field a channel identifier was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdSource {
    Id,
    VideoId,
}

/// Normalized channel identifier, resolved once when the list is ingested.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId {
    value: String,
    source: IdSource,
}

impl ChannelId {
    pub fn new(value: impl Into<String>, source: IdSource) -> Self {
        Self {
            value: value.into(),
            source,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn source(&self) -> IdSource {
        self.source
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// A registered channel as the client sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Channel {
    pub id: ChannelId,
    pub title: String,
    pub url: Option<String>,
    pub indexed_at: Option<String>,
    pub transcripts_count: u64,
}

impl Channel {
    /// Last indexing time as a calendar date, or `Unknown`.
    pub fn indexed_date(&self) -> String {
        match &self.indexed_at {
            None => "Unknown".to_string(),
            Some(raw) => format_indexed_at(raw),
        }
    }
}

/// Upstream channel entry. The schema carries alternate spellings for
/// several fields; see [`RawChannel::normalize`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawChannel {
    #[serde(default)]
    pub id: Option<IdValue>,
    #[serde(default)]
    pub video_id: Option<IdValue>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub indexed_at: Option<String>,
    #[serde(default, rename = "lastUpdated")]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub transcripts_count: Option<u64>,
    #[serde(default, rename = "videoCount")]
    pub video_count: Option<u64>,
}

/// Identifiers arrive as strings or integers depending on the backing table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    Text(String),
    Number(i64),
}

impl IdValue {
    fn into_string(self) -> Option<String> {
        match self {
            Self::Text(s) if s.trim().is_empty() => None,
            Self::Text(s) => Some(s),
            Self::Number(n) => Some(n.to_string()),
        }
    }
}

impl RawChannel {
    /// Resolve the identifier and the alternate fields. Returns `None` when
    /// neither `id` nor `video_id` is usable.
    pub fn normalize(self) -> Option<Channel> {
        let id = match self.id.and_then(IdValue::into_string) {
            Some(v) => ChannelId::new(v, IdSource::Id),
            None => ChannelId::new(
                self.video_id.and_then(IdValue::into_string)?,
                IdSource::VideoId,
            ),
        };

        Some(Channel {
            title: self.title.unwrap_or_else(|| id.to_string()),
            id,
            url: self.url,
            indexed_at: self.indexed_at.or(self.last_updated),
            // A zero count falls through to `videoCount`
            transcripts_count: self
                .transcripts_count
                .filter(|&n| n > 0)
                .or(self.video_count)
                .unwrap_or(0),
        })
    }
}

/// `GET /youtube/channels` body. Older engines answer under `videos`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default, alias = "videos")]
    pub channels: Vec<RawChannel>,
}

impl ChannelListResponse {
    pub fn into_channels(self) -> Vec<Channel> {
        let total = self.channels.len();
        let channels: Vec<Channel> = self
            .channels
            .into_iter()
            .filter_map(RawChannel::normalize)
            .collect();
        if channels.len() < total {
            tracing::warn!(
                "Dropped {} channel entries without an id or video_id",
                total - channels.len()
            );
        }
        channels
    }
}

/// Add-channel request
#[derive(Debug, Clone, Serialize)]
pub struct AddChannelRequest {
    pub url: String,
}

/// Counts reported by the engine after registering a channel.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AddChannelOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub total_videos: u64,
    #[serde(default)]
    pub indexed_count: u64,
    #[serde(default)]
    pub failed_count: u64,
}

/// Counts reported by the engine after a reindex pass.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReindexOutcome {
    #[serde(default)]
    pub videos_processed: u64,
    #[serde(default)]
    pub successfully_indexed: u64,
    #[serde(default)]
    pub failed: u64,
}

/// Engine-rendered markup. The engine guarantees these fragments are
/// sanitized with only match spans marked; a different engine has to keep
/// that guarantee or the caller must sanitize before emitting HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustedMarkup(String);

impl TrustedMarkup {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_html(&self) -> &str {
        &self.0
    }

    /// Markup with tags removed and the common entities decoded.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut in_tag = false;
        for c in self.0.chars() {
            match c {
                '<' => in_tag = true,
                '>' if in_tag => in_tag = false,
                _ if !in_tag => out.push(c),
                _ => {}
            }
        }
        out.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&#x27;", "'")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
    }
}

/// One ranked hit as returned by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub highlighted_name: TrustedMarkup,
    #[serde(default)]
    pub content_snippet: TrustedMarkup,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub relevance_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// `GET /search` body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub search_results: Vec<SearchResult>,
    #[serde(default)]
    pub ai_response: Option<String>,
    /// Informational only on a 2xx response.
    #[serde(default)]
    pub error: Option<String>,
}

/// Error envelope on non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Click-count request
#[derive(Debug, Clone, Serialize)]
pub struct ClickCountRequest {
    pub phrase: String,
}

fn format_indexed_at(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.date_naive().to_string();
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return dt.date().to_string();
        }
    }
    for fmt in ["%Y-%m-%d", "%Y%m%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return d.to_string();
        }
    }
    raw.to_string()
}
