//! HTTP calls to the search engine.
//!
//! Every call maps the response onto [`ApiError`] the same way: non-2xx
//! bodies are searched for an `{error}` message, anything else falls back
//! to the operation's generic message.

use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::Config;
use crate::error::{ApiError, Operation, Result};
use crate::models::{
    AddChannelOutcome, AddChannelRequest, Channel, ChannelId, ChannelListResponse,
    ClickCountRequest, ErrorBody, ReindexOutcome, SearchResponse,
};
use crate::search::request::SearchRequest;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Config,
}

impl ApiClient {
    pub fn new(config: Config) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// GET /youtube/channels
    pub async fn list_channels(&self) -> Result<Vec<Channel>> {
        let op = Operation::ListChannels;
        let resp = self
            .http
            .get(self.config.channels_url())
            .send()
            .await
            .map_err(|source| transport(op, source))?;
        let body: ChannelListResponse = read_json(op, resp).await?;
        Ok(body.into_channels())
    }

    /// POST /youtube/channels
    pub async fn add_channel(&self, url: &str) -> Result<AddChannelOutcome> {
        let op = Operation::AddChannel;
        let resp = self
            .http
            .post(self.config.channels_url())
            .json(&AddChannelRequest {
                url: url.to_string(),
            })
            .send()
            .await
            .map_err(|source| transport(op, source))?;
        read_json(op, resp).await
    }

    /// DELETE /youtube/channels/{id}
    pub async fn remove_channel(&self, id: &ChannelId) -> Result<()> {
        let op = Operation::RemoveChannel;
        let mut url = parse_url(&self.config.channels_url())?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidInput("API URL cannot carry a path".to_string()))?
            .push(id.as_str());

        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(|source| transport(op, source))?;
        let _: serde_json::Value = read_json(op, resp).await?;
        Ok(())
    }

    /// POST /youtube/reindex
    pub async fn reindex(&self) -> Result<ReindexOutcome> {
        let op = Operation::Reindex;
        let resp = self
            .http
            .post(self.config.reindex_url())
            .send()
            .await
            .map_err(|source| transport(op, source))?;
        read_json(op, resp).await
    }

    /// GET /search with the canonical parameter encoding.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let op = Operation::Search;
        let url = Url::parse_with_params(&self.config.search_url(), request.query_pairs())
            .map_err(|e| ApiError::InvalidInput(format!("Invalid API URL: {e}")))?;

        let resp = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| transport(op, source))?;
        read_json(op, resp).await
    }

    /// GET /search/autocomplete
    pub async fn autocomplete(&self, prefix: &str) -> Result<Vec<String>> {
        if prefix.trim().is_empty() {
            return Ok(Vec::new());
        }
        let op = Operation::Autocomplete;
        let url = Url::parse_with_params(&self.config.autocomplete_url(), [("q", prefix)])
            .map_err(|e| ApiError::InvalidInput(format!("Invalid API URL: {e}")))?;

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| transport(op, source))?;
        read_json(op, resp).await
    }

    /// POST /search/update_click_count
    pub async fn record_click(&self, phrase: &str) -> Result<()> {
        if phrase.trim().is_empty() {
            return Err(ApiError::InvalidInput("No phrase provided".to_string()));
        }
        let op = Operation::RecordClick;
        let resp = self
            .http
            .post(self.config.click_count_url())
            .json(&ClickCountRequest {
                phrase: phrase.to_string(),
            })
            .send()
            .await
            .map_err(|source| transport(op, source))?;
        let _: serde_json::Value = read_json(op, resp).await?;
        Ok(())
    }
}

fn transport(operation: Operation, source: reqwest::Error) -> ApiError {
    tracing::warn!("{operation} request failed: {source}");
    ApiError::Transport { operation, source }
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| ApiError::InvalidInput(format!("Invalid API URL: {e}")))
}

/// Decode a 2xx body into `T` (an empty body decodes as `T::default()`),
/// or turn a non-2xx response into the matching error.
async fn read_json<T: DeserializeOwned + Default>(op: Operation, resp: Response) -> Result<T> {
    let status = resp.status();
    let body = resp
        .bytes()
        .await
        .map_err(|source| transport(op, source))?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty());
        return Err(match message {
            Some(message) => {
                tracing::warn!("{op} rejected with {status}: {message}");
                ApiError::Rejected {
                    operation: op,
                    status: status.as_u16(),
                    message,
                }
            }
            None => {
                tracing::warn!("{op} failed with {status} and no error message");
                ApiError::Unexplained {
                    operation: op,
                    status: status.as_u16(),
                }
            }
        });
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(&body).map_err(|source| {
        tracing::warn!("{op} returned an unreadable body: {source}");
        ApiError::Malformed {
            operation: op,
            source,
        }
    })
}
