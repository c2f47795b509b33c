use thiserror::Error;

use crate::error::ApiError;
use crate::indexing::{IndexingEvent, ReindexBlocked};
use crate::models::{AddChannelOutcome, ChannelId, ReindexOutcome};
use crate::state::ClientState;

#[derive(Debug, Error)]
pub enum ReindexError {
    #[error(transparent)]
    Blocked(#[from] ReindexBlocked),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// GET /youtube/channels - Replace the cached list with the engine's.
/// On failure the previous list stays and the error is recorded.
pub async fn refresh_channels(state: &ClientState) -> Result<usize, ApiError> {
    match state.api.list_channels().await {
        Ok(channels) => {
            let count = channels.len();
            state.registry.write().replace(channels);
            tracing::debug!("Channel list refreshed: {count} channels");
            Ok(count)
        }
        Err(e) => {
            record_error(state, &e);
            Err(e)
        }
    }
}

/// POST /youtube/channels - Register the URL currently in the input field.
///
/// Returns `Ok(None)` without a request when the input is blank. The input
/// is cleared only when the engine accepts the channel.
pub async fn add_channel(state: &ClientState) -> Result<Option<AddChannelOutcome>, ApiError> {
    let url = {
        let mut registry = state.registry.write();
        let url = registry.url_input().trim().to_string();
        if url.is_empty() {
            return Ok(None);
        }
        registry.set_adding(true);
        registry.clear_error();
        url
    };

    tracing::info!("Adding channel {url}");
    let result = state.api.add_channel(&url).await;

    let outcome = match result {
        Ok(outcome) => {
            tracing::info!(
                "Channel added: {} of {} videos indexed ({} failed)",
                outcome.indexed_count,
                outcome.total_videos,
                outcome.failed_count
            );
            if let Err(e) = refresh_channels(state).await {
                tracing::warn!("Channel list refresh after add failed: {e}");
            }
            state.registry.write().clear_url_input();
            Ok(Some(outcome))
        }
        Err(e) => {
            record_error(state, &e);
            Err(e)
        }
    };

    state.registry.write().set_adding(false);
    outcome
}

/// DELETE /youtube/channels/{id}
pub async fn remove_channel(state: &ClientState, id: &ChannelId) -> Result<(), ApiError> {
    tracing::info!("Removing channel {id}");
    match state.api.remove_channel(id).await {
        Ok(()) => {
            if let Err(e) = refresh_channels(state).await {
                tracing::warn!("Channel list refresh after remove failed: {e}");
            }
            Ok(())
        }
        Err(e) => {
            record_error(state, &e);
            Err(e)
        }
    }
}

/// POST /youtube/reindex - Drive the indexing state machine through one run.
pub async fn reindex(state: &ClientState) -> Result<ReindexOutcome, ReindexError> {
    let channel_count = state.registry.read().len();
    {
        let mut machine = state.indexing.write();
        machine.check_reindex(channel_count)?;
        machine.dispatch(IndexingEvent::Requested);
    }
    state.registry.write().clear_error();

    tracing::info!("Reindexing {channel_count} channels");
    match state.api.reindex().await {
        Ok(outcome) => {
            state.indexing.write().dispatch(IndexingEvent::Succeeded);
            tracing::info!(
                "Reindex complete: {} processed, {} indexed, {} failed",
                outcome.videos_processed,
                outcome.successfully_indexed,
                outcome.failed
            );
            if let Err(e) = refresh_channels(state).await {
                tracing::warn!("Channel list refresh after reindex failed: {e}");
            }
            Ok(outcome)
        }
        Err(e) => {
            record_error(state, &e);
            state.indexing.write().dispatch(IndexingEvent::Failed);
            tracing::error!("Reindex failed: {e}");
            Err(e.into())
        }
    }
}

/// Put a failed call's message in the registry's error slot.
fn record_error(state: &ClientState, e: &ApiError) {
    if let Some(op) = e.operation() {
        tracing::debug!("{op} failed with status {:?}", e.status());
    }
    state.registry.write().set_error(e.to_string());
}
