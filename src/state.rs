use parking_lot::RwLock;
use std::sync::Arc;

use crate::api::client::ApiClient;
use crate::config::Config;
use crate::indexing::{Clock, IndexingMachine, SystemClock};
use crate::registry::ChannelRegistry;
use crate::search::session::SearchSession;

/// Shared client state.
///
/// Each piece sits behind its own lock; operations take a lock only to read
/// or apply state and never hold one across a request.
#[derive(Clone)]
pub struct ClientState {
    pub config: Config,
    pub api: ApiClient,
    pub registry: Arc<RwLock<ChannelRegistry>>,
    pub indexing: Arc<RwLock<IndexingMachine>>,
    pub search: Arc<RwLock<SearchSession>>,
}

impl ClientState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build state whose reindex display window reads `clock`.
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> anyhow::Result<Self> {
        let api = ApiClient::new(config.clone())?;
        let indexing = IndexingMachine::new(config.completed_display_window(), clock);
        let search = SearchSession::new(config.default_preset);

        Ok(Self {
            config,
            api,
            registry: Arc::new(RwLock::new(ChannelRegistry::default())),
            indexing: Arc::new(RwLock::new(indexing)),
            search: Arc::new(RwLock::new(search)),
        })
    }
}
