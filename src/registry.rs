use crate::models::{Channel, ChannelId};

/// Client-side view of the registered channels.
///
/// The list is a cache of what the engine last reported. It is only ever
/// replaced wholesale from a successful fetch, never edited locally.
#[derive(Debug, Clone, Default)]
pub struct ChannelRegistry {
    channels: Vec<Channel>,
    url_input: String,
    error: Option<String>,
    adding: bool,
}

impl ChannelRegistry {
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id.as_str() == id)
    }

    /// Resolve a user-supplied identifier to the normalized one. Unknown
    /// identifiers pass through so the engine can answer for them.
    pub fn resolve_id(&self, id: &str) -> ChannelId {
        self.find(id)
            .map(|c| c.id.clone())
            .unwrap_or_else(|| ChannelId::new(id, crate::models::IdSource::Id))
    }

    pub fn replace(&mut self, channels: Vec<Channel>) {
        self.channels = channels;
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub fn set_url_input(&mut self, url: impl Into<String>) {
        self.url_input = url.into();
    }

    pub fn clear_url_input(&mut self) {
        self.url_input.clear();
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn is_adding(&self) -> bool {
        self.adding
    }

    pub fn set_adding(&mut self, adding: bool) {
        self.adding = adding;
    }

    /// Whether the add control should be enabled.
    pub fn can_add(&self) -> bool {
        !self.adding && !self.url_input.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IdSource;

    fn channel(id: &str, source: IdSource) -> Channel {
        Channel {
            id: ChannelId::new(id, source),
            title: format!("Channel {id}"),
            url: None,
            indexed_at: None,
            transcripts_count: 0,
        }
    }

    #[test]
    fn test_resolve_keeps_video_id_source() {
        let mut registry = ChannelRegistry::default();
        registry.replace(vec![channel("abc", IdSource::VideoId)]);
        let id = registry.resolve_id("abc");
        assert_eq!(id.source(), IdSource::VideoId);

        let unknown = registry.resolve_id("zzz");
        assert_eq!(unknown.as_str(), "zzz");
        assert_eq!(unknown.source(), IdSource::Id);
    }

    #[test]
    fn test_can_add_requires_trimmed_input() {
        let mut registry = ChannelRegistry::default();
        assert!(!registry.can_add());
        registry.set_url_input("   ");
        assert!(!registry.can_add());
        registry.set_url_input("https://youtube.com/@redis");
        assert!(registry.can_add());
        registry.set_adding(true);
        assert!(!registry.can_add());
    }

    #[test]
    fn test_replace_swaps_whole_list() {
        let mut registry = ChannelRegistry::default();
        registry.replace(vec![channel("a", IdSource::Id), channel("b", IdSource::Id)]);
        registry.replace(vec![channel("c", IdSource::Id)]);
        assert_eq!(registry.len(), 1);
        assert!(registry.find("a").is_none());
        assert!(registry.find("c").is_some());
    }
}
