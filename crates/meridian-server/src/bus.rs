//! In-process release message bus.
//!
//! Topic-keyed broadcast channels with at-least-once, per-subscriber
//! delivery. Subscribers that fall behind observe a lag error and keep
//! consuming; invalidation is idempotent so skipped duplicates are safe.

use dashmap::DashMap;
use tokio::sync::broadcast::{self, Receiver, Sender};

/// Buffered deliveries per topic before slow subscribers start lagging.
const CHANNEL_CAPACITY: usize = 1024;

/// A release-change notification: the content is the watch key the release
/// was published on.
#[derive(Debug, Clone)]
pub struct ReleaseMessage {
    pub content: String,
}

impl ReleaseMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Central hub mapping topic names to their broadcast senders.
#[derive(Debug, Default)]
pub struct ReleaseBus {
    topics: DashMap<String, Sender<ReleaseMessage>>,
}

impl ReleaseBus {
    pub fn new() -> Self {
        Default::default()
    }

    /// Subscribes to a topic, creating it on first use.
    pub fn subscribe(&self, topic: &str) -> Receiver<ReleaseMessage> {
        self.topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .value()
            .subscribe()
    }

    /// Publishes a message to every current subscriber of `topic`.
    /// Returns the number of subscribers that received it.
    pub fn publish(&self, topic: &str, message: ReleaseMessage) -> usize {
        self.topics
            .get(topic)
            .map(|sender| sender.send(message).unwrap_or(0))
            .unwrap_or(0)
    }
}
