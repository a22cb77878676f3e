use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::api::{
    ChannelId, LiveEvent, PresenceAnnounce, PresenceSnapshot, StreamKind, TypingSignal, UserId,
};

/// Cache tags understood by the embedding UI's read models (channel lists,
/// badges). Invalidation is fire-and-forget and idempotent.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CacheTag {
    ChatChannelList(ChannelId),
    Notifications(UserId),
}

/// The shared presence channel. Snapshots carry the complete roster of
/// currently connected users; there are no deltas to apply.
#[async_trait]
pub trait PresenceGroup: Send + Sync {
    /// Announce ourselves and subscribe to full-state snapshots
    async fn join(
        &self,
        announce: PresenceAnnounce,
    ) -> anyhow::Result<mpsc::UnboundedReceiver<PresenceSnapshot>>;

    async fn leave(&self, user: UserId);
}

/// Live row-insert subscriptions
#[async_trait]
pub trait EventStream: Send + Sync {
    async fn subscribe(
        &self,
        kind: StreamKind,
    ) -> anyhow::Result<mpsc::UnboundedReceiver<LiveEvent>>;
}

/// Peer-to-peer typing broadcast
#[async_trait]
pub trait TypingTransport: Send + Sync {
    async fn broadcast(&self, signal: TypingSignal) -> anyhow::Result<()>;

    async fn subscribe(&self) -> anyhow::Result<mpsc::UnboundedReceiver<TypingSignal>>;
}

pub trait InvalidationSink: Send + Sync {
    fn invalidate(&self, tag: CacheTag);
}
