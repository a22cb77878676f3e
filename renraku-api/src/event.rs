use crate::{ChatMessage, Notification, UserId};

/// The two logical insert streams a client subscribes to
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum StreamKind {
    Messages,
    Notifications,
}

/// A row-insert event delivered over a live subscription.
///
/// Transient: consumed once by the event router, never stored.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum LiveEvent {
    MessageInserted(ChatMessage),
    NotificationInserted(Notification),
}

impl LiveEvent {
    /// The user whose action produced this event
    pub fn author(&self) -> UserId {
        match self {
            LiveEvent::MessageInserted(m) => m.author_id,
            LiveEvent::NotificationInserted(n) => n.actor_id,
        }
    }

    pub fn is_deleted(&self) -> bool {
        match self {
            LiveEvent::MessageInserted(m) => m.is_deleted,
            LiveEvent::NotificationInserted(n) => n.is_deleted,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            LiveEvent::MessageInserted(m) => &m.content,
            LiveEvent::NotificationInserted(n) => &n.message,
        }
    }
}
