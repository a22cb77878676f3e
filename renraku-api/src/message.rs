use chrono::Utc;
use uuid::Uuid;

use crate::{ChannelId, Error, Time, UserId};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn stub() -> MessageId {
        MessageId(crate::STUB_UUID)
    }
}

/// One row of the chat messages table, as observed by connected clients
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub author_id: UserId,
    pub content: String,

    /// Soft-deletion marker; deleted rows stay in place but must never
    /// trigger attention signaling
    pub is_deleted: bool,

    pub created_at: Time,
}

impl ChatMessage {
    pub fn now(author_id: UserId, channel_id: ChannelId, content: String) -> ChatMessage {
        ChatMessage {
            id: MessageId(Uuid::new_v4()),
            channel_id,
            author_id,
            content,
            is_deleted: false,
            created_at: Utc::now(),
        }
    }

    // See comments on other `validate` functions throughout renraku-api
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_string(&self.content)?;
        crate::validate_time(&self.created_at)
    }
}
