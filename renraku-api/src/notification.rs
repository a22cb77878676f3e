use chrono::Utc;
use uuid::Uuid;

use crate::{Error, Time, UserId};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NotificationId(pub Uuid);

impl NotificationId {
    pub fn stub() -> NotificationId {
        NotificationId(crate::STUB_UUID)
    }
}

/// One row of the notifications table, as observed by connected clients
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Notification {
    pub id: NotificationId,

    /// The user this notification is for
    pub recipient_id: UserId,

    /// The user whose action produced it
    pub actor_id: UserId,

    pub message: String,
    pub is_deleted: bool,
    pub created_at: Time,
}

impl Notification {
    pub fn now(actor_id: UserId, recipient_id: UserId, message: String) -> Notification {
        Notification {
            id: NotificationId(Uuid::new_v4()),
            recipient_id,
            actor_id,
            message,
            is_deleted: false,
            created_at: Utc::now(),
        }
    }

    // See comments on other `validate` functions throughout renraku-api
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_string(&self.message)?;
        crate::validate_time(&self.created_at)
    }
}
