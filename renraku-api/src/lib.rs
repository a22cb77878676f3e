use chrono::{Datelike, Utc};

pub use uuid::{uuid, Uuid};
pub type Time = chrono::DateTime<Utc>;

pub const STUB_UUID: Uuid = uuid!("ffffffff-ffff-ffff-ffff-ffffffffffff");

mod channel;
mod comment;
mod error;
mod event;
mod message;
mod notification;
mod presence;
mod typing;
mod user;

pub use channel::ChannelId;
pub use comment::{Comment, CommentId};
pub use error::Error;
pub use event::{LiveEvent, StreamKind};
pub use message::{ChatMessage, MessageId};
pub use notification::{Notification, NotificationId};
pub use presence::{PresenceAnnounce, PresenceSnapshot};
pub use typing::TypingSignal;
pub use user::{User, UserId};

// See comments on the `validate` functions on individual types
pub fn validate_string(s: &str) -> Result<(), Error> {
    match s.contains('\0') {
        true => Err(Error::NullByteInString(s.to_string())),
        false => Ok(()),
    }
}

// Values outside this range do not round-trip through ISO-8601 timestamps
pub fn validate_time(t: &Time) -> Result<(), Error> {
    match (1..=9999).contains(&t.year()) {
        true => Ok(()),
        false => Err(Error::InvalidTime(*t)),
    }
}
