use crate::{ChannelId, Time, UserId};

/// Ephemeral "user X is typing" broadcast, refreshed on every keystroke.
///
/// Keyed by `(channel_id, user_id)` on the receiving side; expiry is
/// computed by the receiver, not carried on the wire.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct TypingSignal {
    pub user_id: UserId,
    pub user_name: String,
    pub channel_id: ChannelId,
    pub sent_at: Time,
}
