use std::collections::HashSet;

use crate::{Time, UserId};

/// Payload tracked into the presence group when a client joins
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PresenceAnnounce {
    pub user_id: UserId,
    pub timestamp: Time,
}

/// Full-state sync of the presence group: the complete roster of currently
/// connected users, never a delta
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PresenceSnapshot {
    pub online: HashSet<UserId>,
}
