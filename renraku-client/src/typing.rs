use std::{collections::HashMap, sync::Arc};

use chrono::{Duration, Utc};
use parking_lot::RwLock;
use tokio::task::JoinHandle;

use crate::{
    api::{ChannelId, Time, TypingSignal, UserId},
    transport::TypingTransport,
};

// How long a peer signal stays live without being refreshed; peers
// re-broadcast on every keystroke
const TYPING_EXPIRY_SECS: i64 = 4;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypingUser {
    pub user_id: UserId,
    pub user_name: String,
}

#[derive(Debug)]
struct TypingEntry {
    user_name: String,
    expires_at: Time,
}

type TypingEntries = HashMap<(ChannelId, UserId), TypingEntry>;

/// Per-channel "who is typing" state, fed by peer broadcasts.
///
/// Entries are keyed by `(channel, user)`: a newer signal from the same
/// user refreshes the expiry instead of duplicating the entry. Expired
/// entries are pruned on ingest and filtered on read, so there is no
/// per-signal timer to leak.
pub struct TypingTracker {
    self_id: UserId,
    transport: Arc<dyn TypingTransport>,
    entries: Arc<RwLock<TypingEntries>>,
    task: Option<JoinHandle<()>>,
}

impl TypingTracker {
    pub async fn start(transport: Arc<dyn TypingTransport>, self_id: UserId) -> TypingTracker {
        let entries: Arc<RwLock<TypingEntries>> = Arc::new(RwLock::new(HashMap::new()));
        let task = match transport.subscribe().await {
            Err(err) => {
                tracing::warn!(?err, "failed to subscribe to typing signals");
                None
            }
            Ok(mut signals) => {
                let entries = entries.clone();
                Some(tokio::spawn(async move {
                    while let Some(signal) = signals.recv().await {
                        ingest(&mut entries.write(), signal, Utc::now());
                    }
                }))
            }
        };
        TypingTracker {
            self_id,
            transport,
            entries,
            task,
        }
    }

    /// Broadcast that the local user is typing; call on every keystroke
    pub async fn send_typing(&self, channel_id: ChannelId, self_name: &str) {
        let signal = TypingSignal {
            user_id: self.self_id,
            user_name: self_name.to_string(),
            channel_id,
            sent_at: Utc::now(),
        };
        if let Err(err) = self.transport.broadcast(signal).await {
            tracing::debug!(?err, "failed to broadcast typing signal");
        }
    }

    /// Peers currently typing in `channel_id`, excluding ourselves and
    /// anything already expired
    pub fn typing_users(&self, channel_id: ChannelId) -> Vec<TypingUser> {
        let now = Utc::now();
        self.entries
            .read()
            .iter()
            .filter(|((channel, user), entry)| {
                *channel == channel_id && *user != self.self_id && entry.expires_at > now
            })
            .map(|((_, user), entry)| TypingUser {
                user_id: *user,
                user_name: entry.user_name.clone(),
            })
            .collect()
    }
}

impl Drop for TypingTracker {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

fn ingest(entries: &mut TypingEntries, signal: TypingSignal, now: Time) {
    // Upsert: same user typing again only refreshes the expiry
    entries.insert(
        (signal.channel_id, signal.user_id),
        TypingEntry {
            user_name: signal.user_name,
            expires_at: now + Duration::seconds(TYPING_EXPIRY_SECS),
        },
    );
    entries.retain(|_, entry| entry.expires_at > now);
}
