use std::{collections::HashSet, sync::Arc};

use chrono::Utc;
use parking_lot::RwLock;
use tokio::task::JoinHandle;

use crate::{
    api::{PresenceAnnounce, UserId},
    transport::PresenceGroup,
};

/// Tracks who is currently online.
///
/// Every snapshot from the presence group carries the full roster and
/// replaces the local set wholesale; there is no delta application, so the
/// latest *received* snapshot always wins. The set lives as long as the
/// presence connection and is cleared when it closes.
pub struct PresenceTracker {
    self_id: UserId,
    group: Arc<dyn PresenceGroup>,
    online: Arc<RwLock<HashSet<UserId>>>,
    task: Option<JoinHandle<()>>,
    left: bool,
}

impl PresenceTracker {
    /// Announce ourselves to the group and start consuming its snapshots.
    ///
    /// If joining fails the tracker stays up with an empty roster; rejoining
    /// after a reconnect is the transport's responsibility.
    pub async fn join(group: Arc<dyn PresenceGroup>, self_id: UserId) -> PresenceTracker {
        let online = Arc::new(RwLock::new(HashSet::new()));
        let announce = PresenceAnnounce {
            user_id: self_id,
            timestamp: Utc::now(),
        };
        let task = match group.join(announce).await {
            Err(err) => {
                tracing::warn!(?err, "failed to join presence group");
                None
            }
            Ok(mut snapshots) => {
                let online = online.clone();
                Some(tokio::spawn(async move {
                    while let Some(snapshot) = snapshots.recv().await {
                        *online.write() = snapshot.online;
                    }
                    // Stream closed: connection gone, so is everyone
                    online.write().clear();
                }))
            }
        };
        PresenceTracker {
            self_id,
            group,
            online,
            task,
            left: false,
        }
    }

    pub fn online_users(&self) -> HashSet<UserId> {
        self.online.read().clone()
    }

    pub fn is_online(&self, user: UserId) -> bool {
        self.online.read().contains(&user)
    }

    /// Leave the group explicitly; also happens implicitly on drop
    pub async fn leave(mut self) {
        self.teardown();
        self.left = true;
        let group = self.group.clone();
        let self_id = self.self_id;
        group.leave(self_id).await;
    }

    fn teardown(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.online.write().clear();
    }
}

impl Drop for PresenceTracker {
    fn drop(&mut self) {
        self.teardown();
        if self.left {
            return;
        }
        // Fire-and-forget goodbye so peers stop seeing us online. Outside a
        // runtime there is no transport left to talk to, so skip it.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let group = self.group.clone();
            let self_id = self.self_id;
            handle.spawn(async move { group.leave(self_id).await });
        }
    }
}
