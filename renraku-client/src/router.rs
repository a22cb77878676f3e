use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    api::{LiveEvent, StreamKind, UserId},
    attention::{AttentionMsg, AttentionRequest, Focus},
    transport::{CacheTag, EventStream, InvalidationSink},
};

// Longest preview forwarded to attention signaling, in characters
const PREVIEW_MAX_CHARS: usize = 80;

/// Routes live insert events: drops self-originated and soft-deleted
/// records, invalidates the affected UI cache, and forwards a preview to
/// attention signaling while the window is unfocused.
///
/// One consumer task per stream; dropping the router aborts both, and any
/// event still in flight is lost (fine for presence/attention, see the
/// session docs).
pub struct EventRouter {
    tasks: Vec<JoinHandle<()>>,
}

impl EventRouter {
    pub async fn start(
        current_user: UserId,
        events: Arc<dyn EventStream>,
        invalidations: Arc<dyn InvalidationSink>,
        attention: mpsc::UnboundedSender<AttentionMsg>,
        focus: Focus,
    ) -> EventRouter {
        let mut tasks = Vec::with_capacity(2);
        for kind in [StreamKind::Messages, StreamKind::Notifications] {
            let mut receiver = match events.subscribe(kind).await {
                Ok(receiver) => receiver,
                Err(err) => {
                    // Best-effort: run without this stream, reconnection is
                    // the transport's problem
                    tracing::warn!(?err, ?kind, "failed to subscribe to event stream");
                    continue;
                }
            };
            let invalidations = invalidations.clone();
            let attention = attention.clone();
            let focus = focus.clone();
            tasks.push(tokio::spawn(async move {
                while let Some(event) = receiver.recv().await {
                    route(current_user, event, &*invalidations, &attention, &focus);
                }
            }));
        }
        EventRouter { tasks }
    }

    pub fn stop(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for EventRouter {
    fn drop(&mut self) {
        self.stop();
    }
}

fn route(
    current_user: UserId,
    event: LiveEvent,
    invalidations: &dyn InvalidationSink,
    attention: &mpsc::UnboundedSender<AttentionMsg>,
    focus: &Focus,
) {
    if event.author() == current_user {
        // Self-originated: the local write path already handled it
        return;
    }
    if event.is_deleted() {
        return;
    }
    // Unconditional even when focused: badges must stay correct
    invalidations.invalidate(cache_tag(&event));
    if focus.has_focus() {
        return;
    }
    let req = AttentionRequest {
        preview: preview(event.content()),
        push_tag: push_tag(&event),
    };
    let _ = attention.send(AttentionMsg::Signal(req));
}

fn cache_tag(event: &LiveEvent) -> CacheTag {
    match event {
        LiveEvent::MessageInserted(m) => CacheTag::ChatChannelList(m.channel_id),
        LiveEvent::NotificationInserted(n) => CacheTag::Notifications(n.recipient_id),
    }
}

fn push_tag(event: &LiveEvent) -> String {
    match event {
        LiveEvent::MessageInserted(m) => format!("chat-{}", m.id.0),
        LiveEvent::NotificationInserted(n) => format!("notification-{}", n.id.0),
    }
}

/// First [`PREVIEW_MAX_CHARS`] characters of `content`, ellipsis-appended
/// when truncated. Cuts on character boundaries, never mid code point.
pub fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_MAX_CHARS) {
        None => content.to_string(),
        Some((cut, _)) => {
            let mut res = String::with_capacity(cut + '…'.len_utf8());
            res.push_str(&content[..cut]);
            res.push('…');
            res
        }
    }
}
