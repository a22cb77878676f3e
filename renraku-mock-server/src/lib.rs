use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;
use parking_lot::Mutex;
use renraku_client::{
    api::{
        ChatMessage, Error, LiveEvent, Notification, PresenceAnnounce, PresenceSnapshot,
        StreamKind, TypingSignal, UserId,
    },
    AudioSink, CacheTag, EventStream, InvalidationSink, Platform, PresenceGroup, PushPermission,
    PushSink, TitleSink, TypingTransport,
};
use tokio::sync::mpsc;

/// In-memory stand-in for the hosted realtime backend: presence group,
/// insert-event streams and typing broadcast, all fanned out over local
/// channels. Any number of test sessions can connect to one server.
#[derive(Clone, Default)]
pub struct MockServer(Arc<Mutex<Inner>>);

#[derive(Default)]
struct Inner {
    present: HashSet<UserId>,
    presence_feeds: Vec<mpsc::UnboundedSender<PresenceSnapshot>>,
    message_feeds: Vec<mpsc::UnboundedSender<LiveEvent>>,
    notification_feeds: Vec<mpsc::UnboundedSender<LiveEvent>>,
    typing_feeds: Vec<mpsc::UnboundedSender<TypingSignal>>,
}

impl Inner {
    fn resync_presence(&mut self) {
        let snapshot = PresenceSnapshot {
            online: self.present.clone(),
        };
        self.presence_feeds
            .retain_mut(|f| f.send(snapshot.clone()).is_ok());
    }
}

impl MockServer {
    pub fn new() -> MockServer {
        MockServer::default()
    }

    /// Deliver a message-insert event to every subscribed client
    pub fn insert_message(&self, msg: ChatMessage) -> Result<(), Error> {
        msg.validate()?;
        self.0
            .lock()
            .message_feeds
            .retain_mut(|f| f.send(LiveEvent::MessageInserted(msg.clone())).is_ok());
        Ok(())
    }

    /// Deliver a notification-insert event to every subscribed client
    pub fn insert_notification(&self, notification: Notification) -> Result<(), Error> {
        notification.validate()?;
        self.0.lock().notification_feeds.retain_mut(|f| {
            f.send(LiveEvent::NotificationInserted(notification.clone()))
                .is_ok()
        });
        Ok(())
    }

    /// Push a raw full-state snapshot, bypassing the join/leave
    /// bookkeeping. Lets tests exercise out-of-order snapshot delivery.
    pub fn sync_presence(&self, online: impl IntoIterator<Item = UserId>) {
        let snapshot = PresenceSnapshot {
            online: online.into_iter().collect(),
        };
        self.0
            .lock()
            .presence_feeds
            .retain_mut(|f| f.send(snapshot.clone()).is_ok());
    }

    /// Drop every presence subscription, as a lost connection would
    pub fn disconnect_presence(&self) {
        self.0.lock().presence_feeds.clear();
    }

    /// Users currently tracked in the presence group
    pub fn test_present_users(&self) -> HashSet<UserId> {
        self.0.lock().present.clone()
    }
}

#[async_trait]
impl PresenceGroup for MockServer {
    async fn join(
        &self,
        announce: PresenceAnnounce,
    ) -> anyhow::Result<mpsc::UnboundedReceiver<PresenceSnapshot>> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut inner = self.0.lock();
        inner.present.insert(announce.user_id);
        inner.presence_feeds.push(sender);
        inner.resync_presence();
        Ok(receiver)
    }

    async fn leave(&self, user: UserId) {
        let mut inner = self.0.lock();
        inner.present.remove(&user);
        inner.resync_presence();
    }
}

#[async_trait]
impl EventStream for MockServer {
    async fn subscribe(
        &self,
        kind: StreamKind,
    ) -> anyhow::Result<mpsc::UnboundedReceiver<LiveEvent>> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut inner = self.0.lock();
        match kind {
            StreamKind::Messages => inner.message_feeds.push(sender),
            StreamKind::Notifications => inner.notification_feeds.push(sender),
        }
        Ok(receiver)
    }
}

#[async_trait]
impl TypingTransport for MockServer {
    async fn broadcast(&self, signal: TypingSignal) -> anyhow::Result<()> {
        self.0
            .lock()
            .typing_feeds
            .retain_mut(|f| f.send(signal.clone()).is_ok());
        Ok(())
    }

    async fn subscribe(&self) -> anyhow::Result<mpsc::UnboundedReceiver<TypingSignal>> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.0.lock().typing_feeds.push(sender);
        Ok(receiver)
    }
}

/// Records cache invalidations for assertions
#[derive(Clone, Default)]
pub struct RecordingInvalidations(Arc<Mutex<Vec<CacheTag>>>);

impl RecordingInvalidations {
    pub fn new() -> RecordingInvalidations {
        RecordingInvalidations::default()
    }

    pub fn recorded(&self) -> Vec<CacheTag> {
        self.0.lock().clone()
    }
}

impl InvalidationSink for RecordingInvalidations {
    fn invalidate(&self, tag: CacheTag) {
        self.0.lock().push(tag);
    }
}

/// Document-title stand-in; keeps the full history of titles set
#[derive(Clone)]
pub struct RecordingTitle(Arc<Mutex<Vec<String>>>);

impl RecordingTitle {
    pub fn new(initial: &str) -> RecordingTitle {
        RecordingTitle(Arc::new(Mutex::new(vec![initial.to_string()])))
    }

    pub fn history(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

impl TitleSink for RecordingTitle {
    fn current_title(&self) -> String {
        self.0.lock().last().expect("title history is never empty").clone()
    }

    fn set_title(&self, title: &str) {
        self.0.lock().push(title.to_string());
    }
}

/// Audio-element stand-in; can emulate an autoplay-policy refusal
#[derive(Clone, Default)]
pub struct RecordingAudio {
    plays: Arc<Mutex<usize>>,
    pauses: Arc<Mutex<usize>>,
    blocked: Arc<Mutex<bool>>,
}

impl RecordingAudio {
    pub fn new() -> RecordingAudio {
        RecordingAudio::default()
    }

    pub fn plays(&self) -> usize {
        *self.plays.lock()
    }

    pub fn pauses(&self) -> usize {
        *self.pauses.lock()
    }

    pub fn set_blocked(&self, blocked: bool) {
        *self.blocked.lock() = blocked;
    }
}

impl AudioSink for RecordingAudio {
    fn play_from_start(&self) -> anyhow::Result<()> {
        if *self.blocked.lock() {
            anyhow::bail!("autoplay policy refused playback");
        }
        *self.plays.lock() += 1;
        Ok(())
    }

    fn pause(&self) {
        *self.pauses.lock() += 1;
    }
}

/// OS-notification stand-in with a configurable permission
#[derive(Clone)]
pub struct RecordingPush {
    permission: Arc<Mutex<PushPermission>>,
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingPush {
    pub fn new(permission: PushPermission) -> RecordingPush {
        RecordingPush {
            permission: Arc::new(Mutex::new(permission)),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_permission(&self, permission: PushPermission) {
        *self.permission.lock() = permission;
    }

    /// `(tag, body)` pairs in send order
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().clone()
    }
}

impl PushSink for RecordingPush {
    fn permission(&self) -> PushPermission {
        *self.permission.lock()
    }

    fn push(&self, tag: &str, body: &str) -> anyhow::Result<()> {
        self.sent.lock().push((tag.to_string(), body.to_string()));
        Ok(())
    }
}

/// A full [`Platform`] wired to this mock server and fresh recording sinks
pub struct MockPlatform {
    pub server: MockServer,
    pub invalidations: RecordingInvalidations,
    pub title: RecordingTitle,
    pub audio: RecordingAudio,
    pub push: RecordingPush,
}

impl MockPlatform {
    pub fn new() -> MockPlatform {
        MockPlatform {
            server: MockServer::new(),
            invalidations: RecordingInvalidations::new(),
            title: RecordingTitle::new("renraku"),
            audio: RecordingAudio::new(),
            push: RecordingPush::new(PushPermission::Granted),
        }
    }

    pub fn platform(&self) -> Platform {
        Platform {
            presence: Arc::new(self.server.clone()),
            events: Arc::new(self.server.clone()),
            typing: Arc::new(self.server.clone()),
            invalidations: Arc::new(self.invalidations.clone()),
            title: Arc::new(self.title.clone()),
            audio: Arc::new(self.audio.clone()),
            push: Arc::new(self.push.clone()),
        }
    }
}

impl Default for MockPlatform {
    fn default() -> MockPlatform {
        MockPlatform::new()
    }
}
