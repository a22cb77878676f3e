use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio::{sync::mpsc, task::JoinHandle};

// What the tab title toggles to while flashing
const ALERT_TITLE: &str = "● New activity";
// Title toggles with this period until the window regains focus
const FLASH_PERIOD_MILLIS: u64 = 1500;

/// Platform notification permission, as already granted (or not) by the
/// user. This controller never requests it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PushPermission {
    Granted,
    Denied,
    Default,
}

/// The document title, writable and readable once at startup
pub trait TitleSink: Send + Sync {
    fn current_title(&self) -> String;
    fn set_title(&self, title: &str);
}

/// The single preloaded notification sound
pub trait AudioSink: Send + Sync {
    /// Rewind to time zero and play
    fn play_from_start(&self) -> anyhow::Result<()>;
    fn pause(&self);
}

/// Best-effort OS push notifications
pub trait PushSink: Send + Sync {
    fn permission(&self) -> PushPermission;
    fn push(&self, tag: &str, body: &str) -> anyhow::Result<()>;
}

/// Shared has-focus flag, written by the embedding UI on focus/blur
#[derive(Clone, Debug)]
pub struct Focus(Arc<AtomicBool>);

impl Focus {
    pub fn new(focused: bool) -> Focus {
        Focus(Arc::new(AtomicBool::new(focused)))
    }

    pub fn has_focus(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn set_focus(&self, focused: bool) {
        self.0.store(focused, Ordering::Relaxed)
    }
}

/// One attention-worthy event, as forwarded by the event router
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttentionRequest {
    /// Truncated preview of the triggering content
    pub preview: String,

    /// OS notification tag; messages and notifications use distinct tag
    /// spaces so one cannot suppress the other
    pub push_tag: String,
}

#[derive(Clone, Debug)]
pub enum AttentionMsg {
    Signal(AttentionRequest),
    FocusGained,
    FirstInteraction,
}

// Browser autoplay policy: the sound stays silent until a user gesture has
// unlocked it once
enum SoundState {
    Locked,
    Unlocked,
}

struct AttentionState {
    title: Arc<dyn TitleSink>,
    audio: Arc<dyn AudioSink>,
    push: Arc<dyn PushSink>,
    original_title: String,
    flasher: Option<JoinHandle<()>>,
    sound: SoundState,
}

impl AttentionState {
    fn signal(&mut self, req: AttentionRequest) {
        // Title, sound and push are independent of each other
        self.start_flashing();
        self.play_sound();
        self.send_push(&req);
    }

    fn start_flashing(&mut self) {
        if self.flasher.is_some() {
            // Already flashing, don't restart the interval
            return;
        }
        let title = self.title.clone();
        let original = self.original_title.clone();
        self.flasher = Some(tokio::spawn(async move {
            let mut period = tokio::time::interval(Duration::from_millis(FLASH_PERIOD_MILLIS));
            let mut showing_alert = false;
            loop {
                period.tick().await;
                showing_alert = !showing_alert;
                match showing_alert {
                    true => title.set_title(ALERT_TITLE),
                    false => title.set_title(&original),
                }
            }
        }));
    }

    fn stop_flashing(&mut self) {
        if let Some(flasher) = self.flasher.take() {
            flasher.abort();
        }
        // Restore unconditionally, whatever phase the toggle was in
        self.title.set_title(&self.original_title);
    }

    fn play_sound(&mut self) {
        if let SoundState::Locked = self.sound {
            return;
        }
        if let Err(err) = self.audio.play_from_start() {
            tracing::debug!(?err, "notification sound playback failed");
        }
    }

    fn unlock_sound(&mut self) {
        if let SoundState::Unlocked = self.sound {
            return;
        }
        // Play-then-pause, so later replays are allowed to make noise
        match self.audio.play_from_start() {
            Ok(()) => {
                self.audio.pause();
                self.sound = SoundState::Unlocked;
            }
            Err(err) => tracing::debug!(?err, "failed to unlock notification sound"),
        }
    }

    fn send_push(&self, req: &AttentionRequest) {
        if self.push.permission() != PushPermission::Granted {
            return;
        }
        if let Err(err) = self.push.push(&req.push_tag, &req.preview) {
            tracing::debug!(?err, "push notification failed");
        }
    }
}

/// Owns tab-title flashing, the notification sound and OS push.
///
/// Runs as a task consuming [`AttentionMsg`]; dropping the controller closes
/// the channel, which stops the flasher and restores the title.
pub struct AttentionController {
    sender: mpsc::UnboundedSender<AttentionMsg>,
    task: JoinHandle<()>,
}

impl AttentionController {
    pub fn start(
        title: Arc<dyn TitleSink>,
        audio: Arc<dyn AudioSink>,
        push: Arc<dyn PushSink>,
    ) -> AttentionController {
        // Captured once; focus restores to this for the whole session
        let original_title = title.current_title();
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let mut state = AttentionState {
            title,
            audio,
            push,
            original_title,
            flasher: None,
            sound: SoundState::Locked,
        };
        let task = tokio::spawn(async move {
            while let Some(msg) = receiver.recv().await {
                match msg {
                    AttentionMsg::Signal(req) => state.signal(req),
                    AttentionMsg::FocusGained => state.stop_flashing(),
                    AttentionMsg::FirstInteraction => state.unlock_sound(),
                }
            }
            state.stop_flashing();
        });
        AttentionController { sender, task }
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<AttentionMsg> {
        self.sender.clone()
    }

    pub fn signal(&self, req: AttentionRequest) {
        let _ = self.sender.send(AttentionMsg::Signal(req));
    }

    /// The window regained focus: stop flashing, restore the title
    pub fn focus_gained(&self) {
        let _ = self.sender.send(AttentionMsg::FocusGained);
    }

    /// First user gesture of the page; unlocks the notification sound
    pub fn first_interaction(&self) {
        let _ = self.sender.send(AttentionMsg::FirstInteraction);
    }

    /// Resolves once the background task has restored the title and
    /// stopped all timers
    pub async fn shutdown(self) {
        let AttentionController { sender, task } = self;
        drop(sender);
        let _ = task.await;
    }
}
