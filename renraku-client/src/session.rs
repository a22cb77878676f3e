use std::sync::Arc;

use crate::{
    api::{ChannelId, UserId},
    attention::{AttentionController, AudioSink, Focus, PushSink, TitleSink},
    presence::PresenceTracker,
    router::EventRouter,
    transport::{EventStream, InvalidationSink, PresenceGroup, TypingTransport},
    typing::TypingTracker,
    window::MiniChatWindows,
};

/// Everything the collaboration core needs from the embedding platform
pub struct Platform {
    pub presence: Arc<dyn PresenceGroup>,
    pub events: Arc<dyn EventStream>,
    pub typing: Arc<dyn TypingTransport>,
    pub invalidations: Arc<dyn InvalidationSink>,
    pub title: Arc<dyn TitleSink>,
    pub audio: Arc<dyn AudioSink>,
    pub push: Arc<dyn PushSink>,
}

/// One authenticated session's collaboration state.
///
/// Constructed at login, dropped at logout. Dropping tears down every
/// subscription and timer; events racing the teardown are silently lost,
/// which is fine for presence and attention signaling.
pub struct Session {
    pub current_user: UserId,
    pub presence: PresenceTracker,
    pub typing: TypingTracker,
    windows: MiniChatWindows,
    focus: Focus,
    attention: AttentionController,
    _router: EventRouter,
}

impl Session {
    pub async fn start(current_user: UserId, platform: Platform) -> Session {
        let focus = Focus::new(true);
        let attention =
            AttentionController::start(platform.title, platform.audio, platform.push);
        let router = EventRouter::start(
            current_user,
            platform.events,
            platform.invalidations,
            attention.sender(),
            focus.clone(),
        )
        .await;
        let presence = PresenceTracker::join(platform.presence, current_user).await;
        let typing = TypingTracker::start(platform.typing, current_user).await;
        Session {
            current_user,
            presence,
            typing,
            windows: MiniChatWindows::new(),
            focus,
            attention,
            _router: router,
        }
    }

    /// The embedding UI calls this on every focus/blur transition
    pub fn set_focus(&self, focused: bool) {
        self.focus.set_focus(focused);
        if focused {
            self.attention.focus_gained();
        }
    }

    /// First user gesture of the page; unlocks the notification sound
    pub fn first_interaction(&self) {
        self.attention.first_interaction();
    }

    pub fn windows(&self) -> &MiniChatWindows {
        &self.windows
    }

    pub fn open_mini_chat(&mut self, channel_id: ChannelId) {
        self.windows.open(channel_id);
    }

    pub fn toggle_minimize(&mut self, channel_id: ChannelId) {
        self.windows.toggle_minimize(channel_id);
    }

    pub fn close_mini_chat(&mut self, channel_id: ChannelId) {
        self.windows.close(channel_id);
    }
}
