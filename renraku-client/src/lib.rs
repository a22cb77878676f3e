mod attention;
pub use attention::{
    AttentionController, AttentionMsg, AttentionRequest, AudioSink, Focus, PushPermission,
    PushSink, TitleSink,
};

mod comment;
pub use comment::{build_tree, extract_mentions, resolve_mentions, CommentNode};

mod presence;
pub use presence::PresenceTracker;

mod router;
pub use router::EventRouter;

mod session;
pub use session::{Platform, Session};

mod transport;
pub use transport::{CacheTag, EventStream, InvalidationSink, PresenceGroup, TypingTransport};

mod typing;
pub use typing::{TypingTracker, TypingUser};

mod window;
pub use window::{MiniChatWindow, MiniChatWindows, MAX_OPEN_WINDOWS};

pub mod api {
    pub use renraku_api::*;
}
