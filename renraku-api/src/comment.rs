use uuid::Uuid;

use crate::{Time, UserId};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CommentId(pub Uuid);

impl CommentId {
    pub fn stub() -> CommentId {
        CommentId(crate::STUB_UUID)
    }
}

/// One flat comment row; replies reference their parent by id.
///
/// Root comments have `parent_id = None`. The reply graph is a forest in
/// practice; reconstruction lives in renraku-client.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub parent_id: Option<CommentId>,
    pub author_id: UserId,
    pub content: String,
    pub created_at: Time,
}
