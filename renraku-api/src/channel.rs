use uuid::Uuid;

use crate::STUB_UUID;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ChannelId(pub Uuid);

impl ChannelId {
    pub fn stub() -> ChannelId {
        ChannelId(STUB_UUID)
    }
}
