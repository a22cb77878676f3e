use crate::api::ChannelId;

/// Upper bound on simultaneously open mini-chat widgets
pub const MAX_OPEN_WINDOWS: usize = 3;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MiniChatWindow {
    pub channel_id: ChannelId,
    pub minimized: bool,
}

/// The ordered, bounded collection of open mini-chat widgets.
///
/// Insertion order is display order; at most one entry per channel; opening
/// past the bound evicts the oldest entry, not the least recently focused.
/// All transitions are synchronous and total.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MiniChatWindows(Vec<MiniChatWindow>);

impl MiniChatWindows {
    pub fn new() -> MiniChatWindows {
        MiniChatWindows(Vec::new())
    }

    pub fn windows(&self) -> &[MiniChatWindow] {
        &self.0
    }

    /// Open the window for `channel_id`, or un-minimize it if it is already
    /// open (keeping its position)
    pub fn open(&mut self, channel_id: ChannelId) {
        if let Some(window) = self.0.iter_mut().find(|w| w.channel_id == channel_id) {
            window.minimized = false;
            return;
        }
        self.0.push(MiniChatWindow {
            channel_id,
            minimized: false,
        });
        if self.0.len() > MAX_OPEN_WINDOWS {
            self.0.drain(..self.0.len() - MAX_OPEN_WINDOWS);
        }
    }

    /// Flip the minimized state; no-op if the window is not open
    pub fn toggle_minimize(&mut self, channel_id: ChannelId) {
        if let Some(window) = self.0.iter_mut().find(|w| w.channel_id == channel_id) {
            window.minimized = !window.minimized;
        }
    }

    /// Close the window; no-op if it is not open
    pub fn close(&mut self, channel_id: ChannelId) {
        self.0.retain(|w| w.channel_id != channel_id);
    }
}
