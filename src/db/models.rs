//! Database models for ReSchedule

use serde::{Deserialize, Serialize};

/// Per-chat settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatState {
    pub chat_id: i64,
    pub group_id: String,
    /// Swaps which week track counts as "current" for this chat
    pub week_toggle: bool,
}

impl ChatState {
    /// Fresh state for a chat that just picked a group
    pub fn new(chat_id: i64, group_id: impl Into<String>) -> Self {
        Self {
            chat_id,
            group_id: group_id.into(),
            week_toggle: false,
        }
    }

    /// Same chat and group with the week order flipped
    pub fn toggled(&self) -> Self {
        Self {
            week_toggle: !self.week_toggle,
            ..self.clone()
        }
    }
}
