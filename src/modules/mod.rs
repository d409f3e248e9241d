//! Command handlers
//!
//! Each handler returns a [`Reply`](crate::bot::Reply) or a
//! [`CommandError`] for [`crate::bot::handle_command`] to report.

pub mod group;
pub mod help;
pub mod timetable;

use crate::bot::Data;
use crate::db::ChatState;
use crate::error::CommandError;

/// The chat's settings, or `NotConfigured` if it never picked a group
async fn chat_state(data: &Data, chat_id: i64) -> Result<ChatState, CommandError> {
    data.store
        .get(chat_id)
        .await?
        .ok_or(CommandError::NotConfigured)
}
