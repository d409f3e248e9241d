//! Group selection and the per-chat week toggle

use crate::bot::{Data, Reply};
use crate::db::ChatState;
use crate::error::CommandError;
use crate::schedule::Group;
use tracing::info;

/// Find a group by id, or by name ignoring case
pub fn find_group<'a>(groups: &'a [Group], query: &str) -> Option<&'a Group> {
    let query_lower = query.to_lowercase();
    groups
        .iter()
        .find(|g| g.id == query)
        .or_else(|| groups.iter().find(|g| g.name.to_lowercase() == query_lower))
}

/// Assign a group to the chat. Resets the week toggle.
pub async fn set_group(
    data: &Data,
    chat_id: i64,
    query: Option<&str>,
) -> Result<Reply, CommandError> {
    let query = match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => q,
        None => return Ok(Reply::text("Please specify a group, e.g. /setgroup IP-01")),
    };

    let groups = data.api.get_groups().await?;
    let group = match find_group(&groups, query) {
        Some(g) => g,
        None => {
            info!("Chat {} asked for unknown group {}", chat_id, query);
            return Ok(Reply::text(format!("Group {} was not found", query)));
        }
    };

    data.store.upsert(&ChatState::new(chat_id, &group.id)).await?;
    info!("Chat {} set group {} ({})", chat_id, group.name, group.id);

    Ok(Reply::text(format!("Group {} is set", group.name)).remove_keyboard())
}

/// Swap which week track counts as current for this chat
pub async fn toggle_week(data: &Data, chat_id: i64) -> Result<Reply, CommandError> {
    let toggled = data
        .store
        .toggle_week(chat_id)
        .await?
        .ok_or(CommandError::NotConfigured)?;

    info!("Chat {} week toggle is now {}", chat_id, toggled.week_toggle);
    Ok(Reply::text("Week order updated"))
}
