//! Database schema for ReSchedule

pub const MIGRATIONS: &str = r#"
-- One row per chat
CREATE TABLE IF NOT EXISTS chat_state (
    chat_id INTEGER PRIMARY KEY,
    group_id TEXT NOT NULL,
    week_toggle INTEGER NOT NULL DEFAULT 0,
    updated_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_chat_state_group ON chat_state(group_id);
"#;
