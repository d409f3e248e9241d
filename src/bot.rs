//! Command parsing and dispatch

use crate::db::ChatStore;
use crate::error::CommandError;
use crate::modules::{group, help, timetable};
use crate::schedule::{DayOption, WeekOption};
use crate::services::ScheduleClient;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared state across all commands
#[derive(Debug, Clone)]
pub struct Data {
    pub api: ScheduleClient,
    pub store: Arc<dyn ChatStore>,
    /// Civil timezone the timetable runs in
    pub tz: Tz,
    pub bot_username: Option<String>,
}

impl Data {
    pub fn new(
        api: ScheduleClient,
        store: Arc<dyn ChatStore>,
        tz: Tz,
        bot_username: Option<String>,
    ) -> Self {
        Self {
            api,
            store,
            tz,
            bot_username,
        }
    }
}

/// Text to send back to the chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Send with Telegram's HTML parse mode
    pub html: bool,
    pub remove_keyboard: bool,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            html: false,
            remove_keyboard: false,
        }
    }

    pub fn html(text: impl Into<String>) -> Self {
        Self {
            html: true,
            ..Self::text(text)
        }
    }

    pub fn remove_keyboard(mut self) -> Self {
        self.remove_keyboard = true;
        self
    }
}

/// Supported bot commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetGroup(Option<String>),
    ToggleWeek,
    Schedule,
    Week(WeekOption),
    Day(DayOption),
    TimeLeft,
    Help,
}

impl Command {
    /// Recognise a command message. Unknown commands and plain text give `None`.
    pub fn parse(text: &str) -> Option<Self> {
        let (name, args) = parse_command(text);
        let command = match name {
            "/setgroup" => Command::SetGroup(args.first().map(|s| s.to_string())),
            "/toggleweek" => Command::ToggleWeek,
            "/schedule" => Command::Schedule,
            "/week" => Command::Week(WeekOption::Current),
            "/nextweek" => Command::Week(WeekOption::Next),
            "/today" => Command::Day(DayOption::Today),
            "/tomorrow" => Command::Day(DayOption::Tomorrow),
            "/left" => Command::TimeLeft,
            "/help" | "/start" => Command::Help,
            _ => return None,
        };
        Some(command)
    }
}

/// Split a message into the command name (without `@botname`) and its arguments
pub fn parse_command(text: &str) -> (&str, Vec<&str>) {
    let mut tokens = text.split_whitespace();
    let name = tokens
        .next()
        .map(|token| token.split('@').next().unwrap_or(token))
        .unwrap_or("");
    (name, tokens.collect())
}

/// Handle one message from a chat. Returns `None` when there is nothing to answer.
pub async fn handle_command(
    data: &Data,
    chat_id: i64,
    sent_at: DateTime<Utc>,
    text: &str,
) -> Option<Reply> {
    let command = Command::parse(text)?;
    info!("Chat {} called {:?}", chat_id, command);

    let result = match command {
        Command::SetGroup(query) => group::set_group(data, chat_id, query.as_deref()).await,
        Command::ToggleWeek => group::toggle_week(data, chat_id).await,
        Command::Schedule => timetable::full_schedule(data, chat_id).await,
        Command::Week(option) => timetable::week(data, chat_id, option).await,
        Command::Day(option) => timetable::day(data, chat_id, option).await,
        Command::TimeLeft => {
            let moment = sent_at.with_timezone(&data.tz).time();
            timetable::time_left(data, chat_id, moment).await
        }
        Command::Help => Ok(help::usage(data.bot_username.as_deref())),
    };

    Some(result.unwrap_or_else(|e| error_reply(chat_id, &e)))
}

/// Turn a command failure into something the chat can read
pub fn error_reply(chat_id: i64, err: &CommandError) -> Reply {
    match err {
        CommandError::NotConfigured => {
            info!("Chat {} has no group set", chat_id);
            Reply::text("Group is not set. Use /setgroup <group name>")
        }
        CommandError::UpstreamUnavailable { status } => {
            warn!("Chat {}: {}", chat_id, err);
            match status {
                Some(code) => Reply::text(format!("API request failed. Code: {}", code.as_u16())),
                None => Reply::text("API request failed. Try again later"),
            }
        }
        CommandError::Decode(_) => {
            error!("Chat {}: {}", chat_id, err);
            Reply::text("Something went wrong while reading the timetable")
        }
        CommandError::Format(e) => {
            error!("Chat {}: {}", chat_id, e);
            Reply::text(format!("The timetable contains an invalid time: {}", e.token))
        }
        CommandError::Store(e) => {
            error!("Chat {}: storage failure: {}", chat_id, e);
            Reply::text("Chat settings are unavailable right now. Try again later")
        }
    }
}
