//! Help text

use crate::bot::Reply;

const COMMANDS: &[(&str, &str)] = &[
    ("/setgroup", "Set your group"),
    ("/toggleweek", "Swap the week order"),
    ("/schedule", "Full schedule"),
    ("/week", "This week"),
    ("/nextweek", "Next week"),
    ("/today", "Today"),
    ("/tomorrow", "Tomorrow"),
    ("/left", "Time left until the end of the class or break"),
];

/// Command list, addressed to `@bot_username` when known so it works in groups
pub fn usage(bot_username: Option<&str>) -> Reply {
    let suffix = bot_username
        .map(|name| format!("@{}", name.trim_start_matches('@')))
        .unwrap_or_default();

    let mut text = String::from("<b>Commands</b>\n");
    for (command, description) in COMMANDS {
        text.push_str(&format!("{}{} — {}\n", command, suffix, description));
    }
    text.push_str("<a href='https://github.com/Goganoid/ReSchedule'>Source code</a>");

    Reply::html(text).remove_keyboard()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_lists_every_command() {
        let reply = usage(None);
        assert!(reply.html);
        assert!(reply.remove_keyboard);
        for (command, _) in COMMANDS {
            assert!(reply.text.contains(command));
        }
    }

    #[test]
    fn test_usage_with_bot_name() {
        let reply = usage(Some("@reschedule_bot"));
        assert!(reply.text.contains("/today@reschedule_bot — Today"));
    }
}
