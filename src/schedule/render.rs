//! Telegram HTML text for schedules and time-left answers

use super::models::{Pair, Schedule, WeekDay};
use super::window::{sorted_pairs, TimeLeft};
use crate::error::TimeFormatError;

pub const NO_CLASSES_THIS_WEEK: &str = "No classes this week";
pub const NO_CLASSES_THIS_DAY: &str = "No classes on this day";
pub const DAY_OFF: &str = "Sunday is for chilling 😌";
pub const UNKNOWN_DAY: &str = "Can't get this day";
pub const CANNOT_COUNT: &str = "Can't work out the time. Is there a class right now?";

/// Escape text for Telegram's HTML parse mode
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn render_pair(pair: &Pair) -> String {
    format!(
        "<i>{}</i> {}, {}",
        escape_html(&pair.time),
        escape_html(&pair.name),
        escape_html(&pair.kind)
    )
}

/// Day heading followed by its pairs in start order
pub fn render_day(day: &WeekDay) -> Result<String, TimeFormatError> {
    let mut out = format!("<b>{}</b>\n", escape_html(&day.day));
    for (_, pair) in sorted_pairs(day)? {
        out.push_str(&render_pair(pair));
        out.push('\n');
    }
    Ok(out)
}

/// All days that have classes, separated by blank lines
pub fn render_week(week: &[WeekDay]) -> Result<String, TimeFormatError> {
    let days = week
        .iter()
        .filter(|day| day.has_pairs())
        .map(render_day)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(days.join("\n"))
}

/// Both weeks, one after the other
pub fn render_schedule(schedule: &Schedule) -> Result<String, TimeFormatError> {
    let first = render_week(&schedule.first_week)?;
    let second = render_week(&schedule.second_week)?;
    Ok(format!(
        "<b>First week</b>\n{}<b>Second week</b>\n{}",
        or_no_classes(first),
        or_no_classes(second)
    ))
}

fn or_no_classes(week: String) -> String {
    if week.is_empty() {
        format!("{}\n", NO_CLASSES_THIS_WEEK)
    } else {
        week
    }
}

pub fn render_time_left(left: TimeLeft) -> String {
    match left {
        TimeLeft::InClass { minutes } => {
            format!("{} min left until the end of the class", minutes)
        }
        TimeLeft::InBreak { minutes } => {
            format!("{} min left until the end of the break", minutes)
        }
        TimeLeft::Indeterminate => CANNOT_COUNT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pair(name: &str, time: &str) -> Pair {
        Pair {
            name: name.to_string(),
            kind: "Lec".to_string(),
            time: time.to_string(),
        }
    }

    #[test]
    fn test_render_day_orders_pairs() {
        let day = WeekDay {
            day: "Monday".to_string(),
            pairs: vec![pair("Physics", "10.25"), pair("Maths", "8.30")],
        };
        assert_eq!(
            render_day(&day).unwrap(),
            "<b>Monday</b>\n<i>8.30</i> Maths, Lec\n<i>10.25</i> Physics, Lec\n"
        );
    }

    #[test]
    fn test_render_week_skips_empty_days() {
        let week = vec![
            WeekDay {
                day: "Monday".to_string(),
                pairs: vec![pair("Maths", "8.30")],
            },
            WeekDay {
                day: "Tuesday".to_string(),
                pairs: vec![],
            },
            WeekDay {
                day: "Wednesday".to_string(),
                pairs: vec![pair("Art", "12.20")],
            },
        ];
        assert_eq!(
            render_week(&week).unwrap(),
            "<b>Monday</b>\n<i>8.30</i> Maths, Lec\n\n<b>Wednesday</b>\n<i>12.20</i> Art, Lec\n"
        );
    }

    #[test]
    fn test_render_schedule_marks_empty_week() {
        let schedule = Schedule {
            first_week: vec![WeekDay {
                day: "Monday".to_string(),
                pairs: vec![pair("Maths", "8.30")],
            }],
            second_week: vec![],
        };
        assert_eq!(
            render_schedule(&schedule).unwrap(),
            "<b>First week</b>\n<b>Monday</b>\n<i>8.30</i> Maths, Lec\n\
             <b>Second week</b>\nNo classes this week\n"
        );
    }

    #[test]
    fn test_escapes_upstream_text() {
        let rendered = render_pair(&pair("R&D <intro>", "9.00"));
        assert_eq!(rendered, "<i>9.00</i> R&amp;D &lt;intro&gt;, Lec");
    }

    #[test]
    fn test_render_time_left() {
        assert_eq!(
            render_time_left(TimeLeft::InClass { minutes: 65 }),
            "65 min left until the end of the class"
        );
        assert_eq!(
            render_time_left(TimeLeft::InBreak { minutes: 10 }),
            "10 min left until the end of the break"
        );
        assert_eq!(render_time_left(TimeLeft::Indeterminate), CANNOT_COUNT);
    }
}
