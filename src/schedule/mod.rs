//! Two-week timetable resolution
//!
//! - `time`: `H.mm` start-time tokens
//! - `resolver`: which week track and which day a request refers to
//! - `window`: remaining time in the current class or break
//! - `render`: Telegram HTML output

mod models;
pub mod render;
pub mod resolver;
pub mod time;
pub mod window;

pub use models::*;
pub use resolver::{resolve_day_index, select_week, DayIndex};
pub use time::parse_time;
pub use window::{time_left, TimeLeft};

/// Length of every pair, in minutes
pub const PAIR_MINUTES: i64 = 95;
