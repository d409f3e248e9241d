//! Timetable data as served by the upstream schedule API

use serde::{Deserialize, Serialize};

/// A student group, identifies one timetable track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub faculty: String,
}

/// A single class session. Every pair lasts [`super::PAIR_MINUTES`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Start time as an `H.mm` token
    pub time: String,
}

/// One day of a week track. Pairs come in no particular order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekDay {
    pub day: String,
    pub pairs: Vec<Pair>,
}

impl WeekDay {
    pub fn has_pairs(&self) -> bool {
        !self.pairs.is_empty()
    }
}

/// Both week tracks, indexed by day (0 = Monday)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(rename = "scheduleFirstWeek")]
    pub first_week: Vec<WeekDay>,
    #[serde(rename = "scheduleSecondWeek")]
    pub second_week: Vec<WeekDay>,
}

/// Server time context. The upstream is authoritative for week parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTime {
    /// 1 or 2
    pub current_week: u8,
    /// 1 = Monday .. 7 = Sunday
    pub current_day: u8,
    pub current_lesson: i32,
}

/// Which week relative to now the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekOption {
    Current,
    Next,
}

/// Which day relative to now the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOption {
    Today,
    Tomorrow,
}
