//! Remaining time in the running class or break

use super::models::{Pair, WeekDay};
use super::time::parse_time;
use super::PAIR_MINUTES;
use crate::error::TimeFormatError;
use chrono::{Duration, NaiveTime};

/// Where a moment falls within a day's classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeLeft {
    InClass { minutes: i64 },
    InBreak { minutes: i64 },
    /// Before the first class, after the last, or no classes at all
    Indeterminate,
}

/// Pairs of a day ordered by start time, each with its parsed start
pub fn sorted_pairs(day: &WeekDay) -> Result<Vec<(NaiveTime, &Pair)>, TimeFormatError> {
    let mut pairs = day
        .pairs
        .iter()
        .map(|pair| parse_time(&pair.time).map(|start| (start, pair)))
        .collect::<Result<Vec<_>, _>>()?;
    pairs.sort_by_key(|(start, _)| *start);
    Ok(pairs)
}

/// Work out how much of the current class or break is left at `moment`.
///
/// Each pair occupies `(start, start + 95min)`; boundary instants are not inside.
/// The end is a wall-clock time, so a pair running past midnight wraps and
/// never contains any moment.
pub fn time_left(day: &WeekDay, moment: NaiveTime) -> Result<TimeLeft, TimeFormatError> {
    let mut prev_end: Option<NaiveTime> = None;

    for (start, _) in sorted_pairs(day)? {
        let end = start + Duration::minutes(PAIR_MINUTES);

        if start < moment && moment < end {
            return Ok(TimeLeft::InClass {
                minutes: round_minutes(end - moment),
            });
        }

        if let Some(prev_end) = prev_end {
            if prev_end < moment && moment < start {
                return Ok(TimeLeft::InBreak {
                    minutes: round_minutes(start - moment),
                });
            }
        }

        prev_end = Some(end);
    }

    Ok(TimeLeft::Indeterminate)
}

fn round_minutes(left: Duration) -> i64 {
    (left.num_seconds() + 30) / 60
}
