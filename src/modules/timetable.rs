//! Schedule queries - full timetable, week, day and time left

use super::chat_state;
use crate::bot::{Data, Reply};
use crate::error::CommandError;
use crate::schedule::render::{
    self, CANNOT_COUNT, DAY_OFF, NO_CLASSES_THIS_DAY, NO_CLASSES_THIS_WEEK, UNKNOWN_DAY,
};
use crate::schedule::{
    resolve_day_index, select_week, DayIndex, DayOption, Schedule, ScheduleTime, WeekOption,
};
use chrono::NaiveTime;
use tracing::{error, info};

/// Schedule for the chat's group together with the server time context
async fn schedule_and_time(
    data: &Data,
    group_id: &str,
) -> Result<(Schedule, ScheduleTime), CommandError> {
    let (schedule, time) =
        tokio::try_join!(data.api.get_schedule(group_id), data.api.get_current_time())?;
    Ok((schedule, time))
}

/// Both weeks
pub async fn full_schedule(data: &Data, chat_id: i64) -> Result<Reply, CommandError> {
    let chat = chat_state(data, chat_id).await?;
    let schedule = data.api.get_schedule(&chat.group_id).await?;
    Ok(Reply::html(render::render_schedule(&schedule)?))
}

/// The current or next week
pub async fn week(data: &Data, chat_id: i64, option: WeekOption) -> Result<Reply, CommandError> {
    let chat = chat_state(data, chat_id).await?;
    let (schedule, time) = schedule_and_time(data, &chat.group_id).await?;

    let week = select_week(&schedule, time.current_week, chat.week_toggle, option);
    let text = render::render_week(week)?;
    if text.is_empty() {
        return Ok(Reply::text(NO_CLASSES_THIS_WEEK));
    }
    Ok(Reply::html(text))
}

/// Today or tomorrow, always taken from the current week slice
pub async fn day(data: &Data, chat_id: i64, option: DayOption) -> Result<Reply, CommandError> {
    let chat = chat_state(data, chat_id).await?;
    let (schedule, time) = schedule_and_time(data, &chat.group_id).await?;
    let week = select_week(&schedule, time.current_week, chat.week_toggle, WeekOption::Current);

    let index = match resolve_day_index(time.current_day, option) {
        DayIndex::Index(index) => index,
        DayIndex::DayOff => return Ok(Reply::text(DAY_OFF)),
        DayIndex::OutOfRange => {
            error!(
                "Day out of range. option={:?} current_day={}",
                option, time.current_day
            );
            return Ok(Reply::text(UNKNOWN_DAY));
        }
    };

    match week.get(index) {
        None => {
            error!(
                "Day index out of range. option={:?} current_day={} index={} days={}",
                option,
                time.current_day,
                index,
                week.len()
            );
            Ok(Reply::text(UNKNOWN_DAY))
        }
        Some(day) if !day.has_pairs() => Ok(Reply::text(NO_CLASSES_THIS_DAY)),
        Some(day) => Ok(Reply::html(render::render_day(day)?)),
    }
}

/// Minutes left in the running class or break at `moment` (civil time)
pub async fn time_left(
    data: &Data,
    chat_id: i64,
    moment: NaiveTime,
) -> Result<Reply, CommandError> {
    let chat = chat_state(data, chat_id).await?;
    let (schedule, time) = schedule_and_time(data, &chat.group_id).await?;
    let week = select_week(&schedule, time.current_week, chat.week_toggle, WeekOption::Current);

    let today = usize::from(time.current_day)
        .checked_sub(1)
        .and_then(|index| week.get(index));

    match today {
        Some(day) => {
            let left = crate::schedule::time_left(day, moment)?;
            Ok(Reply::text(render::render_time_left(left)))
        }
        None => {
            info!(
                "Day {} is not in a {} day week",
                time.current_day,
                week.len()
            );
            Ok(Reply::text(CANNOT_COUNT))
        }
    }
}
