use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use super::{
    calculators::{accumulate, sum_xp},
    dates, EngineError, LeaderboardEntry, UserData, UserRecord,
};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LeaderboardWindow {
    #[default]
    AllTime,
    Week,
    Month,
    Year,
}

impl LeaderboardWindow {
    pub fn parse(raw: &str) -> Result<Self, EngineError> {
        raw.trim()
            .parse()
            .map_err(|_| EngineError::UnknownWindow(raw.to_string()))
    }

    /// First day that counts toward the window, `None` for all time.
    pub fn start(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            LeaderboardWindow::AllTime => None,
            LeaderboardWindow::Week => Some(dates::week_start(today)),
            LeaderboardWindow::Month => Some(dates::month_start(today)),
            LeaderboardWindow::Year => Some(dates::year_start(today)),
        }
    }
}

/// Flat XP earned since `start`: base XP once per completion of a defined
/// habit plus finished tasks. No streak or perfect-day bonuses apply here,
/// unlike the all-time total.
pub fn window_xp(data: &UserData, start: NaiveDate) -> Result<i64, EngineError> {
    let habit_xp = data
        .completions
        .iter()
        .filter(|(date, _)| *date >= start)
        .flat_map(|(_, habits)| habits.iter())
        .filter_map(|name| data.habits.get(name))
        .map(|habit| habit.base_xp);

    let task_xp = data
        .tasks
        .iter()
        .filter(|task| task.completed_on().is_some_and(|date| date >= start))
        .map(|task| task.xp);

    sum_xp(habit_xp.chain(task_xp))
}

pub fn user_xp(
    data: &UserData,
    window: LeaderboardWindow,
    today: NaiveDate,
) -> Result<i64, EngineError> {
    data.validate()?;
    match window.start(today) {
        None => Ok(accumulate(data, today)?.total_xp()),
        Some(start) => window_xp(data, start),
    }
}

/// Highest XP first; equal XP ordered by ascending user id.
pub fn rank_entries(mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    entries.sort_by(|a, b| b.xp.cmp(&a.xp).then_with(|| a.user_id.cmp(&b.user_id)));
    entries
}

pub fn leaderboard(
    users: &[UserRecord],
    window: LeaderboardWindow,
    today: NaiveDate,
) -> Result<Vec<LeaderboardEntry>, EngineError> {
    let entries = users
        .iter()
        .filter(|user| !user.data.preferences.private_mode)
        .map(|user| {
            Ok(LeaderboardEntry {
                user_id: user.user_id.clone(),
                xp: user_xp(&user.data, window, today)?,
            })
        })
        .collect::<Result<Vec<_>, EngineError>>()?;

    Ok(rank_entries(entries))
}
