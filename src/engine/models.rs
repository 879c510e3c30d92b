use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use strum_macros::{Display, EnumString};
use tracing::debug;

use super::{badges::Badge, calculators::Rank, dates, EngineError};

pub const DEFAULT_GOAL: &str = "General";

fn default_goal() -> String {
    DEFAULT_GOAL.to_string()
}

fn default_active() -> bool {
    true
}

/// Current definition of a recurring habit. Applied to the whole history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    #[serde(rename = "xp")]
    pub base_xp: i64,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default = "default_goal")]
    pub goal: String,
}

impl Habit {
    pub fn new(base_xp: i64) -> Self {
        Self {
            base_xp,
            active: true,
            goal: default_goal(),
        }
    }

    pub fn archived(mut self) -> Self {
        self.active = false;
        self
    }
}

/// Day-by-day record of which habits were completed.
///
/// Keys arrive as ISO-8601 strings and are parsed on deserialization; keys that
/// do not parse are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Vec<String>>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct CompletionLog {
    days: BTreeMap<NaiveDate, BTreeSet<String>>,
}

impl CompletionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, date: NaiveDate, habit: impl Into<String>) {
        self.days.entry(date).or_default().insert(habit.into());
    }

    pub fn completed_on(&self, date: NaiveDate) -> Option<&BTreeSet<String>> {
        self.days.get(&date)
    }

    pub fn is_completed(&self, date: NaiveDate, habit: &str) -> bool {
        self.days
            .get(&date)
            .is_some_and(|habits| habits.contains(habit))
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.keys().next().copied()
    }

    /// Days in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &BTreeSet<String>)> {
        self.days.iter().map(|(date, habits)| (*date, habits))
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl From<BTreeMap<String, Vec<String>>> for CompletionLog {
    fn from(raw: BTreeMap<String, Vec<String>>) -> Self {
        let mut log = CompletionLog::new();
        for (key, habits) in raw {
            match dates::parse_iso_date(&key) {
                Ok(date) => {
                    let day = log.days.entry(date).or_default();
                    day.extend(habits);
                }
                Err(_) => debug!(date = %key, "Skipping unparsable completion date"),
            }
        }
        log
    }
}

impl From<CompletionLog> for BTreeMap<String, Vec<String>> {
    fn from(log: CompletionLog) -> Self {
        log.days
            .into_iter()
            .map(|(date, habits)| (date.to_string(), habits.into_iter().collect()))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum TaskStatus {
    #[default]
    Todo,
    Done,
}

/// One-off mission. Worth its XP once, when done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub xp: i64,
    #[serde(default = "default_goal")]
    pub goal: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

impl Task {
    pub fn new(title: impl Into<String>, xp: i64) -> Self {
        Self {
            title: title.into(),
            xp,
            goal: default_goal(),
            priority: None,
            due_date: None,
            status: TaskStatus::Todo,
            created_at: None,
            completed_at: None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// Calendar day a finished task was completed on, when it is known.
    pub fn completed_on(&self) -> Option<NaiveDate> {
        if !self.is_done() {
            return None;
        }
        self.completed_at.as_deref().and_then(dates::parse_date_prefix)
    }

    pub fn due_on(&self) -> Option<NaiveDate> {
        self.due_date
            .as_deref()
            .and_then(|raw| dates::parse_iso_date(raw).ok())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub private_mode: bool,
}

/// Snapshot of one user's tracker data as handed over by the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default)]
    pub habits: BTreeMap<String, Habit>,
    #[serde(default)]
    pub completions: CompletionLog,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub preferences: Preferences,
}

impl UserData {
    /// Active habit names. A perfect day needs every one of them.
    pub fn active_habits(&self) -> BTreeSet<&str> {
        self.habits
            .iter()
            .filter(|(_, habit)| habit.active)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if let Some((name, habit)) = self.habits.iter().find(|(_, habit)| habit.base_xp < 0) {
            return Err(EngineError::NegativeBaseXp {
                habit: name.clone(),
                xp: habit.base_xp,
            });
        }
        if let Some(task) = self.tasks.iter().find(|task| task.xp < 0) {
            return Err(EngineError::NegativeTaskXp {
                title: task.title.clone(),
                xp: task.xp,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user_id: String,
    pub data: UserData,
}

impl UserRecord {
    pub fn new(user_id: impl Into<String>, data: UserData) -> Self {
        Self {
            user_id: user_id.into(),
            data,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitStats {
    pub streak: u32,
    pub total_xp: i64,
    pub completions: u32,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub level: u32,
    pub xp_into_level: i64,
    pub progress: f64,
    pub rank: Rank,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_xp: i64,
    pub per_habit: BTreeMap<String, HabitStats>,
    pub badges: BTreeSet<Badge>,
    pub perfect_days: u32,
    pub completed_tasks: u32,
    pub level: LevelInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub xp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayReport {
    pub date: NaiveDate,
    pub weekday: String,
    pub xp: i64,
    pub completions: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub per_day: Vec<DayReport>,
    pub total_xp: i64,
    pub active_days: u32,
    pub avg_daily_xp: i64,
}

/// XP a single habit completion is worth given the streak it extends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionReward {
    pub habit: String,
    pub streak: u32,
    pub xp: i64,
}
