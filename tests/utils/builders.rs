#![allow(dead_code)] // Test utilities may not all be used in every test

use chrono::{Duration, NaiveDate};

use habitquest::engine::{dates, Habit, Task, TaskStatus, UserData};

// ============================================================================
// Dates
// ============================================================================

/// Pinned "today" for every integration test (a Wednesday).
pub const TODAY: &str = "2025-06-18";

pub fn date(raw: &str) -> NaiveDate {
    dates::parse_iso_date(raw).unwrap()
}

pub fn today() -> NaiveDate {
    date(TODAY)
}

pub fn days_ago(offset: i64) -> NaiveDate {
    today() - Duration::days(offset)
}

// ============================================================================
// User Snapshot Builder
// ============================================================================

pub struct UserDataBuilder {
    data: UserData,
}

impl UserDataBuilder {
    pub fn new() -> Self {
        Self {
            data: UserData::default(),
        }
    }

    pub fn with_habit(mut self, name: &str, base_xp: i64) -> Self {
        self.data.habits.insert(name.to_string(), Habit::new(base_xp));
        self
    }

    pub fn with_archived_habit(mut self, name: &str, base_xp: i64) -> Self {
        self.data
            .habits
            .insert(name.to_string(), Habit::new(base_xp).archived());
        self
    }

    pub fn without_habit(mut self, name: &str) -> Self {
        self.data.habits.remove(name);
        self
    }

    pub fn completed_on(mut self, habit: &str, day: NaiveDate) -> Self {
        self.data.completions.record(day, habit);
        self
    }

    /// Logs `habit` on each of the `days` days ending `last_days_ago` days before today.
    pub fn completed_run(mut self, habit: &str, last_days_ago: i64, days: i64) -> Self {
        for offset in last_days_ago..last_days_ago + days {
            self.data.completions.record(days_ago(offset), habit);
        }
        self
    }

    pub fn with_done_task(mut self, title: &str, xp: i64, completed_at: &str) -> Self {
        let mut task = Task::new(title, xp);
        task.status = TaskStatus::Done;
        task.completed_at = Some(completed_at.to_string());
        self.data.tasks.push(task);
        self
    }

    pub fn with_open_task(mut self, title: &str, xp: i64, due_date: Option<&str>) -> Self {
        let mut task = Task::new(title, xp);
        task.due_date = due_date.map(str::to_string);
        self.data.tasks.push(task);
        self
    }

    pub fn private(mut self) -> Self {
        self.data.preferences.private_mode = true;
        self
    }

    pub fn build(self) -> UserData {
        self.data
    }
}
