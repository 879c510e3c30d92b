use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

use crate::engine::{dates, EngineError, UserData};

/// Flat bonus for a day on which every active habit was completed.
pub const PERFECT_DAY_BONUS: i64 = 50;
/// Extra share of base XP per consecutive day beyond the first.
pub const STREAK_BONUS_RATE: f64 = 0.1;

/// XP earned by one completion that is day `streak` of a run.
///
/// `floor(base × (1 + 0.1 × (streak − 1)))`; the bonus never drops below zero
/// and is not capped. Results past `i64::MAX` saturate.
pub fn streak_award(base_xp: i64, streak: u32) -> i64 {
    let bonus = (STREAK_BONUS_RATE * (f64::from(streak) - 1.0)).max(0.0);
    (base_xp as f64 * (1.0 + bonus)).floor() as i64
}

/// Adds `xp` to a running total, failing instead of wrapping.
pub fn add_xp(total: i64, xp: i64) -> Result<i64, EngineError> {
    total.checked_add(xp).ok_or(EngineError::XpOverflow)
}

pub fn sum_xp(values: impl IntoIterator<Item = i64>) -> Result<i64, EngineError> {
    values.into_iter().try_fold(0, add_xp)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitTally {
    pub total_xp: i64,
    pub completions: u32,
}

/// Breakdown of a user's all-time XP.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XpLedger {
    pub per_habit: BTreeMap<String, HabitTally>,
    pub perfect_days: u32,
    pub completed_tasks: u32,
    pub task_xp: i64,
    total_xp: i64,
}

impl XpLedger {
    pub fn habit_xp(&self) -> i64 {
        // each tally is bounded by the checked grand total
        self.per_habit.values().map(|tally| tally.total_xp).sum()
    }

    pub fn perfect_day_xp(&self) -> i64 {
        i64::from(self.perfect_days) * PERFECT_DAY_BONUS
    }

    pub fn total_xp(&self) -> i64 {
        self.total_xp
    }
}

/// Replays the completion log from its first day through `today`.
///
/// Only habits in the current dictionary are scored, so deleted habits lose
/// their history. The perfect-day check uses the current `active` flags for
/// every past day as well. Totals that leave the `i64` range are an error.
pub fn accumulate(data: &UserData, today: NaiveDate) -> Result<XpLedger, EngineError> {
    let mut ledger = XpLedger {
        per_habit: data
            .habits
            .keys()
            .map(|name| (name.clone(), HabitTally::default()))
            .collect(),
        ..XpLedger::default()
    };

    if let Some(first_day) = data.completions.first_date() {
        let active = data.active_habits();
        let mut running: HashMap<&str, u32> = HashMap::new();

        for day in dates::days_inclusive(first_day, today) {
            let done = data.completions.completed_on(day);

            for (name, habit) in &data.habits {
                let streak = running.entry(name.as_str()).or_default();
                if done.is_some_and(|habits| habits.contains(name)) {
                    *streak = streak.saturating_add(1);
                    let award = streak_award(habit.base_xp, *streak);
                    let tally = ledger.per_habit.entry(name.clone()).or_default();
                    tally.total_xp = add_xp(tally.total_xp, award)?;
                    tally.completions = tally.completions.saturating_add(1);
                    ledger.total_xp = add_xp(ledger.total_xp, award)?;
                } else {
                    *streak = 0;
                }
            }

            let perfect = !active.is_empty()
                && done.is_some_and(|habits| active.iter().all(|name| habits.contains(*name)));
            if perfect {
                ledger.perfect_days += 1;
                ledger.total_xp = add_xp(ledger.total_xp, PERFECT_DAY_BONUS)?;
            }
        }
    }

    for task in data.tasks.iter().filter(|task| task.is_done()) {
        ledger.task_xp = add_xp(ledger.task_xp, task.xp)?;
        ledger.completed_tasks += 1;
    }
    ledger.total_xp = add_xp(ledger.total_xp, ledger.task_xp)?;

    Ok(ledger)
}
