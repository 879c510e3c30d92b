use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

use super::{
    badges::{BadgeContext, BadgeEvaluator},
    calculators::{accumulate, compute_level, current_streak, habit_level, streak_award},
    CompletionReward, EngineError, HabitStats, UserData, UserStats,
};

/// Full per-user statistics, recomputed from the raw snapshot on every call.
pub fn compute_stats(
    data: &UserData,
    today: NaiveDate,
    evaluator: &BadgeEvaluator,
) -> Result<UserStats, EngineError> {
    data.validate()?;

    let ledger = accumulate(data, today)?;
    let per_habit: BTreeMap<String, HabitStats> = ledger
        .per_habit
        .iter()
        .map(|(name, tally)| {
            let stats = HabitStats {
                streak: current_streak(name, &data.completions, today),
                total_xp: tally.total_xp,
                completions: tally.completions,
                level: habit_level(tally.completions),
            };
            (name.clone(), stats)
        })
        .collect();

    let total_xp = ledger.total_xp();
    let level = compute_level(total_xp)?;
    let context = BadgeContext::new(
        &per_habit,
        ledger.perfect_days,
        ledger.completed_tasks,
        level.level,
    );
    let badges = evaluator.evaluate(&context);

    debug!(
        total_xp,
        habits = per_habit.len(),
        perfect_days = ledger.perfect_days,
        badges = badges.len(),
        "Computed user stats"
    );

    Ok(UserStats {
        total_xp,
        per_habit,
        badges,
        perfect_days: ledger.perfect_days,
        completed_tasks: ledger.completed_tasks,
        level,
    })
}

/// XP for the completion that brings `habit` to its current streak.
///
/// Returns `None` when the habit is not defined.
pub fn completion_reward(
    data: &UserData,
    habit: &str,
    today: NaiveDate,
) -> Result<Option<CompletionReward>, EngineError> {
    data.validate()?;

    Ok(data.habits.get(habit).map(|definition| {
        let streak = current_streak(habit, &data.completions, today);
        CompletionReward {
            habit: habit.to_string(),
            streak,
            xp: streak_award(definition.base_xp, streak),
        }
    }))
}
