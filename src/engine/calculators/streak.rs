use chrono::NaiveDate;

use crate::engine::CompletionLog;

/// Consecutive completed days ending at `today`.
///
/// An unlogged `today` is skipped once so a streak is not shown as broken
/// before the user has had a chance to log the day.
pub fn current_streak(habit: &str, completions: &CompletionLog, today: NaiveDate) -> u32 {
    let mut day = today;
    if !completions.is_completed(day, habit) {
        match day.pred_opt() {
            Some(yesterday) => day = yesterday,
            None => return 0,
        }
    }

    let mut streak = 0;
    while completions.is_completed(day, habit) {
        streak += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }
    streak
}
