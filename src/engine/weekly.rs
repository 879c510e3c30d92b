use chrono::NaiveDate;

use super::{
    calculators::{add_xp, sum_xp},
    dates, DayReport, EngineError, UserData, WeeklyReport,
};

const DAYS_PER_WEEK: i64 = 7;

/// Day-by-day breakdown of the Monday..=Sunday week `week_offset` weeks from
/// the current one. Habit XP is flat base XP for active habits; streak and
/// perfect-day bonuses are never applied.
pub fn weekly_report(
    data: &UserData,
    today: NaiveDate,
    week_offset: i64,
) -> Result<WeeklyReport, EngineError> {
    data.validate()?;

    let (week_start, week_end) = dates::week_range(today, week_offset)?;
    let per_day = dates::days_inclusive(week_start, week_end)
        .map(|date| day_report(data, date))
        .collect::<Result<Vec<DayReport>, EngineError>>()?;

    let total_xp = sum_xp(per_day.iter().map(|day| day.xp))?;
    let active_days = per_day.iter().filter(|day| day.xp > 0).count() as u32;

    Ok(WeeklyReport {
        week_start,
        week_end,
        per_day,
        total_xp,
        active_days,
        avg_daily_xp: total_xp / DAYS_PER_WEEK,
    })
}

fn day_report(data: &UserData, date: NaiveDate) -> Result<DayReport, EngineError> {
    let mut report = DayReport {
        date,
        weekday: date.format("%a").to_string(),
        xp: 0,
        completions: 0,
    };

    if let Some(done) = data.completions.completed_on(date) {
        for (_, habit) in data
            .habits
            .iter()
            .filter(|(name, habit)| habit.active && done.contains(*name))
        {
            report.xp = add_xp(report.xp, habit.base_xp)?;
            report.completions += 1;
        }
    }

    let task_xp = sum_xp(
        data.tasks
            .iter()
            .filter(|task| task.completed_on() == Some(date))
            .map(|task| task.xp),
    )?;
    report.xp = add_xp(report.xp, task_xp)?;

    Ok(report)
}
