use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{Display, EnumIter, EnumString};

use super::Task;

/// Open tasks grouped by due bucket, then goal.
pub type MissionBoard = BTreeMap<DueBucket, BTreeMap<String, Vec<Task>>>;

/// Due-date grouping relative to today, in display order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum DueBucket {
    Overdue,
    Today,
    Tomorrow,
    #[serde(rename = "This Week")]
    #[strum(serialize = "This Week")]
    ThisWeek,
    #[serde(rename = "Next Week")]
    #[strum(serialize = "Next Week")]
    NextWeek,
    Later,
    #[serde(rename = "No Date")]
    #[strum(serialize = "No Date")]
    NoDate,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Lenient reading of free-form priority text: `h…` is high, `l…` is low,
    /// anything else (including nothing) is medium.
    pub fn normalize(raw: Option<&str>) -> Self {
        let value = raw.map(|s| s.trim().to_ascii_lowercase()).unwrap_or_default();
        if value.starts_with('h') {
            Priority::High
        } else if value.starts_with('l') {
            Priority::Low
        } else {
            Priority::Medium
        }
    }

    /// Sort position of a stored priority. Unrecognised values sort last.
    pub fn sort_rank(raw: Option<&str>) -> u8 {
        match raw.and_then(|value| value.parse::<Priority>().ok()) {
            Some(Priority::High) => 0,
            Some(Priority::Medium) => 1,
            Some(Priority::Low) => 2,
            None => 3,
        }
    }
}

pub fn due_bucket(due: Option<NaiveDate>, today: NaiveDate) -> DueBucket {
    let Some(due) = due else {
        return DueBucket::NoDate;
    };

    if due < today {
        DueBucket::Overdue
    } else if due == today {
        DueBucket::Today
    } else if due == today + Duration::days(1) {
        DueBucket::Tomorrow
    } else if due <= today + Duration::days(7) {
        DueBucket::ThisWeek
    } else if due <= today + Duration::days(14) {
        DueBucket::NextWeek
    } else {
        DueBucket::Later
    }
}

/// Groups unfinished tasks for display. Within a goal, tasks are ordered by
/// due date (undated last), priority, then creation time.
pub fn mission_board(tasks: &[Task], today: NaiveDate) -> MissionBoard {
    let mut board = MissionBoard::new();
    for task in tasks.iter().filter(|task| !task.is_done()) {
        board
            .entry(due_bucket(task.due_on(), today))
            .or_default()
            .entry(task.goal.clone())
            .or_default()
            .push(task.clone());
    }

    for goals in board.values_mut() {
        for goal_tasks in goals.values_mut() {
            goal_tasks.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
        }
    }
    board
}

fn sort_key(task: &Task) -> (NaiveDate, u8, &str) {
    (
        task.due_on().unwrap_or(NaiveDate::MAX),
        Priority::sort_rank(task.priority.as_deref()),
        task.created_at.as_deref().unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{dates, TaskStatus};
    use rstest::rstest;

    fn date(raw: &str) -> NaiveDate {
        dates::parse_iso_date(raw).unwrap()
    }

    fn today() -> NaiveDate {
        date("2025-06-18")
    }

    fn task(title: &str, goal: &str, due: Option<&str>, priority: Option<&str>) -> Task {
        let mut task = Task::new(title, 50);
        task.goal = goal.to_string();
        task.due_date = due.map(str::to_string);
        task.priority = priority.map(str::to_string);
        task
    }

    #[rstest]
    #[case(None, DueBucket::NoDate)]
    #[case(Some("2025-06-10"), DueBucket::Overdue)]
    #[case(Some("2025-06-18"), DueBucket::Today)]
    #[case(Some("2025-06-19"), DueBucket::Tomorrow)]
    #[case(Some("2025-06-25"), DueBucket::ThisWeek)]
    #[case(Some("2025-06-26"), DueBucket::NextWeek)]
    #[case(Some("2025-07-02"), DueBucket::NextWeek)]
    #[case(Some("2025-07-03"), DueBucket::Later)]
    fn buckets_by_due_date(#[case] due: Option<&str>, #[case] expected: DueBucket) {
        assert_eq!(due_bucket(due.map(date), today()), expected);
    }

    #[rstest]
    #[case(Some("High"), Priority::High)]
    #[case(Some("  low "), Priority::Low)]
    #[case(Some("urgent"), Priority::Medium)]
    #[case(Some("h"), Priority::High)]
    #[case(None, Priority::Medium)]
    fn normalizes_priority_text(#[case] raw: Option<&str>, #[case] expected: Priority) {
        assert_eq!(Priority::normalize(raw), expected);
    }

    #[test]
    fn groups_open_tasks_by_bucket_and_goal() {
        let mut finished = task("Done already", "Work", Some("2025-06-18"), None);
        finished.status = TaskStatus::Done;

        let tasks = vec![
            task("Slides", "Work", Some("2025-06-18"), Some("Low")),
            task("Budget", "Work", Some("2025-06-18"), Some("High")),
            task("Stretch", "Health", Some("2025-06-18"), None),
            task("Someday", "Work", Some("bad date"), None),
            finished,
        ];

        let board = mission_board(&tasks, today());

        let today_work: Vec<_> = board[&DueBucket::Today]["Work"]
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(today_work, vec!["Budget", "Slides"]);
        assert_eq!(board[&DueBucket::Today]["Health"].len(), 1);
        assert_eq!(board[&DueBucket::NoDate]["Work"][0].title, "Someday");
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn undated_and_unknown_priority_sort_last() {
        let mut early = task("Early", "Work", None, Some("Medium"));
        early.created_at = Some("2025-06-01T09:00:00".to_string());
        let mut late = task("Late", "Work", None, Some("Medium"));
        late.created_at = Some("2025-06-02T09:00:00".to_string());
        let odd = task("Odd", "Work", None, Some("whenever"));

        let board = mission_board(&[odd, late, early], today());
        let order: Vec<_> = board[&DueBucket::NoDate]["Work"]
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(order, vec!["Early", "Late", "Odd"]);
    }

    #[test]
    fn buckets_serialize_with_display_names() {
        assert_eq!(DueBucket::ThisWeek.to_string(), "This Week");
        assert_eq!(
            serde_json::to_string(&DueBucket::NoDate).unwrap(),
            "\"No Date\""
        );
    }
}
