use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use super::HabitStats;

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
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Badge {
    WeekStreak,
    MonthStreak,
    HabitMaster,
    PerfectWeek,
    TaskForce,
    Veteran,
}

impl Badge {
    pub fn title(self) -> &'static str {
        match self {
            Badge::WeekStreak => "On Fire",
            Badge::MonthStreak => "Unstoppable",
            Badge::HabitMaster => "Grandmaster",
            Badge::PerfectWeek => "Perfectionist",
            Badge::TaskForce => "Task Force",
            Badge::Veteran => "Veteran",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Badge::WeekStreak => "7 day streak on any habit",
            Badge::MonthStreak => "30 day streak on any habit",
            Badge::HabitMaster => "Reach level 3 on a habit",
            Badge::PerfectWeek => "7 perfect days",
            Badge::TaskForce => "Complete 10 missions",
            Badge::Veteran => "Reach level 10 profile",
        }
    }
}

/// Aggregates a badge rule can look at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BadgeContext {
    pub max_streak: u32,
    pub max_habit_level: u32,
    pub perfect_days: u32,
    pub completed_tasks: u32,
    pub profile_level: u32,
}

impl BadgeContext {
    pub fn new(
        per_habit: &BTreeMap<String, HabitStats>,
        perfect_days: u32,
        completed_tasks: u32,
        profile_level: u32,
    ) -> Self {
        Self {
            max_streak: per_habit.values().map(|s| s.streak).max().unwrap_or_default(),
            max_habit_level: per_habit.values().map(|s| s.level).max().unwrap_or_default(),
            perfect_days,
            completed_tasks,
            profile_level,
        }
    }
}

pub trait BadgeRule: Send + Sync {
    fn badge(&self) -> Badge;

    fn is_earned(&self, context: &BadgeContext) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeMetric {
    MaxStreak,
    MaxHabitLevel,
    PerfectDays,
    CompletedTasks,
    ProfileLevel,
}

impl BadgeMetric {
    fn read(self, context: &BadgeContext) -> u32 {
        match self {
            BadgeMetric::MaxStreak => context.max_streak,
            BadgeMetric::MaxHabitLevel => context.max_habit_level,
            BadgeMetric::PerfectDays => context.perfect_days,
            BadgeMetric::CompletedTasks => context.completed_tasks,
            BadgeMetric::ProfileLevel => context.profile_level,
        }
    }
}

/// Earned once `metric` reaches `threshold`.
pub struct ThresholdRule {
    badge: Badge,
    metric: BadgeMetric,
    threshold: u32,
}

impl ThresholdRule {
    pub fn new(badge: Badge, metric: BadgeMetric, threshold: u32) -> Self {
        Self {
            badge,
            metric,
            threshold,
        }
    }
}

impl BadgeRule for ThresholdRule {
    fn badge(&self) -> Badge {
        self.badge
    }

    fn is_earned(&self, context: &BadgeContext) -> bool {
        self.metric.read(context) >= self.threshold
    }
}

/// Derives the badge set from current aggregates only. Nothing is remembered
/// between evaluations, so a badge disappears once its condition fails.
#[derive(Clone)]
pub struct BadgeEvaluator {
    rules: Vec<Arc<dyn BadgeRule>>,
}

impl Default for BadgeEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl BadgeEvaluator {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Arc::new(ThresholdRule::new(Badge::WeekStreak, BadgeMetric::MaxStreak, 7)),
                Arc::new(ThresholdRule::new(Badge::MonthStreak, BadgeMetric::MaxStreak, 30)),
                Arc::new(ThresholdRule::new(Badge::HabitMaster, BadgeMetric::MaxHabitLevel, 3)),
                Arc::new(ThresholdRule::new(Badge::PerfectWeek, BadgeMetric::PerfectDays, 7)),
                Arc::new(ThresholdRule::new(Badge::TaskForce, BadgeMetric::CompletedTasks, 10)),
                Arc::new(ThresholdRule::new(Badge::Veteran, BadgeMetric::ProfileLevel, 10)),
            ],
        }
    }

    pub fn with_rule(mut self, rule: Arc<dyn BadgeRule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn evaluate(&self, context: &BadgeContext) -> BTreeSet<Badge> {
        self.rules
            .iter()
            .filter(|rule| rule.is_earned(context))
            .map(|rule| rule.badge())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    fn context_with_streak(max_streak: u32) -> BadgeContext {
        BadgeContext {
            max_streak,
            ..BadgeContext::default()
        }
    }

    #[rstest]
    #[case(BadgeContext { max_streak: 7, ..Default::default() }, &[Badge::WeekStreak])]
    #[case(BadgeContext { max_streak: 30, ..Default::default() }, &[Badge::WeekStreak, Badge::MonthStreak])]
    #[case(BadgeContext { max_habit_level: 3, ..Default::default() }, &[Badge::HabitMaster])]
    #[case(BadgeContext { perfect_days: 7, ..Default::default() }, &[Badge::PerfectWeek])]
    #[case(BadgeContext { completed_tasks: 10, ..Default::default() }, &[Badge::TaskForce])]
    #[case(BadgeContext { profile_level: 10, ..Default::default() }, &[Badge::Veteran])]
    #[case(BadgeContext { max_streak: 6, max_habit_level: 2, perfect_days: 6, completed_tasks: 9, profile_level: 9 }, &[])]
    fn awards_badges_at_thresholds(#[case] context: BadgeContext, #[case] expected: &[Badge]) {
        let badges = BadgeEvaluator::new().evaluate(&context);
        assert_eq!(badges, expected.iter().copied().collect::<BTreeSet<_>>());
    }

    #[test]
    fn badges_are_not_sticky() {
        let evaluator = BadgeEvaluator::new();
        assert!(evaluator
            .evaluate(&context_with_streak(8))
            .contains(&Badge::WeekStreak));
        assert!(!evaluator
            .evaluate(&context_with_streak(3))
            .contains(&Badge::WeekStreak));
    }

    #[test]
    fn duplicate_rules_collapse_into_one_badge() {
        let evaluator = BadgeEvaluator::new().with_rule(Arc::new(ThresholdRule::new(
            Badge::WeekStreak,
            BadgeMetric::PerfectDays,
            1,
        )));
        let context = BadgeContext {
            max_streak: 7,
            perfect_days: 1,
            ..BadgeContext::default()
        };

        assert_eq!(
            evaluator.evaluate(&context),
            BTreeSet::from([Badge::WeekStreak])
        );
    }

    #[test]
    fn context_takes_maximums_across_habits() {
        let per_habit = BTreeMap::from([
            (
                "Read".to_string(),
                HabitStats {
                    streak: 4,
                    level: 3,
                    ..HabitStats::default()
                },
            ),
            (
                "Run".to_string(),
                HabitStats {
                    streak: 9,
                    level: 1,
                    ..HabitStats::default()
                },
            ),
        ]);

        let context = BadgeContext::new(&per_habit, 2, 5, 4);
        assert_eq!(context.max_streak, 9);
        assert_eq!(context.max_habit_level, 3);
        assert_eq!(context.profile_level, 4);
    }

    #[test]
    fn every_badge_has_catalogue_text() {
        for badge in Badge::iter() {
            assert!(!badge.title().is_empty());
            assert!(!badge.description().is_empty());
        }
        assert_eq!(Badge::TaskForce.as_ref(), "task_force");
        assert_eq!(
            serde_json::to_string(&Badge::MonthStreak).unwrap(),
            "\"month_streak\""
        );
    }
}
