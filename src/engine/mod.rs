// Gamification & analytics engine
//
// Pure computations over a user's tracker snapshot (calculators, badges,
// leaderboard, weekly report, missions) plus the async service that feeds
// them from a repository.

pub mod badges;
pub mod calculators;
pub mod clock;
pub mod dates;
pub mod leaderboard;
pub mod missions;
pub mod repository;
pub mod service;
pub mod stats;
pub mod weekly;

mod errors;
pub mod models;

pub use badges::{Badge, BadgeContext, BadgeEvaluator, BadgeMetric, BadgeRule, ThresholdRule};
pub use calculators::{compute_level, current_streak, Rank, PERFECT_DAY_BONUS, XP_PER_LEVEL};
pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::EngineError;
pub use leaderboard::LeaderboardWindow;
pub use missions::{DueBucket, MissionBoard, Priority};
pub use models::*;
pub use repository::{InMemoryUserDataRepository, UserDataRepository};
pub use service::{GamificationService, GamificationServiceBuilder};
pub use stats::{completion_reward, compute_stats};
pub use weekly::weekly_report;
