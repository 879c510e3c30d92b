use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Habit '{habit}' has negative base XP: {xp}")]
    NegativeBaseXp { habit: String, xp: i64 },

    #[error("Task '{title}' has negative XP: {xp}")]
    NegativeTaskXp { title: String, xp: i64 },

    #[error("Total XP cannot be negative: {0}")]
    NegativeTotalXp(i64),

    #[error("Invalid ISO-8601 date: {0}")]
    InvalidDate(String),

    #[error("XP total exceeds the supported range")]
    XpOverflow,

    #[error("Week offset out of range: {0}")]
    WeekOutOfRange(i64),

    #[error("Unknown leaderboard window: {0}")]
    UnknownWindow(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Repository error: {0}")]
    Repository(String),
}

impl EngineError {
    /// True when the stored snapshot itself breaks the engine's input contract.
    pub fn is_invalid_snapshot(&self) -> bool {
        matches!(
            self,
            EngineError::NegativeBaseXp { .. }
                | EngineError::NegativeTaskXp { .. }
                | EngineError::XpOverflow
        )
    }
}
