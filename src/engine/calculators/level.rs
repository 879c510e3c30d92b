use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::engine::{EngineError, LevelInfo};

pub const XP_PER_LEVEL: i64 = 200;
pub const COMPLETIONS_PER_HABIT_LEVEL: u32 = 30;

/// Profile title unlocked by level.
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
    EnumIter,
)]
pub enum Rank {
    Novice,
    Squire,
    Knight,
    Champion,
    Legend,
}

impl Rank {
    /// Lowest profile level that carries this title.
    pub fn threshold(self) -> u32 {
        match self {
            Rank::Novice => 1,
            Rank::Squire => 5,
            Rank::Knight => 10,
            Rank::Champion => 20,
            Rank::Legend => 50,
        }
    }

    pub fn for_level(level: u32) -> Self {
        Rank::iter()
            .filter(|rank| rank.threshold() <= level)
            .last()
            .unwrap_or(Rank::Novice)
    }
}

pub fn compute_level(total_xp: i64) -> Result<LevelInfo, EngineError> {
    if total_xp < 0 {
        return Err(EngineError::NegativeTotalXp(total_xp));
    }

    let level = u32::try_from(total_xp / XP_PER_LEVEL).map_or(u32::MAX, |l| l.saturating_add(1));
    let xp_into_level = total_xp % XP_PER_LEVEL;

    Ok(LevelInfo {
        level,
        xp_into_level,
        progress: xp_into_level as f64 / XP_PER_LEVEL as f64,
        rank: Rank::for_level(level),
    })
}

/// Habit mastery level: one step per 30 completions.
pub fn habit_level(completions: u32) -> u32 {
    1 + completions / COMPLETIONS_PER_HABIT_LEVEL
}
