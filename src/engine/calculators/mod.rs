mod level;
mod streak;
mod xp;

pub use level::{compute_level, habit_level, Rank, COMPLETIONS_PER_HABIT_LEVEL, XP_PER_LEVEL};
pub use streak::current_streak;
pub use xp::{
    accumulate, add_xp, streak_award, sum_xp, HabitTally, XpLedger, PERFECT_DAY_BONUS,
};
