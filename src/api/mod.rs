// HTTP surface over the gamification service
//
// Read-only JSON endpoints; all state lives in the repository behind AppState.

pub use handlers::{
    get_completion_reward, get_leaderboard, get_level, get_mission_board, get_user_stats,
    get_weekly_report,
};

mod handlers;

use axum::{routing::get, Router};

use crate::shared::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/users/:user_id/stats", get(get_user_stats))
        .route("/users/:user_id/weekly", get(get_weekly_report))
        .route("/users/:user_id/rewards/:habit", get(get_completion_reward))
        .route("/users/:user_id/missions", get(get_mission_board))
        .route("/level/:total_xp", get(get_level))
        .route("/leaderboard", get(get_leaderboard))
        .with_state(state)
}
