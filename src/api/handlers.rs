use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::engine::{
    compute_level, CompletionReward, LeaderboardEntry, LeaderboardWindow, LevelInfo,
    MissionBoard, UserStats, WeeklyReport,
};
use crate::shared::{AppError, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct WeeklyQuery {
    #[serde(default)]
    pub offset: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    pub window: Option<String>,
}

/// GET /users/:user_id/stats
#[instrument(name = "get_user_stats", skip(state))]
pub async fn get_user_stats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserStats>, AppError> {
    let stats = state.service.user_stats(&user_id).await?;
    info!(
        total_xp = stats.total_xp,
        level = stats.level.level,
        "User stats served"
    );
    Ok(Json(stats))
}

/// GET /users/:user_id/weekly?offset=N
#[instrument(name = "get_weekly_report", skip(state))]
pub async fn get_weekly_report(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<WeeklyQuery>,
) -> Result<Json<WeeklyReport>, AppError> {
    let report = state.service.weekly_report(&user_id, query.offset).await?;
    Ok(Json(report))
}

/// GET /users/:user_id/rewards/:habit
#[instrument(name = "get_completion_reward", skip(state))]
pub async fn get_completion_reward(
    State(state): State<AppState>,
    Path((user_id, habit)): Path<(String, String)>,
) -> Result<Json<CompletionReward>, AppError> {
    state
        .service
        .completion_reward(&user_id, &habit)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Habit not found: {habit}")))
}

/// GET /users/:user_id/missions
#[instrument(name = "get_mission_board", skip(state))]
pub async fn get_mission_board(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<MissionBoard>, AppError> {
    let board = state.service.mission_board(&user_id).await?;
    Ok(Json(board))
}

/// GET /level/:total_xp
pub async fn get_level(Path(total_xp): Path<i64>) -> Result<Json<LevelInfo>, AppError> {
    Ok(Json(compute_level(total_xp)?))
}

/// GET /leaderboard?window=week|month|year|all_time
#[instrument(name = "get_leaderboard", skip(state))]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    let window = match query.window.as_deref() {
        Some(raw) => LeaderboardWindow::parse(raw)?,
        None => LeaderboardWindow::default(),
    };
    let board = state.service.leaderboard(window).await?;
    Ok(Json(board))
}
