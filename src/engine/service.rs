use chrono::NaiveDate;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    badges::{BadgeEvaluator, BadgeRule},
    clock::{Clock, SystemClock},
    leaderboard::{self, LeaderboardWindow},
    missions::{self, MissionBoard},
    repository::UserDataRepository,
    stats, weekly, CompletionReward, EngineError, LeaderboardEntry, UserData, UserRecord,
    UserStats, WeeklyReport,
};

/// Loads user snapshots and runs the engine over them. Holds no derived state;
/// every call recomputes from the repository's current data.
pub struct GamificationService {
    repository: Arc<dyn UserDataRepository>,
    badges: BadgeEvaluator,
    clock: Arc<dyn Clock>,
}

impl GamificationService {
    pub fn builder(repository: Arc<dyn UserDataRepository>) -> GamificationServiceBuilder {
        GamificationServiceBuilder::new(repository)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    #[instrument(skip(self))]
    pub async fn user_stats(&self, user_id: &str) -> Result<UserStats, EngineError> {
        let data = self.load_user(user_id).await?;
        stats::compute_stats(&data, self.today(), &self.badges)
    }

    #[instrument(skip(self))]
    pub async fn weekly_report(
        &self,
        user_id: &str,
        week_offset: i64,
    ) -> Result<WeeklyReport, EngineError> {
        let data = self.load_user(user_id).await?;
        weekly::weekly_report(&data, self.today(), week_offset)
    }

    #[instrument(skip(self))]
    pub async fn completion_reward(
        &self,
        user_id: &str,
        habit: &str,
    ) -> Result<Option<CompletionReward>, EngineError> {
        let data = self.load_user(user_id).await?;
        stats::completion_reward(&data, habit, self.today())
    }

    #[instrument(skip(self))]
    pub async fn mission_board(&self, user_id: &str) -> Result<MissionBoard, EngineError> {
        let data = self.load_user(user_id).await?;
        Ok(missions::mission_board(&data.tasks, self.today()))
    }

    /// Snapshots are fetched concurrently; ranking happens once all are in so
    /// the order never depends on fetch timing.
    #[instrument(skip(self))]
    pub async fn leaderboard(
        &self,
        window: LeaderboardWindow,
    ) -> Result<Vec<LeaderboardEntry>, EngineError> {
        let user_ids = self.repository.list_users().await?;

        let fetches = user_ids.iter().map(|user_id| async move {
            (user_id, self.repository.get_user_data(user_id).await)
        });

        let mut records = Vec::with_capacity(user_ids.len());
        for (user_id, fetched) in join_all(fetches).await {
            match fetched? {
                Some(data) => records.push(UserRecord::new(user_id.clone(), data)),
                None => warn!(user_id = %user_id, "Listed user has no snapshot, skipping"),
            }
        }

        let board = leaderboard::leaderboard(&records, window, self.today())?;
        info!(
            window = %window,
            users = records.len(),
            ranked = board.len(),
            "Leaderboard computed"
        );
        Ok(board)
    }

    async fn load_user(&self, user_id: &str) -> Result<UserData, EngineError> {
        self.repository
            .get_user_data(user_id)
            .await?
            .ok_or_else(|| EngineError::UserNotFound(user_id.to_string()))
    }
}

pub struct GamificationServiceBuilder {
    repository: Arc<dyn UserDataRepository>,
    badges: BadgeEvaluator,
    clock: Arc<dyn Clock>,
}

impl GamificationServiceBuilder {
    fn new(repository: Arc<dyn UserDataRepository>) -> Self {
        Self {
            repository,
            badges: BadgeEvaluator::new(),
            clock: Arc::new(SystemClock::new()),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_badge_rule(mut self, rule: Arc<dyn BadgeRule>) -> Self {
        self.badges = self.badges.with_rule(rule);
        self
    }

    pub fn build(self) -> GamificationService {
        GamificationService {
            repository: self.repository,
            badges: self.badges,
            clock: self.clock,
        }
    }
}
