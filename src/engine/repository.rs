use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::{EngineError, UserData};

const DEFAULT_USER_ID: &str = "default";

/// Read access to per-user tracker snapshots owned by the persistence layer.
#[async_trait]
pub trait UserDataRepository: Send + Sync {
    async fn list_users(&self) -> Result<Vec<String>, EngineError>;
    async fn get_user_data(&self, user_id: &str) -> Result<Option<UserData>, EngineError>;
}

/// Keeps only `[A-Za-z0-9_-]`; an id with nothing left becomes `default`.
pub fn sanitize_user_id(raw: &str) -> String {
    let sanitized: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if sanitized.is_empty() {
        DEFAULT_USER_ID.to_string()
    } else {
        sanitized
    }
}

/// In-memory snapshot store, seeded at startup or by tests.
#[derive(Debug, Default)]
pub struct InMemoryUserDataRepository {
    users: Arc<RwLock<HashMap<String, UserData>>>,
}

impl InMemoryUserDataRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Builds a repository from a JSON object of `{ "<user id>": <snapshot>, ... }`.
    pub fn from_json(raw: &str) -> Result<Self, EngineError> {
        let parsed: HashMap<String, UserData> = serde_json::from_str(raw)
            .map_err(|e| EngineError::Repository(format!("invalid snapshot document: {e}")))?;

        let users = parsed
            .into_iter()
            .map(|(user_id, data)| (sanitize_user_id(&user_id), data))
            .collect();

        Ok(Self {
            users: Arc::new(RwLock::new(users)),
        })
    }

    #[instrument(skip(self, data))]
    pub async fn upsert_user(&self, user_id: &str, data: UserData) {
        let user_id = sanitize_user_id(user_id);
        debug!(user_id = %user_id, habits = data.habits.len(), "Storing user snapshot");
        self.users.write().await.insert(user_id, data);
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserDataRepository for InMemoryUserDataRepository {
    async fn list_users(&self) -> Result<Vec<String>, EngineError> {
        let users = self.users.read().await;
        let mut ids: Vec<String> = users.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    #[instrument(skip(self))]
    async fn get_user_data(&self, user_id: &str) -> Result<Option<UserData>, EngineError> {
        let user_id = sanitize_user_id(user_id);
        let users = self.users.read().await;
        let data = users.get(&user_id).cloned();

        match &data {
            Some(_) => debug!(user_id = %user_id, "User snapshot found"),
            None => debug!(user_id = %user_id, "User snapshot not found"),
        }

        Ok(data)
    }
}
