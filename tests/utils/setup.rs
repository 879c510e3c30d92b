#![allow(dead_code)] // Test utilities may not all be used in every test

use std::sync::Arc;

use habitquest::engine::{FixedClock, GamificationService, InMemoryUserDataRepository, UserData};

use super::builders::today;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub repository: Arc<InMemoryUserDataRepository>,
    pub service: GamificationService,
}

pub struct TestSetupBuilder {
    users: Vec<(String, UserData)>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self { users: vec![] }
    }

    pub fn with_user(mut self, user_id: &str, data: UserData) -> Self {
        self.users.push((user_id.to_string(), data));
        self
    }

    pub async fn build(self) -> TestSetup {
        let repository = Arc::new(InMemoryUserDataRepository::new());
        for (user_id, data) in self.users {
            repository.upsert_user(&user_id, data).await;
        }

        let service = GamificationService::builder(repository.clone())
            .with_clock(Arc::new(FixedClock::new(today())))
            .build();

        TestSetup {
            repository,
            service,
        }
    }
}
