// Library crate for the habitquest gamification engine
// This file exposes the public API for the server binary and integration tests

pub mod api;
pub mod config;
pub mod engine;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use config::ServerConfig;
pub use engine::{
    EngineError, GamificationService, InMemoryUserDataRepository, LeaderboardWindow, UserData,
    UserDataRepository,
};
pub use shared::{AppError, AppState};
