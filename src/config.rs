use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;

use crate::engine::{dates, Clock, EngineError, FixedClock, SystemClock};

pub const BIND_ADDR_VAR: &str = "HABITQUEST_BIND_ADDR";
pub const SEED_FILE_VAR: &str = "HABITQUEST_SEED_FILE";
pub const TODAY_VAR: &str = "HABITQUEST_TODAY";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// JSON document of user snapshots loaded at startup
    pub seed_file: Option<PathBuf>,
    /// Pins "today" instead of following the system clock
    pub pinned_today: Option<NaiveDate>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            seed_file: None,
            pinned_today: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EngineError> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let pinned_today = read(TODAY_VAR)
            .map(|raw| dates::parse_iso_date(&raw))
            .transpose()?;

        Ok(Self {
            bind_addr: read(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            seed_file: read(SEED_FILE_VAR).map(PathBuf::from),
            pinned_today,
        })
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        match self.pinned_today {
            Some(today) => Arc::new(FixedClock::new(today)),
            None => Arc::new(SystemClock::new()),
        }
    }
}
