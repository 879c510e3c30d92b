pub mod builders;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use builders::{date, days_ago, today, UserDataBuilder};
pub use setup::TestSetupBuilder;
