pub mod config;
pub mod error;
pub mod license;
pub mod logging;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use config::Config;
pub use error::{LicenseError, Result};
pub use license::{License, LicenseSources, LicenseUpdater, SourceMatcher, UpdateSummary};
