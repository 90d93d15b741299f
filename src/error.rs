use thiserror::Error;

pub type Result<T> = std::result::Result<T, LicenseError>;

#[derive(Error, Debug)]
pub enum LicenseError {
    // Standard library errors with automatic conversion
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    // Invocation errors, raised before anything is written
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl LicenseError {
    pub fn no_license_provided() -> Self {
        LicenseError::Configuration(
            "No project or source code license files provided - no changes made".to_string(),
        )
    }
}
