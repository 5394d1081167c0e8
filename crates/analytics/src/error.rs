use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Analytics received invalid parameters: {0}")]
    InvalidParameters(String),
}

impl From<configuration::error::ConfigError> for AnalyticsError {
    fn from(error: configuration::error::ConfigError) -> Self {
        AnalyticsError::InvalidParameters(error.to_string())
    }
}
