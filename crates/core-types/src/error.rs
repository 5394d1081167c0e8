use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unrecognised date '{0}': expected RFC 3339 or YYYY-MM-DD")]
    InvalidDate(String),
}
