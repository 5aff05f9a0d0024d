use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to one of the upstream services.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, timeout or body decoding failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream responded with status {0}")]
    Status(StatusCode),
    /// The relatives lookup answered but reported no usable contact.
    #[error("relatives lookup for patient {0} was unsuccessful")]
    Unsuccessful(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}
