//! Error types for E2E testing

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Driver failed to start: {0}")]
    DriverStartup(String),

    #[error("Driver readiness check failed after {0} attempts")]
    DriverReadiness(usize),

    #[error("WebDriver error [{error}]: {message}")]
    WebDriver { error: String, message: String },

    #[error("Malformed WebDriver response: {0}")]
    Protocol(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    #[error("Case not found: {0}")]
    CaseNotFound(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;
