use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("No API authentication registered for {0:?}")]
    MissingCredentials(String),

    #[error("Invalid authentication data for {0:?}")]
    IncompleteCredentials(String),

    #[error("Authentication failed against {target}: {reason}")]
    Auth { target: String, reason: String },

    #[error("Fetch of {path} failed: {reason}")]
    Fetch { path: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Probe timed out after {0} seconds")]
    Timeout(f64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExporterError>;
