//! CLI error types.

use tinct_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("no output from the '{language}' renderer")]
    RenderUnavailable { language: String },

    #[error("{0}")]
    Validation(String),
}
