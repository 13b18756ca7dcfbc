use bindcraft::engine::runner::ControllerError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Controller(#[from] ControllerError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to export results: {0}")]
    Export(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
