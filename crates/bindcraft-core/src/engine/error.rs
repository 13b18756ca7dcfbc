use super::config::ConfigError;
use thiserror::Error;

/// Faults a simulated run can end with.
///
/// These never cross the worker boundary as panics or crashes: the run
/// controller converts them into an `[ERROR]` log event followed by the
/// terminal event, so a subscriber is never left waiting.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid run configuration: {source}")]
    InvalidConfig {
        #[from]
        source: ConfigError,
    },

    #[error("internal simulator error: {0}")]
    Internal(String),
}
