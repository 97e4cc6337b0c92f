use std::io;

use thiserror::Error;

/// Errors that can end a launch attempt.
///
/// An unreachable running instance is not an error: delivery falls through to
/// spawning a fresh one. Only an unusable request or a failed spawn surface.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The request carries no path to open
    #[error("request carries no paths to open")]
    EmptyRequest,

    /// The editor binary could not be started
    #[error("failed to spawn {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: io::Error,
    },
}
