//! Error taxonomy for the supervisor.
//!
//! Only a spawn failure is fatal. Address resolution failure degrades to an
//! empty value, and a missing child during shutdown is treated as a shutdown
//! that already happened.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("could not determine a host address: {0}")]
    HostResolution(String),
    #[error("server executable not found: '{0}' is not in PATH")]
    ServerNotFound(String),
    #[error("failed to start server process: {0}")]
    Spawn(#[source] io::Error),
    #[error("server process already exited")]
    NoSuchProcess,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl SupervisorError {
    /// Whether startup must abort on this error. Everything except a failed
    /// spawn is survivable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ServerNotFound(_) | Self::Spawn(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_errors_are_fatal() {
        let err = SupervisorError::ServerNotFound("uvicorn".to_string());
        assert!(err.is_fatal());

        let err = SupervisorError::Spawn(io::Error::other("exec format error"));
        assert!(err.is_fatal());
    }

    #[test]
    fn degradable_errors_are_not_fatal() {
        let err = SupervisorError::HostResolution("no interfaces".to_string());
        assert!(!err.is_fatal());

        assert!(!SupervisorError::NoSuchProcess.is_fatal());
    }
}
