//! Termination signal bridging.
//!
//! SIGTERM and SIGINT are bridged to a single resolved future so that the
//! shutdown sequence is an ordinary function call that happens at most once.

use std::io;
use tokio::signal::unix::{signal, SignalKind};

/// Which signal asked the supervisor to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Term,
    Interrupt,
}

impl Termination {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Term => "SIGTERM",
            Self::Interrupt => "SIGINT",
        }
    }
}

/// Resolves when the first SIGTERM or SIGINT arrives.
///
/// The handlers stay installed for the rest of the process lifetime, so
/// repeated signals while shutdown is already in progress are absorbed
/// instead of killing the supervisor mid-reap.
pub async fn shutdown() -> io::Result<Termination> {
    let mut term = signal(SignalKind::terminate())?;
    let mut interrupt = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = term.recv() => Ok(Termination::Term),
        _ = interrupt.recv() => Ok(Termination::Interrupt),
    }
}
