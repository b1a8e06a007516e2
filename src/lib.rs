//! order-warden
//!
//! Container entrypoint supervisor for the mutual-TLS order service: resolves
//! the host address, launches the HTTPS server as the single child process,
//! relays termination signals, and reaps the child before exiting.

pub mod config;
pub mod error;
pub mod logging;
pub mod netinfo;
pub mod platform;
pub mod service;
pub mod signal;
pub mod supervisor;

// Re-export commonly used types for convenience
pub use error::SupervisorError;
pub use service::ServiceSpec;
pub use signal::Termination;
pub use supervisor::{Outcome, Supervisor};
