//! OS process primitives.

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::{prepare_command, process_alive, send_sigkill, send_sigterm};

#[cfg(not(unix))]
compile_error!("order-warden supervises a Unix container entrypoint; non-Unix targets are unsupported");
