//! Child process lifecycle.
//!
//! The supervisor owns exactly one child, the HTTPS order server, for the
//! lifetime of the container. It spawns the child with an explicit
//! environment, waits for it to stop on its own, and on a termination
//! request relays SIGTERM, reaps the child, and only then lets the
//! supervisor process exit.

use crate::error::SupervisorError;
use crate::platform;
use crate::service::ServiceSpec;
use crate::signal::Termination;
use nix::errno::Errno;
use std::future::Future;
use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::{Child, Command};
use tracing::{debug, warn};

/// How a supervised run ended.
#[derive(Debug)]
pub enum Outcome {
    /// The server stopped on its own before any signal arrived.
    ChildExited(ExitStatus),
    /// A termination signal was relayed and the child has been reaped.
    ShutdownComplete {
        cause: Termination,
        status: ExitStatus,
    },
}

#[derive(Debug)]
pub struct Supervisor {
    child: Child,
    pid: u32,
    grace: Duration,
}

impl Supervisor {
    /// Spawn the service as the single supervised child.
    ///
    /// The child runs in its own process group with stdin closed; stdout and
    /// stderr flow through to the container log stream.
    pub fn spawn(spec: &ServiceSpec, grace: Duration) -> Result<Self, SupervisorError> {
        let program = which::which(&spec.program)
            .map_err(|_| SupervisorError::ServerNotFound(spec.program.clone()))?;

        let mut cmd = Command::new(program);
        cmd.args(&spec.args).envs(&spec.env).stdin(Stdio::null());
        platform::prepare_command(&mut cmd);

        let child = cmd.spawn().map_err(SupervisorError::Spawn)?;
        let pid = child
            .id()
            .ok_or_else(|| SupervisorError::Io(io::Error::other("spawned server has no pid")))?;
        debug!(pid, program = %spec.program, "server process started");

        Ok(Self { child, pid, grace })
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Block until the child exits on its own or `shutdown` resolves.
    ///
    /// Consuming the supervisor here is what makes the shutdown sequence
    /// single-shot: once the child has been waited on there is no handle
    /// left to signal or reap a second time.
    pub async fn run_until<F>(mut self, shutdown: F) -> Result<Outcome, SupervisorError>
    where
        F: Future<Output = Termination>,
    {
        tokio::select! {
            status = self.child.wait() => {
                let status = status?;
                debug!(%status, "server exited on its own");
                Ok(Outcome::ChildExited(status))
            }
            cause = shutdown => {
                let status = self.terminate(cause).await?;
                Ok(Outcome::ShutdownComplete { cause, status })
            }
        }
    }

    /// Relay the termination request, reap the child, and report its status.
    async fn terminate(mut self, cause: Termination) -> Result<ExitStatus, SupervisorError> {
        println!(
            "shutting down: relaying {} to the server (pid {})",
            cause.as_str(),
            self.pid
        );

        match self.forward_term() {
            Ok(()) => {}
            // Idempotent shutdown: a child that beat us to the exit still
            // gets reaped below.
            Err(SupervisorError::NoSuchProcess) => {
                debug!(pid = self.pid, "server already exited, nothing to relay");
            }
            Err(err) => return Err(err),
        }

        let status = match tokio::time::timeout(self.grace, self.child.wait()).await {
            Ok(status) => status?,
            Err(_) => {
                warn!(
                    pid = self.pid,
                    grace_secs = self.grace.as_secs_f64(),
                    "server ignored SIGTERM, escalating to SIGKILL"
                );
                let _ = platform::send_sigkill(self.pid);
                self.child.wait().await?
            }
        };
        debug!(%status, "server reaped");

        println!("server terminated");
        Ok(status)
    }

    fn forward_term(&self) -> Result<(), SupervisorError> {
        match platform::send_sigterm(self.pid) {
            Ok(()) => Ok(()),
            Err(Errno::ESRCH) => Err(SupervisorError::NoSuchProcess),
            Err(errno) => Err(SupervisorError::Io(errno.into())),
        }
    }
}
