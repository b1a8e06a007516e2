use clap::Parser;
use order_warden::config;
use order_warden::logging;
use order_warden::netinfo;
use order_warden::service::ServiceSpec;
use order_warden::signal;
use order_warden::supervisor::{Outcome, Supervisor};
use std::process::ExitCode;
use std::time::Duration;

/// Container entrypoint for the mutual-TLS order service.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Seconds to wait for the server to exit after SIGTERM before
    /// escalating to SIGKILL.
    #[arg(long, default_value_t = config::SHUTDOWN_GRACE_DEFAULT.as_secs())]
    grace_secs: u64,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logging::init(cli.log_level.as_deref()) {
        eprintln!("failed to initialize logging: {err}");
        return ExitCode::from(1);
    }

    match run(&cli).await {
        Ok(()) => ExitCode::from(0),
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let service_name = std::env::var(config::SERVICE_NAME_ENV).unwrap_or_default();
    println!("starting service: {service_name}");

    // Advisory only: the server still starts when no address can be found.
    let host_ip = match netinfo::resolve_host_ip() {
        Ok(ip) => ip.to_string(),
        Err(err) => {
            tracing::warn!(%err, "host address resolution failed");
            String::new()
        }
    };
    println!("host address: {host_ip}");

    let spec = ServiceSpec::order_service(&host_ip);
    let supervisor = Supervisor::spawn(&spec, Duration::from_secs(cli.grace_secs))?;

    let shutdown = async {
        match signal::shutdown().await {
            Ok(cause) => cause,
            Err(err) => {
                // Without handlers there is no graceful path; keep waiting on
                // the child alone.
                tracing::error!(%err, "failed to install signal handlers");
                std::future::pending().await
            }
        }
    };

    match supervisor.run_until(shutdown).await? {
        // Best-effort forwarding contract: the supervisor's own exit code
        // stays 0 whether the server stopped by request or on its own.
        Outcome::ChildExited(status) => {
            tracing::info!(%status, "server exited on its own");
        }
        Outcome::ShutdownComplete { cause, status } => {
            tracing::debug!(signal = cause.as_str(), %status, "graceful shutdown complete");
        }
    }

    Ok(())
}
