#![cfg(unix)]

use order_warden::platform;
use order_warden::service::ServiceSpec;
use order_warden::signal::Termination;
use order_warden::supervisor::{Outcome, Supervisor};
use serial_test::serial;
use std::future::pending;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tokio::sync::oneshot;
use tokio::time::sleep;

struct ChildLog {
    _dir: TempDir,
    path: PathBuf,
}

impl ChildLog {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("child.log");
        Self { _dir: dir, path }
    }

    fn contents(&self) -> String {
        std::fs::read_to_string(&self.path).unwrap_or_default()
    }

    async fn wait_for(&self, needle: &str) {
        wait_for_marker(&self.path, needle).await;
    }
}

async fn wait_for_marker(path: &Path, needle: &str) {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        if std::fs::read_to_string(path)
            .map(|s| s.contains(needle))
            .unwrap_or(false)
        {
            return;
        }
        assert!(
            Instant::now() < deadline,
            "child never wrote '{needle}' to {}",
            path.display()
        );
        sleep(Duration::from_millis(50)).await;
    }
}

fn shell(script: String) -> ServiceSpec {
    ServiceSpec::new("sh").arg("-c").arg(script)
}

#[tokio::test]
async fn sigterm_is_relayed_and_the_child_is_reaped_first() {
    let log = ChildLog::new();
    let script = format!(
        "echo start >> '{log}'; trap 'echo term >> \"{log}\"; exit 0' TERM; while :; do sleep 0.1; done",
        log = log.path.display()
    );

    let supervisor = Supervisor::spawn(&shell(script), Duration::from_secs(5)).unwrap();
    let pid = supervisor.pid();

    let (trigger, on_trigger) = oneshot::channel();
    let task = tokio::spawn(supervisor.run_until(async move { on_trigger.await.unwrap() }));

    log.wait_for("start").await;
    trigger.send(Termination::Term).unwrap();

    let outcome = task.await.unwrap().unwrap();
    match outcome {
        Outcome::ShutdownComplete { cause, status } => {
            assert_eq!(cause, Termination::Term);
            assert_eq!(status.code(), Some(0));
        }
        other => panic!("expected graceful shutdown, got {other:?}"),
    }

    // run_until returned, so the child must already be gone
    assert!(log.contents().contains("term"));
    assert!(!platform::process_alive(pid));
}

#[tokio::test]
async fn a_child_that_ignores_sigterm_is_killed_after_the_grace_period() {
    let log = ChildLog::new();
    let script = format!(
        "echo start >> '{log}'; trap '' TERM; while :; do sleep 0.1; done",
        log = log.path.display()
    );

    let grace = Duration::from_millis(300);
    let supervisor = Supervisor::spawn(&shell(script), grace).unwrap();
    let pid = supervisor.pid();

    let (trigger, on_trigger) = oneshot::channel();
    let task = tokio::spawn(supervisor.run_until(async move { on_trigger.await.unwrap() }));

    log.wait_for("start").await;
    let requested_at = Instant::now();
    trigger.send(Termination::Interrupt).unwrap();

    let outcome = task.await.unwrap().unwrap();
    match outcome {
        Outcome::ShutdownComplete { cause, status } => {
            assert_eq!(cause, Termination::Interrupt);
            // killed, not exited
            assert_eq!(status.code(), None);
        }
        other => panic!("expected forced shutdown, got {other:?}"),
    }

    assert!(requested_at.elapsed() >= grace);
    assert!(!platform::process_alive(pid));
}

#[tokio::test]
async fn the_child_sees_the_injected_environment() {
    let log = ChildLog::new();
    let script = format!("echo \"addr=$IP\" >> '{}'", log.path.display());
    let spec = shell(script).env("IP", "10.1.2.3");

    let supervisor = Supervisor::spawn(&spec, Duration::from_secs(5)).unwrap();
    let outcome = supervisor.run_until(pending()).await.unwrap();

    assert!(matches!(outcome, Outcome::ChildExited(status) if status.success()));
    assert!(log.contents().contains("addr=10.1.2.3"));
}

#[test]
#[serial]
fn building_a_spec_leaves_the_supervisor_environment_untouched() {
    let before = std::env::var("IP");
    let spec = ServiceSpec::order_service("10.0.0.9");

    assert_eq!(spec.env.get("IP").map(String::as_str), Some("10.0.0.9"));
    assert_eq!(std::env::var("IP"), before);
}
