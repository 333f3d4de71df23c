use crate::cli::Cli;
use anyhow::{Context, Result};
use relish_browser::{Session, SessionOptions};
use relish_core::{Credentials, OrderStatus};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

const LOGIN_URL: &str = "https://relish.ezcater.com/schedule";

const EMAIL_FIELD: &str = "#identity_email";
const EMAIL_SUBMIT: &str = "[name='commit']";
const PASSWORD_FIELD: &str = "#password";
const PASSWORD_SUBMIT: &str = "[name='action']";
const STATUS_LABEL: &str = ".schedule-card-label";

/// How a monitoring run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The order arrived.
    Arrived,
    /// Single-shot check found the order not yet arrived.
    NotArrived,
    /// An interrupt signal asked us to stop.
    Cancelled,
}

/// Resolve credentials, drive the browser through login, and poll the
/// schedule page until the order arrives, the operator cancels, or (in
/// single-shot mode) one check completes.
pub async fn run(cli: &Cli) -> Result<Outcome> {
    let credentials = Credentials::resolve()?;

    let options = SessionOptions {
        headless: cli.headless,
        extensions: cli.extensions,
        page_timeout: Duration::from_secs(cli.page_timeout),
        ..SessionOptions::default()
    };
    let session = Session::launch(&options)
        .await
        .context("failed to open browser session")?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received interrupt signal");
            let _ = shutdown_tx.send(true);
        }
    });

    let mut notifier = Notifier::new(session, credentials, cli);
    let outcome = notifier.watch(shutdown_rx).await;
    notifier.close().await;
    outcome
}

struct Notifier {
    session: Session,
    credentials: Credentials,
    login_url: String,
    interval: Duration,
    once: bool,
}

impl Notifier {
    fn new(session: Session, credentials: Credentials, cli: &Cli) -> Self {
        Self {
            session,
            credentials,
            login_url: LOGIN_URL.to_string(),
            interval: Duration::from_secs(cli.check_interval),
            once: cli.once,
        }
    }

    /// Authenticate, then poll for the order status.
    async fn watch(&mut self, mut shutdown: watch::Receiver<bool>) -> Result<Outcome> {
        self.login().await.context("failed to login")?;

        loop {
            if *shutdown.borrow() {
                return Ok(Outcome::Cancelled);
            }

            match self.check_order_status().await {
                // Transient page states are expected; check again next tick.
                Err(e) => warn!(error = %e, "failed to check order status"),
                Ok(status) => {
                    info!(%status, "notifier reports status");
                    if status == OrderStatus::Arrived {
                        return Ok(Outcome::Arrived);
                    }
                }
            }

            if self.once {
                return Ok(Outcome::NotArrived);
            }

            info!(interval_seconds = self.interval.as_secs(), "checking again");
            if wait_or_cancel(self.interval, &mut shutdown).await {
                return Ok(Outcome::Cancelled);
            }

            if let Err(e) = self.session.reload().await {
                warn!(error = %e, "failed to reload page");
            }
        }
    }

    /// Navigate to the login page and submit the two-step login form.
    /// Any failure here is fatal; authentication is not retried.
    async fn login(&self) -> relish_browser::Result<()> {
        info!("logging in");

        self.session.goto(&self.login_url).await?;
        self.session
            .fill_and_submit(EMAIL_FIELD, EMAIL_SUBMIT, &self.credentials.username)
            .await?;
        self.session
            .fill_and_submit(PASSWORD_FIELD, PASSWORD_SUBMIT, &self.credentials.password)
            .await?;

        Ok(())
    }

    async fn check_order_status(&self) -> relish_browser::Result<OrderStatus> {
        debug!("checking order status");

        let text = self.session.element_text(STATUS_LABEL).await?;
        let status = OrderStatus::from_label(text.trim());
        if status == OrderStatus::Unknown {
            warn!(label = text.trim(), "unknown order status");
        }

        Ok(status)
    }

    async fn close(self) {
        self.session.close().await;
    }
}

/// Sleep for the poll interval unless cancellation arrives first.
/// Returns true if the wait was cancelled.
async fn wait_or_cancel(interval: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    tokio::select! {
        _ = shutdown.changed() => true,
        _ = tokio::time::sleep(interval) => false,
    }
}

/// Run the operator-supplied arrival command through the host shell.
/// A failing command is logged and otherwise ignored; it never changes
/// the outcome of having detected arrival.
pub async fn run_arrival_command(command: &str) {
    debug!(command, "running post-arrival command");

    match shell_command(command).status().await {
        Ok(status) if status.success() => {}
        Ok(status) => error!(code = ?status.code(), "post-arrival command failed"),
        Err(e) => error!(error = %e, "failed to run post-arrival command"),
    }
}

fn shell_command(command: &str) -> tokio::process::Command {
    #[cfg(unix)]
    {
        let mut cmd = tokio::process::Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    }

    #[cfg(windows)]
    {
        let mut cmd = tokio::process::Command::new("cmd");
        cmd.args(["/C", command]);
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_wait_completes_without_cancellation() {
        let (_tx, mut rx) = watch::channel(false);

        let cancelled = wait_or_cancel(Duration::from_millis(10), &mut rx).await;
        assert!(!cancelled);
    }

    #[tokio::test]
    async fn test_cancellation_short_circuits_wait() {
        let (tx, mut rx) = watch::channel(false);
        tx.send(true).unwrap();

        let start = Instant::now();
        let cancelled = wait_or_cancel(Duration::from_secs(60), &mut rx).await;

        assert!(cancelled);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_cancellation_during_wait() {
        let (tx, mut rx) = watch::channel(false);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            let _ = tx.send(true);
        });

        let start = Instant::now();
        let cancelled = wait_or_cancel(Duration::from_secs(60), &mut rx).await;

        assert!(cancelled);
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_arrival_command_failure_is_swallowed() {
        // Both a failing exit code and a missing binary are logged only.
        run_arrival_command("exit 3").await;
        run_arrival_command("/nonexistent/command-for-test").await;
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_arrival_command_runs_through_shell() {
        let dir = std::env::temp_dir().join(format!("relish-test-{}", std::process::id()));
        let marker = dir.join("arrived");
        std::fs::create_dir_all(&dir).unwrap();

        run_arrival_command(&format!("touch {}", marker.display())).await;

        assert!(marker.exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
