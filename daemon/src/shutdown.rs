//! Graceful shutdown on SIGINT/SIGTERM.

use std::future::Future;

use tokio::signal;
use tokio::sync::watch;
use tracing::{info, warn};

/// Latches once shutdown is requested; every [`signalled`] future resolves
/// from then on, including ones created after the fact.
///
/// [`signalled`]: ShutdownController::signalled
pub struct ShutdownController {
    stopped: watch::Sender<bool>,
}

impl ShutdownController {
    pub fn new() -> Self {
        let (stopped, _) = watch::channel(false);
        Self { stopped }
    }

    /// Resolves once shutdown has been requested or the controller is
    /// dropped.
    pub fn signalled(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.stopped.subscribe();
        async move {
            loop {
                let stopped = *rx.borrow_and_update();
                if stopped || rx.changed().await.is_err() {
                    return;
                }
            }
        }
    }

    pub fn shutdown(&self) {
        self.stopped.send_replace(true);
    }

    /// Wait for SIGINT or SIGTERM, then request shutdown.
    pub async fn wait_for_signal(&self) {
        let received = tokio::select! {
            _ = signal::ctrl_c() => "SIGINT",
            _ = terminate() => "SIGTERM",
        };
        info!(signal = received, "shutting down");
        self.shutdown();
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
async fn terminate() {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            warn!(error = %e, "SIGTERM handler unavailable; only SIGINT stops the server");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
