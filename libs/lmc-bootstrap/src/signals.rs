//! Process termination signals.

use std::fmt;

use anyhow::{Context, Result};
use tokio::signal;
use tokio_util::sync::CancellationToken;

/// Signal that ended the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    CtrlC,
    #[cfg(unix)]
    Sigterm,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CtrlC => f.write_str("ctrl_c"),
            #[cfg(unix)]
            Self::Sigterm => f.write_str("sigterm"),
        }
    }
}

/// Wait for the first of Ctrl+C or SIGTERM.
///
/// # Errors
/// Returns an error if a signal handler cannot be installed.
pub async fn wait_for_shutdown() -> Result<ShutdownSignal> {
    let received = tokio::select! {
        result = ctrl_c() => result?,
        result = sigterm() => result?,
    };
    tracing::info!(signal = %received, "Shutdown signal received, initiating graceful shutdown");
    Ok(received)
}

/// Token cancelled on the first termination signal.
///
/// Must be called from within a tokio runtime.
#[must_use]
pub fn shutdown_token() -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = wait_for_shutdown().await {
            tracing::warn!(error = %e, "signal handlers unavailable, waiting on ctrl_c only");
            if let Err(e) = signal::ctrl_c().await {
                tracing::error!(error = %e, "ctrl_c fallback failed");
            }
        }
        trigger.cancel();
    });
    cancel
}

async fn ctrl_c() -> Result<ShutdownSignal> {
    signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl+C")?;
    Ok(ShutdownSignal::CtrlC)
}

#[cfg(unix)]
async fn sigterm() -> Result<ShutdownSignal> {
    use signal::unix::{SignalKind, signal as unix_signal};

    unix_signal(SignalKind::terminate())
        .context("failed to install SIGTERM handler")?
        .recv()
        .await;
    Ok(ShutdownSignal::Sigterm)
}

#[cfg(not(unix))]
async fn sigterm() -> Result<ShutdownSignal> {
    std::future::pending().await
}
