use anyhow::{Context, Result};
use tokio::signal;

/// Resolve once the process is asked to stop (Ctrl+C or SIGTERM).
///
/// # Errors
/// Returns an error if a signal handler cannot be installed.
pub async fn wait_for_shutdown() -> Result<()> {
    let signal = tokio::select! {
        result = interrupt() => result?,
        result = terminate() => result?,
    };

    tracing::info!(signal, "Shutdown signal received, draining connections");
    Ok(())
}

async fn interrupt() -> Result<&'static str> {
    signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl+C")?;
    Ok("SIGINT")
}

#[cfg(unix)]
async fn terminate() -> Result<&'static str> {
    signal::unix::signal(signal::unix::SignalKind::terminate())
        .context("failed to install SIGTERM handler")?
        .recv()
        .await;
    Ok("SIGTERM")
}

#[cfg(not(unix))]
async fn terminate() -> Result<&'static str> {
    std::future::pending().await
}
