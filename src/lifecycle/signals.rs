//! OS signal handling.

/// Wait for a termination signal from the operating system.
#[cfg(unix)]
pub async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate =
        signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => tracing::info!("Ctrl+C received"),
        _ = terminate.recv() => tracing::info!("SIGTERM received"),
    }
}

/// Wait for a termination signal from the operating system.
#[cfg(not(unix))]
pub async fn wait_for_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    tracing::info!("Ctrl+C received");
}
