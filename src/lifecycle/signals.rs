//! OS signal handling.

/// Wait for a termination signal (Ctrl+C).
pub async fn terminate() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
}
