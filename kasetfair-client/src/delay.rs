use std::time::Duration;

/// Waits for `duration` on whichever timer the target has. Zero returns at once.
pub async fn pause(duration: Duration) {
    if duration.is_zero() {
        return;
    }
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
}
