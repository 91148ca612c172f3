//! Navigation and network quiescence for CDP page session.

use std::time::Duration;

use serde_json::json;
use tokio::time::Instant;
use tracing::debug;

use crate::cdp::error::CdpError;

use super::core::PageSession;

/// Resource count must stay unchanged this long to count as idle.
pub const NETWORK_IDLE_WINDOW: Duration = Duration::from_millis(500);

const POLL_INTERVAL: Duration = Duration::from_millis(100);

const LOAD_STATE_SCRIPT: &str =
    "[document.readyState, performance.getEntriesByType('resource').length]";

/// Tracks page load samples until the network has been quiet for a window.
#[derive(Debug)]
pub struct IdleTracker {
    window: Duration,
    last_count: Option<u64>,
    stable_since: Instant,
}

impl IdleTracker {
    pub fn new(window: Duration, now: Instant) -> Self {
        Self {
            window,
            last_count: None,
            stable_since: now,
        }
    }

    /// Record one sample. Returns true once the document is complete and the
    /// resource count has not changed for the whole window.
    pub fn observe(&mut self, ready_state: &str, resource_count: u64, now: Instant) -> bool {
        if self.last_count != Some(resource_count) {
            self.last_count = Some(resource_count);
            self.stable_since = now;
        }
        ready_state == "complete" && now.duration_since(self.stable_since) >= self.window
    }
}

impl PageSession {
    /// Navigate to URL and wait for network quiescence.
    ///
    /// Unbounded; callers apply their own deadline.
    pub async fn navigate(&self, url: &str) -> Result<String, CdpError> {
        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await?;

        if let Some(error) = result.get("errorText").and_then(|e| e.as_str()) {
            return Err(CdpError::NavigationFailed(error.to_string()));
        }

        let frame_id = result["frameId"].as_str().unwrap_or("main").to_string();

        self.wait_for_network_idle().await?;

        debug!("Navigated to {}", url);
        Ok(frame_id)
    }

    /// Poll until the document is complete and resource loading has settled.
    pub async fn wait_for_network_idle(&self) -> Result<(), CdpError> {
        let mut tracker = IdleTracker::new(NETWORK_IDLE_WINDOW, Instant::now());

        loop {
            let sample = self.evaluate(LOAD_STATE_SCRIPT).await?;
            let ready_state = sample[0].as_str().unwrap_or("loading");
            let count = sample[1].as_u64().unwrap_or(0);

            if tracker.observe(ready_state, count, Instant::now()) {
                return Ok(());
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}
