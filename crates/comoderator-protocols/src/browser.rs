//! Browser session protocol.
//!
//! A [`BrowserSession`] owns one automated browser process and a single page.
//! The engine only talks to the meeting UI through this trait, which keeps the
//! join/monitor/post logic independent of the automation backend.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::error::BrowserError;
use crate::selector::resolve;

/// Poll period used while waiting for selectors.
pub const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Options for launching a browser.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Explicit executable. When unset the backend searches well-known paths.
    pub executable_path: Option<PathBuf>,
    pub headless: bool,
    /// Remote debugging port.
    pub debug_port: u16,
    /// Profile directory; a backend default is used when unset.
    pub profile_dir: Option<PathBuf>,
    /// Extra command line flags.
    pub extra_args: Vec<String>,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Upper bound for the process to start and accept a connection.
    pub launch_timeout: Duration,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            executable_path: None,
            headless: false,
            debug_port: 9222,
            profile_dir: None,
            extra_args: vec![
                "--use-fake-ui-for-media-stream".to_string(),
                "--use-fake-device-for-media-stream".to_string(),
                "--disable-web-security".to_string(),
            ],
            viewport_width: 1280,
            viewport_height: 720,
            launch_timeout: Duration::from_secs(15),
        }
    }
}

/// Starts automated browsers.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    /// Launch a browser process with one open page.
    ///
    /// Fails with [`BrowserError::LaunchFailed`] if the executable cannot start.
    async fn launch(&self, options: &LaunchOptions) -> Result<Arc<dyn BrowserSession>, BrowserError>;
}

/// A running browser with a single page.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Load `url` and wait for network quiescence.
    ///
    /// Fails with [`BrowserError::NavigationTimeout`] past the deadline.
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), BrowserError>;

    /// Whether `selector` currently matches an element.
    async fn query(&self, selector: &str) -> Result<bool, BrowserError>;

    /// Type `text` into the element matched by `selector`.
    async fn type_into(&self, selector: &str, text: &str) -> Result<(), BrowserError>;

    /// Click the element matched by `selector`.
    async fn click(&self, selector: &str) -> Result<(), BrowserError>;

    /// Press Enter on the focused element.
    async fn press_enter(&self) -> Result<(), BrowserError>;

    /// Run a page-side JavaScript function declaration with JSON arguments.
    async fn evaluate(&self, function: &str, args: Vec<Value>) -> Result<Value, BrowserError>;

    /// Release the page. Idempotent.
    async fn close_page(&self) -> Result<(), BrowserError>;

    /// Release the browser process. Idempotent.
    async fn close_browser(&self) -> Result<(), BrowserError>;

    /// Wait until the first candidate, in priority order, matches.
    ///
    /// Returns the candidate that matched. Query errors count as "not present"
    /// until the deadline.
    async fn wait_for_any(
        &self,
        candidates: &[String],
        timeout: Duration,
    ) -> Result<String, BrowserError> {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let found = resolve(candidates, |sel| async move {
                match self.query(sel).await {
                    Ok(present) => present,
                    Err(e) => {
                        debug!("Selector lookup '{}' failed: {}", sel, e);
                        false
                    }
                }
            })
            .await;

            if let Some(selector) = found {
                return Ok(selector.to_string());
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(BrowserError::SelectorNotFound {
                    candidates: candidates.to_vec(),
                    timeout_ms: timeout.as_millis() as u64,
                });
            }

            tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
        }
    }

    /// Release page then process. Both are attempted; the first error is returned.
    async fn close(&self) -> Result<(), BrowserError> {
        let page = self.close_page().await;
        let browser = self.close_browser().await;
        page.and(browser)
    }
}

#[cfg(test)]
#[path = "browser_tests.rs"]
mod tests;
