//! [`BrowserSession`] over a CDP page.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::process::Child;
use tracing::{debug, info, warn};

use comoderator_protocols::{BrowserError, BrowserSession};

use crate::cdp::{CdpClient, PageSession};

/// Grace period for the process to exit after `Browser.close`.
const EXIT_GRACE: Duration = Duration::from_secs(5);

/// A launched Chrome process with one attached page.
pub struct ChromeSession {
    client: CdpClient,
    page: PageSession,
    page_open: AtomicBool,
    browser_open: AtomicBool,
    process: Mutex<Option<Child>>,
}

impl ChromeSession {
    pub(crate) fn new(client: CdpClient, page: PageSession, process: Child) -> Self {
        Self {
            client,
            page,
            page_open: AtomicBool::new(true),
            browser_open: AtomicBool::new(true),
            process: Mutex::new(Some(process)),
        }
    }

    fn page(&self) -> Result<&PageSession, BrowserError> {
        if self.page_open.load(Ordering::SeqCst)
            && self.browser_open.load(Ordering::SeqCst)
            && self.client.is_connected()
        {
            Ok(&self.page)
        } else {
            Err(BrowserError::NotConnected)
        }
    }
}

#[async_trait]
impl BrowserSession for ChromeSession {
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), BrowserError> {
        let page = self.page()?;
        match tokio::time::timeout(timeout, page.navigate(url)).await {
            Ok(result) => result.map(|_| ()).map_err(Into::into),
            Err(_) => Err(BrowserError::NavigationTimeout {
                url: url.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            }),
        }
    }

    async fn query(&self, selector: &str) -> Result<bool, BrowserError> {
        Ok(self.page()?.query_selector(selector).await?.is_some())
    }

    async fn type_into(&self, selector: &str, text: &str) -> Result<(), BrowserError> {
        Ok(self.page()?.fill(selector, text).await?)
    }

    async fn click(&self, selector: &str) -> Result<(), BrowserError> {
        Ok(self.page()?.click_selector(selector).await?)
    }

    async fn press_enter(&self) -> Result<(), BrowserError> {
        Ok(self.page()?.press_enter().await?)
    }

    async fn evaluate(&self, function: &str, args: Vec<Value>) -> Result<Value, BrowserError> {
        Ok(self.page()?.evaluate_function(function, &args).await?)
    }

    async fn close_page(&self) -> Result<(), BrowserError> {
        if !self.page_open.swap(false, Ordering::SeqCst) {
            return Ok(());
        }
        if !self.browser_open.load(Ordering::SeqCst) || !self.client.is_connected() {
            return Ok(());
        }

        self.client.close_target(self.page.target_id()).await?;
        debug!("Closed page {}", self.page.target_id());
        Ok(())
    }

    async fn close_browser(&self) -> Result<(), BrowserError> {
        if !self.browser_open.swap(false, Ordering::SeqCst) {
            return Ok(());
        }
        self.page_open.store(false, Ordering::SeqCst);

        if self.client.is_connected() {
            if let Err(e) = self.client.close_browser().await {
                warn!("Browser.close failed: {}", e);
            }
        }

        let child = self.process.lock().take();
        if let Some(mut child) = child {
            match tokio::time::timeout(EXIT_GRACE, child.wait()).await {
                Ok(Ok(status)) => debug!("Chrome exited: {}", status),
                Ok(Err(e)) => warn!("Failed to wait for Chrome: {}", e),
                Err(_) => {
                    warn!("Chrome did not exit in time, killing");
                    let _ = child.kill().await;
                }
            }
        }

        info!("Browser closed");
        Ok(())
    }
}
