//! Chrome process launch.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use comoderator_protocols::{BrowserError, BrowserLauncher, BrowserSession, LaunchOptions};

use crate::cdp::CdpClient;
use crate::session::ChromeSession;

const STARTUP_POLL: Duration = Duration::from_millis(200);

/// Find a Chrome-compatible executable in well-known locations.
pub fn find_chrome() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    let paths: &[&str] = &[
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        "/Applications/Chromium.app/Contents/MacOS/Chromium",
        "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
    ];

    #[cfg(target_os = "linux")]
    let paths: &[&str] = &[
        "/usr/bin/google-chrome",
        "/usr/bin/google-chrome-stable",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
        "/snap/bin/chromium",
    ];

    #[cfg(target_os = "windows")]
    let paths: &[&str] = &[
        r"C:\Program Files\Google\Chrome\Application\chrome.exe",
        r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
    ];

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    let paths: &[&str] = &[];

    paths.iter().map(PathBuf::from).find(|p| p.exists())
}

/// Profile directory used when none is configured.
pub fn default_profile_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".comoderator")
        .join("browser-profile")
}

/// Command line for a dedicated Chrome instance.
pub fn chrome_args(options: &LaunchOptions, profile_dir: &Path) -> Vec<String> {
    let mut args = vec![
        format!("--remote-debugging-port={}", options.debug_port),
        format!("--user-data-dir={}", profile_dir.display()),
        "--no-first-run".to_string(),
        "--no-default-browser-check".to_string(),
        "--disable-background-networking".to_string(),
        "--disable-sync".to_string(),
        "--disable-translate".to_string(),
        "--metrics-recording-only".to_string(),
        format!(
            "--window-size={},{}",
            options.viewport_width, options.viewport_height
        ),
    ];

    if options.headless {
        args.push("--headless=new".to_string());
    }

    for extra in &options.extra_args {
        if !args.contains(extra) {
            args.push(extra.clone());
        }
    }

    args
}

fn endpoint(port: u16) -> String {
    format!("http://127.0.0.1:{}", port)
}

async fn is_chrome_running(endpoint: &str) -> bool {
    reqwest::get(&format!("{}/json/version", endpoint))
        .await
        .is_ok()
}

/// Launches a dedicated Chrome process per session.
#[derive(Debug, Default, Clone)]
pub struct ChromeLauncher;

impl ChromeLauncher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BrowserLauncher for ChromeLauncher {
    async fn launch(&self, options: &LaunchOptions) -> Result<Arc<dyn BrowserSession>, BrowserError> {
        let endpoint = endpoint(options.debug_port);

        // Attaching to a browser we did not start would leak its lifecycle.
        if is_chrome_running(&endpoint).await {
            return Err(BrowserError::LaunchFailed(format!(
                "debug port {} is already in use",
                options.debug_port
            )));
        }

        let chrome_path = options
            .executable_path
            .clone()
            .or_else(find_chrome)
            .ok_or_else(|| BrowserError::LaunchFailed("Chrome not found".to_string()))?;

        let profile_dir = options
            .profile_dir
            .clone()
            .unwrap_or_else(default_profile_dir);
        if let Err(e) = std::fs::create_dir_all(&profile_dir) {
            warn!("Failed to create profile directory: {}", e);
        }

        info!(
            "Launching {} with profile at {}",
            chrome_path.display(),
            profile_dir.display()
        );

        let mut child = Command::new(&chrome_path)
            .args(chrome_args(options, &profile_dir))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(format!("{}: {}", chrome_path.display(), e)))?;

        debug!("Chrome launched with PID: {:?}", child.id());

        let deadline = Instant::now() + options.launch_timeout;
        loop {
            if is_chrome_running(&endpoint).await {
                break;
            }
            if let Ok(Some(status)) = child.try_wait() {
                return Err(BrowserError::LaunchFailed(format!(
                    "Chrome exited during startup: {}",
                    status
                )));
            }
            if Instant::now() >= deadline {
                let _ = child.kill().await;
                return Err(BrowserError::LaunchFailed(format!(
                    "Chrome failed to start within {} ms",
                    options.launch_timeout.as_millis()
                )));
            }
            tokio::time::sleep(STARTUP_POLL).await;
        }

        let client = CdpClient::connect(&endpoint)
            .await
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;
        let page = client
            .open_page()
            .await
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;
        page.set_viewport(options.viewport_width, options.viewport_height)
            .await
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        info!("Connected to Chrome at {}", endpoint);
        Ok(Arc::new(ChromeSession::new(client, page, child)))
    }
}
