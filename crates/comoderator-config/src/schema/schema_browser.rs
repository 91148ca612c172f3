//! Browser launch configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use comoderator_protocols::LaunchOptions;

use crate::loader::ConfigLoader;

/// Browser configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Chrome/Chromium executable. Searched in well-known locations when unset.
    #[serde(default)]
    pub executable_path: Option<PathBuf>,

    #[serde(default)]
    pub headless: bool,

    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    /// Browser profile directory (`~` is expanded).
    #[serde(default)]
    pub profile_dir: Option<PathBuf>,

    #[serde(default = "default_extra_args")]
    pub extra_args: Vec<String>,

    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,

    #[serde(default = "default_launch_timeout")]
    pub launch_timeout_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            executable_path: None,
            headless: false,
            debug_port: default_debug_port(),
            profile_dir: None,
            extra_args: default_extra_args(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            launch_timeout_ms: default_launch_timeout(),
        }
    }
}

impl BrowserConfig {
    /// Convert to launch options, expanding `~` in paths.
    pub fn launch_options(&self) -> LaunchOptions {
        let expand = |p: &PathBuf| PathBuf::from(ConfigLoader::expand_path(&p.to_string_lossy()));
        LaunchOptions {
            executable_path: self.executable_path.as_ref().map(expand),
            headless: self.headless,
            debug_port: self.debug_port,
            profile_dir: self.profile_dir.as_ref().map(expand),
            extra_args: self.extra_args.clone(),
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
            launch_timeout: Duration::from_millis(self.launch_timeout_ms),
        }
    }
}

fn default_debug_port() -> u16 {
    9222
}

fn default_extra_args() -> Vec<String> {
    LaunchOptions::default().extra_args
}

fn default_viewport_width() -> u32 {
    1280
}

fn default_viewport_height() -> u32 {
    720
}

fn default_launch_timeout() -> u64 {
    15_000
}
