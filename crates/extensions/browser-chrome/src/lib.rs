//! # Comoderator Chrome backend
//!
//! [`BrowserLauncher`](comoderator_protocols::BrowserLauncher) and
//! [`BrowserSession`](comoderator_protocols::BrowserSession) over the Chrome
//! DevTools Protocol.
//!
//! [`ChromeLauncher`] starts a dedicated Chrome process with remote debugging
//! enabled, connects over WebSocket and attaches to one page.
//! [`ChromeSession`] drives that page.

pub mod cdp;
mod launcher;
mod session;

pub use launcher::{chrome_args, default_profile_dir, find_chrome, ChromeLauncher};
pub use session::ChromeSession;
