//! Chrome DevTools Protocol (CDP) client implementation.
//!
//! A pure Rust CDP client: one WebSocket connection to the browser endpoint,
//! JSON-RPC requests matched to responses by ID, and flattened page sessions
//! multiplexed over the same socket.
//!
//! ```rust,ignore
//! let client = CdpClient::connect("http://127.0.0.1:9222").await?;
//! let page = client.open_page().await?;
//! page.navigate("https://example.com").await?;
//! ```

mod client;
mod error;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::{IdleTracker, PageSession, NETWORK_IDLE_WINDOW};
