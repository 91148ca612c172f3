//! # Comoderator Protocols
//!
//! Data model and capability traits shared by the comoderator crates.
//! Contains only definitions - no browser or network implementations.
//!
//! ## Core Traits
//!
//! - [`BrowserLauncher`] / [`BrowserSession`] - automated browser with a single page
//! - [`CompletionProvider`] - external language-model completion capability
//!
//! ## Data Model
//!
//! - [`ChatEntry`], [`Answer`], [`SessionHandle`], [`EngineState`]
//! - [`EngineEvent`] - the fixed set of events published to a host
//! - [`SelectorCatalog`] - ordered selector candidates per UI affordance

pub mod browser;
pub mod error;
pub mod provider;
pub mod selector;
pub mod types;

pub use browser::{BrowserLauncher, BrowserSession, LaunchOptions};
pub use error::{BrowserError, ProviderError};
pub use provider::{CompletionProvider, CompletionRequest};
pub use selector::{resolve, SelectorCatalog};
pub use types::*;
