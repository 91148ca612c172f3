//! Error types for the comoderator protocol layer.

mod browser;
mod provider;

pub use browser::*;
pub use provider::*;
