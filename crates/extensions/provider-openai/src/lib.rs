//! OpenAI completion provider for comoderator.

mod api;
mod provider;

pub use provider::{OpenAIProvider, DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT};
