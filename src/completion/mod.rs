//! Remote text-completion client.
//!
//! * [`CompletionClient`] — async trait the orchestrator consumes.
//! * [`ApiClient`] — production client for an OpenAI-style `/v1/completions`
//!   endpoint, with fixed generation parameters from the config.
//! * [`PromptBuilder`] — wraps an utterance in the appliance's Q/A persona
//!   prompt.
//! * [`CompletionError`] — distinct network / timeout / API-status / parse
//!   variants so failures can be spoken with a meaningful message.

pub mod client;
pub mod prompt;

pub use client::{ApiClient, CompletionClient, CompletionError};
pub use prompt::PromptBuilder;
