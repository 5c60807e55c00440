//! Configuration module for the quip appliance.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for each subsystem,
//! `AppPaths` for platform data directories, and TOML persistence via
//! `AppConfig::load` / `AppConfig::save`.
//!
//! The completion-service credential is deliberately **not** part of the
//! config file — it is read from the `OPENAI_API_KEY` environment variable at
//! startup.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    AppConfig, AudioConfig, CompletionConfig, DisplayConfig, SpeechConfig, SttConfig,
};
