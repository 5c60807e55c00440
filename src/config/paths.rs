//! Application paths resolved via the `dirs` crate.
//!
//! Layout on the target (Linux SBC):
//!
//!   ~/.config/quip/settings.toml      — settings
//!   ~/.local/share/quip/models/       — GGML Whisper models
//!   ~/.local/share/quip/events.log    — append-only event log

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Directory for downloaded GGML model files.
    pub models_dir: PathBuf,
    /// Full path to the append-only `events.log`.
    pub events_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "quip";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path (should be extremely rare in practice).
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let settings_file = config_dir.join("settings.toml");
        let models_dir = data_dir.join("models");
        let events_file = data_dir.join("events.log");

        Self {
            config_dir,
            settings_file,
            models_dir,
            events_file,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
