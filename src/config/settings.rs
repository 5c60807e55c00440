//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// DisplayConfig
// ---------------------------------------------------------------------------

/// Settings for the SSD1306 status panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// I2C character device the panel is wired to.
    pub i2c_bus: String,
    /// Mount the panel upside down (180° rotation).
    pub rotate_180: bool,
    /// Seconds each caption page stays on screen before the pager advances.
    pub caption_secs: u64,
    /// Milliseconds between status-animation frames (one dot per frame).
    pub status_millis: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            i2c_bus: "/dev/i2c-1".into(),
            rotate_180: true,
            caption_secs: 2,
            status_millis: 500,
        }
    }
}

// ---------------------------------------------------------------------------
// AudioConfig
// ---------------------------------------------------------------------------

/// Settings for microphone capture and utterance end-pointing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Input device name — `None` means the system default microphone.
    pub device: Option<String>,
    /// RMS amplitude above which a 30 ms frame counts as voice (0.0 – 1.0).
    pub vad_threshold: f32,
    /// Seconds of trailing silence that close an utterance.
    pub silence_hold_secs: f32,
    /// Hard cap on utterance length; capture stops regardless of silence.
    pub max_utterance_secs: f32,
    /// Overall deadline for one `listen` call, speech or not.
    pub listen_timeout_secs: u64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            device: None,
            vad_threshold: 0.01,
            silence_hold_secs: 1.0,
            max_utterance_secs: 15.0,
            listen_timeout_secs: 120,
        }
    }
}

// ---------------------------------------------------------------------------
// SttConfig
// ---------------------------------------------------------------------------

/// Settings for the Whisper STT engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SttConfig {
    /// GGML model file stem under the models dir (e.g. `"ggml-base.en"`).
    pub model: String,
    /// Speech language as an ISO-639-1 code, or `"auto"` for Whisper's
    /// built-in language detection.
    pub language: String,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            model: "ggml-base.en".into(),
            language: "en".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechConfig
// ---------------------------------------------------------------------------

/// Settings for speech synthesis and audio output routing.
///
/// Synthesis shells out to a CLI engine that writes WAV to stdout, piped
/// into an ALSA player fixed to a named output device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Synthesis engine binary.
    pub engine: String,
    /// Playback binary.
    pub player: String,
    /// ALSA output device handed to the player (`-D`).
    pub device: String,
    /// Speaking rate in words per minute.
    pub rate_wpm: u32,
    /// Amplitude, 0 – 200 (espeak scale; 100 = full volume).
    pub amplitude: u32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            engine: "espeak-ng".into(),
            player: "aplay".into(),
            device: "hw:Headphones,0".into(),
            rate_wpm: 150,
            amplitude: 100,
        }
    }
}

// ---------------------------------------------------------------------------
// CompletionConfig
// ---------------------------------------------------------------------------

/// Settings for the remote text-completion service.
///
/// The generation parameters are fixed per request; they exist in the config
/// only so a different persona can be dialled in without a rebuild.  The API
/// key is **not** here — it comes from the environment at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Base URL of the API endpoint (e.g. `https://api.openai.com`).
    pub base_url: String,
    /// Model identifier sent to the API.
    pub model: String,
    /// Persona hint appended after `A:` in the prompt.
    pub persona: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum completion length in tokens.
    pub max_tokens: u32,
    /// Nucleus sampling cut-off.
    pub top_p: f32,
    /// Frequency penalty.
    pub frequency_penalty: f32,
    /// Presence penalty.
    pub presence_penalty: f32,
    /// Stop sequences; generation halts at the first match.
    pub stop: Vec<String>,
    /// Maximum seconds to wait for a completion before timing out.
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".into(),
            model: "gpt-3.5-turbo-instruct".into(),
            persona: "(But add a hint of snark and sarcasm)".into(),
            temperature: 0.9,
            max_tokens: 64,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.6,
            stop: vec!["\n".into()],
            timeout_secs: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use quip::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Status panel settings.
    pub display: DisplayConfig,
    /// Microphone / end-pointing settings.
    pub audio: AudioConfig,
    /// Whisper STT settings.
    pub stt: SttConfig,
    /// Speech synthesis settings.
    pub speech: SpeechConfig,
    /// Remote completion-service settings.
    pub completion: CompletionConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-boot scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Verify that a default `AppConfig` can be serialised to TOML and
    /// deserialised back without any data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.display.i2c_bus, loaded.display.i2c_bus);
        assert_eq!(original.display.rotate_180, loaded.display.rotate_180);
        assert_eq!(original.display.caption_secs, loaded.display.caption_secs);

        assert_eq!(original.audio.device, loaded.audio.device);
        assert_eq!(original.audio.vad_threshold, loaded.audio.vad_threshold);
        assert_eq!(
            original.audio.listen_timeout_secs,
            loaded.audio.listen_timeout_secs
        );

        assert_eq!(original.stt.model, loaded.stt.model);
        assert_eq!(original.stt.language, loaded.stt.language);

        assert_eq!(original.speech.engine, loaded.speech.engine);
        assert_eq!(original.speech.device, loaded.speech.device);
        assert_eq!(original.speech.rate_wpm, loaded.speech.rate_wpm);

        assert_eq!(original.completion.base_url, loaded.completion.base_url);
        assert_eq!(original.completion.model, loaded.completion.model);
        assert_eq!(original.completion.stop, loaded.completion.stop);
        assert_eq!(
            original.completion.timeout_secs,
            loaded.completion.timeout_secs
        );
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.display.i2c_bus, default.display.i2c_bus);
        assert_eq!(config.stt.model, default.stt.model);
        assert_eq!(config.completion.model, default.completion.model);
    }

    /// Verify the generation parameters the appliance sends with every
    /// completion request.
    #[test]
    fn default_generation_parameters() {
        let cfg = AppConfig::default();

        assert!((cfg.completion.temperature - 0.9).abs() < f32::EPSILON);
        assert_eq!(cfg.completion.max_tokens, 64);
        assert!((cfg.completion.top_p - 1.0).abs() < f32::EPSILON);
        assert!((cfg.completion.frequency_penalty - 0.0).abs() < f32::EPSILON);
        assert!((cfg.completion.presence_penalty - 0.6).abs() < f32::EPSILON);
        assert_eq!(cfg.completion.stop, vec!["\n".to_string()]);
    }

    /// Verify appliance hardware defaults.
    #[test]
    fn default_hardware_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.display.i2c_bus, "/dev/i2c-1");
        assert!(cfg.display.rotate_180);
        assert_eq!(cfg.display.status_millis, 500);
        assert_eq!(cfg.speech.device, "hw:Headphones,0");
        assert_eq!(cfg.speech.rate_wpm, 150);
        assert!(cfg.audio.device.is_none());
    }

    /// Verify that modified non-default values survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.display.i2c_bus = "/dev/i2c-0".into();
        cfg.display.rotate_180 = false;
        cfg.audio.device = Some("USB PnP Sound Device".into());
        cfg.audio.listen_timeout_secs = 30;
        cfg.stt.language = "auto".into();
        cfg.speech.device = "default".into();
        cfg.completion.base_url = "http://localhost:8080".into();
        cfg.completion.persona = "(Answer briefly)".into();

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.display.i2c_bus, "/dev/i2c-0");
        assert!(!loaded.display.rotate_180);
        assert_eq!(loaded.audio.device.as_deref(), Some("USB PnP Sound Device"));
        assert_eq!(loaded.audio.listen_timeout_secs, 30);
        assert_eq!(loaded.stt.language, "auto");
        assert_eq!(loaded.speech.device, "default");
        assert_eq!(loaded.completion.base_url, "http://localhost:8080");
        assert_eq!(loaded.completion.persona, "(Answer briefly)");
    }
}
