//! `Synthesizer` trait and the espeak-ng CLI implementation.
//!
//! Synthesis is two processes in a pipe: the engine renders WAV to stdout
//! and the player pushes it to a named ALSA device.  The call blocks until
//! playback ends, which is exactly the contract the serialization layer in
//! [`crate::speech::Speaker`] builds on.

use std::process::{Command, Stdio};

use thiserror::Error;

use crate::config::SpeechConfig;

// ---------------------------------------------------------------------------
// SpeakError
// ---------------------------------------------------------------------------

/// Errors from the synthesis/playback path.
#[derive(Debug, Error)]
pub enum SpeakError {
    /// A binary could not be spawned (missing from PATH, permissions…).
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A process exited with a failure status.
    #[error("{program} exited with {status}")]
    Exit {
        program: String,
        status: std::process::ExitStatus,
    },

    /// The engine's stdout pipe could not be connected to the player.
    #[error("synthesis engine produced no output pipe")]
    Pipe,

    /// I/O failure while waiting on a child process.
    #[error("synthesis I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking synthesis task died (panic or runtime shutdown).
    #[error("synthesis task failed: {0}")]
    Join(String),
}

// ---------------------------------------------------------------------------
// Synthesizer trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for speech synthesis.
///
/// `speak` blocks the calling thread for the duration of playback.
/// Concurrent calls are **not** safe to overlap audibly — callers must
/// serialize, which [`crate::speech::Speaker`] does.
pub trait Synthesizer: Send + Sync {
    fn speak(&self, text: &str) -> Result<(), SpeakError>;
}

// ---------------------------------------------------------------------------
// EspeakSynthesizer
// ---------------------------------------------------------------------------

/// Shells out to `espeak-ng --stdout | aplay -D <device>`.
///
/// The engine, player, ALSA device, rate and amplitude all come from
/// [`SpeechConfig`]; nothing is hardcoded.
pub struct EspeakSynthesizer {
    config: SpeechConfig,
}

impl EspeakSynthesizer {
    pub fn from_config(config: &SpeechConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl Synthesizer for EspeakSynthesizer {
    fn speak(&self, text: &str) -> Result<(), SpeakError> {
        let cfg = &self.config;

        let mut engine = Command::new(&cfg.engine)
            .arg("--stdout")
            .args(["-s", &cfg.rate_wpm.to_string()])
            .args(["-a", &cfg.amplitude.to_string()])
            .arg(text)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SpeakError::Launch {
                program: cfg.engine.clone(),
                source: e,
            })?;

        let wav = engine.stdout.take().ok_or(SpeakError::Pipe)?;

        let player_status = Command::new(&cfg.player)
            .arg("-q")
            .args(["-D", &cfg.device])
            .stdin(Stdio::from(wav))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| SpeakError::Launch {
                program: cfg.player.clone(),
                source: e,
            })?;

        let engine_status = engine.wait()?;

        if !engine_status.success() {
            return Err(SpeakError::Exit {
                program: cfg.engine.clone(),
                status: engine_status,
            });
        }
        if !player_status.success() {
            return Err(SpeakError::Exit {
                program: cfg.player.clone(),
                status: player_status,
            });
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MockSynthesizer  (test-only)
// ---------------------------------------------------------------------------

/// Test double that records spoken lines and tracks call overlap.
///
/// Each `speak` call sleeps for a configurable delay so tests can prove the
/// serialization guarantee: `max_in_flight` must never exceed 1 when all
/// calls go through a [`crate::speech::Speaker`].
#[cfg(test)]
pub struct MockSynthesizer {
    spoken: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
    in_flight: std::sync::Arc<std::sync::atomic::AtomicUsize>,
    max_in_flight: std::sync::Arc<std::sync::atomic::AtomicUsize>,
    delay: std::time::Duration,
    fail: bool,
}

#[cfg(test)]
impl MockSynthesizer {
    pub fn new(delay: std::time::Duration) -> Self {
        Self {
            spoken: Default::default(),
            in_flight: Default::default(),
            max_in_flight: Default::default(),
            delay,
            fail: false,
        }
    }

    /// A mock whose every call fails after recording the text.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(std::time::Duration::ZERO)
        }
    }

    pub fn spoken(&self) -> std::sync::Arc<std::sync::Mutex<Vec<String>>> {
        std::sync::Arc::clone(&self.spoken)
    }

    pub fn max_in_flight(&self) -> std::sync::Arc<std::sync::atomic::AtomicUsize> {
        std::sync::Arc::clone(&self.max_in_flight)
    }
}

#[cfg(test)]
impl Synthesizer for MockSynthesizer {
    fn speak(&self, text: &str) -> Result<(), SpeakError> {
        use std::sync::atomic::Ordering;

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        std::thread::sleep(self.delay);
        self.spoken.lock().unwrap().push(text.to_string());

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail {
            return Err(SpeakError::Pipe);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
