//! Microphone capture via `cpal`.
//!
//! [`Microphone::open`] resolves the configured input device (or the system
//! default) and probes its native stream configuration.  [`Microphone::stream`]
//! starts the hardware stream and forwards every callback buffer as an
//! [`AudioChunk`] over an mpsc channel; the returned [`StreamGuard`] is a
//! RAII handle — dropping it stops the stream.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::mpsc;
use thiserror::Error;

// ---------------------------------------------------------------------------
// AudioChunk
// ---------------------------------------------------------------------------

/// One buffer of raw audio as delivered by the cpal callback.
///
/// Samples are interleaved `f32` in `[-1.0, 1.0]` at the device's native
/// rate and channel count; use [`crate::audio::downmix_mono`] and
/// [`crate::audio::resample`] before feeding the STT engine.
#[derive(Debug, Clone)]
pub struct AudioChunk {
    /// Interleaved PCM samples in `[-1.0, 1.0]`.
    pub samples: Vec<f32>,
}

// ---------------------------------------------------------------------------
// MicError
// ---------------------------------------------------------------------------

/// Errors from microphone setup or streaming.
#[derive(Debug, Error)]
pub enum MicError {
    /// No input device matched — carries the requested name, or "default".
    #[error("audio input device not available: {0}")]
    NoDevice(String),

    /// The host failed while enumerating input devices.
    #[error("failed to enumerate input devices: {0}")]
    Enumerate(#[from] cpal::DevicesError),

    #[error("failed to query device stream config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build input stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start input stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
}

// ---------------------------------------------------------------------------
// StreamGuard
// ---------------------------------------------------------------------------

/// RAII guard that keeps the cpal stream alive.  Dropping it stops the
/// underlying hardware stream.
pub struct StreamGuard {
    _stream: cpal::Stream,
}

// ---------------------------------------------------------------------------
// Microphone
// ---------------------------------------------------------------------------

/// An opened input device plus its probed native stream configuration.
pub struct Microphone {
    device: cpal::Device,
    config: cpal::StreamConfig,
    sample_rate: u32,
    channels: u16,
}

impl Microphone {
    /// Open the input device named `device`, or the system default when
    /// `None`.  Probes the device's preferred configuration so no manual
    /// sample-rate setup is required.
    ///
    /// # Errors
    ///
    /// [`MicError::NoDevice`] when nothing matches, or a cpal error when the
    /// device cannot report a default configuration.
    pub fn open(device: Option<&str>) -> Result<Self, MicError> {
        let host = cpal::default_host();

        let device = match device {
            None => host
                .default_input_device()
                .ok_or_else(|| MicError::NoDevice("default".into()))?,
            Some(name) => host
                .input_devices()?
                .find(|d| d.name().map(|n| n == name).unwrap_or(false))
                .ok_or_else(|| MicError::NoDevice(name.into()))?,
        };

        let supported = device.default_input_config()?;
        let channels = supported.channels();
        let sample_rate = supported.sample_rate().0;
        let config: cpal::StreamConfig = supported.into();

        Ok(Self {
            device,
            config,
            sample_rate,
            channels,
        })
    }

    /// Start streaming and send an [`AudioChunk`] to `tx` for every hardware
    /// buffer.  Send errors (receiver dropped) are silently ignored so the
    /// audio thread never panics.
    pub fn stream(&self, tx: mpsc::Sender<AudioChunk>) -> Result<StreamGuard, MicError> {
        let stream = self.device.build_input_stream(
            &self.config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                let _ = tx.send(AudioChunk {
                    samples: data.to_vec(),
                });
            },
            |err: cpal::StreamError| {
                log::error!("cpal stream error: {err}");
            },
            None, // no timeout
        )?;

        stream.play()?;
        Ok(StreamGuard { _stream: stream })
    }

    /// Native sample rate of the device in Hz (commonly 44 100 or 48 000).
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of interleaved channels in each [`AudioChunk`].
    pub fn channels(&self) -> u16 {
        self.channels
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
