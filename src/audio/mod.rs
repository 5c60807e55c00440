//! Audio front-end — microphone capture, rate conversion, end-pointing.
//!
//! # Pipeline
//!
//! ```text
//! Microphone → cpal callback → AudioChunk (mpsc) → downmix_mono
//!           → resample(native → 16 kHz) → EndPointer (utterance boundary)
//! ```
//!
//! The Whisper engine consumes **16 kHz mono f32** PCM; everything in this
//! module exists to turn whatever the microphone natively delivers into
//! exactly that, and to decide where an utterance ends.

pub mod capture;
pub mod endpoint;
pub mod resample;

pub use capture::{AudioChunk, MicError, Microphone, StreamGuard};
pub use endpoint::{EndPointer, Verdict};
pub use resample::{downmix_mono, resample};

/// Sample rate required by the STT engine.
pub const WHISPER_RATE: u32 = 16_000;
