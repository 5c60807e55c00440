//! STT (Speech-to-Text) engine module.
//!
//! [`SttEngine`] is the object-safe seam the listener consumes;
//! [`WhisperEngine`] is the production implementation over a local GGML
//! model via `whisper_rs`.  Audio must be 16 kHz mono f32 (see
//! [`crate::audio`]).

pub mod engine;

pub use engine::{SttEngine, SttError, TranscribeParams, WhisperEngine};

// test-only re-export so other modules' tests can import MockSttEngine
// without `use quip::stt::engine::MockSttEngine`.
#[cfg(test)]
pub use engine::MockSttEngine;
