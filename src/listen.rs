//! Blocking listen-until-utterance capture.
//!
//! [`SpeechCapture`] is the seam the orchestrator consumes: block until an
//! utterance has been captured and transcribed, or until the deadline
//! expires.  [`MicListener`] is the production implementation:
//!
//! ```text
//! listen(deadline)
//!   ├─ open cpal stream → AudioChunk mpsc
//!   ├─ per chunk: downmix → resample to 16 kHz → EndPointer::feed
//!   ├─ Verdict::Complete (or the utterance cap) stops the stream
//!   └─ slice leading silence → SttEngine::transcribe → text
//! ```
//!
//! `listen` runs on the blocking thread pool (the orchestrator wraps it in
//! `spawn_blocking`) so the async runtime never stalls while the room is
//! quiet.  The deadline is enforced inside the loop — expiry surfaces as
//! [`ListenError::Timeout`] rather than an unbounded wait.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::audio::{downmix_mono, resample, AudioChunk, EndPointer, MicError, Microphone, Verdict, WHISPER_RATE};
use crate::config::AudioConfig;
use crate::stt::{SttEngine, SttError};

// ---------------------------------------------------------------------------
// ListenError
// ---------------------------------------------------------------------------

/// Errors surfaced by a listen call.
#[derive(Debug, Error)]
pub enum ListenError {
    /// The microphone could not be opened or streamed.
    #[error("microphone error: {0}")]
    Microphone(#[from] MicError),

    /// The STT engine rejected or failed on the captured clip.
    #[error("recognition error: {0}")]
    Stt(#[from] SttError),

    /// Audio was captured but no voice (or no words) were found in it.
    #[error("no speech detected")]
    NoSpeech,

    /// The deadline expired before an utterance completed.
    #[error("nothing heard within {0:?}")]
    Timeout(Duration),

    /// The capture stream closed unexpectedly mid-listen.
    #[error("audio stream closed unexpectedly")]
    StreamClosed,

    /// A worker task failed outside the capture path (e.g. a panic).
    #[error("internal listen failure: {0}")]
    Internal(String),
}

// ---------------------------------------------------------------------------
// SpeechCapture trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for utterance capture.
///
/// `listen` blocks the calling thread until an utterance has been captured
/// and transcribed, or until `deadline` expires.
pub trait SpeechCapture: Send + Sync {
    fn listen(&self, deadline: Duration) -> Result<String, ListenError>;
}

// ---------------------------------------------------------------------------
// MicListener
// ---------------------------------------------------------------------------

/// How often the listen loop wakes to re-check the deadline while the
/// channel is quiet.
const RECV_TICK: Duration = Duration::from_millis(100);

/// Production [`SpeechCapture`] over the system microphone and a local
/// Whisper engine.
pub struct MicListener {
    config: AudioConfig,
    stt: Arc<dyn SttEngine>,
}

impl MicListener {
    /// Build a listener and probe the configured input device once, so a
    /// missing microphone is caught at startup rather than mid-cycle.
    pub fn new(config: AudioConfig, stt: Arc<dyn SttEngine>) -> Result<Self, MicError> {
        Microphone::open(config.device.as_deref())?;
        Ok(Self { config, stt })
    }

    /// Capture one utterance as 16 kHz mono samples, leading silence sliced
    /// off.  Separated from transcription so the capture logic is testable
    /// against a fake chunk source.
    fn capture_clip(
        &self,
        rx: &mpsc::Receiver<AudioChunk>,
        source_rate: u32,
        channels: u16,
        deadline: Duration,
    ) -> Result<Vec<f32>, ListenError> {
        let started = Instant::now();
        let max_samples = (self.config.max_utterance_secs * WHISPER_RATE as f32) as usize;

        let mut clip: Vec<f32> = Vec::new();
        let mut endpoint =
            EndPointer::with_hold_secs(self.config.vad_threshold, self.config.silence_hold_secs);

        loop {
            if started.elapsed() >= deadline {
                return Err(ListenError::Timeout(deadline));
            }

            let chunk = match rx.recv_timeout(RECV_TICK) {
                Ok(chunk) => chunk,
                Err(mpsc::RecvTimeoutError::Timeout) => continue,
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    return Err(ListenError::StreamClosed)
                }
            };

            let mono = downmix_mono(&chunk.samples, channels);
            let converted = resample(&mono, source_rate, WHISPER_RATE);
            let verdict = endpoint.feed(&converted);
            clip.extend_from_slice(&converted);

            if verdict == Verdict::Complete {
                break;
            }
            // Cap runaway utterances (someone left the radio on).
            if endpoint.voice_start().is_some() && clip.len() >= max_samples {
                log::warn!("utterance hit the {}s cap", self.config.max_utterance_secs);
                break;
            }
        }

        let start = endpoint.voice_start().ok_or(ListenError::NoSpeech)?;
        clip.drain(..start);
        Ok(clip)
    }
}

impl SpeechCapture for MicListener {
    fn listen(&self, deadline: Duration) -> Result<String, ListenError> {
        let mic = Microphone::open(self.config.device.as_deref())?;
        let (tx, rx) = mpsc::channel::<AudioChunk>();
        let guard = mic.stream(tx)?;

        let clip = self.capture_clip(&rx, mic.sample_rate(), mic.channels(), deadline)?;
        drop(guard); // stop the hardware stream before the (slow) inference

        log::debug!(
            "captured {:.2}s clip, transcribing",
            clip.len() as f32 / WHISPER_RATE as f32
        );

        let text = self.stt.transcribe(&clip)?;
        if text.is_empty() {
            return Err(ListenError::NoSpeech);
        }
        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
