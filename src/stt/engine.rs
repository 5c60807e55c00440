//! Core STT engine trait and the Whisper implementation.
//!
//! [`WhisperEngine`] wraps a `whisper_rs::WhisperContext` loaded once at
//! startup; a fresh `WhisperState` is created per [`transcribe`] call so the
//! engine can be shared across threads without locking.  Decoding is greedy
//! single-pass — on an SBC the latency difference over beam search matters
//! far more than the accuracy difference for short conversational turns.
//!
//! [`MockSttEngine`] (under `#[cfg(test)]`) returns a pre-configured result
//! without a model file.
//!
//! [`transcribe`]: SttEngine::transcribe

use std::path::Path;

use thiserror::Error;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

// ---------------------------------------------------------------------------
// Audio length bounds (16 kHz mono f32)
// ---------------------------------------------------------------------------

/// Minimum clip length: 0.5 s × 16 000 Hz.
const MIN_CLIP_SAMPLES: usize = 8_000;
/// Maximum clip length: 60 s × 16 000 Hz.
const MAX_CLIP_SAMPLES: usize = 960_000;

// ---------------------------------------------------------------------------
// SttError
// ---------------------------------------------------------------------------

/// All errors that can arise from the STT subsystem.
#[derive(Debug, Clone, Error)]
pub enum SttError {
    /// The GGML model file was not found at the given path.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// `whisper_rs` failed to initialise a context or per-call state.
    #[error("whisper context initialisation failed: {0}")]
    ContextInit(String),

    /// An error occurred during the inference pass.
    #[error("transcription error: {0}")]
    Transcription(String),

    /// The clip is shorter than the 0.5 s Whisper minimum.
    #[error("audio clip too short for transcription (minimum 0.5 s)")]
    ClipTooShort,

    /// The clip exceeds the 60 s cap.
    #[error("audio clip too long for transcription (maximum 60 s)")]
    ClipTooLong,
}

// ---------------------------------------------------------------------------
// TranscribeParams
// ---------------------------------------------------------------------------

/// Per-engine transcription settings.
#[derive(Debug, Clone)]
pub struct TranscribeParams {
    /// ISO-639-1 language code, or `"auto"` for Whisper's language detection.
    pub language: String,
    /// CPU threads handed to Whisper.
    pub n_threads: i32,
}

impl Default for TranscribeParams {
    fn default() -> Self {
        Self {
            language: "en".into(),
            n_threads: optimal_threads(),
        }
    }
}

/// Threads for inference: available parallelism capped at 4, which is where
/// Whisper stops scaling on the Pi-class cores this runs on.
fn optimal_threads() -> i32 {
    std::thread::available_parallelism()
        .map(|n| n.get().min(4) as i32)
        .unwrap_or(2)
}

// ---------------------------------------------------------------------------
// SttEngine trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for speech-to-text engines.
///
/// # Contract
///
/// - `audio` must be **16 kHz, mono, f32** PCM samples.
/// - Returns [`SttError::ClipTooShort`] below 8 000 samples and
///   [`SttError::ClipTooLong`] above 960 000 samples.
pub trait SttEngine: Send + Sync {
    /// Transcribe `audio` and return the text transcript.
    fn transcribe(&self, audio: &[f32]) -> Result<String, SttError>;
}

// Compile-time assertion: Box<dyn SttEngine> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SttEngine>) {}
};

// ---------------------------------------------------------------------------
// WhisperEngine
// ---------------------------------------------------------------------------

/// Production STT engine over a local GGML Whisper model.
pub struct WhisperEngine {
    ctx: WhisperContext,
    params: TranscribeParams,
}

impl std::fmt::Debug for WhisperEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhisperEngine")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

// `WhisperContext` holds a raw pointer internally but declares
// `unsafe impl Send`/`Sync` in whisper-rs — the model weights are read-only
// after loading, and each transcribe call gets its own state.
// SAFETY: WhisperContext is Send+Sync as declared by whisper-rs.
unsafe impl Send for WhisperEngine {}
unsafe impl Sync for WhisperEngine {}

impl WhisperEngine {
    /// Load a GGML model from `model_path` and prepare it for inference.
    ///
    /// # Errors
    ///
    /// - [`SttError::ModelNotFound`] — `model_path` does not exist.
    /// - [`SttError::ContextInit`]  — whisper-rs failed to load the file.
    pub fn load(
        model_path: impl AsRef<Path>,
        params: TranscribeParams,
    ) -> Result<Self, SttError> {
        let path = model_path.as_ref();

        if !path.exists() {
            return Err(SttError::ModelNotFound(path.display().to_string()));
        }

        let path_str = path.to_str().ok_or_else(|| {
            SttError::ModelNotFound(format!(
                "model path is not valid UTF-8: {}",
                path.display()
            ))
        })?;

        let ctx = WhisperContext::new_with_params(path_str, WhisperContextParameters::default())
            .map_err(|e| SttError::ContextInit(e.to_string()))?;

        Ok(Self { ctx, params })
    }
}

impl SttEngine for WhisperEngine {
    fn transcribe(&self, audio: &[f32]) -> Result<String, SttError> {
        if audio.len() < MIN_CLIP_SAMPLES {
            return Err(SttError::ClipTooShort);
        }
        if audio.len() > MAX_CLIP_SAMPLES {
            return Err(SttError::ClipTooLong);
        }

        let mut fp = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });

        // set_language borrows from self.params; both live until full() returns.
        let lang: Option<&str> = if self.params.language == "auto" {
            None
        } else {
            Some(self.params.language.as_str())
        };
        fp.set_language(lang);
        fp.set_n_threads(self.params.n_threads);
        fp.set_print_progress(false);
        fp.set_print_realtime(false);

        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| SttError::ContextInit(e.to_string()))?;

        state
            .full(fp, audio)
            .map_err(|e| SttError::Transcription(e.to_string()))?;

        let n_segments = state
            .full_n_segments()
            .map_err(|e| SttError::Transcription(e.to_string()))?;

        let mut text = String::new();
        for i in 0..n_segments {
            let seg = state
                .full_get_segment_text(i)
                .map_err(|e| SttError::Transcription(format!("segment {i}: {e}")))?;
            text.push_str(&seg);
        }

        Ok(text.trim().to_string())
    }
}

// ---------------------------------------------------------------------------
// MockSttEngine  (test-only)
// ---------------------------------------------------------------------------

/// Test double returning a pre-configured response without a model file.
///
/// The mock still enforces the clip-length contract so callers get tested
/// against it.
#[cfg(test)]
pub struct MockSttEngine {
    response: Result<String, SttError>,
}

#[cfg(test)]
impl MockSttEngine {
    /// A mock that always returns `Ok(text)`.
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
        }
    }

    /// A mock that always returns `Err(error)`.
    pub fn err(error: SttError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

#[cfg(test)]
impl SttEngine for MockSttEngine {
    fn transcribe(&self, audio: &[f32]) -> Result<String, SttError> {
        if audio.len() < MIN_CLIP_SAMPLES {
            return Err(SttError::ClipTooShort);
        }
        if audio.len() > MAX_CLIP_SAMPLES {
            return Err(SttError::ClipTooLong);
        }
        self.response.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_ok_returns_configured_text() {
        let engine = MockSttEngine::ok("what time is it");
        let audio = vec![0.0f32; MIN_CLIP_SAMPLES];
        assert_eq!(engine.transcribe(&audio).unwrap(), "what time is it");
    }

    #[test]
    fn mock_err_returns_configured_error() {
        let engine = MockSttEngine::err(SttError::Transcription("boom".into()));
        let audio = vec![0.0f32; MIN_CLIP_SAMPLES];
        assert!(matches!(
            engine.transcribe(&audio).unwrap_err(),
            SttError::Transcription(_)
        ));
    }

    #[test]
    fn short_clip_is_rejected() {
        let engine = MockSttEngine::ok("text");
        let short = vec![0.0f32; MIN_CLIP_SAMPLES - 1];
        assert!(matches!(
            engine.transcribe(&short).unwrap_err(),
            SttError::ClipTooShort
        ));
    }

    #[test]
    fn long_clip_is_rejected() {
        let engine = MockSttEngine::ok("text");
        let long = vec![0.0f32; MAX_CLIP_SAMPLES + 1];
        assert!(matches!(
            engine.transcribe(&long).unwrap_err(),
            SttError::ClipTooLong
        ));
    }

    #[test]
    fn load_missing_model_returns_model_not_found() {
        let result = WhisperEngine::load("/nonexistent/model.bin", TranscribeParams::default());
        assert!(
            matches!(result, Err(SttError::ModelNotFound(_))),
            "expected ModelNotFound, got: {result:?}"
        );
    }

    #[test]
    fn default_params_use_english_and_bounded_threads() {
        let params = TranscribeParams::default();
        assert_eq!(params.language, "en");
        assert!(params.n_threads >= 1 && params.n_threads <= 4);
    }

    #[test]
    fn box_dyn_stt_engine_compiles() {
        // If this test compiles, the trait is object-safe.
        let engine: Box<dyn SttEngine> = Box::new(MockSttEngine::ok("ok"));
        let _ = engine.transcribe(&vec![0.0f32; MIN_CLIP_SAMPLES]);
    }
}
