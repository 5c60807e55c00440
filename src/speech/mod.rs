//! Speech synthesis — CLI engine adapter and playback serialization.
//!
//! [`Synthesizer`] is the blocking seam: turn text into audio and return
//! when playback finishes.  [`EspeakSynthesizer`] shells out to espeak-ng
//! piped into an ALSA player fixed to a named output device.
//!
//! [`Speaker`] is the only path the rest of the crate speaks through: it
//! owns a `tokio::sync::Mutex` so that at most one utterance plays at a
//! time, queued in arrival order, with the blocking synthesis call pushed
//! onto the runtime's blocking pool.

pub mod speaker;
pub mod synth;

pub use speaker::Speaker;
pub use synth::{EspeakSynthesizer, SpeakError, Synthesizer};

// test-only re-export for other modules' tests.
#[cfg(test)]
pub use synth::MockSynthesizer;
