//! Serialized speech playback.
//!
//! [`Speaker`] is the crate's single gate in front of the synthesis engine.
//! An async mutex guarantees at most one utterance plays at a time; waiters
//! queue in arrival order.  The blocking [`Synthesizer::speak`] call runs on
//! the blocking thread pool so the cooperative scheduler (and therefore the
//! display animations) keeps running while audio plays.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::speech::synth::{SpeakError, Synthesizer};

/// Shared, serialized handle to the synthesis engine.
pub struct Speaker {
    synth: Arc<dyn Synthesizer>,
    gate: Mutex<()>,
}

impl Speaker {
    pub fn new(synth: Arc<dyn Synthesizer>) -> Self {
        Self {
            synth,
            gate: Mutex::new(()),
        }
    }

    /// Speak `text`, waiting for any in-flight utterance to finish first.
    ///
    /// Holds the gate for the full duration of playback; concurrent callers
    /// are queued by the mutex in arrival order.
    pub async fn say(&self, text: &str) -> Result<(), SpeakError> {
        let _turn = self.gate.lock().await;

        let synth = Arc::clone(&self.synth);
        let line = text.to_owned();
        tokio::task::spawn_blocking(move || synth.speak(&line))
            .await
            .map_err(|e| SpeakError::Join(e.to_string()))?
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::synth::MockSynthesizer;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    /// Concurrent `say` calls must never overlap in the engine.
    #[tokio::test]
    async fn playback_is_serialized() {
        let synth = MockSynthesizer::new(Duration::from_millis(30));
        let spoken = synth.spoken();
        let max_in_flight = synth.max_in_flight();
        let speaker = Speaker::new(Arc::new(synth));

        let (a, b, c) = tokio::join!(
            speaker.say("first"),
            speaker.say("second"),
            speaker.say("third"),
        );
        a.unwrap();
        b.unwrap();
        c.unwrap();

        assert_eq!(spoken.lock().unwrap().len(), 3);
        assert_eq!(
            max_in_flight.load(Ordering::SeqCst),
            1,
            "synthesis calls overlapped"
        );
    }

    #[tokio::test]
    async fn say_passes_the_text_through() {
        let synth = MockSynthesizer::new(Duration::ZERO);
        let spoken = synth.spoken();
        let speaker = Speaker::new(Arc::new(synth));

        speaker.say("Response: It is five o'clock").await.unwrap();

        assert_eq!(
            spoken.lock().unwrap().as_slice(),
            ["Response: It is five o'clock"]
        );
    }

    #[tokio::test]
    async fn engine_failure_propagates() {
        let speaker = Speaker::new(Arc::new(MockSynthesizer::failing()));
        assert!(speaker.say("oops").await.is_err());
    }

    /// A failed call must release the gate for the next one.
    #[tokio::test]
    async fn gate_is_released_after_failure() {
        let speaker = Speaker::new(Arc::new(MockSynthesizer::failing()));
        let _ = speaker.say("one").await;
        let second = tokio::time::timeout(Duration::from_secs(1), speaker.say("two")).await;
        assert!(second.is_ok(), "gate was not released");
    }
}
