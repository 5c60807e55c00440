//! The orchestrator — runs interaction cycles end-to-end.
//!
//! [`Assistant`] owns the seams to every collaborator and keeps the display
//! animated while the blocking work (microphone, synthesis) runs on the
//! blocking pool.  Animations are cancelled through a
//! [`CancellationToken`] observed at each sleep boundary, so a cancel takes
//! effect within one frame interval.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::assistant::state::AssistantState;
use crate::completion::CompletionClient;
use crate::config::AppConfig;
use crate::display::{wrap_reply, CaptionPager, Screen};
use crate::events::EventLog;
use crate::listen::{ListenError, SpeechCapture};
use crate::speech::Speaker;

// ---------------------------------------------------------------------------
// Assistant
// ---------------------------------------------------------------------------

/// Drives the listen → reply cycle forever.
///
/// Construct with [`Assistant::new`] after every collaborator has been
/// opened, then call [`run`](Self::run) on the runtime.  All hidden global
/// state of the appliance lives here, constructed once at startup.
pub struct Assistant {
    screen: Screen,
    capture: Arc<dyn SpeechCapture>,
    speaker: Arc<Speaker>,
    completion: Arc<dyn CompletionClient>,
    events: Arc<EventLog>,
    config: AppConfig,
    state: Mutex<AssistantState>,
}

impl Assistant {
    pub fn new(
        screen: Screen,
        capture: Arc<dyn SpeechCapture>,
        speaker: Arc<Speaker>,
        completion: Arc<dyn CompletionClient>,
        events: Arc<EventLog>,
        config: AppConfig,
    ) -> Self {
        Self {
            screen,
            capture,
            speaker,
            completion,
            events,
            config,
            state: Mutex::new(AssistantState::Idle),
        }
    }

    /// Run interaction cycles until the process dies.
    ///
    /// A listen failure is announced (spoken + displayed) and the loop
    /// continues; nothing inside a cycle can take the loop down.
    pub async fn run(&self) {
        loop {
            if let Err(e) = self.cycle().await {
                log::error!("listen cycle failed: {e}");
                self.announce_error(&e).await;
            }
        }
    }

    // -----------------------------------------------------------------------
    // One interaction cycle
    // -----------------------------------------------------------------------

    /// Animate "Listening…", capture one utterance, then run the reply
    /// cycle.  Only listen failures escape; everything downstream is
    /// absorbed into spoken feedback.
    pub async fn cycle(&self) -> Result<(), ListenError> {
        self.set_state(AssistantState::Listening);

        let token = CancellationToken::new();
        let status = tokio::spawn(animate_status(
            self.screen.clone(),
            AssistantState::Listening.label(),
            Duration::from_millis(self.config.display.status_millis),
            token.clone(),
        ));

        let capture = Arc::clone(&self.capture);
        let deadline = Duration::from_secs(self.config.audio.listen_timeout_secs);
        let heard = tokio::task::spawn_blocking(move || capture.listen(deadline)).await;

        // The listener has returned one way or another — stop the dots.
        token.cancel();
        let _ = status.await;

        let text = match heard {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                self.set_state(AssistantState::Error);
                return Err(e);
            }
            Err(e) => {
                self.set_state(AssistantState::Error);
                return Err(ListenError::Internal(e.to_string()));
            }
        };

        log::info!("heard: {text:?}");
        self.set_state(AssistantState::Replying);
        self.reply_cycle(&text, false).await;
        self.set_state(AssistantState::Idle);
        Ok(())
    }

    /// Speak and display a listen failure, then return to Idle.  The
    /// completion service is not consulted about our own breakage.
    pub async fn announce_error(&self, error: &ListenError) {
        let message = format!("Something went wrong: {error}");
        self.events.record(&format!("Error: {error}"));
        self.reply_cycle(&message, true).await;
        self.set_state(AssistantState::Idle);
    }

    // -----------------------------------------------------------------------
    // Reply cycle
    // -----------------------------------------------------------------------

    /// Caption `text` on the panel while speaking it, and — unless this is
    /// an error announcement — query the completion service in parallel.
    /// Once the awaited work completes the caption is cancelled and the
    /// completion outcome gets its own caption + speech turn, so the reply
    /// is displayed as well as heard.
    ///
    /// Playback was already sequential through the [`Speaker`] gate; showing
    /// the outcome after the utterance caption just makes the panel follow
    /// the audio.
    async fn reply_cycle(&self, text: &str, is_error: bool) {
        let (token, caption) = self.start_caption(text);

        let outcome = if is_error {
            self.say_logged(text).await;
            None
        } else {
            let (_, outcome) = tokio::join!(self.say_logged(text), self.query_completion(text));
            outcome
        };

        token.cancel();
        let _ = caption.await;

        if let Some(message) = outcome {
            let (token, caption) = self.start_caption(&message);
            self.say_logged(&message).await;
            token.cancel();
            let _ = caption.await;
        }
    }

    /// Query the completion service and return the message to voice and
    /// display.  Never fails the cycle: errors become an apology message
    /// plus an event-log line carrying the error chain.
    async fn query_completion(&self, utterance: &str) -> Option<String> {
        match self.completion.complete(utterance).await {
            Ok(reply) => {
                let message = format!("Response: {reply}");
                self.events.record(&message);
                Some(message)
            }
            Err(error) => {
                let apology = format!("Something went wrong: {error}");
                self.events
                    .record(&format!("Error: {:#}", anyhow::Error::new(error)));
                Some(apology)
            }
        }
    }

    /// Spawn a caption task over `text`.  The caller cancels the token and
    /// awaits the handle once the dominant work has finished.
    fn start_caption(
        &self,
        text: &str,
    ) -> (CancellationToken, tokio::task::JoinHandle<()>) {
        let lines = wrap_reply(text, self.screen.columns());
        let token = CancellationToken::new();
        let task = tokio::spawn(animate_caption(
            self.screen.clone(),
            lines,
            Duration::from_secs(self.config.display.caption_secs),
            token.clone(),
        ));
        (token, task)
    }

    /// Speak through the serialized gate, downgrading failures to a warning
    /// — a dead speaker must not stop the cycle.
    async fn say_logged(&self, text: &str) {
        if let Err(e) = self.speaker.say(text).await {
            log::warn!("speech failed: {e}");
        }
    }

    fn set_state(&self, next: AssistantState) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if *state != next {
            log::debug!("state: {} -> {}", state.label(), next.label());
            *state = next;
        }
    }
}

// ---------------------------------------------------------------------------
// Animation tasks
// ---------------------------------------------------------------------------

/// Redraw `label` with 0–3 trailing dots every `interval` until cancelled.
async fn animate_status(
    screen: Screen,
    label: &'static str,
    interval: Duration,
    token: CancellationToken,
) {
    let mut dots = 0usize;
    loop {
        if let Err(e) = screen.status_frame(label, dots) {
            log::warn!("status frame failed: {e}");
        }
        dots = (dots + 1) % 4;

        tokio::select! {
            _ = token.cancelled() => break,
            _ = sleep(interval) => {}
        }
    }
}

/// Page the wrapped `lines` through the body region, two lines at a time,
/// advancing every `interval` and wrapping to the first page, until
/// cancelled.
async fn animate_caption(
    screen: Screen,
    lines: Vec<String>,
    interval: Duration,
    token: CancellationToken,
) {
    let mut pager = CaptionPager::new(lines.len());
    loop {
        if let Err(e) = screen.caption_frame(&lines[pager.window()]) {
            log::warn!("caption frame failed: {e}");
        }
        pager.advance();

        tokio::select! {
            _ = token.cancelled() => break,
            _ = sleep(interval) => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
