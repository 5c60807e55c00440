//! Orchestrator module — drives the full interaction cycle.
//!
//! # Architecture
//!
//! ```text
//! Assistant::run()  ← single long-lived async task
//!   loop {
//!     cycle()
//!       ├─ spawn  animate_status("Listening", token)      [Listening]
//!       ├─ spawn_blocking  SpeechCapture::listen(deadline)
//!       ├─ token.cancel() once the listener returns
//!       └─ reply_cycle(text)                               [Replying]
//!            ├─ spawn  animate_caption(wrapped text, token)
//!            ├─ Speaker::say(text)              ┐ awaited together,
//!            └─ query_completion(text)          ┘ then token.cancel()
//!            └─ caption + say the outcome ("Response: …" or the apology)
//!     Err(ListenError) → announce (spoken + displayed), back to Idle
//!   }
//! ```
//!
//! `query_completion` absorbs every completion failure into a spoken
//! apology plus an event-log line; a listen failure is the only error that
//! escapes `cycle`, and `run` turns it into an announcement.

pub mod runner;
pub mod state;

pub use runner::Assistant;
pub use state::AssistantState;
