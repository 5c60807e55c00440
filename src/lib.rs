//! quip — a voice-assistant appliance for small single-board computers.
//!
//! The appliance runs one interaction cycle forever:
//!
//! ```text
//! ┌─ Idle ──────────────────────────────────────────────────────────┐
//! │                                                                 │
//! │  animate "Listening…" on the OLED                               │
//! │        │                                                        │
//! │        ▼                                                        │
//! │  MicListener::listen  (cpal mic → end-pointing → Whisper)       │
//! │        │  cancel status animation                               │
//! │        ▼                                                        │
//! │  reply cycle — concurrently:                                    │
//! │    • caption task paginates the utterance on the panel          │
//! │    • Speaker says the utterance (serialized playback)           │
//! │    • ApiClient queries the completion service, speaks + logs    │
//! │      "Response: …" (errors absorbed as a spoken apology)        │
//! │        │  cancel caption task                                   │
//! │        ▼                                                        │
//! └─ back to Idle ──────────────────────────────────────────────────┘
//! ```
//!
//! Hardware and remote services sit behind narrow trait seams ([`display::Panel`],
//! [`listen::SpeechCapture`], [`speech::Synthesizer`],
//! [`completion::CompletionClient`]) so the orchestrator in [`assistant`] is
//! testable without a Raspberry Pi on the desk.

pub mod assistant;
pub mod audio;
pub mod completion;
pub mod config;
pub mod display;
pub mod events;
pub mod listen;
pub mod net;
pub mod speech;
pub mod stt;
