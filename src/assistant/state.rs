//! Interaction-cycle state machine.
//!
//! ```text
//! Idle ──cycle start──▶ Listening ──utterance──▶ Replying ──done──▶ Idle
//!   any listen failure ──▶ Error ──announced──▶ Idle
//! ```
//!
//! The state is advisory — it drives the status-animation label and the log
//! lines; no transition is enforced beyond what the orchestrator does.

/// Phases of one interaction cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssistantState {
    /// Between cycles.
    #[default]
    Idle,

    /// Microphone open, status animation running.
    Listening,

    /// Caption + speech + completion query in flight.
    Replying,

    /// A listen failure is being announced.
    Error,
}

impl AssistantState {
    /// Label shown on the panel's status line.
    pub fn label(&self) -> &'static str {
        match self {
            AssistantState::Idle => "Idle",
            AssistantState::Listening => "Listening",
            AssistantState::Replying => "Replying",
            AssistantState::Error => "Error",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
