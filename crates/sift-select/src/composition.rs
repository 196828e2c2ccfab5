//! IME composition guard.
//!
//! Composition sessions produce intermediate glyphs that must reach the
//! display immediately but must never reach the parent-visible commit
//! pipeline: committing a half-composed syllable would corrupt both the
//! committed value and the filtered list. [`CompositionGuard`] is the small
//! state machine (`idle -> composing -> idle`) that decides which text
//! changes are commit-eligible.

use crate::events::ImeEvent;

/// What a processed IME event means for the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositionOutcome {
    /// Preedit text changed; update the display, do not commit.
    PreeditChanged(String),
    /// The preedit was cleared without producing text.
    PreeditCleared,
    /// Composition finished; the final text flows through the normal
    /// commit pipeline (ordinary debounce window, no extra delay).
    Finished(String),
    /// The IME was disabled mid-session; abandon any preedit.
    Cancelled,
}

/// Tracks whether an IME composition session is in progress.
#[derive(Debug, Default)]
pub struct CompositionGuard {
    /// Whether IME is currently enabled for the field.
    enabled: bool,
    /// The current preedit text, if a session is active.
    preedit: Option<String>,
}

impl CompositionGuard {
    /// Create a guard in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if IME is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check if a composition session is active.
    ///
    /// True strictly between the first non-empty preedit and the commit (or
    /// cancellation) that ends the session.
    pub fn is_composing(&self) -> bool {
        self.preedit.is_some()
    }

    /// The current preedit text, if any.
    pub fn preedit_text(&self) -> Option<&str> {
        self.preedit.as_deref()
    }

    /// Whether a staged-text change may enter the commit pipeline right now.
    pub fn allows_commit(&self) -> bool {
        !self.is_composing()
    }

    /// Process an IME event, updating composition state.
    ///
    /// Returns what the field should do, or `None` for pure state changes
    /// (enable) that need no reaction.
    pub fn handle_ime(&mut self, event: &ImeEvent) -> Option<CompositionOutcome> {
        match event {
            ImeEvent::Enabled => {
                self.enabled = true;
                None
            }
            ImeEvent::Preedit { text, .. } => {
                if text.is_empty() {
                    self.preedit = None;
                    Some(CompositionOutcome::PreeditCleared)
                } else {
                    self.preedit = Some(text.clone());
                    Some(CompositionOutcome::PreeditChanged(text.clone()))
                }
            }
            ImeEvent::Commit(text) => {
                self.preedit = None;
                Some(CompositionOutcome::Finished(text.clone()))
            }
            ImeEvent::Disabled => {
                self.enabled = false;
                let had_preedit = self.preedit.take().is_some();
                had_preedit.then_some(CompositionOutcome::Cancelled)
            }
        }
    }

    /// Reset the guard to its initial state.
    pub fn reset(&mut self) {
        self.enabled = false;
        self.preedit = None;
    }
}
