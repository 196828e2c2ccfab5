//! Staged-text ownership and debounced commit.
//!
//! While the field has focus, the user edits a locally staged copy of the
//! text; the parent-owned committed value is only updated through explicit
//! commits. [`InputStager`] reconciles the two and gates the typed-text
//! path behind a debounce window so fast typing produces one notification,
//! not one per keystroke.
//!
//! The stager does not own a clock. It tells the field what to do with the
//! debounce timer through [`StagerAction`]; the field starts and stops the
//! actual timer through its environment and reports expiry back via
//! [`debounce_fired`](InputStager::debounce_fired). This keeps a single
//! cancellation point shared by unmount, immediate commit, and
//! re-keystroke.

use std::time::Duration;

/// Default delay before a typed change is forwarded to the parent.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// What the field should do with the debounce timer after a stager call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagerAction {
    /// Leave the timer alone.
    None,
    /// Cancel any running debounce timer and start a fresh one.
    RestartDebounce,
    /// Cancel any running debounce timer.
    CancelDebounce,
}

/// Reconciles "what the user is typing" with "what the parent thinks the
/// value is".
#[derive(Debug)]
pub struct InputStager {
    /// The locally staged display text.
    staged: String,
    /// Mirror of the parent-owned committed value.
    committed: String,
    /// How the committed value displays. Equal to `committed` except after
    /// a selection commit, where the option's label stands in for its
    /// value.
    committed_display: String,
    /// Whether the field currently has focus.
    focused: bool,
    /// Text waiting for the debounce window to elapse.
    pending: Option<String>,
    /// The debounce window.
    debounce: Duration,
}

impl Default for InputStager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputStager {
    /// Create a stager with an empty value and the default debounce window.
    pub fn new() -> Self {
        Self {
            staged: String::new(),
            committed: String::new(),
            committed_display: String::new(),
            focused: false,
            pending: None,
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    /// Set the debounce window using builder pattern.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// The debounce window.
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// The text the host should display.
    pub fn staged_text(&self) -> &str {
        &self.staged
    }

    /// The stager's mirror of the committed value.
    pub fn committed_text(&self) -> &str {
        &self.committed
    }

    /// Whether a typed change is waiting on the debounce window.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a focus change.
    ///
    /// Gaining focus freezes the committed→staged derivation; losing focus
    /// re-enables it. Discarding or committing the staged text on blur is
    /// the field's decision, not the stager's.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Whether the field currently has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The parent's committed value changed.
    ///
    /// While unfocused, the displayed text is re-derived from it; while
    /// focused, the staged text is left alone so typing is never clobbered
    /// by a late parent update. A missing value stages as empty.
    pub fn sync_committed(&mut self, value: Option<&str>) {
        let value = value.unwrap_or_default();
        self.committed = value.to_string();
        self.committed_display = self.committed.clone();
        if !self.focused {
            self.staged = self.committed_display.clone();
        }
    }

    /// The user edited the text; `commit_eligible` is false during an IME
    /// composition session.
    ///
    /// The staged text always updates synchronously. Commit-eligible edits
    /// additionally enter the debounce window, replacing any earlier
    /// pending text.
    pub fn text_edited(&mut self, text: &str, commit_eligible: bool) -> StagerAction {
        self.staged = text.to_string();

        if !commit_eligible {
            return StagerAction::None;
        }

        self.pending = Some(self.staged.clone());
        StagerAction::RestartDebounce
    }

    /// The debounce timer fired; returns the text to forward to the parent.
    ///
    /// Returns `None` when nothing is pending (a stale fire after an
    /// immediate commit raced the cancellation).
    pub fn debounce_fired(&mut self) -> Option<String> {
        let text = self.pending.take()?;
        self.committed = text.clone();
        self.committed_display = text.clone();
        Some(text)
    }

    /// Commit `text` immediately, bypassing the debounce (selection or
    /// Enter-confirm).
    ///
    /// Stages the text, drops any pending debounced change so a later fire
    /// cannot overwrite this commit, and returns the committed text for the
    /// field to forward synchronously. The returned action cancels the
    /// debounce timer.
    pub fn commit_immediate(&mut self, text: &str) -> (String, StagerAction) {
        self.staged = text.to_string();
        self.committed = text.to_string();
        self.committed_display = text.to_string();
        self.pending = None;
        (self.committed.clone(), StagerAction::CancelDebounce)
    }

    /// Commit a chosen option immediately: its label becomes the staged
    /// display text, its value becomes the committed value.
    ///
    /// Same debounce semantics as [`commit_immediate`](Self::commit_immediate).
    pub fn commit_selection(&mut self, label: &str, value: &str) -> (String, StagerAction) {
        self.staged = label.to_string();
        self.committed = value.to_string();
        self.committed_display = label.to_string();
        self.pending = None;
        (self.committed.clone(), StagerAction::CancelDebounce)
    }

    /// Discard the staged text, reverting to how the committed value
    /// displays.
    ///
    /// Used by the blur-without-selection path. Any pending debounced
    /// change is dropped.
    pub fn revert(&mut self) -> StagerAction {
        self.staged = self.committed_display.clone();
        self.pending = None;
        StagerAction::CancelDebounce
    }

    /// Whether the staged text differs from the committed value's display
    /// form.
    pub fn is_dirty(&self) -> bool {
        self.staged != self.committed_display
    }
}
