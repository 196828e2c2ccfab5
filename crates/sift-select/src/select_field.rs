//! The searchable select field.
//!
//! [`SearchableSelectField`] wires the filter, the composition guard, the
//! input stager, the keyboard navigator, and the floating panel into one
//! state machine. The host owns the real input surface and the render
//! loop; it translates native input into [`FieldEvent`]s, pumps them
//! through [`handle_event`](SearchableSelectField::handle_event), and reads
//! the field's state back out to draw.
//!
//! Outbound notifications are Qt-style signals: `value_changed` fires when
//! a value is committed to the parent (debounced typing or an immediate
//! selection), `highlighted` follows the keyboard highlight, and
//! `opened` / `closed` track the panel.
//!
//! # Host contract
//!
//! Two event-ordering rules keep the tricky interactions correct:
//!
//! - An option pointer-down must be delivered (as
//!   [`FieldEvent::OptionPressed`]) *before* the focus-out it provokes,
//!   matching native event order. The field uses the press to recognize
//!   that the blur belongs to an in-flight selection and must not revert
//!   the staged text out from under it.
//! - During an IME composition session the host must not deliver
//!   [`FieldEvent::TextEdited`]; preedit display comes from
//!   [`display_text`](SearchableSelectField::display_text) instead. The
//!   committed text arrives once, through [`ImeEvent::Commit`], and is
//!   appended to the staged text as it stood when the session began. A
//!   host that forwards mid-composition edits anyway only updates the
//!   display; nothing reaches the commit pipeline until the session ends.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use sift_core::{Signal, TimerId};

use crate::accessibility::{
    AccessibilitySnapshot, AccessibleInput, AccessibleOption, AccessibleRole,
};
use crate::composition::{CompositionGuard, CompositionOutcome};
use crate::environment::Environment;
use crate::events::{FieldEvent, ImeEvent, Key, KeyPressEvent};
use crate::filter::{CaseSensitivity, OptionFilter};
use crate::navigator::KeyboardNavigator;
use crate::option_model::{normalize_options, OptionInput, SelectOption};
use crate::panel::{FloatingPanel, PanelGeometry};
use crate::stager::{InputStager, StagerAction};

// ============================================================================
// SearchableSelectField
// ============================================================================

static NEXT_FIELD_ID: AtomicU64 = AtomicU64::new(0);

/// A text input with a filtered, keyboard-navigable option panel.
pub struct SearchableSelectField {
    /// The normalized option list.
    options: Vec<SelectOption>,
    /// Query matching and ranking.
    filter: OptionFilter,
    /// The current filtered list, in display order.
    filtered: Vec<SelectOption>,
    /// IME composition state.
    guard: CompositionGuard,
    /// Staged text and debounced commit.
    stager: InputStager,
    /// Highlight and scroll window.
    navigator: KeyboardNavigator,
    /// Panel openness and geometry.
    panel: FloatingPanel,
    /// Filtered-list index of an option press awaiting its click.
    pending_selection: Option<usize>,
    /// A blur arrived while a selection was pending; completed when the
    /// press resolves.
    blur_pending: bool,
    /// The staged text as it stood when the current composition session
    /// began.
    composition_baseline: Option<String>,
    /// The running debounce timer, if any.
    debounce_timer: Option<TimerId>,
    /// Field label, surfaced through accessibility.
    label: Option<String>,
    /// Placeholder text for the empty input.
    placeholder: Option<String>,
    /// Validation error to display, if any.
    error: Option<String>,
    /// Commit the raw staged text on blur instead of reverting it.
    commit_on_blur: bool,
    /// Stable id linking the input to its option list.
    listbox_id: String,

    /// Emitted when a value is committed to the parent.
    pub value_changed: Signal<String>,
    /// Emitted when the keyboard highlight moves to an option; carries its
    /// label.
    pub highlighted: Signal<String>,
    /// Emitted when the panel opens.
    pub opened: Signal<()>,
    /// Emitted when the panel closes.
    pub closed: Signal<()>,
}

impl Default for SearchableSelectField {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchableSelectField {
    /// Create a field with no options.
    pub fn new() -> Self {
        let id = NEXT_FIELD_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            options: Vec::new(),
            filter: OptionFilter::new(),
            filtered: Vec::new(),
            guard: CompositionGuard::new(),
            stager: InputStager::new(),
            navigator: KeyboardNavigator::new(),
            panel: FloatingPanel::new(),
            pending_selection: None,
            blur_pending: false,
            composition_baseline: None,
            debounce_timer: None,
            label: None,
            placeholder: None,
            error: None,
            commit_on_blur: false,
            listbox_id: format!("sift-select-listbox-{id}"),
            value_changed: Signal::new(),
            highlighted: Signal::new(),
            opened: Signal::new(),
            closed: Signal::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------------------

    /// Set the option list using builder pattern.
    pub fn with_options<I>(mut self, inputs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<OptionInput>,
    {
        self.options = normalize_options(inputs);
        self
    }

    /// Cap the filtered list using builder pattern.
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.filter = self.filter.with_max_items(max_items);
        self
    }

    /// Set query case sensitivity using builder pattern.
    pub fn with_case_sensitivity(mut self, sensitivity: CaseSensitivity) -> Self {
        self.filter = self.filter.with_case_sensitivity(sensitivity);
        self
    }

    /// Set the popular values ranked above ordinary matches using builder
    /// pattern.
    pub fn with_popular<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter = self.filter.with_popular(values);
        self
    }

    /// Set the typed-commit debounce window using builder pattern.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.stager = self.stager.with_debounce(debounce);
        self
    }

    /// Set the field label using builder pattern.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the placeholder text using builder pattern.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Commit the raw staged text on blur instead of reverting it, using
    /// builder pattern.
    pub fn with_commit_on_blur(mut self, commit: bool) -> Self {
        self.commit_on_blur = commit;
        self
    }

    /// Clamp the panel into the viewport's horizontal bounds using builder
    /// pattern.
    pub fn with_clamp_to_viewport(mut self, clamp: bool) -> Self {
        self.panel = self.panel.with_clamp_to_viewport(clamp);
        self
    }

    /// Set the number of options visible without scrolling using builder
    /// pattern.
    pub fn with_max_visible_items(mut self, count: usize) -> Self {
        self.navigator = self.navigator.with_max_visible_items(count);
        self
    }

    // ------------------------------------------------------------------------
    // Parent-driven state
    // ------------------------------------------------------------------------

    /// Replace the option list.
    ///
    /// Duplicate values collapse to the last occurrence. An open panel
    /// refilters against the new list and resets the highlight.
    pub fn set_options<I>(&mut self, inputs: I)
    where
        I: IntoIterator,
        I::Item: Into<OptionInput>,
    {
        self.options = normalize_options(inputs);
        if self.panel.is_open() {
            self.refilter();
            self.navigator.list_changed(self.filtered.len());
        }
    }

    /// The parent's committed value changed.
    ///
    /// While unfocused the displayed text follows it; while focused the
    /// staged text is left alone. `None` displays as empty.
    pub fn set_value(&mut self, value: Option<&str>) {
        self.stager.sync_committed(value);
        if self.panel.is_open() {
            self.refilter();
            self.navigator.list_changed(self.filtered.len());
        }
    }

    /// Set or clear the validation error.
    pub fn set_error(&mut self, error: Option<impl Into<String>>) {
        self.error = error.map(Into::into);
    }

    /// Set the field label.
    pub fn set_label(&mut self, label: Option<impl Into<String>>) {
        self.label = label.map(Into::into);
    }

    /// Set the placeholder text.
    pub fn set_placeholder(&mut self, placeholder: Option<impl Into<String>>) {
        self.placeholder = placeholder.map(Into::into);
    }

    /// Set whether blur commits the raw staged text.
    pub fn set_commit_on_blur(&mut self, commit: bool) {
        self.commit_on_blur = commit;
    }

    // ------------------------------------------------------------------------
    // Render-facing state
    // ------------------------------------------------------------------------

    /// The text the host should display, including any IME preedit.
    pub fn display_text(&self) -> String {
        match self.guard.preedit_text() {
            Some(preedit) => format!("{}{preedit}", self.stager.staged_text()),
            None => self.stager.staged_text().to_string(),
        }
    }

    /// The staged text without preedit.
    pub fn staged_text(&self) -> &str {
        self.stager.staged_text()
    }

    /// The field's mirror of the parent-committed value.
    pub fn committed_value(&self) -> &str {
        self.stager.committed_text()
    }

    /// The current filtered option list, in display order.
    pub fn filtered_options(&self) -> &[SelectOption] {
        &self.filtered
    }

    /// Whether the panel is open.
    pub fn is_open(&self) -> bool {
        self.panel.is_open()
    }

    /// Whether the open panel is showing the empty "no matches" state.
    pub fn shows_no_matches(&self) -> bool {
        self.panel.is_open() && self.filtered.is_empty()
    }

    /// The highlighted filtered-list index, or -1.
    pub fn active_index(&self) -> i32 {
        self.navigator.active_index()
    }

    /// The hovered filtered-list index, or -1.
    pub fn hovered_index(&self) -> i32 {
        self.navigator.hovered_index()
    }

    /// The range of filtered-list indices the panel should render.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        self.navigator.visible_range()
    }

    /// The panel's placement; meaningful only while open.
    pub fn panel_geometry(&self) -> PanelGeometry {
        self.panel.geometry()
    }

    /// The field label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The placeholder text, if any.
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// The validation error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Render-agnostic accessibility snapshot of the field.
    pub fn accessibility(&self) -> AccessibilitySnapshot {
        let active = self.navigator.active_index();
        AccessibilitySnapshot {
            input: AccessibleInput {
                role: AccessibleRole::ComboBox,
                expanded: self.panel.is_open(),
                controls: self.listbox_id.clone(),
                label: self.label.clone(),
            },
            listbox_id: self.listbox_id.clone(),
            listbox_role: AccessibleRole::ListBox,
            options: self
                .filtered
                .iter()
                .enumerate()
                .map(|(index, option)| AccessibleOption {
                    role: AccessibleRole::Option,
                    label: option.label.clone(),
                    selected: active == index as i32,
                })
                .collect(),
        }
    }

    // ------------------------------------------------------------------------
    // Event handling
    // ------------------------------------------------------------------------

    /// Feed one host event through the field.
    ///
    /// Returns true when the event was consumed; the host should then stop
    /// propagating it (for key presses, prevent the default action).
    #[tracing::instrument(skip_all, target = "sift_select::field", level = "trace")]
    pub fn handle_event(&mut self, event: FieldEvent, env: &mut dyn Environment) -> bool {
        match event {
            FieldEvent::FocusIn => {
                self.blur_pending = false;
                self.stager.set_focused(true);
                if !self.stager.staged_text().is_empty() {
                    self.open_panel(env);
                }
                true
            }
            FieldEvent::FocusOut => {
                if self.pending_selection.is_some() {
                    // The blur belongs to an option press; it is recorded
                    // here and completed when the press resolves, whether
                    // the click lands or the panel closes without it.
                    self.blur_pending = true;
                    return true;
                }
                self.stager.set_focused(false);
                if self.panel.is_open() {
                    self.close_panel(env);
                }
                self.resolve_blur_text(env);
                true
            }
            FieldEvent::TextEdited(text) => {
                self.staged_text_changed(&text, env);
                true
            }
            FieldEvent::KeyPress(press) => self.handle_key(press, env),
            FieldEvent::Ime(ime) => {
                self.handle_ime(&ime, env);
                true
            }
            FieldEvent::OptionPressed(index) => {
                if self.panel.is_open() && index < self.filtered.len() {
                    self.pending_selection = Some(index);
                }
                true
            }
            FieldEvent::OptionClicked(index) => {
                if !self.panel.is_open() {
                    return false;
                }
                self.commit_option(index, env);
                true
            }
            FieldEvent::OptionHovered(index) => {
                self.navigator.hover(index);
                true
            }
            FieldEvent::GlobalPointerDown(point) => {
                if self.panel.is_outside_press(point, env.anchor_rect()) {
                    tracing::debug!(target: "sift_select::field", "outside press, dismissing");
                    self.close_panel(env);
                    true
                } else {
                    false
                }
            }
            FieldEvent::ViewportChanged => {
                if !self.panel.is_open() {
                    return false;
                }
                self.panel
                    .reposition(env.anchor_rect(), env.viewport_rect(), self.visible_row_count());
                true
            }
            FieldEvent::Timer(id) => {
                if self.debounce_timer != Some(id) {
                    return false;
                }
                self.debounce_timer = None;
                if let Some(text) = self.stager.debounce_fired() {
                    tracing::trace!(target: "sift_select::field", text = %text, "debounce elapsed");
                    self.value_changed.emit(text);
                }
                true
            }
        }
    }

    /// Release everything held through the environment.
    ///
    /// Call when the host unmounts the field: the debounce timer stops, any
    /// watchers detach, and the panel closes without emitting signals.
    pub fn dismount(&mut self, env: &mut dyn Environment) {
        if let Some(id) = self.debounce_timer.take() {
            env.stop_timer(id);
        }
        if self.panel.is_open() {
            self.panel.close();
            self.navigator.close();
            env.unwatch_pointer_down();
            env.unwatch_viewport();
        }
        self.pending_selection = None;
        self.blur_pending = false;
        self.composition_baseline = None;
        self.guard.reset();
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn refilter(&mut self) {
        self.filtered = self.filter.filter(&self.options, self.stager.staged_text());
    }

    /// Rows the panel sizes for; an empty list still shows one row.
    fn visible_row_count(&self) -> usize {
        self.filtered
            .len()
            .clamp(1, self.navigator.max_visible_items())
    }

    fn open_panel(&mut self, env: &mut dyn Environment) {
        if self.panel.is_open() {
            return;
        }
        self.refilter();
        self.navigator.open(self.filtered.len());
        self.panel
            .open_at(env.anchor_rect(), env.viewport_rect(), self.visible_row_count());
        env.watch_pointer_down();
        env.watch_viewport();
        tracing::debug!(
            target: "sift_select::field",
            options = self.filtered.len(),
            "panel opened"
        );
        self.opened.emit(());
        self.emit_highlighted();
    }

    fn close_panel(&mut self, env: &mut dyn Environment) {
        if !self.panel.is_open() {
            return;
        }
        self.panel.close();
        self.navigator.close();
        self.pending_selection = None;
        env.unwatch_pointer_down();
        env.unwatch_viewport();
        self.closed.emit(());
        // A press that never produced its click is abandoned once the
        // panel goes away; any blur it held back runs now.
        self.finish_deferred_blur(false, env);
    }

    /// Apply the blur policy to the staged text.
    fn resolve_blur_text(&mut self, env: &mut dyn Environment) {
        if self.commit_on_blur && self.stager.is_dirty() {
            let staged = self.stager.staged_text().to_string();
            let (value, action) = self.stager.commit_immediate(&staged);
            self.apply_stager_action(action, env);
            self.value_changed.emit(value);
        } else {
            let action = self.stager.revert();
            self.apply_stager_action(action, env);
        }
    }

    /// Complete a blur that was held back by a pending option press.
    ///
    /// `committed` is true when the press resolved into a selection; the
    /// staged text is then already settled and only the focus flag clears.
    fn finish_deferred_blur(&mut self, committed: bool, env: &mut dyn Environment) {
        if !self.blur_pending {
            return;
        }
        self.blur_pending = false;
        self.stager.set_focused(false);
        if !committed {
            self.resolve_blur_text(env);
        }
    }

    fn emit_highlighted(&self) {
        if let Some(index) = self.navigator.commit_index() {
            self.highlighted.emit(self.filtered[index].label.clone());
        }
    }

    fn apply_stager_action(&mut self, action: StagerAction, env: &mut dyn Environment) {
        match action {
            StagerAction::None => {}
            StagerAction::RestartDebounce => {
                if let Some(id) = self.debounce_timer.take() {
                    env.stop_timer(id);
                }
                self.debounce_timer = Some(env.start_timer(self.stager.debounce()));
            }
            StagerAction::CancelDebounce => {
                if let Some(id) = self.debounce_timer.take() {
                    env.stop_timer(id);
                }
            }
        }
    }

    fn staged_text_changed(&mut self, text: &str, env: &mut dyn Environment) {
        let eligible = self.guard.allows_commit();
        let action = self.stager.text_edited(text, eligible);
        self.apply_stager_action(action, env);

        if !eligible {
            // Mid-composition edits update the display only; the filtered
            // list and the panel wait for the session to end.
            return;
        }
        self.composition_baseline = None;

        if self.panel.is_open() {
            self.refilter();
            self.navigator.list_changed(self.filtered.len());
            self.panel
                .reposition(env.anchor_rect(), env.viewport_rect(), self.visible_row_count());
            self.emit_highlighted();
        } else {
            self.open_panel(env);
        }
    }

    fn handle_ime(&mut self, ime: &ImeEvent, env: &mut dyn Environment) {
        match self.guard.handle_ime(ime) {
            Some(CompositionOutcome::PreeditChanged(_)) => {
                // Snapshot the staged text at session start; edits the host
                // forwards mid-session must not leak into the commit.
                if self.composition_baseline.is_none() {
                    self.composition_baseline = Some(self.stager.staged_text().to_string());
                }
            }
            Some(CompositionOutcome::Finished(text)) => {
                // The committed text inserts after the text as it stood
                // when the session began and then flows through the
                // ordinary typed-commit pipeline.
                let base = self
                    .composition_baseline
                    .take()
                    .unwrap_or_else(|| self.stager.staged_text().to_string());
                let full = format!("{base}{text}");
                self.staged_text_changed(&full, env);
            }
            Some(CompositionOutcome::Cancelled) => {
                if let Some(base) = self.composition_baseline.take() {
                    let _ = self.stager.text_edited(&base, false);
                }
            }
            Some(CompositionOutcome::PreeditCleared) | None => {}
        }
    }

    fn handle_key(&mut self, press: KeyPressEvent, env: &mut dyn Environment) -> bool {
        if self.guard.is_composing() {
            // The IME owns the keyboard for the duration of the session.
            return false;
        }

        match press.key {
            Key::ArrowDown => {
                if !self.panel.is_open() {
                    // Opening lands the highlight on the first option; the
                    // press itself still applies on top of that.
                    self.open_panel(env);
                }
                self.navigator.move_down();
                self.emit_highlighted();
                true
            }
            Key::ArrowUp => {
                if !self.panel.is_open() {
                    return false;
                }
                self.navigator.move_up();
                self.emit_highlighted();
                true
            }
            Key::Enter => {
                if !self.panel.is_open() {
                    return false;
                }
                // Consumed even with no valid highlight so the host does
                // not treat it as a form submit.
                if let Some(index) = self.navigator.commit_index() {
                    self.commit_option(index, env);
                }
                true
            }
            Key::Escape => {
                if !self.panel.is_open() {
                    return false;
                }
                self.close_panel(env);
                true
            }
            Key::Home => self.navigate_while_open(KeyboardNavigator::select_first),
            Key::End => self.navigate_while_open(KeyboardNavigator::select_last),
            Key::PageUp => self.navigate_while_open(KeyboardNavigator::page_up),
            Key::PageDown => self.navigate_while_open(KeyboardNavigator::page_down),
        }
    }

    fn navigate_while_open(&mut self, step: fn(&mut KeyboardNavigator)) -> bool {
        if !self.panel.is_open() {
            return false;
        }
        step(&mut self.navigator);
        self.emit_highlighted();
        true
    }

    fn commit_option(&mut self, index: usize, env: &mut dyn Environment) {
        let Some(option) = self.filtered.get(index).cloned() else {
            self.pending_selection = None;
            return;
        };
        let (value, action) = self.stager.commit_selection(&option.label, &option.value);
        self.apply_stager_action(action, env);
        self.pending_selection = None;
        self.finish_deferred_blur(true, env);
        tracing::debug!(target: "sift_select::field", value = %value, "option committed");
        self.close_panel(env);
        self.value_changed.emit(value);
    }
}

// ============================================================================
// Tests
// ============================================================================
