//! Input event types for the searchable select field.
//!
//! The field is headless: the host owns the real input surface (a DOM node,
//! a toolkit text widget, a terminal cell row) and translates its native
//! events into [`FieldEvent`]s. Text editing itself stays with the host;
//! the field receives the full staged text after each edit rather than
//! individual insertions.

use sift_core::TimerId;

use crate::geometry::Point;

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// The navigation and commit keys the field responds to.
///
/// Printable input never arrives as a `Key`; it arrives as
/// [`FieldEvent::TextEdited`] with the updated staged text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move the highlight down.
    ArrowDown,
    /// Move the highlight up.
    ArrowUp,
    /// Commit the highlighted option.
    Enter,
    /// Close the panel without committing.
    Escape,
    /// Jump to the first option.
    Home,
    /// Jump to the last option.
    End,
    /// Move the highlight up by one page.
    PageUp,
    /// Move the highlight down by one page.
    PageDown,
}

/// A key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPressEvent {
    /// The pressed key.
    pub key: Key,
    /// Modifiers held during the press.
    pub modifiers: KeyboardModifiers,
}

impl KeyPressEvent {
    /// Create a key press event with no modifiers.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// Create a key press event with modifiers.
    pub fn with_modifiers(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self { key, modifiers }
    }
}

/// An IME composition event.
///
/// Composition sessions (Chinese, Japanese, Korean input methods, and dead
/// keys for accented characters) are bounded by the first non-empty
/// `Preedit` and a final `Commit`. Intermediate preedit text is displayed
/// but never committed to the parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImeEvent {
    /// IME was enabled for the focused field.
    Enabled,
    /// Preedit (composition) text update.
    Preedit {
        /// The preedit text. Empty string means the preedit was cleared.
        text: String,
        /// Cursor position within the preedit text as byte indices.
        cursor: Option<(usize, usize)>,
    },
    /// Text was committed (composition finalized).
    Commit(String),
    /// IME was disabled; any composition is abandoned.
    Disabled,
}

/// Everything the host can feed into a [`SearchableSelectField`].
///
/// [`SearchableSelectField`]: crate::SearchableSelectField
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    /// The input element gained focus.
    FocusIn,
    /// The input element lost focus.
    ///
    /// The host must deliver any option pointer-down *before* the focus-out
    /// it provokes, matching native event order.
    FocusOut,
    /// The staged text was edited; carries the full new text.
    TextEdited(String),
    /// A navigation or commit key was pressed.
    KeyPress(KeyPressEvent),
    /// An IME composition event.
    Ime(ImeEvent),
    /// Pointer went down on the option at the given filtered-list index.
    ///
    /// This marks the selection as pending; the matching
    /// [`OptionClicked`](Self::OptionClicked) completes it.
    OptionPressed(usize),
    /// Click completed on the option at the given filtered-list index.
    OptionClicked(usize),
    /// Pointer moved over the option at the given filtered-list index.
    OptionHovered(usize),
    /// The global pointer-down watcher observed a press at this viewport
    /// position. Only delivered while the watcher is attached (panel open).
    GlobalPointerDown(Point),
    /// The viewport scrolled or resized while the panel was open.
    ViewportChanged,
    /// A timer started through the environment fired.
    Timer(TimerId),
}
