//! Searchable selection (combobox) widget for Sift.
//!
//! This crate provides [`SearchableSelectField`], a headless text input
//! with a filtered, keyboard-navigable option panel, plus the parts it is
//! assembled from:
//!
//! - **Option Model**: normalization of plain strings and value/label
//!   pairs into a deduplicated option list
//! - **Option Filter**: case-folded containment matching with exact and
//!   popular-value ranking and a result cap
//! - **Composition Guard**: IME session tracking that keeps half-composed
//!   text out of the commit pipeline
//! - **Input Stager**: staged display text with a debounced commit path
//! - **Keyboard Navigator**: clamped highlight movement with a scroll
//!   window
//! - **Floating Panel**: anchor-relative placement and outside-press
//!   dismissal
//!
//! The field is headless: it owns no input surface, paints nothing, and
//! never blocks. The host translates native input into
//! [`FieldEvent`]s, pumps them through
//! [`SearchableSelectField::handle_event`], and reads state back out to
//! render. Everything the field needs from the outside world (anchor
//! geometry, timers, global event watchers) comes through the
//! [`Environment`] trait.
//!
//! # Example
//!
//! ```
//! use sift_select::SearchableSelectField;
//!
//! let field = SearchableSelectField::new()
//!     .with_options(["Harvard University", "Stanford University", "MIT"])
//!     .with_label("School");
//!
//! field.value_changed.connect(|value: &String| {
//!     println!("committed: {value}");
//! });
//!
//! // The host drives the field with events:
//! // field.handle_event(FieldEvent::FocusIn, &mut env);
//! // field.handle_event(FieldEvent::TextEdited("Ha".into()), &mut env);
//! ```

pub mod accessibility;
pub mod composition;
pub mod environment;
pub mod events;
pub mod filter;
pub mod geometry;
pub mod navigator;
pub mod option_model;
pub mod panel;
pub mod select_field;
pub mod stager;

pub use accessibility::{
    AccessibilitySnapshot, AccessibleInput, AccessibleOption, AccessibleRole,
};
pub use composition::{CompositionGuard, CompositionOutcome};
pub use environment::Environment;
pub use events::{FieldEvent, ImeEvent, Key, KeyPressEvent, KeyboardModifiers};
pub use filter::{CaseSensitivity, OptionFilter, DEFAULT_MAX_ITEMS};
pub use geometry::{Point, Rect, Size};
pub use navigator::{KeyboardNavigator, DEFAULT_MAX_VISIBLE_ITEMS};
pub use option_model::{normalize_options, OptionInput, SelectOption};
pub use panel::{FloatingPanel, PanelGeometry, DEFAULT_ANCHOR_GAP, DEFAULT_ITEM_HEIGHT};
pub use select_field::SearchableSelectField;
pub use stager::{InputStager, StagerAction, DEFAULT_DEBOUNCE};
