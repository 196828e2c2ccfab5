//! Renderer-agnostic accessibility snapshot.
//!
//! The field exposes its accessible structure as plain data; the host maps
//! it onto whatever tree its platform uses (ARIA attributes on the web,
//! platform accessibility nodes on desktop). The input carries the combobox
//! role with an expanded flag and a `controls` link to the option list; the
//! list carries the listbox role; each option carries the option role with
//! a selected flag tracking the keyboard highlight.

/// Accessible roles used by the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessibleRole {
    /// The text input (`role="combobox"`).
    ComboBox,
    /// The option list container (`role="listbox"`).
    ListBox,
    /// A single option row (`role="option"`).
    Option,
}

/// The accessible state of the text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessibleInput {
    /// Always [`AccessibleRole::ComboBox`].
    pub role: AccessibleRole,
    /// Whether the panel is open (`aria-expanded`).
    pub expanded: bool,
    /// The id of the option list this input controls (`aria-controls`).
    pub controls: String,
    /// The field label, if any.
    pub label: Option<String>,
}

/// The accessible state of one option row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessibleOption {
    /// Always [`AccessibleRole::Option`].
    pub role: AccessibleRole,
    /// The option's display label.
    pub label: String,
    /// Whether this option is the keyboard highlight (`aria-selected`).
    pub selected: bool,
}

/// A complete accessibility snapshot of the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessibilitySnapshot {
    /// The text input node.
    pub input: AccessibleInput,
    /// The id the option list renders under; matches `input.controls`.
    pub listbox_id: String,
    /// Always [`AccessibleRole::ListBox`].
    pub listbox_role: AccessibleRole,
    /// One entry per filtered option, in display order.
    pub options: Vec<AccessibleOption>,
}
