//! Option list normalization.
//!
//! Callers supply options either as plain strings or as explicit
//! value/label pairs. Normalization happens once at the boundary; past it,
//! everything in the pipeline works with uniform [`SelectOption`] records
//! and never branches on input shape.

/// A single selectable option with a stable value and a display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// The committed value; unique within one options list.
    pub value: String,
    /// The text shown to the user.
    pub label: String,
}

impl SelectOption {
    /// Create an option with distinct value and label.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Create an option whose value and label are the same string.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            value: text.clone(),
            label: text,
        }
    }
}

/// Caller-facing option input: a plain string or a value/label pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionInput {
    /// A bare string; value and label are both this string.
    Plain(String),
    /// An explicit value/label pair.
    Pair {
        /// The committed value.
        value: String,
        /// The display label.
        label: String,
    },
}

impl From<&str> for OptionInput {
    fn from(text: &str) -> Self {
        Self::Plain(text.to_string())
    }
}

impl From<String> for OptionInput {
    fn from(text: String) -> Self {
        Self::Plain(text)
    }
}

impl From<(&str, &str)> for OptionInput {
    fn from((value, label): (&str, &str)) -> Self {
        Self::Pair {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

impl From<(String, String)> for OptionInput {
    fn from((value, label): (String, String)) -> Self {
        Self::Pair { value, label }
    }
}

impl From<SelectOption> for OptionInput {
    fn from(option: SelectOption) -> Self {
        Self::Pair {
            value: option.value,
            label: option.label,
        }
    }
}

impl OptionInput {
    fn into_option(self) -> SelectOption {
        match self {
            Self::Plain(text) => SelectOption::plain(text),
            Self::Pair { value, label } => SelectOption { value, label },
        }
    }
}

/// Normalize a heterogeneous option list into uniform [`SelectOption`]s.
///
/// Pure and total; never fails. Order is preserved, which matters for
/// tie-breaking in the filter. Duplicate values are resolved last-wins: the
/// later entry's label overwrites the earlier entry in place, keeping the
/// first occurrence's position so downstream ordering stays stable.
pub fn normalize_options<I>(inputs: I) -> Vec<SelectOption>
where
    I: IntoIterator,
    I::Item: Into<OptionInput>,
{
    let mut options: Vec<SelectOption> = Vec::new();

    for input in inputs {
        let option = input.into().into_option();
        match options.iter_mut().find(|o| o.value == option.value) {
            Some(existing) => *existing = option,
            None => options.push(option),
        }
    }

    options
}
