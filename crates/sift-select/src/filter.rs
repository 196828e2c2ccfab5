//! Option filtering and ranking.
//!
//! [`OptionFilter`] produces the ranked, capped subset of options shown in
//! the panel for a given query. Filtering is a pure function of
//! (options, query, configuration): identical inputs give identical output
//! in identical order, with no hidden state.

use std::collections::HashSet;

use crate::option_model::SelectOption;

/// Default cap on the filtered list, sized for a large catalog.
pub const DEFAULT_MAX_ITEMS: usize = 200;

/// Controls how filter matching handles letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseSensitivity {
    /// Case-sensitive matching (e.g., "Bio" won't match "biology").
    CaseSensitive,
    /// Case-insensitive matching (e.g., "Bio" will match "biology").
    #[default]
    CaseInsensitive,
}

/// Ranked, capped filtering over a normalized option list.
///
/// # Ranking
///
/// 1. Options whose label equals the query exactly (honoring the case
///    sensitivity setting) come first.
/// 2. Options whose value is in the caller-supplied popular set come next.
/// 3. Everything else keeps its original relative order. The sort is
///    stable; ties are never reordered.
#[derive(Debug, Clone)]
pub struct OptionFilter {
    /// Maximum number of options the filter returns.
    max_items: usize,
    /// Case sensitivity for containment and exact matching.
    case_sensitivity: CaseSensitivity,
    /// Option values ranked ahead of ordinary matches.
    popular: HashSet<String>,
}

impl Default for OptionFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionFilter {
    /// Create a filter with the default cap and case-insensitive matching.
    pub fn new() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            case_sensitivity: CaseSensitivity::default(),
            popular: HashSet::new(),
        }
    }

    /// Get the cap on returned options.
    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Set the cap on returned options (minimum 1).
    pub fn set_max_items(&mut self, max_items: usize) {
        self.max_items = max_items.max(1);
    }

    /// Set the cap using builder pattern.
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.set_max_items(max_items);
        self
    }

    /// Get the case sensitivity setting.
    pub fn case_sensitivity(&self) -> CaseSensitivity {
        self.case_sensitivity
    }

    /// Set the case sensitivity for matching.
    pub fn set_case_sensitivity(&mut self, sensitivity: CaseSensitivity) {
        self.case_sensitivity = sensitivity;
    }

    /// Set case sensitivity using builder pattern.
    pub fn with_case_sensitivity(mut self, sensitivity: CaseSensitivity) -> Self {
        self.case_sensitivity = sensitivity;
        self
    }

    /// Set the popular set (by option value).
    pub fn set_popular<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.popular = values.into_iter().map(Into::into).collect();
    }

    /// Set the popular set using builder pattern.
    pub fn with_popular<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_popular(values);
        self
    }

    /// Filter and rank `options` against `query`, truncated to the cap.
    ///
    /// A trimmed-empty query returns the first `max_items` options in their
    /// original order (the "popular/default" view). Otherwise the query is
    /// tested for containment against both label and value.
    pub fn filter(&self, options: &[SelectOption], query: &str) -> Vec<SelectOption> {
        let query = query.trim();
        if query.is_empty() {
            return options.iter().take(self.max_items).cloned().collect();
        }

        let needle = self.fold_case(query);
        let mut matches: Vec<&SelectOption> = options
            .iter()
            .filter(|option| {
                self.fold_case(&option.label).contains(&needle)
                    || self.fold_case(&option.value).contains(&needle)
            })
            .collect();

        // Stable sort: exact label matches, then popular values, then
        // everything else in original order.
        matches.sort_by_key(|option| {
            if self.fold_case(&option.label) == needle {
                0
            } else if self.popular.contains(&option.value) {
                1
            } else {
                2
            }
        });

        tracing::trace!(
            target: "sift_select::filter",
            query,
            match_count = matches.len(),
            "filtered options"
        );

        matches
            .into_iter()
            .take(self.max_items)
            .cloned()
            .collect()
    }

    fn fold_case(&self, text: &str) -> String {
        match self.case_sensitivity {
            CaseSensitivity::CaseSensitive => text.to_string(),
            CaseSensitivity::CaseInsensitive => text.to_lowercase(),
        }
    }
}
