//! Keyboard navigation over the filtered option list.
//!
//! [`KeyboardNavigator`] is the closed/open state machine that maps key
//! events onto an active-option index, with a scroll window so long lists
//! stay navigable. The active index is clamped at both ends (it never
//! wraps) and never leaves `[-1, len - 1]`; `-1` means nothing is
//! highlighted, which is forced whenever the filtered list is empty.
//!
//! Hover is tracked separately from the active index: pointer movement
//! never disturbs the keyboard highlight.

/// Default number of options visible in the panel without scrolling.
pub const DEFAULT_MAX_VISIBLE_ITEMS: usize = 7;

/// Closed/open state machine tracking the highlighted option.
#[derive(Debug)]
pub struct KeyboardNavigator {
    /// Whether the panel is open.
    open: bool,
    /// Length of the current filtered list.
    len: usize,
    /// Highlighted index (-1 means no highlight).
    active_index: i32,
    /// Hovered index (-1 means no hover); independent of the highlight.
    hovered_index: i32,
    /// Maximum number of visible items before scrolling.
    max_visible_items: usize,
    /// Scroll offset of the visible window.
    scroll_offset: usize,
}

impl Default for KeyboardNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardNavigator {
    /// Create a closed navigator over an empty list.
    pub fn new() -> Self {
        Self {
            open: false,
            len: 0,
            active_index: -1,
            hovered_index: -1,
            max_visible_items: DEFAULT_MAX_VISIBLE_ITEMS,
            scroll_offset: 0,
        }
    }

    /// Set the visible window size using builder pattern.
    pub fn with_max_visible_items(mut self, count: usize) -> Self {
        self.max_visible_items = count.max(1);
        self
    }

    /// The visible window size.
    pub fn max_visible_items(&self) -> usize {
        self.max_visible_items
    }

    /// Set the visible window size (minimum 1).
    pub fn set_max_visible_items(&mut self, count: usize) {
        self.max_visible_items = count.max(1);
    }

    /// Whether the panel is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The highlighted index, or -1.
    pub fn active_index(&self) -> i32 {
        self.active_index
    }

    /// The hovered index, or -1.
    pub fn hovered_index(&self) -> i32 {
        self.hovered_index
    }

    /// The scroll offset of the visible window.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// The range of filtered-list indices currently visible.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let start = self.scroll_offset;
        let end = (start + self.max_visible_items).min(self.len);
        start..end
    }

    /// Open over a filtered list of `len` options.
    ///
    /// The highlight resets to the first option, or to none for an empty
    /// list.
    pub fn open(&mut self, len: usize) {
        self.open = true;
        self.len = len;
        self.active_index = if len == 0 { -1 } else { 0 };
        self.scroll_offset = 0;
    }

    /// Close the panel; the highlight and hover are cleared.
    pub fn close(&mut self) {
        self.open = false;
        self.active_index = -1;
        self.hovered_index = -1;
        self.scroll_offset = 0;
    }

    /// The filtered list changed while open (typing).
    ///
    /// The highlight resets to the first option (or none when empty); the
    /// scroll window rewinds.
    pub fn list_changed(&mut self, len: usize) {
        self.len = len;
        self.active_index = if len == 0 { -1 } else { 0 };
        self.hovered_index = self.hovered_index.min(len as i32 - 1);
        self.scroll_offset = 0;
    }

    /// Move the highlight down one option, clamping at the end.
    pub fn move_down(&mut self) {
        if !self.open || self.len == 0 {
            return;
        }
        self.active_index = (self.active_index + 1).min(self.len as i32 - 1);
        self.ensure_active_visible();
    }

    /// Move the highlight up one option, clamping at the start.
    pub fn move_up(&mut self) {
        if !self.open || self.len == 0 {
            return;
        }
        self.active_index = (self.active_index - 1).max(0);
        self.ensure_active_visible();
    }

    /// Move the highlight up one visible page.
    pub fn page_up(&mut self) {
        if !self.open || self.len == 0 {
            return;
        }
        let page = self.max_visible_items as i32;
        self.active_index = (self.active_index - page).max(0);
        self.ensure_active_visible();
    }

    /// Move the highlight down one visible page.
    pub fn page_down(&mut self) {
        if !self.open || self.len == 0 {
            return;
        }
        let page = self.max_visible_items as i32;
        self.active_index = (self.active_index + page).min(self.len as i32 - 1);
        self.ensure_active_visible();
    }

    /// Highlight the first option.
    pub fn select_first(&mut self) {
        if !self.open || self.len == 0 {
            return;
        }
        self.active_index = 0;
        self.scroll_offset = 0;
    }

    /// Highlight the last option.
    pub fn select_last(&mut self) {
        if !self.open || self.len == 0 {
            return;
        }
        self.active_index = self.len as i32 - 1;
        self.ensure_active_visible();
    }

    /// Record a hover over the option at `index`.
    ///
    /// Hover never touches the active index.
    pub fn hover(&mut self, index: usize) {
        if index < self.len {
            self.hovered_index = index as i32;
        } else {
            self.hovered_index = -1;
        }
    }

    /// The index a commit (Enter) would apply to, if valid.
    pub fn commit_index(&self) -> Option<usize> {
        if !self.open || self.active_index < 0 {
            return None;
        }
        let idx = self.active_index as usize;
        (idx < self.len).then_some(idx)
    }

    /// Scroll the visible window so the highlight stays in view.
    fn ensure_active_visible(&mut self) {
        if self.active_index < 0 {
            return;
        }

        let idx = self.active_index as usize;
        if idx < self.scroll_offset {
            self.scroll_offset = idx;
        } else if idx >= self.scroll_offset + self.max_visible_items {
            self.scroll_offset = idx - self.max_visible_items + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_highlights_first() {
        let mut nav = KeyboardNavigator::new();
        nav.open(3);
        assert!(nav.is_open());
        assert_eq!(nav.active_index(), 0);
    }

    #[test]
    fn test_open_empty_list_has_no_highlight() {
        let mut nav = KeyboardNavigator::new();
        nav.open(0);
        assert_eq!(nav.active_index(), -1);
        assert_eq!(nav.commit_index(), None);
    }

    #[test]
    fn test_move_down_clamps_at_end() {
        let mut nav = KeyboardNavigator::new();
        nav.open(3);
        // Start from no highlight, as after a hover-only interaction.
        nav.active_index = -1;

        for _ in 0..5 {
            nav.move_down();
        }
        assert_eq!(nav.active_index(), 2);
    }

    #[test]
    fn test_move_up_clamps_at_start() {
        let mut nav = KeyboardNavigator::new();
        nav.open(3);
        nav.move_up();
        nav.move_up();
        assert_eq!(nav.active_index(), 0);
    }

    #[test]
    fn test_index_bound_invariant() {
        let mut nav = KeyboardNavigator::new();
        nav.open(4);

        let moves: [fn(&mut KeyboardNavigator); 8] = [
            KeyboardNavigator::move_down,
            KeyboardNavigator::move_down,
            KeyboardNavigator::move_up,
            KeyboardNavigator::page_down,
            KeyboardNavigator::page_up,
            KeyboardNavigator::select_last,
            KeyboardNavigator::move_down,
            KeyboardNavigator::move_up,
        ];

        for step in moves {
            step(&mut nav);
            assert!(nav.active_index() >= -1);
            assert!(nav.active_index() < 4);
        }
    }

    #[test]
    fn test_list_changed_resets_highlight() {
        let mut nav = KeyboardNavigator::new();
        nav.open(5);
        nav.move_down();
        nav.move_down();

        nav.list_changed(2);
        assert_eq!(nav.active_index(), 0);

        nav.list_changed(0);
        assert_eq!(nav.active_index(), -1);
        assert_eq!(nav.commit_index(), None);
    }

    #[test]
    fn test_hover_preserves_highlight() {
        let mut nav = KeyboardNavigator::new();
        nav.open(5);
        nav.move_down();

        nav.hover(4);

        assert_eq!(nav.active_index(), 1);
        assert_eq!(nav.hovered_index(), 4);
    }

    #[test]
    fn test_close_clears_state() {
        let mut nav = KeyboardNavigator::new();
        nav.open(3);
        nav.move_down();
        nav.hover(2);

        nav.close();

        assert!(!nav.is_open());
        assert_eq!(nav.active_index(), -1);
        assert_eq!(nav.hovered_index(), -1);
    }

    #[test]
    fn test_scroll_window_follows_highlight() {
        let mut nav = KeyboardNavigator::new().with_max_visible_items(3);
        nav.open(10);

        for _ in 0..5 {
            nav.move_down();
        }

        assert_eq!(nav.active_index(), 5);
        assert_eq!(nav.scroll_offset(), 3); // 5 - 3 + 1
        assert_eq!(nav.visible_range(), 3..6);

        nav.select_first();
        assert_eq!(nav.scroll_offset(), 0);
    }

    #[test]
    fn test_page_navigation() {
        let mut nav = KeyboardNavigator::new().with_max_visible_items(4);
        nav.open(10);

        nav.page_down();
        assert_eq!(nav.active_index(), 4);
        nav.page_down();
        assert_eq!(nav.active_index(), 8);
        nav.page_down();
        assert_eq!(nav.active_index(), 9);
        nav.page_up();
        assert_eq!(nav.active_index(), 5);
    }

    #[test]
    fn test_select_last() {
        let mut nav = KeyboardNavigator::new().with_max_visible_items(3);
        nav.open(8);
        nav.select_last();
        assert_eq!(nav.active_index(), 7);
        assert_eq!(nav.visible_range(), 5..8);
    }
}
