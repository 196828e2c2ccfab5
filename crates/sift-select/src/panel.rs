//! Anchor-relative floating panel geometry.
//!
//! The option list renders in a top-level layer, outside the anchor's
//! ancestor clipping and transform contexts, so its position is computed in
//! viewport coordinates from the anchor's bounding box: directly below the
//! anchor with a fixed gap, left-aligned, matching the anchor's width. The
//! panel may overflow the bottom of the viewport; horizontal clamping into
//! the viewport is available behind a switch.
//!
//! While open, a single global pointer-down watcher decides dismissal: a
//! press outside both the anchor and the panel closes it. The hit test
//! lives here; attaching and detaching the watcher is the field's job.

use crate::geometry::{Point, Rect};

/// Vertical gap between the anchor's bottom edge and the panel.
pub const DEFAULT_ANCHOR_GAP: f32 = 4.0;

/// Default height of one option row.
pub const DEFAULT_ITEM_HEIGHT: f32 = 24.0;

/// Computed panel placement in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanelGeometry {
    /// Top edge.
    pub top: f32,
    /// Left edge.
    pub left: f32,
    /// Width (matches the anchor).
    pub width: f32,
    /// Height (derived from the visible row count).
    pub height: f32,
}

impl PanelGeometry {
    /// The geometry as a rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.width, self.height)
    }
}

/// Floating panel state: openness plus anchor-derived geometry.
#[derive(Debug)]
pub struct FloatingPanel {
    /// Whether the panel is open.
    open: bool,
    /// Current placement; meaningful only while open.
    geometry: PanelGeometry,
    /// Gap below the anchor.
    gap: f32,
    /// Height of one option row.
    item_height: f32,
    /// Keep the panel inside the viewport's horizontal bounds.
    clamp_to_viewport: bool,
}

impl Default for FloatingPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl FloatingPanel {
    /// Create a closed panel with default metrics.
    pub fn new() -> Self {
        Self {
            open: false,
            geometry: PanelGeometry::default(),
            gap: DEFAULT_ANCHOR_GAP,
            item_height: DEFAULT_ITEM_HEIGHT,
            clamp_to_viewport: false,
        }
    }

    /// Enable horizontal viewport clamping using builder pattern.
    pub fn with_clamp_to_viewport(mut self, clamp: bool) -> Self {
        self.clamp_to_viewport = clamp;
        self
    }

    /// Set horizontal viewport clamping.
    pub fn set_clamp_to_viewport(&mut self, clamp: bool) {
        self.clamp_to_viewport = clamp;
    }

    /// Set the row height (minimum 1).
    pub fn set_item_height(&mut self, height: f32) {
        self.item_height = height.max(1.0);
    }

    /// Set the anchor gap.
    pub fn set_gap(&mut self, gap: f32) {
        self.gap = gap;
    }

    /// Whether the panel is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Current placement; meaningful only while open.
    pub fn geometry(&self) -> PanelGeometry {
        self.geometry
    }

    /// Open against the anchor, sizing for `row_count` visible rows.
    ///
    /// An empty list still opens one row tall (the "no matches" row). A
    /// detached anchor (`None` bounding box) opens the panel with its last
    /// geometry; the next reposition with a live anchor will correct it.
    pub fn open_at(&mut self, anchor: Option<Rect>, viewport: Rect, row_count: usize) {
        self.open = true;
        if let Some(anchor) = anchor {
            self.geometry = self.compute_geometry(anchor, viewport, row_count);
        }
        tracing::trace!(
            target: "sift_select::panel",
            top = self.geometry.top,
            left = self.geometry.left,
            width = self.geometry.width,
            "panel opened"
        );
    }

    /// Recompute placement while open (scroll, resize, list change).
    ///
    /// A detached anchor (`None` bounding box: the anchor unmounted while
    /// the panel was open) is absorbed as a no-op; the panel keeps its last
    /// geometry until closed.
    pub fn reposition(&mut self, anchor: Option<Rect>, viewport: Rect, row_count: usize) {
        if !self.open {
            return;
        }
        let Some(anchor) = anchor else {
            tracing::trace!(target: "sift_select::panel", "anchor detached, keeping geometry");
            return;
        };
        self.geometry = self.compute_geometry(anchor, viewport, row_count);
    }

    /// Close the panel.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Whether a global press at `point` should dismiss the panel.
    ///
    /// True when the press lands outside both the anchor and the panel.
    /// With no anchor rect available, only the panel shields the press.
    pub fn is_outside_press(&self, point: Point, anchor: Option<Rect>) -> bool {
        if !self.open {
            return false;
        }
        let in_anchor = anchor.is_some_and(|rect| rect.contains(point));
        let in_panel = self.geometry.rect().contains(point);
        !in_anchor && !in_panel
    }

    fn compute_geometry(&self, anchor: Rect, viewport: Rect, row_count: usize) -> PanelGeometry {
        let height = row_count.max(1) as f32 * self.item_height + 2.0; // +2 for border
        let mut left = anchor.left();
        let width = anchor.width();

        if self.clamp_to_viewport {
            if left + width > viewport.right() {
                left = viewport.right() - width;
            }
            if left < viewport.left() {
                left = viewport.left();
            }
        }

        PanelGeometry {
            top: anchor.bottom() + self.gap,
            left,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 800.0, 600.0)
    }

    #[test]
    fn test_opens_below_anchor() {
        let mut panel = FloatingPanel::new();
        let anchor = Rect::new(100.0, 50.0, 200.0, 30.0);

        panel.open_at(Some(anchor), viewport(), 3);

        let geom = panel.geometry();
        assert_eq!(geom.top, 80.0 + DEFAULT_ANCHOR_GAP);
        assert_eq!(geom.left, 100.0);
        assert_eq!(geom.width, 200.0);
        assert_eq!(geom.height, 3.0 * DEFAULT_ITEM_HEIGHT + 2.0);
    }

    #[test]
    fn test_empty_list_is_one_row_tall() {
        let mut panel = FloatingPanel::new();
        panel.open_at(Some(Rect::new(0.0, 0.0, 100.0, 30.0)), viewport(), 0);
        assert_eq!(panel.geometry().height, DEFAULT_ITEM_HEIGHT + 2.0);
    }

    #[test]
    fn test_reposition_tracks_anchor() {
        let mut panel = FloatingPanel::new();
        panel.open_at(Some(Rect::new(0.0, 0.0, 100.0, 30.0)), viewport(), 2);

        // Anchor moved up by a scroll.
        panel.reposition(Some(Rect::new(0.0, -20.0, 100.0, 30.0)), viewport(), 2);

        assert_eq!(panel.geometry().top, 10.0 + DEFAULT_ANCHOR_GAP);
    }

    #[test]
    fn test_detached_anchor_keeps_geometry() {
        let mut panel = FloatingPanel::new();
        panel.open_at(Some(Rect::new(10.0, 10.0, 100.0, 30.0)), viewport(), 2);
        let before = panel.geometry();

        panel.reposition(None, viewport(), 2);

        assert_eq!(panel.geometry(), before);
        assert!(panel.is_open());
    }

    #[test]
    fn test_no_horizontal_clamp_by_default() {
        let mut panel = FloatingPanel::new();
        panel.open_at(Some(Rect::new(750.0, 0.0, 200.0, 30.0)), viewport(), 1);
        assert_eq!(panel.geometry().left, 750.0);
    }

    #[test]
    fn test_horizontal_clamp_when_enabled() {
        let mut panel = FloatingPanel::new().with_clamp_to_viewport(true);
        panel.open_at(Some(Rect::new(750.0, 0.0, 200.0, 30.0)), viewport(), 1);
        assert_eq!(panel.geometry().left, 600.0);

        panel.reposition(Some(Rect::new(-50.0, 0.0, 200.0, 30.0)), viewport(), 1);
        assert_eq!(panel.geometry().left, 0.0);
    }

    #[test]
    fn test_outside_press_detection() {
        let mut panel = FloatingPanel::new();
        let anchor = Rect::new(100.0, 50.0, 200.0, 30.0);
        panel.open_at(Some(anchor), viewport(), 2);

        // Inside the anchor.
        assert!(!panel.is_outside_press(Point::new(150.0, 60.0), Some(anchor)));
        // Inside the panel.
        let geom = panel.geometry();
        assert!(!panel.is_outside_press(
            Point::new(geom.left + 5.0, geom.top + 5.0),
            Some(anchor)
        ));
        // Outside both.
        assert!(panel.is_outside_press(Point::new(700.0, 500.0), Some(anchor)));
    }

    #[test]
    fn test_closed_panel_never_dismisses() {
        let panel = FloatingPanel::new();
        assert!(!panel.is_outside_press(Point::new(0.0, 0.0), None));
    }
}
