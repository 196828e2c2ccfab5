//! Host environment capability.
//!
//! The field never touches a real DOM or window directly. Everything it
//! needs from the outside world — the anchor's bounding box, the viewport,
//! a global pointer-down watcher, scroll/resize notifications, and timers —
//! goes through this trait, so the component is unit-testable without a
//! real display and any GUI target (web, desktop toolkit, terminal) can
//! supply its own implementation.
//!
//! The watch methods are subscriptions, not callbacks: while watched, the
//! host translates the corresponding native events into
//! [`FieldEvent::GlobalPointerDown`] / [`FieldEvent::ViewportChanged`] /
//! [`FieldEvent::Timer`] and feeds them back into the field. The field
//! guarantees every watch it takes out is released on close and on
//! dismount.
//!
//! [`FieldEvent::GlobalPointerDown`]: crate::events::FieldEvent::GlobalPointerDown
//! [`FieldEvent::ViewportChanged`]: crate::events::FieldEvent::ViewportChanged
//! [`FieldEvent::Timer`]: crate::events::FieldEvent::Timer

use std::time::Duration;

use sift_core::TimerId;

use crate::geometry::Rect;

/// Capabilities the host supplies to a [`SearchableSelectField`].
///
/// [`SearchableSelectField`]: crate::SearchableSelectField
pub trait Environment {
    /// The anchor element's bounding box in viewport coordinates.
    ///
    /// Returns `None` when the anchor is detached (unmounted by a parent
    /// re-render); callers must treat that as "keep the last geometry",
    /// never as an error.
    fn anchor_rect(&self) -> Option<Rect>;

    /// The viewport's bounds in its own coordinate space.
    fn viewport_rect(&self) -> Rect;

    /// Start a one-shot timer; the host reports expiry through
    /// [`FieldEvent::Timer`](crate::events::FieldEvent::Timer).
    fn start_timer(&mut self, duration: Duration) -> TimerId;

    /// Stop a timer. Stopping an already-fired or unknown timer is a no-op.
    fn stop_timer(&mut self, id: TimerId);

    /// Begin delivering global pointer-down events.
    fn watch_pointer_down(&mut self);

    /// Stop delivering global pointer-down events.
    fn unwatch_pointer_down(&mut self);

    /// Begin delivering viewport scroll/resize events.
    fn watch_viewport(&mut self);

    /// Stop delivering viewport scroll/resize events.
    fn unwatch_viewport(&mut self);
}
