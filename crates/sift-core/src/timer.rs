//! Timer system for Sift.
//!
//! Provides one-shot and repeating timers for a host-pumped loop. Sift has
//! no event loop of its own, so the host asks [`TimerManager::time_until_next`]
//! how long it may sleep and calls [`TimerManager::process_expired`] to
//! collect the timers that have fired, feeding each fired id back into the
//! widget that owns it.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, TimerError};

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// The type of timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Fires once after the specified duration.
    OneShot,
    /// Fires repeatedly at the specified interval.
    Repeating,
}

/// Internal timer data.
#[derive(Debug)]
struct TimerData {
    /// When this timer should next fire.
    next_fire: Instant,
    /// The interval for repeating timers.
    interval: Duration,
    /// The kind of timer.
    kind: TimerKind,
    /// Whether this timer is active.
    active: bool,
}

/// An entry in the timer queue (min-heap by fire time).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Instant,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other.fire_time.cmp(&self.fire_time)
    }
}

/// Manages all timers for a host-pumped loop.
pub struct TimerManager {
    /// All registered timers.
    timers: SlotMap<TimerId, TimerData>,
    /// Priority queue of pending timer fires (min-heap by fire time).
    queue: BinaryHeap<TimerQueueEntry>,
}

impl TimerManager {
    /// Create a new timer manager.
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
        }
    }

    /// Start a one-shot timer that fires after the specified duration.
    ///
    /// Returns the timer ID that can be used to cancel the timer.
    pub fn start_one_shot(&mut self, duration: Duration) -> TimerId {
        let now = Instant::now();
        let next_fire = now + duration;

        let data = TimerData {
            next_fire,
            interval: duration,
            kind: TimerKind::OneShot,
            active: true,
        };

        let id = self.timers.insert(data);
        self.queue.push(TimerQueueEntry {
            id,
            fire_time: next_fire,
        });

        id
    }

    /// Start a repeating timer that fires at the specified interval.
    ///
    /// The first fire occurs after `interval` duration.
    /// Returns the timer ID that can be used to cancel the timer.
    pub fn start_repeating(&mut self, interval: Duration) -> TimerId {
        let now = Instant::now();
        let next_fire = now + interval;

        let data = TimerData {
            next_fire,
            interval,
            kind: TimerKind::Repeating,
            active: true,
        };

        let id = self.timers.insert(data);
        self.queue.push(TimerQueueEntry {
            id,
            fire_time: next_fire,
        });

        id
    }

    /// Stop and remove a timer.
    ///
    /// Returns `Ok(())` if the timer was found and removed, or an error if not found.
    pub fn stop(&mut self, id: TimerId) -> Result<()> {
        if let Some(timer) = self.timers.get_mut(id) {
            timer.active = false;
            self.timers.remove(id);
            Ok(())
        } else {
            Err(TimerError::InvalidTimerId.into())
        }
    }

    /// Check if a timer is currently active.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.get(id).is_some_and(|t| t.active)
    }

    /// Get the duration until the next timer fires, if any.
    ///
    /// Returns `None` if there are no active timers.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        // Clean up any inactive timers from the front of the queue.
        while let Some(entry) = self.queue.peek() {
            if !self.timers.get(entry.id).is_some_and(|t| t.active) {
                self.queue.pop();
            } else {
                break;
            }
        }

        self.queue.peek().map(|entry| {
            let now = Instant::now();
            if entry.fire_time > now {
                entry.fire_time - now
            } else {
                Duration::ZERO
            }
        })
    }

    /// Process all timers that should fire now.
    ///
    /// Returns the ids of the timers that fired, in fire order. The host
    /// routes each id back to the widget that started it.
    #[tracing::instrument(skip(self), target = "sift_core::timer", level = "trace")]
    pub fn process_expired(&mut self) -> Vec<TimerId> {
        self.process_expired_at(Instant::now())
    }

    /// Process all timers whose fire time is at or before `now`.
    ///
    /// Separated from [`process_expired`](Self::process_expired) so tests can
    /// drive time explicitly instead of sleeping.
    pub fn process_expired_at(&mut self, now: Instant) -> Vec<TimerId> {
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek() {
            // Check if this timer should fire.
            if entry.fire_time > now {
                break;
            }

            let entry = self.queue.pop().expect("peek returned Some");
            let id = entry.id;

            // Check if timer is still active.
            let Some(timer) = self.timers.get_mut(id) else {
                continue;
            };

            if !timer.active {
                continue;
            }

            // A stale queue entry from an earlier reschedule of the same id.
            if timer.next_fire != entry.fire_time {
                continue;
            }

            // Timer has fired.
            tracing::trace!(target: "sift_core::timer", ?id, "timer fired");
            fired.push(id);

            match timer.kind {
                TimerKind::OneShot => {
                    // One-shot timers are removed after firing.
                    timer.active = false;
                    self.timers.remove(id);
                }
                TimerKind::Repeating => {
                    // Schedule the next fire.
                    timer.next_fire = now + timer.interval;
                    self.queue.push(TimerQueueEntry {
                        id,
                        fire_time: timer.next_fire,
                    });
                }
            }
        }

        fired
    }

    /// Get the number of active timers.
    pub fn active_count(&self) -> usize {
        self.timers.iter().filter(|(_, t)| t.active).count()
    }
}

impl Default for TimerManager {
    fn default() -> Self {
        Self::new()
    }
}

/// A thread-safe wrapper around `TimerManager` for hosts that pump timers
/// from one thread while widgets start and stop them from another.
pub struct SharedTimerManager {
    inner: Mutex<TimerManager>,
}

impl SharedTimerManager {
    /// Create a new shared timer manager.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(TimerManager::new()),
        }
    }

    /// See [`TimerManager::start_one_shot`].
    pub fn start_one_shot(&self, duration: Duration) -> TimerId {
        self.inner.lock().start_one_shot(duration)
    }

    /// See [`TimerManager::start_repeating`].
    pub fn start_repeating(&self, interval: Duration) -> TimerId {
        self.inner.lock().start_repeating(interval)
    }

    /// See [`TimerManager::stop`].
    pub fn stop(&self, id: TimerId) -> Result<()> {
        self.inner.lock().stop(id)
    }

    /// See [`TimerManager::is_active`].
    pub fn is_active(&self, id: TimerId) -> bool {
        self.inner.lock().is_active(id)
    }

    /// See [`TimerManager::time_until_next`].
    pub fn time_until_next(&self) -> Option<Duration> {
        self.inner.lock().time_until_next()
    }

    /// See [`TimerManager::process_expired`].
    pub fn process_expired(&self) -> Vec<TimerId> {
        self.inner.lock().process_expired()
    }

    /// See [`TimerManager::active_count`].
    pub fn active_count(&self) -> usize {
        self.inner.lock().active_count()
    }
}

impl Default for SharedTimerManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_fires_once() {
        let mut manager = TimerManager::new();
        let start = Instant::now();
        let id = manager.start_one_shot(Duration::from_millis(50));

        assert!(manager.is_active(id));
        assert_eq!(
            manager.process_expired_at(start + Duration::from_millis(10)),
            vec![]
        );

        let fired = manager.process_expired_at(start + Duration::from_millis(60));
        assert_eq!(fired, vec![id]);
        assert!(!manager.is_active(id));

        // Nothing left to fire.
        assert!(
            manager
                .process_expired_at(start + Duration::from_secs(10))
                .is_empty()
        );
    }

    #[test]
    fn test_repeating_reschedules() {
        let mut manager = TimerManager::new();
        let start = Instant::now();
        let id = manager.start_repeating(Duration::from_millis(20));

        let fired = manager.process_expired_at(start + Duration::from_millis(25));
        assert_eq!(fired, vec![id]);
        assert!(manager.is_active(id));

        let fired = manager.process_expired_at(start + Duration::from_millis(50));
        assert_eq!(fired, vec![id]);
    }

    #[test]
    fn test_stop_cancels() {
        let mut manager = TimerManager::new();
        let start = Instant::now();
        let id = manager.start_one_shot(Duration::from_millis(10));

        manager.stop(id).unwrap();
        assert!(!manager.is_active(id));
        assert!(
            manager
                .process_expired_at(start + Duration::from_secs(1))
                .is_empty()
        );
    }

    #[test]
    fn test_stop_unknown_id_errors() {
        let mut manager = TimerManager::new();
        let id = manager.start_one_shot(Duration::from_millis(10));
        manager.stop(id).unwrap();

        assert!(manager.stop(id).is_err());
    }

    #[test]
    fn test_time_until_next_skips_stopped() {
        let mut manager = TimerManager::new();
        let short = manager.start_one_shot(Duration::from_millis(10));
        let _long = manager.start_one_shot(Duration::from_secs(60));

        manager.stop(short).unwrap();
        let remaining = manager.time_until_next().unwrap();
        assert!(remaining > Duration::from_secs(30));
    }

    #[test]
    fn test_active_count() {
        let mut manager = TimerManager::new();
        assert_eq!(manager.active_count(), 0);

        let a = manager.start_one_shot(Duration::from_secs(1));
        let _b = manager.start_repeating(Duration::from_secs(1));
        assert_eq!(manager.active_count(), 2);

        manager.stop(a).unwrap();
        assert_eq!(manager.active_count(), 1);
    }
}
