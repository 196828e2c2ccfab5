//! Core systems for Sift.
//!
//! This crate provides the foundational components of the Sift widget toolkit:
//!
//! - **Signal/Slot System**: Type-safe inter-component communication
//! - **Timers**: One-shot and repeating timers for a host-pumped loop
//! - **Errors**: The shared error hierarchy and `Result` alias
//! - **Logging**: `tracing` target names for per-subsystem filtering
//!
//! Sift is headless: it owns no event loop and binds no platform. The host
//! application pumps input events into widgets, asks the [`TimerManager`]
//! when the next timer is due, and feeds fired timer ids back in.
//!
//! # Signal/Slot Example
//!
//! ```
//! use sift_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Timer Example
//!
//! ```
//! use sift_core::TimerManager;
//! use std::time::Duration;
//!
//! let mut timers = TimerManager::new();
//! let id = timers.start_one_shot(Duration::from_millis(100));
//!
//! // ... host sleeps for timers.time_until_next(), then:
//! for fired in timers.process_expired() {
//!     assert_eq!(fired, id);
//! }
//! ```

mod error;
pub mod logging;
pub mod signal;
mod timer;

pub use error::{Result, SiftError, SignalError, TimerError};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use timer::{SharedTimerManager, TimerId, TimerKind, TimerManager};
