//! Logging facilities for Sift.
//!
//! Sift is instrumented with the `tracing` crate. To see logs, install a
//! tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     // Initialize tracing (you can customize this)
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Use the constants in [`targets`] with `tracing` directives (for example
//! `RUST_LOG=sift_select::field=trace`) to filter logs by subsystem.

/// Target names for log filtering.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "sift_core";
    /// Timer system target.
    pub const TIMER: &str = "sift_core::timer";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "sift_core::signal";
    /// Option filtering target.
    pub const FILTER: &str = "sift_select::filter";
    /// Searchable select field target.
    pub const FIELD: &str = "sift_select::field";
    /// Floating panel target.
    pub const PANEL: &str = "sift_select::panel";
}
