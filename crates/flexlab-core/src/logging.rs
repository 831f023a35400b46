//! Logging facilities for flexlab.
//!
//! flexlab uses the `tracing` crate for instrumentation. To see logs, install
//! a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! All log records carry an explicit target from [`targets`], so subsystems
//! can be filtered with standard `tracing` directives, e.g.
//! `RUST_LOG=flexlab::collection=debug`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "flexlab_core::signal";
    /// Edit session target.
    pub const EDIT: &str = "flexlab::edit";
    /// Item collection target.
    pub const COLLECTION: &str = "flexlab::collection";
}
