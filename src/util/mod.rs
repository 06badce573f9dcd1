//! Utility modules for the gap-rs crate.
//!
//! | Module | Description | Feature |
//! |--------|-------------|---------|
//! | [`telemetry`] | `tracing` subscriber setup for binaries using the client | `telemetry` |

#[cfg(feature = "telemetry")]
pub mod telemetry;

#[cfg(feature = "telemetry")]
pub use telemetry::*;
