//! Logging setup for applications embedding [`GapClient`](crate::GapClient).
//!
//! The client emits `tracing` spans and events when the `telemetry` feature is on.
//! Libraries never install a subscriber; binaries can use [`Telemetry`] to get
//! formatted output filtered by `RUST_LOG`.
//!
//! ```rust,no_run
//! use gap_rs::util::Telemetry;
//!
//! let _telemetry = Telemetry::new()
//!     .with_name(env!("CARGO_PKG_NAME"))
//!     .with_version(env!("CARGO_PKG_VERSION"))
//!     .register();
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Builder for the global `tracing` subscriber.
#[derive(Debug, Clone)]
pub struct Telemetry {
    name: String,
    version: String,
    default_directive: String,
    /// Whether [`Telemetry::register`] installed the global subscriber.
    registered: bool,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl Telemetry {
    pub fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            default_directive: DEFAULT_DIRECTIVE.to_string(),
            registered: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Filter directive applied when `RUST_LOG` is not set, e.g. `"gap_rs=debug"`.
    pub fn with_default_directive(mut self, directive: impl Into<String>) -> Self {
        self.default_directive = directive.into();
        self
    }

    /// Installs a fmt subscriber filtered by `RUST_LOG`.
    ///
    /// Does nothing if another global subscriber is already set.
    pub fn register(mut self) -> Self {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.default_directive));
        self.registered = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .is_ok();

        if self.registered {
            tracing::info!(name = %self.name, version = %self.version, "Logging initialized");
        }
        self
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }
}
