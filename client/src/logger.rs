//! Optional diagnostics hook for [`Client`](crate::Client).
//!
//! A client without a logger behaves identically, it just stays quiet.

use std::fmt;

pub trait Logger: Send + Sync {
    fn log(&self, args: fmt::Arguments<'_>);
}

/// Forwards every line to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(target: "clockify_client", "{}", args);
    }
}
