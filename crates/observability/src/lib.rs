//! Tracing, logging (shared setup) and the tracing-backed log sink.

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;

/// `LogSink` that routes summary lines into `tracing`.
pub mod sink;

pub use sink::{SUMMARY_TARGET, TracingLogSink};
