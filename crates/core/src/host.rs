//! Host seams: the chunked transport feed and the log emitter.
//!
//! The proxy runtime that delivers headers and body chunks is an external
//! collaborator. The filter only ever talks to it through these two traits, which
//! keeps the core testable without a proxy and lets an adapter for a concrete
//! runtime stay a thin shim.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::HostResult;

/// Which half of an exchange a callback belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Request,
    Response,
}

impl Direction {
    /// Label used in the summary line head (`[Request ...]` / `[Response ...]`).
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Request => "Request",
            Direction::Response => "Response",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport feed exposed by the host for the current exchange.
///
/// Every method may fail; callers decide how each failure degrades. Header names
/// are delivered in wire order, lower-cased by the proxy.
pub trait HttpHost {
    /// Full header list for one direction.
    fn headers(&self, direction: Direction) -> HostResult<Vec<(String, String)>>;

    /// Single request header lookup. `Ok(None)` means the header is absent.
    fn request_header(&self, name: &str) -> HostResult<Option<String>>;

    /// Read back `len` buffered body bytes starting at `offset`.
    fn body(&self, direction: Direction, offset: usize, len: usize) -> HostResult<Vec<u8>>;
}

/// Severity a line is emitted at.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmitLevel {
    Info,
    Warn,
    Error,
}

/// Log emitter exposed by the host.
///
/// Lines are literal strings: no structured fields, no envelope.
pub trait LogSink {
    fn info(&self, line: &str);

    fn warn(&self, line: &str);

    fn error(&self, line: &str);

    /// Dispatch on a runtime severity.
    fn emit(&self, level: EmitLevel, line: &str) {
        match level {
            EmitLevel::Info => self.info(line),
            EmitLevel::Warn => self.warn(line),
            EmitLevel::Error => self.error(line),
        }
    }
}

impl<S> LogSink for std::sync::Arc<S>
where
    S: LogSink + ?Sized,
{
    fn info(&self, line: &str) {
        (**self).info(line)
    }

    fn warn(&self, line: &str) {
        (**self).warn(line)
    }

    fn error(&self, line: &str) {
        (**self).error(line)
    }
}
