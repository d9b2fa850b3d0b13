//! Error model for host interaction and log-line parsing.

use thiserror::Error;

use crate::host::Direction;

/// Result type for calls into the host transport feed.
pub type HostResult<T> = Result<T, HostError>;

/// Failure reported by the host while serving a callback.
///
/// None of these are fatal to an exchange: the filter always degrades to
/// logging less and never blocks traffic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The header list for this phase could not be fetched.
    #[error("{direction} headers unavailable: {reason}")]
    HeadersUnavailable { direction: Direction, reason: String },

    /// A single header lookup failed (treated as absent by callers).
    #[error("header lookup for `{name}` failed: {reason}")]
    HeaderLookup { name: String, reason: String },

    /// The buffered body could not be read back.
    #[error("{direction} body unavailable at offset {offset} (len {len}): {reason}")]
    BodyUnavailable {
        direction: Direction,
        offset: usize,
        len: usize,
        reason: String,
    },
}

impl HostError {
    pub fn headers_unavailable(direction: Direction, reason: impl Into<String>) -> Self {
        Self::HeadersUnavailable {
            direction,
            reason: reason.into(),
        }
    }

    pub fn header_lookup(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::HeaderLookup {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn body_unavailable(
        direction: Direction,
        offset: usize,
        len: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::BodyUnavailable {
            direction,
            offset,
            len,
            reason: reason.into(),
        }
    }
}

/// A log line could not be parsed back into a [`SummaryRecord`](crate::SummaryRecord).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordParseError {
    /// The leading `[Request|Response a/b/c/d]` block is missing or malformed.
    #[error("missing or malformed id block")]
    MissingHead,

    /// A request line without the `[<method> <host><path>]` block.
    #[error("request line without route block")]
    MissingRoute,

    /// A response line without the `[Status] <code>` block.
    #[error("response line without status block")]
    MissingStatus,
}
