//! Header extraction and summary line composition.
//!
//! The filter only ever looks at a fixed set of nine headers. Each has an explicit
//! default so that a missing header is a well-defined value in the summary rather
//! than a lookup failure:
//!
//! | header              | default  |
//! |---------------------|----------|
//! | `content-type`      | `""`     |
//! | `host`              | `""`     |
//! | `:path`             | `""`     |
//! | `:status`           | `""`     |
//! | `:method`           | `""`     |
//! | `x-request-id`      | `NO_ID`  |
//! | `x-b3-traceid`      | `NO_ID`  |
//! | `x-b3-spanid`       | `NO_ID`  |
//! | `x-b3-parentspanid` | `NO_ID`  |

use crate::host::Direction;
use crate::id::{CorrelationIds, NO_ID};

/// The only content type whose bodies are redacted. Matched exactly.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A header the summary line is built from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TrackedHeader {
    ContentType,
    Host,
    Path,
    Status,
    Method,
    RequestId,
    TraceId,
    SpanId,
    ParentSpanId,
}

impl TrackedHeader {
    /// Every tracked header, in table order.
    pub const ALL: [TrackedHeader; 9] = [
        TrackedHeader::ContentType,
        TrackedHeader::Host,
        TrackedHeader::Path,
        TrackedHeader::Status,
        TrackedHeader::Method,
        TrackedHeader::RequestId,
        TrackedHeader::TraceId,
        TrackedHeader::SpanId,
        TrackedHeader::ParentSpanId,
    ];

    /// Wire name as delivered by the proxy.
    pub fn name(self) -> &'static str {
        match self {
            TrackedHeader::ContentType => "content-type",
            TrackedHeader::Host => "host",
            TrackedHeader::Path => ":path",
            TrackedHeader::Status => ":status",
            TrackedHeader::Method => ":method",
            TrackedHeader::RequestId => "x-request-id",
            TrackedHeader::TraceId => "x-b3-traceid",
            TrackedHeader::SpanId => "x-b3-spanid",
            TrackedHeader::ParentSpanId => "x-b3-parentspanid",
        }
    }

    /// Value used when the header is absent.
    pub fn default_value(self) -> &'static str {
        if self.is_tracing() { NO_ID } else { "" }
    }

    /// Tracing headers default to [`NO_ID`]; structural ones to the empty string.
    pub fn is_tracing(self) -> bool {
        matches!(
            self,
            TrackedHeader::RequestId
                | TrackedHeader::TraceId
                | TrackedHeader::SpanId
                | TrackedHeader::ParentSpanId
        )
    }

    /// Exact (case-sensitive) name match.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Values of the tracked headers for one phase.
///
/// Built per phase, seeded with defaults, then overlaid with the wire headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSnapshot {
    values: [String; 9],
}

impl HeaderSnapshot {
    pub fn with_defaults() -> Self {
        Self {
            values: TrackedHeader::ALL.map(|h| h.default_value().to_string()),
        }
    }

    /// Apply wire headers in order. Later duplicates win; untracked names are skipped.
    pub fn overlay<I, K, V>(&mut self, headers: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in headers {
            if let Some(header) = TrackedHeader::from_name(name.as_ref()) {
                self.set(header, value.as_ref());
            }
        }
    }

    pub fn get(&self, header: TrackedHeader) -> &str {
        &self.values[header.index()]
    }

    pub fn set(&mut self, header: TrackedHeader, value: impl Into<String>) {
        self.values[header.index()] = value.into();
    }

    /// Replace a still-defaulted request id / trace id with the captured request ids.
    pub fn fill_ids(&mut self, captured: &CorrelationIds) {
        if self.get(TrackedHeader::RequestId) == NO_ID {
            self.set(TrackedHeader::RequestId, captured.request_id());
        }
        if self.get(TrackedHeader::TraceId) == NO_ID {
            self.set(TrackedHeader::TraceId, captured.trace_id());
        }
    }

    pub fn is_json(&self) -> bool {
        self.get(TrackedHeader::ContentType) == JSON_CONTENT_TYPE
    }

    pub fn is_of_interest(&self) -> bool {
        self.get(TrackedHeader::TraceId) != NO_ID
    }

    /// Compose the header part of the summary line.
    pub fn summary_line(&self, direction: Direction) -> String {
        let mut line = format!(
            "[{} {}/{}/{}/{}]",
            direction,
            self.get(TrackedHeader::RequestId),
            self.get(TrackedHeader::TraceId),
            self.get(TrackedHeader::SpanId),
            self.get(TrackedHeader::ParentSpanId),
        );

        match direction {
            Direction::Request => {
                line.push_str(&format!(
                    " [{} {}{}]",
                    self.get(TrackedHeader::Method),
                    self.get(TrackedHeader::Host),
                    self.get(TrackedHeader::Path),
                ));
            }
            Direction::Response => {
                line.push_str(&format!(" [Status] {}", self.get(TrackedHeader::Status)));
            }
        }

        let content_type = self.get(TrackedHeader::ContentType);
        if !content_type.is_empty() {
            line.push_str(&format!(" [ContentType {content_type}]"));
        }
        line
    }
}

impl Default for HeaderSnapshot {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Outcome of the headers phase for one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSummary {
    pub line: String,
    pub is_json: bool,
    pub of_interest: bool,
}

/// Build the summary for one direction from its wire headers.
///
/// `captured` are the ids taken from the request headers; they stand in for
/// tracing headers the current direction does not carry.
pub fn extract<K, V>(
    direction: Direction,
    headers: &[(K, V)],
    captured: &CorrelationIds,
) -> HeaderSummary
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut snapshot = HeaderSnapshot::with_defaults();
    snapshot.overlay(headers.iter().map(|(k, v)| (k.as_ref(), v.as_ref())));
    snapshot.fill_ids(captured);

    HeaderSummary {
        line: snapshot.summary_line(direction),
        is_json: snapshot.is_json(),
        of_interest: snapshot.is_of_interest(),
    }
}
