//! Correlation identifiers captured from request headers.

use serde::{Deserialize, Serialize};

use crate::headers::TrackedHeader;
use crate::host::HttpHost;

/// Sentinel written in place of any tracing header that is absent.
pub const NO_ID: &str = "NO_ID";

/// Ids captured once from the request headers and forwarded into the response
/// summary, so both lines of an exchange carry the same request and trace id.
///
/// Response headers commonly omit tracing headers; without this forwarding the
/// response line could not be paired with its request downstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationIds {
    request_id: String,
    trace_id: String,
}

impl CorrelationIds {
    pub fn new(request_id: impl Into<String>, trace_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            trace_id: trace_id.into(),
        }
    }

    /// Both ids set to [`NO_ID`].
    pub fn absent() -> Self {
        Self::new(NO_ID, NO_ID)
    }

    /// Build from optional lookups, mapping `None` to [`NO_ID`].
    pub fn from_lookups(request_id: Option<String>, trace_id: Option<String>) -> Self {
        Self::new(
            request_id.unwrap_or_else(|| NO_ID.to_string()),
            trace_id.unwrap_or_else(|| NO_ID.to_string()),
        )
    }

    /// Capture the ids from the raw request headers via single-header lookups.
    ///
    /// A failed lookup counts as absent.
    pub fn capture<H>(host: &H) -> Self
    where
        H: HttpHost + ?Sized,
    {
        let lookup = |header: TrackedHeader| match host.request_header(header.name()) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(header = header.name(), error = %err, "header lookup failed");
                None
            }
        };

        Self::from_lookups(
            lookup(TrackedHeader::RequestId),
            lookup(TrackedHeader::TraceId),
        )
    }

    /// Value of `x-request-id`, or [`NO_ID`].
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Value of `x-b3-traceid`, or [`NO_ID`].
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// True only when a real trace id was captured.
    pub fn is_correlated(&self) -> bool {
        self.trace_id != NO_ID
    }
}

impl Default for CorrelationIds {
    fn default() -> Self {
        Self::absent()
    }
}
