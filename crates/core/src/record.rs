//! Parse emitted summary lines back into structured records.
//!
//! Downstream log analyzers scrape the proxy log for these lines and pair each
//! request with its response by `(request_id, trace_id)`. The grammar is exactly
//! what [`HeaderSnapshot::summary_line`](crate::HeaderSnapshot::summary_line)
//! produces, optionally followed by ` [Body] <redacted json>`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::RecordParseError;
use crate::host::Direction;

static HEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(Request|Response) ([^/\]]*)/([^/\]]*)/([^/\]]*)/([^/\]]*)\]")
        .expect("head pattern is valid")
});
// The target may itself contain `]`, so the route ends where the optional content
// type token (or the line) does.
static ROUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ \[(\S*) (.*?)\](?: \[ContentType .*\])?$").expect("route pattern is valid")
});
static STATUS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ \[Status\] ?(\S*)").expect("status pattern is valid"));
static CONTENT_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r" \[ContentType (.*)\]$").expect("content type pattern is valid")
});

const BODY_MARKER: &str = " [Body] ";

/// One summary line, split into its bracketed tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    pub direction: Direction,
    pub request_id: String,
    pub trace_id: String,
    pub span_id: String,
    pub parent_span_id: String,
    /// Request lines only; `None` when the method was empty.
    pub method: Option<String>,
    /// `<host><path>`, request lines only.
    pub target: Option<String>,
    /// Response lines only; `None` when the status was empty.
    pub status: Option<String>,
    pub content_type: Option<String>,
    /// Redacted body text, if a body section was appended.
    pub body: Option<String>,
}

impl SummaryRecord {
    pub fn parse(line: &str) -> Result<Self, RecordParseError> {
        let (headers, body) = match line.split_once(BODY_MARKER) {
            Some((headers, body)) => (headers, Some(body.to_string())),
            None => (line, None),
        };

        let head = HEAD.captures(headers).ok_or(RecordParseError::MissingHead)?;
        let direction = match &head[1] {
            "Request" => Direction::Request,
            _ => Direction::Response,
        };
        let rest = &headers[head.get(0).map_or(0, |m| m.end())..];

        let mut record = SummaryRecord {
            direction,
            request_id: head[2].to_string(),
            trace_id: head[3].to_string(),
            span_id: head[4].to_string(),
            parent_span_id: head[5].to_string(),
            method: None,
            target: None,
            status: None,
            content_type: CONTENT_TYPE
                .captures(rest)
                .map(|c| c[1].to_string()),
            body,
        };

        match direction {
            Direction::Request => {
                let route = ROUTE.captures(rest).ok_or(RecordParseError::MissingRoute)?;
                record.method = non_empty(&route[1]);
                record.target = non_empty(&route[2]);
            }
            Direction::Response => {
                let status = STATUS.captures(rest).ok_or(RecordParseError::MissingStatus)?;
                record.status = non_empty(&status[1]);
            }
        }

        Ok(record)
    }

    /// Key pairing a request line with its response line.
    pub fn correlation_key(&self) -> (&str, &str) {
        (&self.request_id, &self.trace_id)
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
