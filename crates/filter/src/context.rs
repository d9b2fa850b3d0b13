//! Per-exchange state.

use tracelens_core::{CorrelationIds, Direction, HeaderSummary};

use crate::accumulator::BodyAccumulator;

/// State of one direction (request or response) of an exchange.
#[derive(Debug, Clone, Default)]
pub struct StreamState {
    summary: Option<String>,
    is_json: bool,
    of_interest: bool,
    body: BodyAccumulator,
    emitted: bool,
}

impl StreamState {
    /// Summary line composed at the headers phase, plus the body section once flushed.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn is_json(&self) -> bool {
        self.is_json
    }

    /// True only when a summary exists and it carries a trace id.
    pub fn is_of_interest(&self) -> bool {
        self.summary.is_some() && self.of_interest
    }

    pub fn body(&self) -> &BodyAccumulator {
        &self.body
    }

    pub fn bytes_seen(&self) -> usize {
        self.body.bytes_seen()
    }

    pub fn is_emitted(&self) -> bool {
        self.emitted
    }

    /// Store the headers-phase result. A second headers phase for the same
    /// direction is ignored; returns whether the summary was stored.
    pub(crate) fn set_headers(&mut self, headers: HeaderSummary) -> bool {
        if self.summary.is_some() {
            return false;
        }
        self.summary = Some(headers.line);
        self.is_json = headers.is_json;
        self.of_interest = headers.of_interest;
        true
    }

    pub(crate) fn body_mut(&mut self) -> &mut BodyAccumulator {
        &mut self.body
    }

    pub(crate) fn append_body(&mut self, redacted: &str) {
        if let Some(summary) = self.summary.as_mut() {
            summary.push_str(" [Body] ");
            summary.push_str(redacted);
        }
    }

    /// Hand out the line for emission, at most once.
    pub(crate) fn take_line_for_emit(&mut self) -> Option<&str> {
        if self.emitted {
            return None;
        }
        let line = self.summary.as_deref()?;
        self.emitted = true;
        Some(line)
    }
}

/// Everything the filter knows about one request/response pair.
///
/// Created by [`FilterFactory::new_exchange`](crate::FilterFactory::new_exchange)
/// when the host opens a stream and dropped when the host closes it. Dropping it
/// before end of stream discards any partially counted body with no output.
#[derive(Debug, Clone)]
pub struct ExchangeContext {
    id: u32,
    ids: CorrelationIds,
    request: StreamState,
    response: StreamState,
}

impl ExchangeContext {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            ids: CorrelationIds::absent(),
            request: StreamState::default(),
            response: StreamState::default(),
        }
    }

    /// Host-assigned context id.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Ids captured from the request headers.
    pub fn ids(&self) -> &CorrelationIds {
        &self.ids
    }

    pub fn is_correlated(&self) -> bool {
        self.ids.is_correlated()
    }

    pub fn stream(&self, direction: Direction) -> &StreamState {
        match direction {
            Direction::Request => &self.request,
            Direction::Response => &self.response,
        }
    }

    pub fn summary(&self, direction: Direction) -> Option<&str> {
        self.stream(direction).summary()
    }

    pub fn bytes_seen(&self, direction: Direction) -> usize {
        self.stream(direction).bytes_seen()
    }

    pub(crate) fn set_ids(&mut self, ids: CorrelationIds) {
        self.ids = ids;
    }

    pub(crate) fn stream_mut(&mut self, direction: Direction) -> &mut StreamState {
        match direction {
            Direction::Request => &mut self.request,
            Direction::Response => &mut self.response,
        }
    }
}
