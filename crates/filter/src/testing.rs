//! In-memory host and exchange driver for tests/dev.
//!
//! - No proxy, no IO
//! - Records every body read-back and every emitted line
//! - Failures can be injected per fetch kind

use std::sync::Mutex;

use tracelens_core::{Direction, EmitLevel, HostError, HostResult, HttpHost, LogSink};

use crate::action::Action;
use crate::context::ExchangeContext;
use crate::filter::HttpFilter;

/// One `body(direction, offset, len)` call made against the host.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BodyRead {
    pub direction: Direction,
    pub offset: usize,
    pub len: usize,
}

/// Scripted transport feed for a single exchange.
#[derive(Debug, Default)]
pub struct InMemoryHost {
    request_headers: Vec<(String, String)>,
    response_headers: Vec<(String, String)>,
    request_body: Vec<u8>,
    response_body: Vec<u8>,
    failing_headers: Vec<Direction>,
    failing_bodies: Vec<Direction>,
    failing_lookup: bool,
    reads: Mutex<Vec<BodyRead>>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request_headers(mut self, headers: &[(&str, &str)]) -> Self {
        self.request_headers = owned(headers);
        self
    }

    pub fn with_response_headers(mut self, headers: &[(&str, &str)]) -> Self {
        self.response_headers = owned(headers);
        self
    }

    pub fn with_request_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.request_body = body.into();
        self
    }

    pub fn with_response_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.response_body = body.into();
        self
    }

    /// Make `headers(direction)` fail.
    pub fn fail_headers(mut self, direction: Direction) -> Self {
        self.failing_headers.push(direction);
        self
    }

    /// Make `body(direction, ..)` fail.
    pub fn fail_body(mut self, direction: Direction) -> Self {
        self.failing_bodies.push(direction);
        self
    }

    /// Make every single-header lookup fail.
    pub fn fail_header_lookup(mut self) -> Self {
        self.failing_lookup = true;
        self
    }

    pub fn body_len(&self, direction: Direction) -> usize {
        self.buffer(direction).len()
    }

    /// Body read-backs made so far, in call order.
    pub fn reads(&self) -> Vec<BodyRead> {
        self.reads
            .lock()
            .map(|reads| reads.clone())
            .unwrap_or_default()
    }

    fn buffer(&self, direction: Direction) -> &[u8] {
        match direction {
            Direction::Request => &self.request_body,
            Direction::Response => &self.response_body,
        }
    }
}

impl HttpHost for InMemoryHost {
    fn headers(&self, direction: Direction) -> HostResult<Vec<(String, String)>> {
        if self.failing_headers.contains(&direction) {
            return Err(HostError::headers_unavailable(direction, "not found"));
        }
        Ok(match direction {
            Direction::Request => self.request_headers.clone(),
            Direction::Response => self.response_headers.clone(),
        })
    }

    fn request_header(&self, name: &str) -> HostResult<Option<String>> {
        if self.failing_lookup {
            return Err(HostError::header_lookup(name, "not found"));
        }
        Ok(self
            .request_headers
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone()))
    }

    fn body(&self, direction: Direction, offset: usize, len: usize) -> HostResult<Vec<u8>> {
        if let Ok(mut reads) = self.reads.lock() {
            reads.push(BodyRead {
                direction,
                offset,
                len,
            });
        }

        if self.failing_bodies.contains(&direction) {
            return Err(HostError::body_unavailable(direction, offset, len, "bad argument"));
        }

        self.buffer(direction)
            .get(offset..offset.saturating_add(len))
            .map(<[u8]>::to_vec)
            .ok_or_else(|| HostError::body_unavailable(direction, offset, len, "out of range"))
    }
}

fn owned(headers: &[(&str, &str)]) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Log sink that keeps every line with its level.
#[derive(Debug, Default)]
pub struct RecordingSink {
    lines: Mutex<Vec<(EmitLevel, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(EmitLevel, String)> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Lines emitted at one level, in order.
    pub fn at(&self, level: EmitLevel) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, line)| line)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }

    fn push(&self, level: EmitLevel, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, line.to_string()));
        }
    }
}

impl LogSink for RecordingSink {
    fn info(&self, line: &str) {
        self.push(EmitLevel::Info, line);
    }

    fn warn(&self, line: &str) {
        self.push(EmitLevel::Warn, line);
    }

    fn error(&self, line: &str) {
        self.push(EmitLevel::Error, line);
    }
}

/// Drives one exchange through a filter in the host's callback order.
#[derive(Debug)]
pub struct Exchange<'a, F> {
    filter: &'a F,
    host: &'a InMemoryHost,
    context: ExchangeContext,
}

impl<'a, F> Exchange<'a, F>
where
    F: HttpFilter,
{
    pub fn new(filter: &'a F, host: &'a InMemoryHost, context: ExchangeContext) -> Self {
        Self {
            filter,
            host,
            context,
        }
    }

    pub fn context(&self) -> &ExchangeContext {
        &self.context
    }

    pub fn request_headers(&mut self) -> Action {
        self.filter.on_request_headers(&mut self.context, self.host)
    }

    pub fn response_headers(&mut self) -> Action {
        self.filter.on_response_headers(&mut self.context, self.host)
    }

    /// Deliver one request body chunk.
    pub fn request_chunk(&mut self, size: usize, end_of_stream: bool) -> Action {
        self.filter
            .on_request_body(&mut self.context, self.host, size, end_of_stream)
    }

    /// Deliver one response body chunk.
    pub fn response_chunk(&mut self, size: usize, end_of_stream: bool) -> Action {
        self.filter
            .on_response_body(&mut self.context, self.host, size, end_of_stream)
    }

    /// Deliver chunks of the given sizes, end of stream on the last one.
    pub fn request_body(&mut self, chunks: &[usize]) -> Vec<Action> {
        let last = chunks.len().saturating_sub(1);
        chunks
            .iter()
            .enumerate()
            .map(|(i, size)| self.request_chunk(*size, i == last))
            .collect()
    }

    pub fn response_body(&mut self, chunks: &[usize]) -> Vec<Action> {
        let last = chunks.len().saturating_sub(1);
        chunks
            .iter()
            .enumerate()
            .map(|(i, size)| self.response_chunk(*size, i == last))
            .collect()
    }

    /// Signal stream done and hand back the final context.
    pub fn finish(mut self) -> ExchangeContext {
        self.filter.on_stream_done(&mut self.context, self.host);
        self.context
    }

    /// Run the whole exchange in host order and hand back the final context.
    pub fn run(mut self, request_chunks: &[usize], response_chunks: &[usize]) -> ExchangeContext {
        self.request_headers();
        self.request_body(request_chunks);
        self.response_headers();
        self.response_body(response_chunks);
        self.finish()
    }
}

/// Split `len` bytes into chunks of at most `max` bytes.
pub fn chunk_sizes(len: usize, max: usize) -> Vec<usize> {
    let max = max.max(1);
    let mut sizes = Vec::with_capacity(len / max + 1);
    let mut remaining = len;
    while remaining > 0 {
        let size = remaining.min(max);
        sizes.push(size);
        remaining -= size;
    }
    sizes
}
