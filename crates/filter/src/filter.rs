//! Host callback surface and the summary filter.

use tracelens_core::{CorrelationIds, Direction, HttpHost, LogSink, extract};

use crate::accumulator::{AccumulatorState, Feed};
use crate::action::Action;
use crate::config::FilterConfig;
use crate::context::{ExchangeContext, StreamState};

/// Callbacks the host invokes for one exchange, in this order:
/// request headers, request body chunks, response headers, response body chunks,
/// stream done.
///
/// Every method defaults to a no-op that lets traffic through, so a filter only
/// overrides the phases it cares about.
pub trait HttpFilter {
    fn on_request_headers(&self, _ctx: &mut ExchangeContext, _host: &dyn HttpHost) -> Action {
        Action::Continue
    }

    fn on_response_headers(&self, _ctx: &mut ExchangeContext, _host: &dyn HttpHost) -> Action {
        Action::Continue
    }

    /// One body chunk of `chunk_size` bytes; `end_of_stream` is true exactly once,
    /// on the last chunk.
    fn on_request_body(
        &self,
        _ctx: &mut ExchangeContext,
        _host: &dyn HttpHost,
        _chunk_size: usize,
        _end_of_stream: bool,
    ) -> Action {
        Action::Continue
    }

    fn on_response_body(
        &self,
        _ctx: &mut ExchangeContext,
        _host: &dyn HttpHost,
        _chunk_size: usize,
        _end_of_stream: bool,
    ) -> Action {
        Action::Continue
    }

    fn on_stream_done(&self, _ctx: &mut ExchangeContext, _host: &dyn HttpHost) {}
}

/// Emits one summary line per request and per response of every traced exchange.
///
/// Exchanges without an `x-b3-traceid` produce no output at all. Nothing this
/// filter does can fail an exchange: every host failure degrades to logging less.
#[derive(Debug)]
pub struct SummaryFilter<S> {
    config: FilterConfig,
    sink: S,
}

impl<S> SummaryFilter<S>
where
    S: LogSink,
{
    pub fn new(config: FilterConfig, sink: S) -> Self {
        Self { config, sink }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn on_headers(&self, ctx: &mut ExchangeContext, host: &dyn HttpHost, direction: Direction) {
        if direction == Direction::Request && ctx.summary(Direction::Request).is_none() {
            ctx.set_ids(CorrelationIds::capture(host));
        }

        let headers = match host.headers(direction) {
            Ok(headers) => headers,
            Err(err) => {
                tracing::debug!(exchange_id = ctx.id(), %direction, error = %err, "headers unavailable");
                return;
            }
        };

        let summary = extract(direction, &headers, ctx.ids());
        let of_interest = summary.of_interest;
        if !ctx.stream_mut(direction).set_headers(summary) {
            tracing::debug!(exchange_id = ctx.id(), %direction, "repeated headers phase ignored");
            return;
        }
        tracing::trace!(exchange_id = ctx.id(), %direction, of_interest, "headers summarized");
    }

    fn on_body(
        &self,
        ctx: &mut ExchangeContext,
        host: &dyn HttpHost,
        direction: Direction,
        chunk_size: usize,
        end_of_stream: bool,
    ) -> Action {
        let exchange_id = ctx.id();
        let stream = ctx.stream_mut(direction);
        let of_interest = stream.is_of_interest();

        match stream.body_mut().feed(chunk_size, end_of_stream, of_interest) {
            Feed::Ignore => Action::Continue,
            Feed::Pause => {
                tracing::trace!(
                    exchange_id,
                    %direction,
                    bytes_seen = stream.bytes_seen(),
                    "waiting for end of stream"
                );
                Action::Pause
            }
            Feed::Flush { len } => {
                tracing::debug!(exchange_id, %direction, bytes_seen = len, "body complete");
                self.flush(exchange_id, stream, host, direction, len);
                Action::Continue
            }
        }
    }

    /// Append the redacted body (when there is one) and emit the finished line.
    fn flush(
        &self,
        exchange_id: u32,
        stream: &mut StreamState,
        host: &dyn HttpHost,
        direction: Direction,
        len: usize,
    ) {
        if stream.is_json() && len > 0 {
            match host.body(direction, 0, len) {
                Ok(bytes) => match tracelens_redact::redact(&bytes) {
                    Ok(redacted) => stream.append_body(&redacted),
                    Err(err) => {
                        tracing::debug!(exchange_id, %direction, error = %err, "body section omitted");
                    }
                },
                Err(err) => {
                    self.sink.error(match direction {
                        Direction::Request => "cannot get req body",
                        Direction::Response => "cannot get res body",
                    });
                    self.sink.error(&err.to_string());
                }
            }
        }

        self.emit(stream);
    }

    fn emit(&self, stream: &mut StreamState) {
        if let Some(line) = stream.take_line_for_emit() {
            for level in &self.config.emit_levels {
                self.sink.emit(*level, line);
            }
        }
    }

    /// Emit a header-only line for a traced direction that never saw a body
    /// callback; drop a partially counted body silently.
    fn finish(&self, exchange_id: u32, stream: &mut StreamState, direction: Direction) {
        if !stream.is_of_interest() || stream.is_emitted() {
            return;
        }

        match stream.body().state() {
            AccumulatorState::Idle => self.emit(stream),
            AccumulatorState::Accumulating => {
                tracing::debug!(
                    exchange_id,
                    %direction,
                    bytes_seen = stream.bytes_seen(),
                    "stream ended before end of body, discarding"
                );
            }
            AccumulatorState::Inert | AccumulatorState::Done => {}
        }
    }
}

impl<S> HttpFilter for SummaryFilter<S>
where
    S: LogSink,
{
    fn on_request_headers(&self, ctx: &mut ExchangeContext, host: &dyn HttpHost) -> Action {
        self.on_headers(ctx, host, Direction::Request);
        Action::Continue
    }

    fn on_response_headers(&self, ctx: &mut ExchangeContext, host: &dyn HttpHost) -> Action {
        self.on_headers(ctx, host, Direction::Response);
        Action::Continue
    }

    fn on_request_body(
        &self,
        ctx: &mut ExchangeContext,
        host: &dyn HttpHost,
        chunk_size: usize,
        end_of_stream: bool,
    ) -> Action {
        self.on_body(ctx, host, Direction::Request, chunk_size, end_of_stream)
    }

    fn on_response_body(
        &self,
        ctx: &mut ExchangeContext,
        host: &dyn HttpHost,
        chunk_size: usize,
        end_of_stream: bool,
    ) -> Action {
        self.on_body(ctx, host, Direction::Response, chunk_size, end_of_stream)
    }

    fn on_stream_done(&self, ctx: &mut ExchangeContext, _host: &dyn HttpHost) {
        let exchange_id = ctx.id();
        for direction in [Direction::Request, Direction::Response] {
            self.finish(exchange_id, ctx.stream_mut(direction), direction);
        }
    }
}

