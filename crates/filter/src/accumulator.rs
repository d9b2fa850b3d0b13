//! Body accumulation state machine (one per direction).
//!
//! ```text
//!            first chunk, of interest            end of stream
//!   Idle ───────────────────────────▶ Accumulating ─────────────▶ Done
//!     │
//!     └── first chunk, not of interest ──▶ Inert
//! ```
//!
//! Only the byte count is tracked here; the bytes themselves stay buffered in the
//! host and are read back in one shot when [`Feed::Flush`] is returned. That
//! happens at most once per stream.

/// Lifecycle of one body stream.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum AccumulatorState {
    /// No chunk seen yet.
    #[default]
    Idle,
    /// Buffering until end of stream.
    Accumulating,
    /// Stream is not of interest; every chunk is acknowledged and ignored.
    Inert,
    /// End of stream seen and the buffer handed out.
    Done,
}

/// Outcome of feeding one chunk.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Feed {
    /// Chunk counted; the host must hold it until more arrive.
    Pause,
    /// Nothing to do for this chunk.
    Ignore,
    /// End of stream: the whole buffer (`0..len`) is ready to be read back.
    Flush { len: usize },
}

#[derive(Debug, Clone, Default)]
pub struct BodyAccumulator {
    state: AccumulatorState,
    bytes_seen: usize,
}

impl BodyAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AccumulatorState {
        self.state
    }

    /// Total bytes counted so far. Never decreases.
    pub fn bytes_seen(&self) -> usize {
        self.bytes_seen
    }

    /// Account for one delivered chunk.
    ///
    /// `of_interest` is only consulted on the first chunk; it decides whether the
    /// stream is buffered at all.
    pub fn feed(&mut self, chunk_size: usize, end_of_stream: bool, of_interest: bool) -> Feed {
        if self.state == AccumulatorState::Idle {
            self.state = if of_interest {
                AccumulatorState::Accumulating
            } else {
                AccumulatorState::Inert
            };
        }

        if self.state != AccumulatorState::Accumulating {
            return Feed::Ignore;
        }

        self.bytes_seen = self.bytes_seen.saturating_add(chunk_size);
        if !end_of_stream {
            return Feed::Pause;
        }

        self.state = AccumulatorState::Done;
        Feed::Flush {
            len: self.bytes_seen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pauses_until_end_of_stream_then_flushes_once() {
        let mut acc = BodyAccumulator::new();

        assert_eq!(acc.feed(10, false, true), Feed::Pause);
        assert_eq!(acc.feed(10, false, true), Feed::Pause);
        assert_eq!(acc.state(), AccumulatorState::Accumulating);
        assert_eq!(acc.feed(5, true, true), Feed::Flush { len: 25 });
        assert_eq!(acc.state(), AccumulatorState::Done);

        // A stray chunk after the end is ignored and does not flush again.
        assert_eq!(acc.feed(3, true, true), Feed::Ignore);
        assert_eq!(acc.bytes_seen(), 25);
    }

    #[test]
    fn single_final_chunk_flushes_immediately() {
        let mut acc = BodyAccumulator::new();
        assert_eq!(acc.feed(20, true, true), Feed::Flush { len: 20 });
    }

    #[test]
    fn empty_final_chunk_flushes_zero_length() {
        let mut acc = BodyAccumulator::new();
        assert_eq!(acc.feed(0, true, true), Feed::Flush { len: 0 });
    }

    #[test]
    fn stream_not_of_interest_stays_inert() {
        let mut acc = BodyAccumulator::new();

        assert_eq!(acc.feed(10, false, false), Feed::Ignore);
        assert_eq!(acc.state(), AccumulatorState::Inert);

        // Interest is decided on the first chunk only.
        assert_eq!(acc.feed(10, true, true), Feed::Ignore);
        assert_eq!(acc.bytes_seen(), 0);
    }
}
