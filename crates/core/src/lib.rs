//! `tracelens-core`: header extraction, correlation ids and host seams.
//!
//! This crate contains the **pure** building blocks of the summary filter: the
//! tracked header table, summary line composition, the two host-facing traits
//! (transport feed and log sink) and a parser for the lines the filter emits.
//! Nothing here holds per-exchange state; that lives in `tracelens-filter`.

pub mod error;
pub mod headers;
pub mod host;
pub mod id;
pub mod record;

pub use error::{HostError, HostResult, RecordParseError};
pub use headers::{HeaderSnapshot, HeaderSummary, TrackedHeader, extract};
pub use host::{Direction, EmitLevel, HttpHost, LogSink};
pub use id::{CorrelationIds, NO_ID};
pub use record::SummaryRecord;
