//! `tracelens-filter`: per-exchange summary filter.
//!
//! The host drives every exchange through a fixed callback order:
//!
//! ```text
//! request headers → request body* → response headers → response body* → stream done
//! ```
//!
//! Each callback receives the exchange's [`ExchangeContext`] by `&mut`, so all state
//! is explicit and owned by the host's per-stream lifecycle. Callbacks for one
//! exchange never overlap and different exchanges share nothing, so no locking is
//! needed anywhere on the data path.

pub mod accumulator;
pub mod action;
pub mod config;
pub mod context;
pub mod factory;
pub mod filter;
pub mod testing;

pub use accumulator::{AccumulatorState, BodyAccumulator, Feed};
pub use action::Action;
pub use config::{ConfigError, ConfigResult, FilterConfig};
pub use context::{ExchangeContext, StreamState};
pub use factory::FilterFactory;
pub use filter::{HttpFilter, SummaryFilter};
