//! Root factory: one per plugin instance, hands out a context per exchange.

use tracelens_core::LogSink;

use crate::config::{ConfigResult, FilterConfig};
use crate::context::ExchangeContext;
use crate::filter::SummaryFilter;

#[derive(Debug)]
pub struct FilterFactory<S> {
    filter: SummaryFilter<S>,
}

impl<S> FilterFactory<S>
where
    S: LogSink,
{
    pub fn new(config: FilterConfig, sink: S) -> Self {
        Self {
            filter: SummaryFilter::new(config, sink),
        }
    }

    /// Build from the raw plugin configuration handed over at plugin start.
    pub fn from_configuration(bytes: &[u8], sink: S) -> ConfigResult<Self> {
        let config = FilterConfig::from_bytes(bytes)?;
        tracing::info!(emit_levels = ?config.emit_levels, "summary filter configured");
        Ok(Self::new(config, sink))
    }

    /// The filter shared by every exchange of this plugin instance.
    pub fn filter(&self) -> &SummaryFilter<S> {
        &self.filter
    }

    /// Fresh state for a new exchange; `context_id` is assigned by the host.
    pub fn new_exchange(&self, context_id: u32) -> ExchangeContext {
        tracing::trace!(context_id, "exchange opened");
        ExchangeContext::new(context_id)
    }
}
