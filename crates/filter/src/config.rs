//! Plugin configuration.
//!
//! The host hands the plugin its configuration as raw bytes at start-up. An empty
//! payload means "all defaults"; otherwise it must be a JSON object:
//!
//! ```json
//! { "emit_levels": ["info", "warn"] }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tracelens_core::EmitLevel;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid filter configuration: {0}")]
    Invalid(#[from] serde_json::Error),

    #[error("`emit_levels` must name at least one level")]
    NoEmitLevels,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Severities every finished summary line is emitted at, in order.
    ///
    /// Defaults to info followed by warn: deployments filter the proxy log at
    /// different levels and each must see the line.
    pub emit_levels: Vec<EmitLevel>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            emit_levels: vec![EmitLevel::Info, EmitLevel::Warn],
        }
    }
}

impl FilterConfig {
    /// Parse and validate the raw plugin configuration.
    pub fn from_bytes(bytes: &[u8]) -> ConfigResult<Self> {
        if bytes.trim_ascii().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_json::from_slice(bytes)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.emit_levels.is_empty() {
            return Err(ConfigError::NoEmitLevels);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_yields_defaults() {
        assert_eq!(FilterConfig::from_bytes(b"").unwrap(), FilterConfig::default());
        assert_eq!(FilterConfig::from_bytes(b"  \n").unwrap(), FilterConfig::default());
        assert_eq!(
            FilterConfig::default().emit_levels,
            vec![EmitLevel::Info, EmitLevel::Warn]
        );
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        assert_eq!(FilterConfig::from_bytes(b"{}").unwrap(), FilterConfig::default());
    }

    #[test]
    fn single_level() {
        let config = FilterConfig::from_bytes(br#"{"emit_levels":["info"]}"#).unwrap();
        assert_eq!(config.emit_levels, vec![EmitLevel::Info]);
    }

    #[test]
    fn rejects_empty_levels() {
        assert!(matches!(
            FilterConfig::from_bytes(br#"{"emit_levels":[]}"#),
            Err(ConfigError::NoEmitLevels)
        ));
    }

    #[test]
    fn rejects_unknown_fields_and_levels() {
        assert!(matches!(
            FilterConfig::from_bytes(br#"{"sample_rate":1}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            FilterConfig::from_bytes(br#"{"emit_levels":["debug"]}"#),
            Err(ConfigError::Invalid(_))
        ));
    }
}
