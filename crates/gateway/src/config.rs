//! Codec configuration
//!
//! Policy knobs the wire format leaves open. Loadable from JSON; every
//! field has a default, so `{}` is a valid configuration.

use crate::error::ConfigError;
use ouch_core::ScaledPrice;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Encoder/decoder policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Reject prices with more than 4 decimal places instead of rounding
    #[serde(default)]
    pub strict_price_precision: bool,

    /// Largest scaled price accepted in either direction
    #[serde(default = "default_max_price_scaled")]
    pub max_price_scaled: u32,

    /// Apply the schema's minimum share count to decoded messages
    #[serde(default = "default_validate_decoded_shares")]
    pub validate_decoded_shares: bool,
}

fn default_max_price_scaled() -> u32 {
    ScaledPrice::MAX.raw()
}

fn default_validate_decoded_shares() -> bool {
    true
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            strict_price_precision: false,
            max_price_scaled: default_max_price_scaled(),
            validate_decoded_shares: default_validate_decoded_shares(),
        }
    }
}

impl CodecConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Strict variant: no silent price rounding
    pub fn strict() -> Self {
        Self {
            strict_price_precision: true,
            ..Default::default()
        }
    }

    /// Leave decoded share counts to a downstream business-rule check
    pub fn without_decoded_share_validation(mut self) -> Self {
        self.validate_decoded_shares = false;
        self
    }

    /// Lower the accepted price ceiling
    pub fn with_max_price(mut self, max: ScaledPrice) -> Self {
        self.max_price_scaled = max.raw();
        self
    }

    /// Ceiling as a typed price
    pub fn max_price(&self) -> ScaledPrice {
        ScaledPrice::from_raw(self.max_price_scaled)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_price_scaled == 0 {
            return Err(ConfigError::Invalid(
                "max_price_scaled must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let config = CodecConfig::from_json("{}").unwrap();
        assert_eq!(config, CodecConfig::default());
        assert!(!config.strict_price_precision);
        assert!(config.validate_decoded_shares);
        assert_eq!(config.max_price_scaled, u32::MAX);
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "strict_price_precision": true,
            "max_price_scaled": 9999999,
            "validate_decoded_shares": false
        }"#;

        let config = CodecConfig::from_json(json).unwrap();
        assert!(config.strict_price_precision);
        assert_eq!(config.max_price(), ScaledPrice::from_raw(9_999_999));
        assert!(!config.validate_decoded_shares);
    }

    #[test]
    fn test_zero_ceiling_rejected() {
        let err = CodecConfig::from_json(r#"{ "max_price_scaled": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = CodecConfig::from_json("{ strict").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = CodecConfig::from_file("/nonexistent/ouch-codec.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_builders() {
        let config = CodecConfig::strict()
            .without_decoded_share_validation()
            .with_max_price(ScaledPrice::from_raw(1_000_000));

        assert!(config.strict_price_precision);
        assert!(!config.validate_decoded_shares);
        assert_eq!(config.max_price_scaled, 1_000_000);
    }
}
