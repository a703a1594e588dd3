//! Session configuration.
//!
//! Loaded from an optional JSON file; every field has a default so an
//! empty object (or no file at all) gives the stock behavior.
//!
//! ```json
//! {
//!   "currency_symbol": "$",
//!   "decimal_places": 2,
//!   "split_policy": "equal_share",
//!   "allow_duplicate_participants": false
//! }
//! ```

use crate::core::currency::{CurrencySymbol, MAX_DECIMAL_PLACES};
use crate::core::participant::ParticipantRegistry;
use crate::split::calculator::SplitPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("decimal_places must be at most {max}, got {got}")]
    DecimalPlaces { got: u32, max: u32 },
    #[error("currency_symbol must not be blank")]
    BlankSymbol,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitterConfig {
    /// Symbol prefixed to every rendered amount.
    pub currency_symbol: CurrencySymbol,
    /// Decimal places used when rendering amounts.
    pub decimal_places: u32,
    pub split_policy: SplitPolicy,
    /// When false, adding a name already present is rejected.
    pub allow_duplicate_participants: bool,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            currency_symbol: CurrencySymbol::default(),
            decimal_places: 2,
            split_policy: SplitPolicy::PayerExempt,
            allow_duplicate_participants: true,
        }
    }
}

impl SplitterConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SplitterConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(ConfigError::DecimalPlaces {
                got: self.decimal_places,
                max: MAX_DECIMAL_PLACES,
            });
        }
        if self.currency_symbol.as_str().trim().is_empty() {
            return Err(ConfigError::BlankSymbol);
        }
        Ok(())
    }

    /// An empty registry honoring the duplicate policy.
    pub fn new_registry(&self) -> ParticipantRegistry {
        if self.allow_duplicate_participants {
            ParticipantRegistry::new()
        } else {
            ParticipantRegistry::unique()
        }
    }
}
