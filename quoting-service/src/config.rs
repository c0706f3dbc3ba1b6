//! Engine configuration for quoting-service.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use service_core::error::AppError;
use validator::Validate;

use crate::models::DEFAULT_KG_PER_BAG;

/// Engine configuration, loaded from `configuration.*` and `QUOTING__*`
/// environment variables.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EngineConfig {
    #[serde(default = "default_vat_percent")]
    #[validate(range(min = 0.0, max = 100.0, message = "VAT percent must be within 0-100"))]
    pub default_vat_percent: f64,

    #[serde(default = "default_kg_per_bag")]
    #[validate(range(min = 0.001, message = "Bag weight must be positive"))]
    pub default_kg_per_bag: f64,
}

fn default_vat_percent() -> f64 {
    15.0
}

fn default_kg_per_bag() -> f64 {
    DEFAULT_KG_PER_BAG as f64
}

impl EngineConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("QUOTING").separator("__"))
            .build()?;

        let cfg: EngineConfig = config.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Defaults in the exact decimal domain the calculators use. These are
    /// threaded into each editor explicitly; engine code never reads config
    /// state on its own.
    pub fn defaults(&self) -> EngineDefaults {
        EngineDefaults {
            vat_percent: Decimal::from_f64(self.default_vat_percent)
                .unwrap_or_else(|| Decimal::from(15)),
            kg_per_bag: Decimal::from_f64(self.default_kg_per_bag)
                .unwrap_or_else(|| Decimal::from(DEFAULT_KG_PER_BAG)),
        }
    }
}

/// Per-editor defaults, captured once at document-open time.
#[derive(Debug, Clone, Copy)]
pub struct EngineDefaults {
    pub vat_percent: Decimal,
    pub kg_per_bag: Decimal,
}

impl Default for EngineDefaults {
    fn default() -> Self {
        Self {
            vat_percent: Decimal::from(15),
            kg_per_bag: Decimal::from(DEFAULT_KG_PER_BAG),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_falls_back_to_defaults() {
        let cfg = EngineConfig::load().expect("Failed to load config");
        assert_eq!(cfg.default_vat_percent, 15.0);
        assert_eq!(cfg.default_kg_per_bag, 25.0);
        assert_eq!(cfg.defaults().vat_percent, Decimal::from(15));
    }

    #[test]
    fn out_of_range_vat_percent_fails_validation() {
        let cfg = EngineConfig {
            default_vat_percent: 150.0,
            default_kg_per_bag: 25.0,
        };
        assert!(cfg.validate().is_err());
    }
}
