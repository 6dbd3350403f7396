//! # Costing & Pricing Settings
//!
//! Shop-wide defaults that parameterize the calculators. Everything here is
//! serde-backed with `Default` impls, so a workbook without a settings block
//! reproduces the standard behaviour.
//!
//! ```text
//! GlobalSettings
//! ├── costing: CostingSettings (default rates)
//! └── pricing: PricingPolicy (breakpoints, volatility factors, validity)
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::calculations::cost::RateSet;
use crate::pricing::agreements::PricingTier;

/// Advisory attached to quotes when raw-material prices are volatile
pub const ESCALATION_CLAUSE: &str = "Prices are subject to revision in line with raw material \
cost movements. Kraft paper and allied material price changes beyond the quoted basis will be \
passed on at the time of dispatch.";

/// Standard breakpoints used when the customer has no agreement.
///
/// Unbounded tiers, so the usual highest-discount selection picks the
/// largest breakpoint the quantity reaches.
pub static STANDARD_QUANTITY_TIERS: Lazy<Vec<PricingTier>> = Lazy::new(|| {
    vec![
        PricingTier::new(10_000, None, 15.0).with_description("Standard 10000+"),
        PricingTier::new(5_000, None, 10.0).with_description("Standard 5000+"),
        PricingTier::new(1_000, None, 5.0).with_description("Standard 1000+"),
    ]
});

/// Quote validity granted once average volatility exceeds a threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidityBand {
    /// Strictly-greater-than threshold (0-100)
    pub volatility_above: f64,
    pub validity_days: u32,
}

/// Parameters of the advanced pricing engine.
///
/// ## JSON Example
///
/// ```json
/// {
///   "standard_tiers": [{ "min_quantity": 1000, "discount_percentage": 5.0, "description": "" }],
///   "increase_factor": 0.1,
///   "decrease_factor": 0.05,
///   "validity_bands": [
///     { "volatility_above": 70.0, "validity_days": 15 },
///     { "volatility_above": 40.0, "validity_days": 30 }
///   ],
///   "default_validity_days": 45,
///   "escalation_threshold": 50.0,
///   "escalation_clause": "Prices are subject to revision..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPolicy {
    /// Breakpoints applied when no customer agreement exists
    pub standard_tiers: Vec<PricingTier>,
    /// Share of volatility passed on for an increasing material price
    pub increase_factor: f64,
    /// Share of volatility passed back for a decreasing material price
    pub decrease_factor: f64,
    /// Checked in order; the first band whose threshold is exceeded wins
    pub validity_bands: Vec<ValidityBand>,
    pub default_validity_days: u32,
    /// Escalation clause attached when average volatility exceeds this
    pub escalation_threshold: f64,
    pub escalation_clause: String,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            standard_tiers: STANDARD_QUANTITY_TIERS.clone(),
            increase_factor: 0.1,
            decrease_factor: 0.05,
            validity_bands: vec![
                ValidityBand { volatility_above: 70.0, validity_days: 15 },
                ValidityBand { volatility_above: 40.0, validity_days: 30 },
            ],
            default_validity_days: 45,
            escalation_threshold: 50.0,
            escalation_clause: ESCALATION_CLAUSE.to_string(),
        }
    }
}

impl PricingPolicy {
    /// Recommended quote validity for an average volatility
    pub fn validity_days(&self, average_volatility: f64) -> u32 {
        self.validity_bands
            .iter()
            .find(|band| average_volatility > band.volatility_above)
            .map_or(self.default_validity_days, |band| band.validity_days)
    }

    /// Escalation clause, present only above the threshold
    pub fn escalation_clause_for(&self, average_volatility: f64) -> Option<String> {
        (average_volatility > self.escalation_threshold).then(|| self.escalation_clause.clone())
    }
}

/// Costing defaults.
///
/// Geometry constants (allowances, trims, density) are fixed in
/// [`crate::equations::board`] and are not settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CostingSettings {
    /// Rates used when a quote request does not carry its own
    pub default_rates: RateSet,
}

/// All settings persisted alongside master data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    pub costing: CostingSettings,
    pub pricing: PricingPolicy,
}
