//! # Pricing
//!
//! Applies customer agreements, market conditions and material volatility
//! to a base cost estimate.
//!
//! - [`agreements`] - Quantity tiers and customer-specific discounts
//! - [`market`] - Seasonal adjustments, material price data, competitive factors
//! - [`engine`] - The ordered discount/premium calculation

pub mod agreements;
pub mod engine;
pub mod market;

pub use agreements::{select_tier, CustomerAgreement, PricingTier, SpecialDiscount};
pub use engine::{
    calculate, AdvancedPricingResult, DiscountBreakdown, PremiumBreakdown, PriceWarning,
    PricingInput,
};
pub use market::{
    AdjustmentType, CompetitiveFactors, MaterialCostData, PriceTrend, SeasonalAdjustment,
};
