//! # Advanced Pricing
//!
//! Turns a base cost estimate into a quotable price. The steps run in a
//! fixed order and every discount is taken before any premium:
//!
//! ```text
//! original        = cost.total_price
//! adjusted        = original + material adjustment
//! discounts       = quantity + special + loyalty        (all on adjusted)
//! after discounts = adjusted − discounts
//! premiums        = seasonal + market + urgency         (all on after discounts)
//! final           = after discounts + premiums
//! ```
//!
//! Nothing is clamped. A negative final price, or one below the
//! manufacturing cost, is reported in `price_warnings` and logged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::cost::CostCalculation;
use crate::pricing::agreements::{select_tier, CustomerAgreement};
use crate::pricing::market::{
    average_volatility, CompetitiveFactors, MaterialCostData, PriceTrend, SeasonalAdjustment,
};
use crate::settings::PricingPolicy;

/// Everything the pricing engine needs, already resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingInput {
    /// Base cost estimate; its quantity is the quantity being priced
    pub cost: CostCalculation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agreement: Option<CustomerAgreement>,
    #[serde(default)]
    pub seasonal_adjustments: Vec<SeasonalAdjustment>,
    #[serde(default)]
    pub material_costs: Vec<MaterialCostData>,
    #[serde(default)]
    pub competitive: CompetitiveFactors,
    /// Box type being quoted, matched against special discounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_type_id: Option<String>,
    /// Date seasonal windows are checked against
    pub pricing_date: NaiveDate,
}

impl PricingInput {
    /// Input with no agreement, adjustments or competitive factors
    pub fn new(cost: CostCalculation, pricing_date: NaiveDate) -> Self {
        PricingInput {
            cost,
            agreement: None,
            seasonal_adjustments: Vec::new(),
            material_costs: Vec::new(),
            competitive: CompetitiveFactors::default(),
            box_type_id: None,
            pricing_date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DiscountBreakdown {
    pub quantity: f64,
    pub customer: f64,
    pub loyalty: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PremiumBreakdown {
    pub seasonal: f64,
    pub market: f64,
    pub urgency: f64,
    pub total: f64,
}

/// Conditions on the final price worth a second look before quoting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceWarning {
    NegativeFinalPrice,
    BelowManufacturingCost,
}

/// Results from the pricing engine.
///
/// ## JSON Example
///
/// ```json
/// {
///   "original_price": 8641.25,
///   "material_cost_adjustment": 0.0,
///   "adjusted_price": 8641.25,
///   "discounts": { "quantity": 432.06, "customer": 0.0, "loyalty": 0.0, "total": 432.06 },
///   "after_discounts": 8209.19,
///   "premiums": { "seasonal": 0.0, "market": 0.0, "urgency": 0.0, "total": 0.0 },
///   "final_price": 8209.19,
///   "price_per_unit": 8.21,
///   "average_volatility": 0.0,
///   "recommended_validity_days": 45,
///   "applied_adjustments": ["Quantity discount 5% (Standard 1000+)"],
///   "price_warnings": []
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedPricingResult {
    pub original_price: f64,
    pub material_cost_adjustment: f64,
    pub adjusted_price: f64,
    pub discounts: DiscountBreakdown,
    pub after_discounts: f64,
    pub premiums: PremiumBreakdown,
    pub final_price: f64,
    pub price_per_unit: f64,
    pub average_volatility: f64,
    pub recommended_validity_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation_clause: Option<String>,
    /// Human-readable trail of what was applied, in order
    #[serde(default)]
    pub applied_adjustments: Vec<String>,
    #[serde(default)]
    pub price_warnings: Vec<PriceWarning>,
}

fn percent_of(base: f64, pct: f64) -> f64 {
    base * pct / 100.0
}

/// Sum of per-material adjustments on the original price.
pub fn material_cost_adjustment(
    original_price: f64,
    materials: &[MaterialCostData],
    policy: &PricingPolicy,
) -> f64 {
    materials
        .iter()
        .map(|material| {
            let share = material.volatility / 100.0;
            match material.trend {
                PriceTrend::Increasing => original_price * share * policy.increase_factor,
                PriceTrend::Decreasing => -(original_price * share * policy.decrease_factor),
                PriceTrend::Stable => 0.0,
            }
        })
        .sum()
}

/// Price a cost estimate.
///
/// Pure: the pricing date comes from the input, never the clock.
///
/// ## Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use corrugate_core::calculations::cost::{estimate, RateSet};
/// use corrugate_core::pricing::{calculate, PricingInput};
/// use corrugate_core::settings::PricingPolicy;
/// use corrugate_core::units::Kilograms;
///
/// let rates = RateSet { sheet_inward_rate: 10.0, ..RateSet::default() };
/// let cost = estimate(Kilograms(1.0), &rates, 6000);
/// let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
///
/// let result = calculate(&PricingInput::new(cost, date), &PricingPolicy::default());
/// assert!((result.discounts.quantity - 6000.0).abs() < 1e-9);
/// assert!((result.final_price - 54000.0).abs() < 1e-9);
/// ```
pub fn calculate(input: &PricingInput, policy: &PricingPolicy) -> AdvancedPricingResult {
    let mut applied = Vec::new();
    let original_price = input.cost.total_price;
    let quantity = input.cost.quantity;

    // 1. Material price movement
    let material_adjustment =
        material_cost_adjustment(original_price, &input.material_costs, policy);
    let adjusted_price = original_price + material_adjustment;
    if material_adjustment != 0.0 {
        applied.push(format!("Material cost adjustment {:+.2}", material_adjustment));
    }

    // 2. Quantity tier: the agreement's tiers replace the standard breakpoints
    let tiers = match &input.agreement {
        Some(agreement) => agreement.pricing_tiers.as_slice(),
        None => policy.standard_tiers.as_slice(),
    };
    let quantity_discount = match select_tier(tiers, quantity) {
        Some(tier) => {
            applied.push(format!(
                "Quantity discount {}% ({})",
                tier.discount_percentage, tier.description
            ));
            percent_of(adjusted_price, tier.discount_percentage)
        }
        None => 0.0,
    };

    // 3. Agreement special discounts
    let box_type = input.box_type_id.as_deref();
    let customer_discount: f64 = input
        .agreement
        .iter()
        .flat_map(|agreement| agreement.special_discounts.iter())
        .filter(|discount| discount.applies_to(box_type))
        .map(|discount| {
            applied.push(format!(
                "Special discount {}% ({})",
                discount.percentage, discount.description
            ));
            percent_of(adjusted_price, discount.percentage)
        })
        .sum();

    // 4. Loyalty
    let loyalty_discount = match input.competitive.loyalty_pct {
        Some(pct) => {
            applied.push(format!("Loyalty discount {}%", pct));
            percent_of(adjusted_price, pct)
        }
        None => 0.0,
    };

    // 5. Discounts are all taken on the adjusted price
    let total_discount = quantity_discount + customer_discount + loyalty_discount;
    let after_discounts = adjusted_price - total_discount;

    // 6. Seasonal premiums on the discounted price
    let seasonal: f64 = input
        .seasonal_adjustments
        .iter()
        .filter(|adjustment| adjustment.applies_on(input.pricing_date))
        .map(|adjustment| {
            applied.push(format!("Seasonal adjustment: {}", adjustment.name));
            adjustment.premium_for(after_discounts)
        })
        .sum();

    // 7. Market and urgency premiums
    let market = input
        .competitive
        .market_premium_pct
        .map_or(0.0, |pct| percent_of(after_discounts, pct));
    if let Some(pct) = input.competitive.market_premium_pct {
        applied.push(format!("Market premium {}%", pct));
    }
    let urgency = input
        .competitive
        .urgency_pct
        .map_or(0.0, |pct| percent_of(after_discounts, pct));
    if let Some(pct) = input.competitive.urgency_pct {
        applied.push(format!("Urgency premium {}%", pct));
    }
    let total_premium = seasonal + market + urgency;

    // 8. Quantity 0 divides by zero; callers validate quantity first
    let final_price = after_discounts + total_premium;
    let price_per_unit = final_price / quantity as f64;

    // 9. Validity and escalation from average volatility
    let volatility = average_volatility(&input.material_costs);
    let recommended_validity_days = policy.validity_days(volatility);
    let escalation_clause = policy.escalation_clause_for(volatility);

    let mut price_warnings = Vec::new();
    if final_price < 0.0 {
        warn!(final_price, "pricing produced a negative final price");
        price_warnings.push(PriceWarning::NegativeFinalPrice);
    }
    let mfg_cost = input.cost.total_mfg_cost();
    if final_price < mfg_cost {
        warn!(final_price, mfg_cost, "final price is below manufacturing cost");
        price_warnings.push(PriceWarning::BelowManufacturingCost);
    }

    debug!(
        original_price,
        adjusted_price,
        total_discount,
        total_premium,
        final_price,
        recommended_validity_days,
        "advanced pricing computed"
    );

    AdvancedPricingResult {
        original_price,
        material_cost_adjustment: material_adjustment,
        adjusted_price,
        discounts: DiscountBreakdown {
            quantity: quantity_discount,
            customer: customer_discount,
            loyalty: loyalty_discount,
            total: total_discount,
        },
        after_discounts,
        premiums: PremiumBreakdown {
            seasonal,
            market,
            urgency,
            total: total_premium,
        },
        final_price,
        price_per_unit,
        average_volatility: volatility,
        recommended_validity_days,
        escalation_clause,
        applied_adjustments: applied,
        price_warnings,
    }
}
