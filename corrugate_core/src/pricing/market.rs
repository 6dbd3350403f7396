//! Market inputs to pricing: seasonal adjustments, raw-material price
//! movement and competitive factors.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// How a seasonal adjustment's value is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentType {
    /// Percentage of the discounted price
    Percentage,
    /// Fixed amount added to the order total
    Fixed,
}

/// A date-bounded premium (festival season, monsoon freight, ...).
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "Festive season",
///   "start_date": "2026-10-01",
///   "end_date": "2026-11-15",
///   "adjustment_type": "percentage",
///   "adjustment_value": 4.0,
///   "is_active": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalAdjustment {
    pub name: String,
    pub start_date: NaiveDate,
    /// Inclusive
    pub end_date: NaiveDate,
    pub adjustment_type: AdjustmentType,
    pub adjustment_value: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl SeasonalAdjustment {
    /// Whether the adjustment is active and `date` lies inside its window
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.is_active && self.start_date <= date && date <= self.end_date
    }

    /// Premium this adjustment adds to a discounted price
    pub fn premium_for(&self, after_discounts: f64) -> f64 {
        match self.adjustment_type {
            AdjustmentType::Percentage => after_discounts * self.adjustment_value / 100.0,
            AdjustmentType::Fixed => self.adjustment_value,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.end_date < self.start_date {
            return Err(CalcError::invalid_input(
                "end_date",
                self.end_date.to_string(),
                format!("End date is before start date {}", self.start_date),
            ));
        }
        if !self.adjustment_value.is_finite() {
            return Err(CalcError::invalid_input(
                "adjustment_value",
                self.adjustment_value.to_string(),
                "Adjustment must be a finite number",
            ));
        }
        Ok(())
    }
}

/// Direction of a raw-material price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTrend {
    Increasing,
    Decreasing,
    #[default]
    Stable,
}

/// Current price and volatility of one raw material (kraft paper, starch, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialCostData {
    pub material_id: String,
    pub current_price: f64,
    #[serde(default)]
    pub trend: PriceTrend,
    /// 0-100
    pub volatility: f64,
}

impl MaterialCostData {
    pub fn validate(&self) -> CalcResult<()> {
        if !(0.0..=100.0).contains(&self.volatility) {
            return Err(CalcError::invalid_input(
                "volatility",
                self.volatility.to_string(),
                "Volatility must be between 0 and 100",
            ));
        }
        if !self.current_price.is_finite() || self.current_price < 0.0 {
            return Err(CalcError::invalid_input(
                "current_price",
                self.current_price.to_string(),
                "Price must be a non-negative number",
            ));
        }
        Ok(())
    }
}

/// Mean volatility across materials; 0 when there are none.
pub fn average_volatility(materials: &[MaterialCostData]) -> f64 {
    if materials.is_empty() {
        return 0.0;
    }
    materials.iter().map(|m| m.volatility).sum::<f64>() / materials.len() as f64
}

/// Sales-side adjustments entered on the quotation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CompetitiveFactors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_premium_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loyalty_pct: Option<f64>,
}
