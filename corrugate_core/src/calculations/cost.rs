//! # Base Cost Estimation
//!
//! Rolls a box weight and the shop's manufacturing rates into a per-box and
//! total manufacturing cost, including the ROI markup.
//!
//! ## Cost Build-Up
//!
//! ```text
//! jw charges      = kg × jw_rate / 1000
//! sheet inward    = kg × sheet_inward_rate
//! box making      = box_making_rate            (flat, per box)
//! printing        = printing_cost_rate         (flat, per box)
//! accessories     = kg × accessories_rate
//! ───────────────────────────────────────────
//! mfg cost / box  = sum of the above
//! roi             = mfg × roi_percentage / 100
//! cost / box      = mfg + roi + carriage_outward
//! total price     = cost / box × quantity
//! ```
//!
//! ## Example
//!
//! ```rust
//! use corrugate_core::calculations::cost::{calculate, CostInput, RateSet, WeightBasis};
//!
//! let input = CostInput {
//!     weight: WeightBasis::Known { kg: 0.5 },
//!     rates: RateSet {
//!         jw_rate: 50.0,
//!         sheet_inward_rate: 2.0,
//!         box_making_rate: 1.5,
//!         printing_cost_rate: 3.0,
//!         accessories_rate: 0.5,
//!         roi_percentage: 15.0,
//!         carriage_outward: 2.0,
//!     },
//!     quantity: 1000,
//! };
//!
//! let cost = calculate(&input);
//! assert!((cost.total_cost_per_box - 8.64125).abs() < 1e-9);
//! assert!((cost.total_price - 8641.25).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::box_spec::BoxSpecificationResult;
use crate::equations::board;
use crate::errors::{CalcError, CalcResult};
use crate::units::{Grams, Kilograms};

/// Manufacturing rates, all non-negative currency-per-unit values.
///
/// ## JSON Example
///
/// ```json
/// {
///   "jw_rate": 50.0,
///   "sheet_inward_rate": 2.0,
///   "box_making_rate": 1.5,
///   "printing_cost_rate": 3.0,
///   "accessories_rate": 0.5,
///   "roi_percentage": 15.0,
///   "carriage_outward": 2.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RateSet {
    /// Job-work (outsourced processing) charge per tonne
    #[serde(default)]
    pub jw_rate: f64,
    /// Corrugated sheet inward cost per kg
    #[serde(default)]
    pub sheet_inward_rate: f64,
    /// Conversion cost per box
    #[serde(default)]
    pub box_making_rate: f64,
    /// Printing cost per box
    #[serde(default)]
    pub printing_cost_rate: f64,
    /// Accessories (stitching, tape, partitions) per kg
    #[serde(default)]
    pub accessories_rate: f64,
    /// Markup on manufacturing cost (%)
    #[serde(default)]
    pub roi_percentage: f64,
    /// Freight per box
    #[serde(default)]
    pub carriage_outward: f64,
}

impl RateSet {
    /// Validate that every rate is a finite, non-negative number.
    pub fn validate(&self) -> CalcResult<()> {
        let fields = [
            ("jw_rate", self.jw_rate),
            ("sheet_inward_rate", self.sheet_inward_rate),
            ("box_making_rate", self.box_making_rate),
            ("printing_cost_rate", self.printing_cost_rate),
            ("accessories_rate", self.accessories_rate),
            ("roi_percentage", self.roi_percentage),
            ("carriage_outward", self.carriage_outward),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Rate must be a non-negative number",
                ));
            }
        }
        Ok(())
    }
}

/// Where the per-box weight comes from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "basis", rename_all = "snake_case")]
pub enum WeightBasis {
    /// Sum of ply weights from the box specification (grams)
    Specification { total_box_weight_g: f64 },
    /// No ply specification: estimate from inside dimensions
    Geometric { length: u32, width: u32, height: u32 },
    /// Weight already known in kilograms
    Known { kg: f64 },
}

impl WeightBasis {
    /// Weight basis from a computed box specification
    pub fn from_specification(spec: &BoxSpecificationResult) -> Self {
        WeightBasis::Specification {
            total_box_weight_g: spec.total_box_weight_g,
        }
    }

    /// Per-box weight in kilograms
    pub fn kilograms(&self) -> Kilograms {
        match *self {
            WeightBasis::Specification { total_box_weight_g } => Grams(total_box_weight_g).into(),
            WeightBasis::Geometric { length, width, height } => {
                Kilograms(board::geometric_weight_kg(length, width, height))
            }
            WeightBasis::Known { kg } => Kilograms(kg),
        }
    }
}

/// Input parameters for a cost estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostInput {
    pub weight: WeightBasis,
    pub rates: RateSet,
    /// Number of boxes (validated ≥ 1 by the caller)
    pub quantity: u32,
}

/// Results from the cost estimate.
///
/// Built fresh on every estimate; nothing here is updated in place.
///
/// ## JSON Example
///
/// ```json
/// {
///   "total_box_weight_kg": 0.5,
///   "jw_charges": 0.025,
///   "sheet_inward_cost": 1.0,
///   "box_making_cost": 1.5,
///   "printing_cost": 3.0,
///   "accessories_cost": 0.25,
///   "mfg_cost_per_box": 5.775,
///   "roi_amount": 0.86625,
///   "carriage_outward": 2.0,
///   "total_cost_per_box": 8.64125,
///   "quantity": 1000,
///   "total_price": 8641.25
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostCalculation {
    pub total_box_weight_kg: f64,
    pub jw_charges: f64,
    pub sheet_inward_cost: f64,
    pub box_making_cost: f64,
    pub printing_cost: f64,
    pub accessories_cost: f64,
    pub mfg_cost_per_box: f64,
    pub roi_amount: f64,
    pub carriage_outward: f64,
    pub total_cost_per_box: f64,
    pub quantity: u32,
    /// total_cost_per_box × quantity
    pub total_price: f64,
}

impl CostCalculation {
    /// Manufacturing cost for the whole order, before ROI and freight
    pub fn total_mfg_cost(&self) -> f64 {
        self.mfg_cost_per_box * self.quantity as f64
    }
}

/// Estimate manufacturing cost for a box weight, rate set and quantity.
///
/// This is a pure function; it never fails. Quantity 0 yields a zero total.
pub fn calculate(input: &CostInput) -> CostCalculation {
    estimate(input.weight.kilograms(), &input.rates, input.quantity)
}

/// Estimate manufacturing cost from a weight already in kilograms.
pub fn estimate(weight: Kilograms, rates: &RateSet, quantity: u32) -> CostCalculation {
    let kg = weight.value();

    let jw_charges = kg * rates.jw_rate / 1000.0;
    let sheet_inward_cost = kg * rates.sheet_inward_rate;
    let box_making_cost = rates.box_making_rate;
    let printing_cost = rates.printing_cost_rate;
    let accessories_cost = kg * rates.accessories_rate;

    let mfg_cost_per_box =
        jw_charges + sheet_inward_cost + box_making_cost + printing_cost + accessories_cost;
    let roi_amount = mfg_cost_per_box * rates.roi_percentage / 100.0;
    let total_cost_per_box = mfg_cost_per_box + roi_amount + rates.carriage_outward;
    let total_price = total_cost_per_box * quantity as f64;

    debug!(
        total_box_weight_kg = kg,
        mfg_cost_per_box,
        total_cost_per_box,
        quantity,
        total_price,
        "cost estimate computed"
    );

    CostCalculation {
        total_box_weight_kg: kg,
        jw_charges,
        sheet_inward_cost,
        box_making_cost,
        printing_cost,
        accessories_cost,
        mfg_cost_per_box,
        roi_amount,
        carriage_outward: rates.carriage_outward,
        total_cost_per_box,
        quantity,
        total_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn half_kilo_rates() -> RateSet {
        RateSet {
            jw_rate: 50.0,
            sheet_inward_rate: 2.0,
            box_making_rate: 1.5,
            printing_cost_rate: 3.0,
            accessories_rate: 0.5,
            roi_percentage: 15.0,
            carriage_outward: 2.0,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_half_kilo_box_1000_pieces() {
        let cost = estimate(Kilograms(0.5), &half_kilo_rates(), 1000);
        assert_close(cost.total_box_weight_kg, 0.5);
        assert_close(cost.jw_charges, 0.025);
        assert_close(cost.sheet_inward_cost, 1.0);
        assert_close(cost.box_making_cost, 1.5);
        assert_close(cost.printing_cost, 3.0);
        assert_close(cost.accessories_cost, 0.25);
        assert_close(cost.mfg_cost_per_box, 5.775);
        assert_close(cost.roi_amount, 0.86625);
        assert_close(cost.total_cost_per_box, 8.64125);
        assert!((cost.total_price - 8641.25).abs() < 1e-6);
    }

    #[test]
    fn test_specification_weight_is_converted_to_kg() {
        let basis = WeightBasis::Specification { total_box_weight_g: 500.0 };
        assert_close(basis.kilograms().0, 0.5);
    }

    #[test]
    fn test_geometric_weight_estimate() {
        // 30 × 20 × 15 × 0.5 / 1000 = 4.5 kg
        let basis = WeightBasis::Geometric { length: 30, width: 20, height: 15 };
        assert_close(basis.kilograms().0, 4.5);

        let cost = calculate(&CostInput {
            weight: basis,
            rates: half_kilo_rates(),
            quantity: 10,
        });
        assert_close(cost.sheet_inward_cost, 9.0);
    }

    #[test]
    fn test_zero_quantity_gives_zero_total() {
        let cost = estimate(Kilograms(0.5), &half_kilo_rates(), 0);
        assert_eq!(cost.total_price, 0.0);
        assert!(cost.total_cost_per_box > 0.0);
    }

    #[test]
    fn test_flat_costs_do_not_scale_with_weight() {
        let light = estimate(Kilograms(0.1), &half_kilo_rates(), 1);
        let heavy = estimate(Kilograms(2.0), &half_kilo_rates(), 1);
        assert_eq!(light.box_making_cost, heavy.box_making_cost);
        assert_eq!(light.printing_cost, heavy.printing_cost);
        assert!(heavy.sheet_inward_cost > light.sheet_inward_cost);
    }

    #[test]
    fn test_total_mfg_cost() {
        let cost = estimate(Kilograms(0.5), &half_kilo_rates(), 1000);
        assert!((cost.total_mfg_cost() - 5775.0).abs() < 1e-6);
    }

    #[test]
    fn test_rate_validation() {
        assert!(half_kilo_rates().validate().is_ok());
        let mut rates = half_kilo_rates();
        rates.roi_percentage = -1.0;
        assert!(rates.validate().is_err());
        rates.roi_percentage = f64::NAN;
        assert!(rates.validate().is_err());
    }

    #[test]
    fn test_weight_basis_serialization() {
        let json = serde_json::to_string(&WeightBasis::Geometric { length: 1, width: 2, height: 3 }).unwrap();
        assert!(json.contains("\"basis\":\"geometric\""));
        let roundtrip: WeightBasis = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, WeightBasis::Geometric { length: 1, width: 2, height: 3 });
    }
}
