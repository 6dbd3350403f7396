//! Worked scenarios printed by `corrugate_cli --demo`.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Value};

use corrugate_core::calculations::box_spec::{self, BoxConfiguration, LayerInput};
use corrugate_core::calculations::cost::{estimate, RateSet};
use corrugate_core::errors::CalcResult;
use corrugate_core::flute::PlyClass;
use corrugate_core::pricing::{self, MaterialCostData, PriceTrend, PricingInput};
use corrugate_core::settings::PricingPolicy;
use corrugate_core::units::Kilograms;

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: &'static str,
    pub description: &'static str,
    pub result: Value,
}

fn pricing_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 15).unwrap_or_default()
}

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

fn material(id: &str, volatility: f64) -> MaterialCostData {
    MaterialCostData {
        material_id: id.to_string(),
        current_price: 40.0,
        trend: PriceTrend::Stable,
        volatility,
    }
}

/// Run every worked example with the default pricing policy
pub fn run() -> CalcResult<Vec<ScenarioReport>> {
    let policy = PricingPolicy::default();

    let geometry = box_spec::calculate(&BoxConfiguration {
        label: "RSC 300x200x150".to_string(),
        length: 300,
        width: 200,
        height: 150,
        ply_class: PlyClass::ThreePly,
        flute_code: "B".to_string(),
        content_weight_kg: 20.0,
        stack_height: 8,
        safety_factor: 5.0,
        layers: vec![LayerInput::new(150, 18), LayerInput::new(120, 16), LayerInput::new(150, 18)],
    });

    let cost = estimate(Kilograms(0.5), &half_kilo_rates(), 1000);

    let tiers = pricing::calculate(
        &PricingInput::new(estimate(Kilograms(0.5), &half_kilo_rates(), 6000), pricing_date()),
        &policy,
    );

    let mut volatile = PricingInput::new(cost, pricing_date());
    volatile.material_costs = vec![material("KRAFT-150", 60.0), material("STARCH", 90.0)];
    let volatility = pricing::calculate(&volatile, &policy);

    Ok(vec![
        ScenarioReport {
            name: "box-geometry",
            description: "300 x 200 x 150 mm, 20 kg contents stacked 8 high, safety factor 5",
            result: serde_json::to_value(&geometry)?,
        },
        ScenarioReport {
            name: "base-cost",
            description: "0.5 kg box, 1000 pieces",
            result: serde_json::to_value(cost)?,
        },
        ScenarioReport {
            name: "quantity-breakpoint",
            description: "6000 pieces, no customer agreement",
            result: json!({
                "adjusted_price": tiers.adjusted_price,
                "quantity_discount": tiers.discounts.quantity,
                "discount_rate": tiers.discounts.quantity / tiers.adjusted_price,
                "final_price": tiers.final_price,
                "price_per_unit": tiers.price_per_unit,
            }),
        },
        ScenarioReport {
            name: "material-volatility",
            description: "Material volatility averaging 75",
            result: json!({
                "average_volatility": volatility.average_volatility,
                "recommended_validity_days": volatility.recommended_validity_days,
                "escalation_clause": volatility.escalation_clause,
            }),
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_reports() {
        crate::logging::init_test();
        let reports = run().unwrap();
        assert_eq!(reports.len(), 4);

        assert_eq!(reports[0].name, "box-geometry");
        let a = &reports[0].result;
        assert_eq!(a["sheet_size"]["deckle_mm"], 375);
        assert_eq!(a["sheet_size"]["cutting_mm"], 1060);
        assert_eq!(a["load_on_bottom_box_kg"], 140.0);

        let c = &reports[2].result;
        assert!((c["discount_rate"].as_f64().unwrap() - 0.10).abs() < 1e-12);

        let d = &reports[3].result;
        assert_eq!(d["recommended_validity_days"], 15);
        assert!(d["escalation_clause"].is_string());
    }
}
