//! Property tests for the calculators
//!
//! - Visible layer count follows the ply class
//! - Geometry formulas hold for any dimensions
//! - Recomputing with identical input gives identical output
//! - Cost per box never decreases when a single rate increases
//! - Premiums are computed on the discounted price

use chrono::NaiveDate;
use proptest::prelude::*;

use corrugate_core::calculations::box_spec::{calculate as compute_spec, BoxConfiguration, LayerInput};
use corrugate_core::calculations::cost::{estimate, RateSet};
use corrugate_core::flute::PlyClass;
use corrugate_core::pricing::{calculate as price, CompetitiveFactors, PricingInput};
use corrugate_core::settings::PricingPolicy;
use corrugate_core::units::Kilograms;

// ============================================================================
// Strategies
// ============================================================================

fn ply_class_strategy() -> impl Strategy<Value = PlyClass> {
    prop_oneof![
        Just(PlyClass::ThreePly),
        Just(PlyClass::FivePly),
        Just(PlyClass::SevenPly),
    ]
}

fn layer_strategy() -> impl Strategy<Value = LayerInput> {
    (0u32..=999, 0u32..=99).prop_map(|(gsm, bf)| LayerInput::new(gsm, bf))
}

fn config_strategy() -> impl Strategy<Value = BoxConfiguration> {
    (
        1u32..=999,
        1u32..=999,
        1u32..=999,
        ply_class_strategy(),
        "[ABCEX]{0,4}",
        0.0f64..500.0,
        0u32..20,
        1.0f64..10.0,
        prop::collection::vec(layer_strategy(), 0..=7),
    )
        .prop_map(
            |(length, width, height, ply_class, flute_code, content, stack, safety, layers)| {
                BoxConfiguration {
                    label: String::new(),
                    length,
                    width,
                    height,
                    ply_class,
                    flute_code,
                    content_weight_kg: content,
                    stack_height: stack,
                    safety_factor: safety,
                    layers,
                }
            },
        )
}

fn rates_strategy() -> impl Strategy<Value = RateSet> {
    (
        0.0f64..1000.0,
        0.0f64..100.0,
        0.0f64..50.0,
        0.0f64..50.0,
        0.0f64..20.0,
        0.0f64..100.0,
        0.0f64..20.0,
    )
        .prop_map(|(jw, sheet, making, printing, accessories, roi, carriage)| RateSet {
            jw_rate: jw,
            sheet_inward_rate: sheet,
            box_making_rate: making,
            printing_cost_rate: printing,
            accessories_rate: accessories,
            roi_percentage: roi,
            carriage_outward: carriage,
        })
}

fn bump(rates: RateSet, field: usize, delta: f64) -> RateSet {
    let mut bumped = rates;
    match field {
        0 => bumped.jw_rate += delta,
        1 => bumped.sheet_inward_rate += delta,
        2 => bumped.box_making_rate += delta,
        3 => bumped.printing_cost_rate += delta,
        4 => bumped.accessories_rate += delta,
        5 => bumped.roi_percentage += delta,
        _ => bumped.carriage_outward += delta,
    }
    bumped
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_visible_layer_count_follows_ply_class(config in config_strategy()) {
        let spec = compute_spec(&config);
        prop_assert_eq!(spec.layers.len(), config.ply_class.layer_count());
    }

    #[test]
    fn prop_geometry_formulas(config in config_strategy()) {
        let spec = compute_spec(&config);
        prop_assert_eq!(spec.outer_dimensions.length, config.length + 5);
        prop_assert_eq!(spec.outer_dimensions.width, config.width + 5);
        prop_assert_eq!(spec.outer_dimensions.height, config.height + 5);
        prop_assert_eq!(spec.sheet_size.deckle_mm, config.height + config.width + 25);
        prop_assert_eq!(spec.sheet_size.cutting_mm, (config.length + config.width) * 2 + 60);
    }

    #[test]
    fn prop_totals_are_non_negative(config in config_strategy()) {
        let spec = compute_spec(&config);
        prop_assert!(spec.total_box_weight_g >= 0.0);
        prop_assert!(spec.total_burst_strength >= 0.0);
    }

    #[test]
    fn prop_recompute_is_idempotent(config in config_strategy()) {
        prop_assert_eq!(compute_spec(&config), compute_spec(&config));
    }

    #[test]
    fn prop_cost_monotonic_in_each_rate(
        rates in rates_strategy(),
        kg in 0.0f64..50.0,
        field in 0usize..7,
        delta in 0.0f64..100.0,
    ) {
        let base = estimate(Kilograms(kg), &rates, 1);
        let raised = estimate(Kilograms(kg), &bump(rates, field, delta), 1);
        prop_assert!(
            raised.total_cost_per_box >= base.total_cost_per_box,
            "raising field {} by {} lowered cost: {} -> {}",
            field, delta, base.total_cost_per_box, raised.total_cost_per_box
        );
    }

    #[test]
    fn prop_premiums_use_discounted_price(
        rates in rates_strategy(),
        quantity in 1u32..20_000,
        loyalty in 0.0f64..20.0,
        market in 0.0f64..20.0,
        urgency in 0.0f64..20.0,
    ) {
        let cost = estimate(Kilograms(0.5), &rates, quantity);
        let mut input = PricingInput::new(cost, NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
        input.competitive = CompetitiveFactors {
            market_premium_pct: Some(market),
            urgency_pct: Some(urgency),
            loyalty_pct: Some(loyalty),
        };

        let result = price(&input, &PricingPolicy::default());
        prop_assert_eq!(result.after_discounts, result.adjusted_price - result.discounts.total);
        prop_assert_eq!(result.premiums.market, result.after_discounts * market / 100.0);
        prop_assert_eq!(result.premiums.urgency, result.after_discounts * urgency / 100.0);
        prop_assert_eq!(result.final_price, result.after_discounts + result.premiums.total);
    }
}
