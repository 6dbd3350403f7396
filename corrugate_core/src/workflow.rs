//! # Quote Workflow
//!
//! Chains the calculators: configuration → specification → base cost →
//! adjusted price. [`quote`] works on already-resolved inputs;
//! [`quote_from_repository`] first looks up the referenced box, customer
//! agreement and market data.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use corrugate_core::calculations::RateSet;
//! use corrugate_core::settings::PricingPolicy;
//! use corrugate_core::workflow::{quote, QuoteInputs, ResolvedBox};
//! use corrugate_core::calculations::WeightBasis;
//!
//! let inputs = QuoteInputs::new(
//!     ResolvedBox::Weight(WeightBasis::Known { kg: 1.0 }),
//!     RateSet { sheet_inward_rate: 10.0, ..RateSet::default() },
//!     6000,
//!     NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
//! );
//!
//! let outcome = quote(&inputs, &PricingPolicy::default());
//! assert!(outcome.specification.is_none());
//! assert!((outcome.pricing.final_price - 54000.0).abs() < 1e-9);
//! ```

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::calculations::box_spec::{self, BoxConfiguration, BoxSpecificationResult};
use crate::calculations::cost::{self, CostCalculation, CostInput, RateSet, WeightBasis};
use crate::errors::{CalcError, CalcResult};
use crate::pricing::agreements::CustomerAgreement;
use crate::pricing::engine::{self, AdvancedPricingResult, PricingInput};
use crate::pricing::market::{CompetitiveFactors, MaterialCostData, SeasonalAdjustment};
use crate::repository::{BoxRepository, MaterialRepository, PricingRepository};
use crate::settings::{GlobalSettings, PricingPolicy};

/// Where a quote's box comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum BoxSource {
    /// A box saved in the master
    Stored { box_id: String },
    /// A configuration entered on the quote itself
    Configuration { configuration: BoxConfiguration },
    /// Inside dimensions only; weight is estimated geometrically
    Geometric { length: u32, width: u32, height: u32 },
    /// Weight already known
    KnownWeight { kg: f64 },
}

/// A costing request as saved by the quotation screen.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Acme Q-118",
///   "box": { "source": "stored", "box_id": "BOX-0042" },
///   "quantity": 6000,
///   "customer_id": "CUST-7",
///   "competitive": { "urgency_pct": 3.0 },
///   "pricing_date": "2026-10-16"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub label: String,
    #[serde(rename = "box")]
    pub source: BoxSource,
    /// Falls back to the costing settings' default rates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rates: Option<RateSet>,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Overrides the stored box's type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_type_id: Option<String>,
    #[serde(default)]
    pub competitive: CompetitiveFactors,
    /// Today (UTC) when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_date: Option<NaiveDate>,
}

impl QuoteRequest {
    /// Check the request before any lookup or calculation.
    pub fn validate(&self) -> CalcResult<()> {
        if self.quantity == 0 {
            return Err(CalcError::invalid_input(
                "quantity",
                "0",
                "Quantity must be at least 1",
            ));
        }
        if let Some(rates) = &self.rates {
            rates.validate()?;
        }
        match &self.source {
            BoxSource::Stored { box_id } if box_id.trim().is_empty() => {
                Err(CalcError::missing_field("box.box_id"))
            }
            BoxSource::Configuration { configuration } => configuration.validate(),
            BoxSource::KnownWeight { kg } if !kg.is_finite() || *kg < 0.0 => Err(CalcError::invalid_input(
                "box.kg",
                kg.to_string(),
                "Weight must be a non-negative number",
            )),
            _ => Ok(()),
        }
    }
}

/// Box input after lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedBox {
    /// Full ply specification available
    Configuration(BoxConfiguration),
    /// Weight only
    Weight(WeightBasis),
}

/// Everything [`quote`] needs, already resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteInputs {
    pub label: String,
    pub resolved_box: ResolvedBox,
    pub rates: RateSet,
    pub quantity: u32,
    pub agreement: Option<CustomerAgreement>,
    pub seasonal_adjustments: Vec<SeasonalAdjustment>,
    pub material_costs: Vec<MaterialCostData>,
    pub competitive: CompetitiveFactors,
    pub box_type_id: Option<String>,
    pub pricing_date: NaiveDate,
}

impl QuoteInputs {
    /// Inputs with no agreement or market data
    pub fn new(resolved_box: ResolvedBox, rates: RateSet, quantity: u32, pricing_date: NaiveDate) -> Self {
        QuoteInputs {
            label: String::new(),
            resolved_box,
            rates,
            quantity,
            agreement: None,
            seasonal_adjustments: Vec::new(),
            material_costs: Vec::new(),
            competitive: CompetitiveFactors::default(),
            box_type_id: None,
            pricing_date,
        }
    }
}

/// Read-only record handed to quotation documents and reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteOutcome {
    pub label: String,
    /// Absent when the box was costed by weight alone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specification: Option<BoxSpecificationResult>,
    pub cost: CostCalculation,
    pub pricing: AdvancedPricingResult,
}

/// Run the full calculation chain on resolved inputs.
pub fn quote(inputs: &QuoteInputs, policy: &PricingPolicy) -> QuoteOutcome {
    let (specification, weight) = match &inputs.resolved_box {
        ResolvedBox::Configuration(configuration) => {
            let spec = box_spec::calculate(configuration);
            let weight = WeightBasis::from_specification(&spec);
            (Some(spec), weight)
        }
        ResolvedBox::Weight(weight) => (None, *weight),
    };

    let cost = cost::calculate(&CostInput {
        weight,
        rates: inputs.rates,
        quantity: inputs.quantity,
    });

    let pricing = engine::calculate(
        &PricingInput {
            cost,
            agreement: inputs.agreement.clone(),
            seasonal_adjustments: inputs.seasonal_adjustments.clone(),
            material_costs: inputs.material_costs.clone(),
            competitive: inputs.competitive,
            box_type_id: inputs.box_type_id.clone(),
            pricing_date: inputs.pricing_date,
        },
        policy,
    );

    QuoteOutcome {
        label: inputs.label.clone(),
        specification,
        cost,
        pricing,
    }
}

/// Resolve a request against master data.
///
/// Layers that reference a paper take its GSM/BF from the materials master.
/// A stored box without any paper entered falls back to its geometric
/// weight. A customer with no agreement is priced on standard breakpoints.
#[instrument(skip(repo, request, settings), fields(label = %request.label, quantity = request.quantity))]
pub fn resolve_request<R>(repo: &R, request: &QuoteRequest, settings: &GlobalSettings) -> CalcResult<QuoteInputs>
where
    R: BoxRepository + MaterialRepository + PricingRepository,
{
    request.validate()?;

    let (resolved_box, stored_type) = match &request.source {
        BoxSource::Stored { box_id } => {
            let record = repo.require_box(box_id)?;
            let resolved = if record.has_ply_specification() {
                ResolvedBox::Configuration(record.to_configuration(repo)?)
            } else {
                debug!(box_id = %box_id, "no ply specification, using geometric weight");
                ResolvedBox::Weight(WeightBasis::Geometric {
                    length: record.length,
                    width: record.width,
                    height: record.height,
                })
            };
            (resolved, record.box_type_id.clone())
        }
        BoxSource::Configuration { configuration } => (ResolvedBox::Configuration(configuration.clone()), None),
        BoxSource::Geometric { length, width, height } => (
            ResolvedBox::Weight(WeightBasis::Geometric {
                length: *length,
                width: *width,
                height: *height,
            }),
            None,
        ),
        BoxSource::KnownWeight { kg } => (ResolvedBox::Weight(WeightBasis::Known { kg: *kg }), None),
    };

    let agreement = match &request.customer_id {
        Some(customer_id) => repo.agreement_for_customer(customer_id)?,
        None => None,
    };

    Ok(QuoteInputs {
        label: request.label.clone(),
        resolved_box,
        rates: request.rates.unwrap_or(settings.costing.default_rates),
        quantity: request.quantity,
        agreement,
        seasonal_adjustments: repo.seasonal_adjustments()?,
        material_costs: repo.material_costs()?,
        competitive: request.competitive,
        box_type_id: request.box_type_id.clone().or(stored_type),
        pricing_date: request.pricing_date.unwrap_or_else(|| Utc::now().date_naive()),
    })
}

/// Resolve a request and quote it.
#[instrument(skip(repo, request, settings), fields(label = %request.label))]
pub fn quote_from_repository<R>(repo: &R, request: &QuoteRequest, settings: &GlobalSettings) -> CalcResult<QuoteOutcome>
where
    R: BoxRepository + MaterialRepository + PricingRepository,
{
    let inputs = resolve_request(repo, request, settings)?;
    let outcome = quote(&inputs, &settings.pricing);
    info!(
        final_price = outcome.pricing.final_price,
        validity_days = outcome.pricing.recommended_validity_days,
        "quote computed"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::{BoxLayer, BoxRecord};
    use crate::materials::{MaterialRecord, ProductSpecification};
    use crate::flute::PlyClass;
    use crate::pricing::agreements::{PricingTier, SpecialDiscount};
    use crate::pricing::market::PriceTrend;
    use crate::repository::InMemoryRepository;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn rates() -> RateSet {
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

    fn stored_box(id: &str, layers: Vec<BoxLayer>) -> BoxRecord {
        BoxRecord {
            id: id.to_string(),
            name: "Carton".to_string(),
            box_type_id: Some("RSC".to_string()),
            client: None,
            length: 300,
            width: 200,
            height: 150,
            ply_class: PlyClass::ThreePly,
            flute_code: "B".to_string(),
            layers,
            content_weight_kg: 20.0,
            stack_height: 8,
            safety_factor: 5.0,
        }
    }

    fn repo() -> InMemoryRepository {
        let mut repo = InMemoryRepository::new();
        repo.boxes.push(stored_box(
            "BOX-1",
            vec![BoxLayer::entered(150, 18), BoxLayer::entered(120, 16), BoxLayer::entered(150, 18)],
        ));
        repo.boxes.push(stored_box(
            "BOX-REF",
            vec![BoxLayer::entered(150, 18), BoxLayer::from_material("KP-120-16"), BoxLayer::entered(150, 18)],
        ));
        repo.boxes.push(stored_box(
            "BOX-GLUE",
            vec![BoxLayer::entered(150, 18), BoxLayer::from_material("STARCH"), BoxLayer::entered(150, 18)],
        ));
        repo.boxes.push(stored_box("BOX-BARE", vec![]));
        repo.materials.push(MaterialRecord::new(
            "KP-120-16",
            "Kraft 120/16",
            ProductSpecification::KraftPaper {
                gsm: Some(120),
                bf: Some(16),
                deckle_mm: None,
                moisture_pct: None,
                shade: None,
            },
        ));
        repo.materials.push(MaterialRecord::new(
            "STARCH",
            "Starch",
            ProductSpecification::Adhesive { solid_content_pct: None, viscosity_cps: None },
        ));
        repo.agreements.push(
            CustomerAgreement::new("AGR-1", "CUST-1")
                .with_tier(PricingTier::new(1, None, 3.0))
                .with_special_discount(SpecialDiscount {
                    box_type_id: Some("RSC".to_string()),
                    percentage: 1.0,
                    description: "RSC".to_string(),
                }),
        );
        repo.material_costs.push(MaterialCostData {
            material_id: "KRAFT".to_string(),
            current_price: 40.0,
            trend: PriceTrend::Increasing,
            volatility: 80.0,
        });
        repo
    }

    fn request(source: BoxSource) -> QuoteRequest {
        QuoteRequest {
            label: "Q-1".to_string(),
            source,
            rates: Some(rates()),
            quantity: 1000,
            customer_id: None,
            box_type_id: None,
            competitive: CompetitiveFactors::default(),
            pricing_date: Some(date()),
        }
    }

    #[test]
    fn test_stored_box_with_specification() {
        let outcome = quote_from_repository(
            &repo(),
            &request(BoxSource::Stored { box_id: "BOX-1".to_string() }),
            &GlobalSettings::default(),
        )
        .unwrap();

        let spec = outcome.specification.unwrap();
        assert_eq!(spec.sheet_size.deckle_mm, 375);
        assert!((outcome.cost.total_box_weight_kg - spec.total_box_weight_g / 1000.0).abs() < 1e-12);
        assert_eq!(outcome.pricing.recommended_validity_days, 15);
        assert!(outcome.pricing.escalation_clause.is_some());
    }

    #[test]
    fn test_referenced_paper_is_resolved_from_materials() {
        let settings = GlobalSettings::default();
        let entered = quote_from_repository(
            &repo(),
            &request(BoxSource::Stored { box_id: "BOX-1".to_string() }),
            &settings,
        )
        .unwrap();
        let referenced = quote_from_repository(
            &repo(),
            &request(BoxSource::Stored { box_id: "BOX-REF".to_string() }),
            &settings,
        )
        .unwrap();

        let spec = referenced.specification.unwrap();
        assert_eq!(spec.layers[1].gsm, 120);
        assert_eq!(spec.total_box_weight_g, entered.specification.unwrap().total_box_weight_g);
        assert_eq!(referenced.cost, entered.cost);
    }

    #[test]
    fn test_non_paper_layer_reference_fails() {
        let err = quote_from_repository(
            &repo(),
            &request(BoxSource::Stored { box_id: "BOX-GLUE".to_string() }),
            &GlobalSettings::default(),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_bare_box_uses_geometric_weight() {
        let outcome = quote_from_repository(
            &repo(),
            &request(BoxSource::Stored { box_id: "BOX-BARE".to_string() }),
            &GlobalSettings::default(),
        )
        .unwrap();
        assert!(outcome.specification.is_none());
        // 300 × 200 × 150 × 0.5 / 1000
        assert!((outcome.cost.total_box_weight_kg - 4500.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_box_is_not_found() {
        let err = quote_from_repository(
            &repo(),
            &request(BoxSource::Stored { box_id: "BOX-404".to_string() }),
            &GlobalSettings::default(),
        )
        .unwrap_err();
        assert_eq!(err, CalcError::not_found("Box", "BOX-404"));
    }

    #[test]
    fn test_agreement_and_box_type_are_resolved() {
        let mut req = request(BoxSource::Stored { box_id: "BOX-1".to_string() });
        req.customer_id = Some("CUST-1".to_string());
        let inputs = resolve_request(&repo(), &req, &GlobalSettings::default()).unwrap();
        assert_eq!(inputs.box_type_id.as_deref(), Some("RSC"));

        let outcome = quote(&inputs, &PricingPolicy::default());
        let adjusted = outcome.pricing.adjusted_price;
        assert!((outcome.pricing.discounts.quantity - adjusted * 0.03).abs() < 1e-9);
        assert!((outcome.pricing.discounts.customer - adjusted * 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_customer_gets_standard_breakpoints() {
        let mut req = request(BoxSource::KnownWeight { kg: 0.5 });
        req.customer_id = Some("CUST-404".to_string());
        let outcome = quote_from_repository(&repo(), &req, &GlobalSettings::default()).unwrap();
        assert!((outcome.pricing.discounts.quantity - outcome.pricing.adjusted_price * 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_default_rates_from_settings() {
        let mut req = request(BoxSource::KnownWeight { kg: 0.5 });
        req.rates = None;
        let mut settings = GlobalSettings::default();
        settings.costing.default_rates = rates();
        let outcome = quote_from_repository(&InMemoryRepository::new(), &req, &settings).unwrap();
        assert!((outcome.cost.total_cost_per_box - 8.64125).abs() < 1e-9);
    }

    #[test]
    fn test_request_validation() {
        let mut req = request(BoxSource::KnownWeight { kg: 0.5 });
        req.quantity = 0;
        assert_eq!(req.validate().unwrap_err().error_code(), "INVALID_INPUT");

        let req = request(BoxSource::Stored { box_id: " ".to_string() });
        assert_eq!(req.validate().unwrap_err().error_code(), "MISSING_FIELD");

        let req = request(BoxSource::Configuration { configuration: BoxConfiguration::default() });
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_request_json() {
        let req: QuoteRequest = serde_json::from_str(
            r#"{"box":{"source":"geometric","length":30,"width":20,"height":15},"quantity":10}"#,
        )
        .unwrap();
        assert_eq!(req.source, BoxSource::Geometric { length: 30, width: 20, height: 15 });
        assert!(req.rates.is_none());
        assert!(req.pricing_date.is_none());
    }
}
