//! # Repositories
//!
//! Read-only lookups the quote workflow uses to resolve referenced master
//! data. The calculators themselves never touch a repository; they take
//! already-resolved records.
//!
//! [`InMemoryRepository`] implements every trait over plain vectors and is
//! serializable, so an application can embed it in its own file format.

use serde::{Deserialize, Serialize};

use crate::boxes::BoxRecord;
use crate::errors::{CalcError, CalcResult};
use crate::materials::MaterialRecord;
use crate::pricing::agreements::CustomerAgreement;
use crate::pricing::market::{MaterialCostData, SeasonalAdjustment};

pub trait BoxRepository {
    fn find_box(&self, id: &str) -> CalcResult<Option<BoxRecord>>;

    /// Like [`find_box`](Self::find_box), but a missing box is an error
    fn require_box(&self, id: &str) -> CalcResult<BoxRecord> {
        self.find_box(id)?
            .ok_or_else(|| CalcError::not_found("Box", id))
    }
}

pub trait MaterialRepository {
    fn find_material(&self, id: &str) -> CalcResult<Option<MaterialRecord>>;
}

pub trait PricingRepository {
    /// Agreement negotiated with a customer, if any
    fn agreement_for_customer(&self, customer_id: &str) -> CalcResult<Option<CustomerAgreement>>;

    fn seasonal_adjustments(&self) -> CalcResult<Vec<SeasonalAdjustment>>;

    fn material_costs(&self) -> CalcResult<Vec<MaterialCostData>>;
}

/// Master data held in memory.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InMemoryRepository {
    pub boxes: Vec<BoxRecord>,
    pub materials: Vec<MaterialRecord>,
    pub agreements: Vec<CustomerAgreement>,
    pub seasonal_adjustments: Vec<SeasonalAdjustment>,
    pub material_costs: Vec<MaterialCostData>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate every pricing record
    pub fn validate(&self) -> CalcResult<()> {
        for agreement in &self.agreements {
            agreement.validate()?;
        }
        for adjustment in &self.seasonal_adjustments {
            adjustment.validate()?;
        }
        for material in &self.material_costs {
            material.validate()?;
        }
        Ok(())
    }
}

impl BoxRepository for InMemoryRepository {
    fn find_box(&self, id: &str) -> CalcResult<Option<BoxRecord>> {
        Ok(self.boxes.iter().find(|b| b.id == id).cloned())
    }
}

impl MaterialRepository for InMemoryRepository {
    fn find_material(&self, id: &str) -> CalcResult<Option<MaterialRecord>> {
        Ok(self.materials.iter().find(|m| m.id == id).cloned())
    }
}

impl PricingRepository for InMemoryRepository {
    fn agreement_for_customer(&self, customer_id: &str) -> CalcResult<Option<CustomerAgreement>> {
        Ok(self
            .agreements
            .iter()
            .find(|a| a.customer_id == customer_id)
            .cloned())
    }

    fn seasonal_adjustments(&self) -> CalcResult<Vec<SeasonalAdjustment>> {
        Ok(self.seasonal_adjustments.clone())
    }

    fn material_costs(&self) -> CalcResult<Vec<MaterialCostData>> {
        Ok(self.material_costs.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::ProductSpecification;

    fn repo() -> InMemoryRepository {
        let mut repo = InMemoryRepository::new();
        repo.boxes.push(BoxRecord {
            id: "BOX-1".to_string(),
            name: "Carton".to_string(),
            box_type_id: None,
            client: None,
            length: 300,
            width: 200,
            height: 150,
            ply_class: Default::default(),
            flute_code: "B".to_string(),
            layers: vec![],
            content_weight_kg: 0.0,
            stack_height: 1,
            safety_factor: 1.0,
        });
        repo.agreements.push(CustomerAgreement::new("AGR-1", "CUST-1"));
        repo.materials.push(MaterialRecord::new(
            "GLUE",
            "Starch",
            ProductSpecification::Adhesive { solid_content_pct: None, viscosity_cps: None },
        ));
        repo
    }

    #[test]
    fn test_lookups() {
        let repo = repo();
        assert!(repo.find_box("BOX-1").unwrap().is_some());
        assert!(repo.find_box("BOX-9").unwrap().is_none());
        assert_eq!(repo.agreement_for_customer("CUST-1").unwrap().unwrap().id, "AGR-1");
        assert!(repo.agreement_for_customer("CUST-2").unwrap().is_none());
        assert!(repo.find_material("GLUE").unwrap().is_some());
    }

    #[test]
    fn test_require_box_not_found() {
        let err = repo().require_box("BOX-9").unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(err.to_string().contains("BOX-9"));
    }

    #[test]
    fn test_empty_json_is_empty_repository() {
        let repo: InMemoryRepository = serde_json::from_str("{}").unwrap();
        assert!(repo.boxes.is_empty());
        assert!(repo.validate().is_ok());
    }
}
