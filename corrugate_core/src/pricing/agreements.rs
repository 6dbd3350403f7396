//! Customer agreements and quantity pricing tiers.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Quantity band with a discount.
///
/// ## JSON Example
///
/// ```json
/// { "min_quantity": 5000, "max_quantity": 9999, "discount_percentage": 8.0, "description": "Bulk" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTier {
    pub min_quantity: u32,
    /// Inclusive upper bound; `None` means unbounded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_quantity: Option<u32>,
    pub discount_percentage: f64,
    #[serde(default)]
    pub description: String,
}

impl PricingTier {
    pub fn new(min_quantity: u32, max_quantity: Option<u32>, discount_percentage: f64) -> Self {
        PricingTier {
            min_quantity,
            max_quantity,
            discount_percentage,
            description: String::new(),
        }
    }

    /// Set the description (builder pattern)
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether `quantity` falls inside [min, max-or-unbounded]
    pub fn matches(&self, quantity: u32) -> bool {
        quantity >= self.min_quantity && self.max_quantity.map_or(true, |max| quantity <= max)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if let Some(max) = self.max_quantity {
            if max < self.min_quantity {
                return Err(CalcError::invalid_input(
                    "max_quantity",
                    max.to_string(),
                    format!("Upper bound is below min_quantity {}", self.min_quantity),
                ));
            }
        }
        if !self.discount_percentage.is_finite() || self.discount_percentage < 0.0 {
            return Err(CalcError::invalid_input(
                "discount_percentage",
                self.discount_percentage.to_string(),
                "Discount must be a non-negative percentage",
            ));
        }
        Ok(())
    }
}

/// Pick the tier for a quantity.
///
/// When several tiers match, the highest discount wins; on equal discounts
/// the earliest tier in the list is kept.
pub fn select_tier(tiers: &[PricingTier], quantity: u32) -> Option<&PricingTier> {
    tiers
        .iter()
        .filter(|tier| tier.matches(quantity))
        .fold(None, |best: Option<&PricingTier>, tier| match best {
            Some(current) if current.discount_percentage >= tier.discount_percentage => Some(current),
            _ => Some(tier),
        })
}

/// A negotiated extra discount, optionally limited to one box type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialDiscount {
    /// Applies to every box type when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_type_id: Option<String>,
    pub percentage: f64,
    #[serde(default)]
    pub description: String,
}

impl SpecialDiscount {
    /// Whether this discount applies to the box type being quoted
    pub fn applies_to(&self, box_type_id: Option<&str>) -> bool {
        match (&self.box_type_id, box_type_id) {
            (None, _) => true,
            (Some(required), Some(current)) => required == current,
            (Some(_), None) => false,
        }
    }
}

/// Pricing terms negotiated with one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerAgreement {
    pub id: String,
    pub customer_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pricing_tiers: Vec<PricingTier>,
    #[serde(default)]
    pub special_discounts: Vec<SpecialDiscount>,
}

impl CustomerAgreement {
    pub fn new(id: impl Into<String>, customer_id: impl Into<String>) -> Self {
        CustomerAgreement {
            id: id.into(),
            customer_id: customer_id.into(),
            name: String::new(),
            pricing_tiers: Vec::new(),
            special_discounts: Vec::new(),
        }
    }

    /// Add a pricing tier (builder pattern)
    pub fn with_tier(mut self, tier: PricingTier) -> Self {
        self.pricing_tiers.push(tier);
        self
    }

    /// Add a special discount (builder pattern)
    pub fn with_special_discount(mut self, discount: SpecialDiscount) -> Self {
        self.special_discounts.push(discount);
        self
    }

    /// Validate tiers and discounts.
    ///
    /// Overlapping tiers are allowed; the highest discount wins at quote time.
    pub fn validate(&self) -> CalcResult<()> {
        if self.customer_id.trim().is_empty() {
            return Err(CalcError::missing_field("customer_id"));
        }
        for tier in &self.pricing_tiers {
            tier.validate()?;
        }
        for discount in &self.special_discounts {
            if !discount.percentage.is_finite() || discount.percentage < 0.0 {
                return Err(CalcError::invalid_input(
                    "special_discounts.percentage",
                    discount.percentage.to_string(),
                    "Discount must be a non-negative percentage",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_bounds_are_inclusive() {
        let tier = PricingTier::new(1000, Some(4999), 5.0);
        assert!(!tier.matches(999));
        assert!(tier.matches(1000));
        assert!(tier.matches(4999));
        assert!(!tier.matches(5000));

        let open = PricingTier::new(5000, None, 10.0);
        assert!(open.matches(u32::MAX));
    }

    #[test]
    fn test_overlapping_tiers_highest_discount_wins() {
        let tiers = vec![
            PricingTier::new(0, None, 2.0),
            PricingTier::new(1000, Some(9999), 7.5),
            PricingTier::new(2000, Some(3000), 6.0),
        ];
        let selected = select_tier(&tiers, 2500).unwrap();
        assert_eq!(selected.discount_percentage, 7.5);
        assert_eq!(select_tier(&tiers, 10).unwrap().discount_percentage, 2.0);
    }

    #[test]
    fn test_equal_discounts_keep_first() {
        let tiers = vec![
            PricingTier::new(0, None, 5.0).with_description("first"),
            PricingTier::new(0, None, 5.0).with_description("second"),
        ];
        assert_eq!(select_tier(&tiers, 1).unwrap().description, "first");
    }

    #[test]
    fn test_no_matching_tier() {
        let tiers = vec![PricingTier::new(100, Some(200), 5.0)];
        assert!(select_tier(&tiers, 50).is_none());
        assert!(select_tier(&[], 50).is_none());
    }

    #[test]
    fn test_special_discount_scope() {
        let general = SpecialDiscount { box_type_id: None, percentage: 2.0, description: String::new() };
        let scoped = SpecialDiscount {
            box_type_id: Some("RSC".to_string()),
            percentage: 3.0,
            description: String::new(),
        };
        assert!(general.applies_to(None));
        assert!(general.applies_to(Some("DIE-CUT")));
        assert!(scoped.applies_to(Some("RSC")));
        assert!(!scoped.applies_to(Some("DIE-CUT")));
        assert!(!scoped.applies_to(None));
    }

    #[test]
    fn test_agreement_validation() {
        let agreement = CustomerAgreement::new("AGR-1", "CUST-1")
            .with_tier(PricingTier::new(500, Some(100), 5.0));
        assert!(agreement.validate().is_err());

        let agreement = CustomerAgreement::new("AGR-1", "");
        assert_eq!(agreement.validate().unwrap_err().error_code(), "MISSING_FIELD");
    }
}
