//! # Costing Workbook
//!
//! A workbook is the JSON file the CLI reads: master data, settings and the
//! saved costing requests.
//!
//! ```text
//! Workbook
//! ├── meta: WorkbookMetadata (schema version, company, timestamps)
//! ├── settings: GlobalSettings (default rates, pricing policy)
//! ├── boxes / materials / agreements / seasonal_adjustments / material_costs
//! └── requests: HashMap<Uuid, QuoteRequest>
//! ```
//!
//! The master-data lists are an `InMemoryRepository` flattened into the top
//! level, so the workbook answers the core's repository lookups directly.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use corrugate_core::boxes::BoxRecord;
use corrugate_core::errors::CalcResult;
use corrugate_core::materials::MaterialRecord;
use corrugate_core::pricing::{CustomerAgreement, MaterialCostData, SeasonalAdjustment};
use corrugate_core::repository::{BoxRepository, InMemoryRepository, MaterialRepository, PricingRepository};
use corrugate_core::settings::GlobalSettings;
use corrugate_core::workflow::QuoteRequest;

/// Current schema version for workbook files
pub const SCHEMA_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workbook {
    pub meta: WorkbookMetadata,

    #[serde(default)]
    pub settings: GlobalSettings,

    #[serde(flatten)]
    pub master: InMemoryRepository,

    /// Saved costing requests, keyed by UUID
    #[serde(default)]
    pub requests: HashMap<Uuid, QuoteRequest>,
}

impl Workbook {
    pub fn new(company: impl Into<String>) -> Self {
        let now = Utc::now();
        Workbook {
            meta: WorkbookMetadata {
                version: SCHEMA_VERSION.to_string(),
                company: company.into(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            master: InMemoryRepository::new(),
            requests: HashMap::new(),
        }
    }

    /// Add a costing request; returns its new UUID
    pub fn add_request(&mut self, request: QuoteRequest) -> Uuid {
        let id = Uuid::new_v4();
        self.requests.insert(id, request);
        self.touch();
        id
    }

    pub fn get_request(&self, id: &Uuid) -> Option<&QuoteRequest> {
        self.requests.get(id)
    }

    /// Requests ordered by label, then id, so output is stable
    pub fn sorted_requests(&self) -> Vec<(&Uuid, &QuoteRequest)> {
        let mut requests: Vec<_> = self.requests.iter().collect();
        requests.sort_by(|a, b| a.1.label.cmp(&b.1.label).then(a.0.cmp(b.0)));
        requests
    }

    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Workbook::new("")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkbookMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    #[serde(default)]
    pub company: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

impl BoxRepository for Workbook {
    fn find_box(&self, id: &str) -> CalcResult<Option<BoxRecord>> {
        self.master.find_box(id)
    }
}

impl MaterialRepository for Workbook {
    fn find_material(&self, id: &str) -> CalcResult<Option<MaterialRecord>> {
        self.master.find_material(id)
    }
}

impl PricingRepository for Workbook {
    fn agreement_for_customer(&self, customer_id: &str) -> CalcResult<Option<CustomerAgreement>> {
        self.master.agreement_for_customer(customer_id)
    }

    fn seasonal_adjustments(&self) -> CalcResult<Vec<SeasonalAdjustment>> {
        self.master.seasonal_adjustments()
    }

    fn material_costs(&self) -> CalcResult<Vec<MaterialCostData>> {
        self.master.material_costs()
    }
}
