//! # corrugate_core - Corrugated Box Engineering & Costing Engine
//!
//! `corrugate_core` computes corrugated box specifications, manufacturing
//! cost and quotable prices. All inputs and outputs are JSON-serializable
//! plain records, and every calculation is a pure function of its inputs.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Recompute from the full input, never patch a prior result
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Lenient Input**: Missing or non-numeric paper values read as zero
//! - **Rich Errors**: Structured error types for validation and lookups
//!
//! ## Quick Start
//!
//! ```rust
//! use corrugate_core::calculations::{compute_box_specification, BoxConfiguration, LayerInput};
//! use corrugate_core::flute::PlyClass;
//!
//! let config = BoxConfiguration {
//!     length: 300,
//!     width: 200,
//!     height: 150,
//!     ply_class: PlyClass::ThreePly,
//!     flute_code: "B".to_string(),
//!     content_weight_kg: 20.0,
//!     stack_height: 8,
//!     safety_factor: 5.0,
//!     layers: vec![LayerInput::new(150, 18), LayerInput::new(120, 16), LayerInput::new(150, 18)],
//!     ..BoxConfiguration::default()
//! };
//!
//! let spec = compute_box_specification(&config);
//! assert_eq!(spec.sheet_size.deckle_mm, 375);
//! assert_eq!(spec.compression_strength_kg, 700.0);
//! ```
//!
//! ## Modules
//!
//! - [`flute`] - Ply classes and flute code resolution
//! - [`equations`] - Board geometry, ply weight and stacking formulas
//! - [`calculations`] - Box specification and base cost calculators
//! - [`pricing`] - Agreements, market adjustments and the pricing engine
//! - [`workflow`] - End-to-end quote chain over resolved or stored inputs
//! - [`materials`] / [`boxes`] - Master data records
//! - [`repository`] - Read-only lookup traits and an in-memory store
//! - [`settings`] - Costing defaults and pricing policy
//! - [`units`] - Unit wrappers and lenient number parsing
//! - [`errors`] - Structured error types

pub mod boxes;
pub mod calculations;
pub mod equations;
pub mod errors;
pub mod flute;
pub mod materials;
pub mod pricing;
pub mod repository;
pub mod settings;
pub mod units;
pub mod workflow;

// Re-export commonly used types at crate root for convenience
pub use calculations::{compute_box_specification, BoxConfiguration, BoxSpecificationResult, CostCalculation, RateSet};
pub use errors::{CalcError, CalcResult};
pub use flute::PlyClass;
pub use pricing::{AdvancedPricingResult, PricingInput};
pub use settings::{GlobalSettings, PricingPolicy};
pub use workflow::{quote, quote_from_repository, QuoteOutcome, QuoteRequest};
