//! # Box Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` / `*Configuration` - Input parameters (JSON-serializable)
//! - `*Result` / `*Calculation` - Results (JSON-serializable)
//! - `calculate(input)` - Pure calculation function
//!
//! Unlike validation, the calculations are total: malformed numbers have
//! already collapsed to zero, so they always return a result.
//!
//! ## Available Calculations
//!
//! - [`box_spec`] - Outer dimensions, sheet size, ply weights, burst and compression
//! - [`cost`] - Manufacturing cost build-up with ROI markup

pub mod box_spec;
pub mod cost;

// Re-export commonly used types
pub use box_spec::{
    BoxConfiguration, BoxSpecificationResult, LayerInput, LayerSpec, OuterDimensions, SheetSize,
};
pub use cost::{CostCalculation, CostInput, RateSet, WeightBasis};

/// Compute the full box specification for a configuration.
///
/// Alias of [`box_spec::calculate`], named for callers that recompute on
/// every field change.
pub fn compute_box_specification(config: &BoxConfiguration) -> BoxSpecificationResult {
    box_spec::calculate(config)
}
