//! # Stacking Formulas
//!
//! Warehouse stacking load and the compression strength a box needs to carry
//! it. Loads are in kilograms of content weight.

/// Load carried by the bottom box of a stack (kg).
///
/// Every box above the bottom one rests on it.
///
/// # Formula
/// P = content × (n − 1)
///
/// A stack height of 0 is treated like 1 (no load).
///
/// # Example
/// ```rust
/// use corrugate_core::equations::stacking::load_on_bottom_box;
/// assert_eq!(load_on_bottom_box(20.0, 8), 140.0);
/// ```
#[inline]
pub fn load_on_bottom_box(content_weight_kg: f64, stack_height: u32) -> f64 {
    content_weight_kg * stack_height.saturating_sub(1) as f64
}

/// Required compression strength (kg) for a given bottom-box load.
///
/// # Formula
/// BCT = P × SF
#[inline]
pub fn compression_strength(load_on_bottom_kg: f64, safety_factor: f64) -> f64 {
    load_on_bottom_kg * safety_factor
}
