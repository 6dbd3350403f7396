//! # Board and Sheet Formulas
//!
//! Geometry of a regular slotted carton blank and the weight / burst
//! contribution of each paper layer.
//!
//! ## Notation
//!
//! - `L`, `W`, `H` = inside length, width, height (mm)
//! - `D` = deckle (sheet width across the corrugator, mm)
//! - `C` = cutting length (sheet length along the corrugator, mm)
//! - `gsm` = paper substance (g/m²)
//! - `bf` = burst factor of the paper
//! - `fp` = flute take-up percentage

/// Allowance added to each inside dimension to get the outer dimension (mm)
pub const OUTER_ALLOWANCE_MM: u32 = 5;

/// Trim added to H + W for the deckle (mm)
pub const DECKLE_TRIM_MM: u32 = 25;

/// Trim (joint flap plus cutting margin) added to the blank perimeter (mm)
pub const CUTTING_TRIM_MM: u32 = 60;

/// Density used for the geometric weight estimate (g/cm³)
pub const GEOMETRIC_DENSITY_G_PER_CM3: f64 = 0.5;

/// Outer dimension of one axis.
///
/// # Formula
/// outer = inside + 5
///
/// # Example
/// ```rust
/// use corrugate_core::equations::board::outer_dimension;
/// assert_eq!(outer_dimension(300), 305);
/// ```
#[inline]
pub fn outer_dimension(inside_mm: u32) -> u32 {
    inside_mm.saturating_add(OUTER_ALLOWANCE_MM)
}

/// Deckle (sheet width) of the blank.
///
/// ```text
///   ┌──────┬──────┬──────┬──────┬──┐  ▲
///   │ flap │ flap │ flap │ flap │  │  │
///   ├──────┼──────┼──────┼──────┤  │  │ D = H + W + 25
///   │  L   │  W   │  L   │  W   │j │  │
///   ├──────┼──────┼──────┼──────┤  │  │
///   │ flap │ flap │ flap │ flap │  │  │
///   └──────┴──────┴──────┴──────┴──┘  ▼
///   ◄──────── C = 2(L + W) + 60 ─────►
/// ```
///
/// # Formula
/// D = H + W + 25
#[inline]
pub fn deckle_width(width_mm: u32, height_mm: u32) -> u32 {
    height_mm
        .saturating_add(width_mm)
        .saturating_add(DECKLE_TRIM_MM)
}

/// Cutting length of the blank.
///
/// # Formula
/// C = (L + W) × 2 + 60
///
/// # Example
/// ```rust
/// use corrugate_core::equations::board::{cutting_length, deckle_width};
/// assert_eq!(deckle_width(200, 150), 375);
/// assert_eq!(cutting_length(300, 200), 1060);
/// ```
#[inline]
pub fn cutting_length(length_mm: u32, width_mm: u32) -> u32 {
    length_mm
        .saturating_add(width_mm)
        .saturating_mul(2)
        .saturating_add(CUTTING_TRIM_MM)
}

/// Weight of a flat liner layer (grams).
///
/// # Formula
/// w = D × C × gsm / 100000
#[inline]
pub fn liner_ply_weight(deckle_mm: u32, cutting_mm: u32, gsm: u32) -> f64 {
    deckle_mm as f64 * cutting_mm as f64 * gsm as f64 / 100_000.0
}

/// Weight of a fluted medium layer (grams).
///
/// # Formula
/// w = gsm + gsm × fp / 100
///
/// # Example
/// ```rust
/// use corrugate_core::equations::board::flute_ply_weight;
/// // 120 gsm medium on A flute (60 % take-up)
/// assert_eq!(flute_ply_weight(120, 60), 192.0);
/// ```
#[inline]
pub fn flute_ply_weight(gsm: u32, flute_percent: u32) -> f64 {
    let gsm = gsm as f64;
    gsm + gsm * flute_percent as f64 / 100.0
}

/// Burst contribution of a flat liner layer.
///
/// # Formula
/// b = gsm × bf / 1000
#[inline]
pub fn liner_ply_burst(gsm: u32, bf: u32) -> f64 {
    gsm as f64 * bf as f64 / 1000.0
}

/// Burst contribution of a fluted medium layer.
///
/// # Formula
/// b = bf × 50 / 1000
#[inline]
pub fn flute_ply_burst(bf: u32) -> f64 {
    bf as f64 * 50.0 / 1000.0
}

/// Geometric weight estimate (kg) for a box with no ply specification.
///
/// # Formula
/// kg = L × W × H × 0.5 / 1000
#[inline]
pub fn geometric_weight_kg(length: u32, width: u32, height: u32) -> f64 {
    length as f64 * width as f64 * height as f64 * GEOMETRIC_DENSITY_G_PER_CM3 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_size() {
        assert_eq!(deckle_width(200, 150), 375);
        assert_eq!(cutting_length(300, 200), 1060);
    }

    #[test]
    fn test_sheet_size_zero_dimensions() {
        assert_eq!(deckle_width(0, 0), DECKLE_TRIM_MM);
        assert_eq!(cutting_length(0, 0), CUTTING_TRIM_MM);
        assert_eq!(outer_dimension(0), OUTER_ALLOWANCE_MM);
    }

    #[test]
    fn test_liner_weight() {
        // 375 × 1060 × 150 / 100000 = 596.25
        assert!((liner_ply_weight(375, 1060, 150) - 596.25).abs() < 1e-9);
    }

    #[test]
    fn test_flute_weight() {
        assert_eq!(flute_ply_weight(100, 40), 140.0);
        assert_eq!(flute_ply_weight(0, 60), 0.0);
    }

    #[test]
    fn test_burst() {
        // 150 gsm × 18 bf / 1000
        assert!((liner_ply_burst(150, 18) - 2.7).abs() < 1e-9);
        // 16 bf × 50 / 1000
        assert!((flute_ply_burst(16) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_geometric_weight() {
        // 10 × 10 × 10 × 0.5 / 1000
        assert!((geometric_weight_kg(10, 10, 10) - 0.5).abs() < 1e-12);
    }
}
