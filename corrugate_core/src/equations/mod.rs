//! # Box Engineering Equations
//!
//! Every formula used by the calculators lives here, so the constants and
//! rounding-free arithmetic can be checked against the shop-floor sheets in
//! one place.
//!
//! ## Modules
//!
//! - [`board`] - Outer dimensions, sheet (blank) size, per-layer weight and burst
//! - [`stacking`] - Load on the bottom box and required compression strength
//!
//! ## Units
//!
//! - **Dimensions**: millimetres, whole numbers
//! - **Paper**: GSM (g/m²) and BF (burst factor), whole numbers
//! - **Ply weight**: grams
//! - **Content weight / load**: kilograms

pub mod board;
pub mod stacking;

pub use board::{
    cutting_length,
    deckle_width,
    flute_ply_burst,
    flute_ply_weight,
    geometric_weight_kg,
    liner_ply_burst,
    liner_ply_weight,
    outer_dimension,
    DECKLE_TRIM_MM,
    CUTTING_TRIM_MM,
    GEOMETRIC_DENSITY_G_PER_CM3,
    OUTER_ALLOWANCE_MM,
};

pub use stacking::{compression_strength, load_on_bottom_box};
