//! # Box Specification Calculation
//!
//! Derives the manufacturing specification of a regular slotted carton from
//! its inside dimensions, board construction and per-layer paper.
//!
//! ## Assumptions
//!
//! - Inside dimensions in whole millimetres
//! - Flat liners weigh by sheet area; fluted media weigh by take-up only
//! - Only the layers visible for the ply class (3, 5 or 7) count toward totals
//! - Missing or non-numeric GSM/BF entries count as 0
//!
//! The result is always derived from the full configuration. Nothing from a
//! previous result is read back, so recomputing after any edit gives the same
//! answer as computing from scratch.
//!
//! ## Example
//!
//! ```rust
//! use corrugate_core::calculations::box_spec::{calculate, BoxConfiguration, LayerInput};
//! use corrugate_core::flute::PlyClass;
//!
//! let config = BoxConfiguration {
//!     label: "RSC-300".to_string(),
//!     length: 300,
//!     width: 200,
//!     height: 150,
//!     ply_class: PlyClass::ThreePly,
//!     flute_code: "B".to_string(),
//!     content_weight_kg: 20.0,
//!     stack_height: 8,
//!     safety_factor: 5.0,
//!     layers: vec![
//!         LayerInput::new(150, 18),
//!         LayerInput::new(120, 16),
//!         LayerInput::new(150, 18),
//!     ],
//! };
//!
//! let spec = calculate(&config);
//! assert_eq!(spec.sheet_size.deckle_mm, 375);
//! assert_eq!(spec.sheet_size.cutting_mm, 1060);
//! assert_eq!(spec.compression_strength_kg, 700.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::{board, stacking};
use crate::errors::{CalcError, CalcResult};
use crate::flute::{self, PlyClass, MAX_LAYERS};
use crate::units::{lenient_u32, parse_decimal_or_zero, parse_or_zero, Grams, Kilograms};

/// Largest dimension accepted by the form convention (3 digits)
pub const MAX_DIMENSION_MM: u32 = 999;

/// Largest GSM accepted by the form convention (3 digits)
pub const MAX_GSM: u32 = 999;

/// Largest BF accepted by the form convention (2 digits)
pub const MAX_BF: u32 = 99;

pub(crate) fn default_stack_height() -> u32 {
    1
}

pub(crate) fn default_safety_factor() -> f64 {
    1.0
}

/// Paper entered for one layer.
///
/// ## JSON Example
///
/// ```json
/// { "gsm": 150, "bf": "18" }
/// ```
///
/// Numbers may arrive as strings from form fields; anything that is not a
/// whole number reads as 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayerInput {
    /// Paper substance (g/m²)
    #[serde(default, deserialize_with = "lenient_u32")]
    pub gsm: u32,

    /// Burst factor
    #[serde(default, deserialize_with = "lenient_u32")]
    pub bf: u32,
}

impl LayerInput {
    pub fn new(gsm: u32, bf: u32) -> Self {
        LayerInput { gsm, bf }
    }

    /// Build from raw form text; unparseable entries become 0.
    pub fn from_form(gsm: &str, bf: &str) -> Self {
        LayerInput {
            gsm: parse_or_zero(gsm),
            bf: parse_or_zero(bf),
        }
    }
}

/// Raw box configuration as entered on the box master screen.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "RSC-300",
///   "length": 300,
///   "width": 200,
///   "height": 150,
///   "ply_class": "5-ply",
///   "flute_code": "BC",
///   "content_weight_kg": 20.0,
///   "stack_height": 8,
///   "safety_factor": 5.0,
///   "layers": [
///     { "gsm": 180, "bf": 20 },
///     { "gsm": 120, "bf": 16 },
///     { "gsm": 150, "bf": 18 },
///     { "gsm": 120, "bf": 16 },
///     { "gsm": 180, "bf": 20 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxConfiguration {
    /// User label (e.g., box code or description)
    #[serde(default)]
    pub label: String,

    /// Inside length (mm)
    #[serde(default, deserialize_with = "lenient_u32")]
    pub length: u32,

    /// Inside width (mm)
    #[serde(default, deserialize_with = "lenient_u32")]
    pub width: u32,

    /// Inside height (mm)
    #[serde(default, deserialize_with = "lenient_u32")]
    pub height: u32,

    /// Board construction
    #[serde(default)]
    pub ply_class: PlyClass,

    /// One flute letter per fluted layer (e.g., "B", "BC", "ABC")
    #[serde(default)]
    pub flute_code: String,

    /// Weight of the packed contents (kg)
    #[serde(default)]
    pub content_weight_kg: f64,

    /// Number of boxes stacked in storage
    #[serde(default = "default_stack_height")]
    pub stack_height: u32,

    /// Multiplier applied to the bottom-box load
    #[serde(default = "default_safety_factor")]
    pub safety_factor: f64,

    /// Paper per layer, top to bottom. Up to seven layers are tracked; only
    /// the first 3/5/7 (per ply class) are used. Missing layers count as 0.
    #[serde(default)]
    pub layers: Vec<LayerInput>,
}

impl Default for BoxConfiguration {
    fn default() -> Self {
        BoxConfiguration {
            label: String::new(),
            length: 0,
            width: 0,
            height: 0,
            ply_class: PlyClass::default(),
            flute_code: String::new(),
            content_weight_kg: 0.0,
            stack_height: default_stack_height(),
            safety_factor: default_safety_factor(),
            layers: Vec::new(),
        }
    }
}

impl BoxConfiguration {
    /// Set dimensions and stacking inputs from raw form text.
    pub fn with_form_dimensions(
        mut self,
        length: &str,
        width: &str,
        height: &str,
        content_weight: &str,
    ) -> Self {
        self.length = parse_or_zero(length);
        self.width = parse_or_zero(width);
        self.height = parse_or_zero(height);
        self.content_weight_kg = parse_decimal_or_zero(content_weight);
        self
    }

    /// Paper for a visible layer index, or an all-zero layer if not entered.
    pub fn layer(&self, index: usize) -> LayerInput {
        self.layers.get(index).copied().unwrap_or_default()
    }

    /// Validate input against the form conventions.
    ///
    /// The calculator itself never fails; callers that want to reject bad
    /// entries before saving a box run this first.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [("length", self.length), ("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_DIMENSION_MM {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Dimension must be between 1 and 999 mm",
                ));
            }
        }

        let expected = self.ply_class.flute_layer_count();
        if self.flute_code.chars().count() != expected {
            return Err(CalcError::invalid_input(
                "flute_code",
                self.flute_code.clone(),
                format!("{} needs {} flute letter(s)", self.ply_class, expected),
            ));
        }

        if !self.content_weight_kg.is_finite() || self.content_weight_kg < 0.0 {
            return Err(CalcError::invalid_input(
                "content_weight_kg",
                self.content_weight_kg.to_string(),
                "Content weight cannot be negative",
            ));
        }
        if self.stack_height < 1 {
            return Err(CalcError::invalid_input(
                "stack_height",
                self.stack_height.to_string(),
                "Stack height must be at least 1",
            ));
        }
        if !self.safety_factor.is_finite() || self.safety_factor < 1.0 {
            return Err(CalcError::invalid_input(
                "safety_factor",
                self.safety_factor.to_string(),
                "Safety factor must be at least 1",
            ));
        }

        if self.layers.len() > MAX_LAYERS {
            return Err(CalcError::invalid_input(
                "layers",
                self.layers.len().to_string(),
                "At most 7 layers can be specified",
            ));
        }
        for index in 0..self.ply_class.layer_count() {
            let layer = self.layer(index);
            let name = flute::layer_name(index);
            if layer.gsm == 0 || layer.gsm > MAX_GSM {
                return Err(CalcError::invalid_input(
                    format!("layers[{}].gsm", index),
                    layer.gsm.to_string(),
                    format!("{} GSM must be between 1 and 999", name),
                ));
            }
            if layer.bf == 0 || layer.bf > MAX_BF {
                return Err(CalcError::invalid_input(
                    format!("layers[{}].bf", index),
                    layer.bf.to_string(),
                    format!("{} BF must be between 1 and 99", name),
                ));
            }
        }
        Ok(())
    }
}

/// Outer dimensions (mm)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OuterDimensions {
    pub length: u32,
    pub width: u32,
    pub height: u32,
}

/// Blank size cut from the corrugator (mm)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSize {
    /// Sheet width: H + W + 25
    pub deckle_mm: u32,
    /// Sheet length: (L + W) × 2 + 60
    pub cutting_mm: u32,
}

/// Derived specification of one paper layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    /// "Top", "Flute 1", "Base 1", ...
    pub layer_name: String,
    pub gsm: u32,
    pub bf: u32,
    /// Flute letter for fluted layers, empty for liners
    pub flute_type: String,
    /// Flute take-up percentage, 0 for liners
    pub flute_percent: u32,
    /// Layer weight (grams)
    pub ply_weight_g: f64,
    /// Layer burst contribution
    pub ply_burst_strength: f64,
}

impl LayerSpec {
    /// Whether this layer is a fluted medium
    pub fn is_flute(&self) -> bool {
        self.flute_percent > 0
    }
}

/// Results from the box specification calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "outer_dimensions": { "length": 305, "width": 205, "height": 155 },
///   "sheet_size": { "deckle_mm": 375, "cutting_mm": 1060 },
///   "layers": [ "..." ],
///   "total_box_weight_g": 1360.5,
///   "total_burst_strength": 6.2,
///   "load_on_bottom_box_kg": 140.0,
///   "compression_strength_kg": 700.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSpecificationResult {
    pub ply_class: PlyClass,
    pub outer_dimensions: OuterDimensions,
    pub sheet_size: SheetSize,
    /// Visible layers only (exactly 3, 5 or 7)
    pub layers: Vec<LayerSpec>,
    /// Sum of ply weights (grams)
    pub total_box_weight_g: f64,
    /// Sum of ply burst contributions
    pub total_burst_strength: f64,
    /// Content weight × (stack height − 1), kg
    pub load_on_bottom_box_kg: f64,
    /// Load on bottom box × safety factor, kg
    pub compression_strength_kg: f64,
}

impl BoxSpecificationResult {
    /// Total box weight as grams
    pub fn total_box_weight(&self) -> Grams {
        Grams(self.total_box_weight_g)
    }

    /// Total box weight converted for the cost estimator
    pub fn total_box_weight_kg(&self) -> Kilograms {
        self.total_box_weight().into()
    }
}

/// Calculate the box specification.
///
/// Pure and total: every invocation builds the full layer array from the
/// configuration alone.
pub fn calculate(config: &BoxConfiguration) -> BoxSpecificationResult {
    let outer_dimensions = OuterDimensions {
        length: board::outer_dimension(config.length),
        width: board::outer_dimension(config.width),
        height: board::outer_dimension(config.height),
    };

    let sheet_size = SheetSize {
        deckle_mm: board::deckle_width(config.width, config.height),
        cutting_mm: board::cutting_length(config.length, config.width),
    };

    let flutes = flute::resolve_flutes(config.ply_class, &config.flute_code);

    let layers: Vec<LayerSpec> = (0..config.ply_class.layer_count())
        .map(|index| {
            let paper = config.layer(index);
            match flutes.iter().find(|f| f.layer_index == index) {
                Some(assignment) => LayerSpec {
                    layer_name: flute::layer_name(index),
                    gsm: paper.gsm,
                    bf: paper.bf,
                    flute_type: assignment.flute_type.clone(),
                    flute_percent: assignment.flute_percent,
                    ply_weight_g: board::flute_ply_weight(paper.gsm, assignment.flute_percent),
                    ply_burst_strength: board::flute_ply_burst(paper.bf),
                },
                None => LayerSpec {
                    layer_name: flute::layer_name(index),
                    gsm: paper.gsm,
                    bf: paper.bf,
                    flute_type: String::new(),
                    flute_percent: 0,
                    ply_weight_g: board::liner_ply_weight(
                        sheet_size.deckle_mm,
                        sheet_size.cutting_mm,
                        paper.gsm,
                    ),
                    ply_burst_strength: board::liner_ply_burst(paper.gsm, paper.bf),
                },
            }
        })
        .collect();

    let total_box_weight_g: f64 = layers.iter().map(|l| l.ply_weight_g).sum();
    let total_burst_strength: f64 = layers.iter().map(|l| l.ply_burst_strength).sum();

    let load_on_bottom_box_kg =
        stacking::load_on_bottom_box(config.content_weight_kg, config.stack_height);
    let compression_strength_kg =
        stacking::compression_strength(load_on_bottom_box_kg, config.safety_factor);

    debug!(
        label = %config.label,
        ply = %config.ply_class,
        total_box_weight_g,
        total_burst_strength,
        compression_strength_kg,
        "box specification computed"
    );

    BoxSpecificationResult {
        ply_class: config.ply_class,
        outer_dimensions,
        sheet_size,
        layers,
        total_box_weight_g,
        total_burst_strength,
        load_on_bottom_box_kg,
        compression_strength_kg,
    }
}
