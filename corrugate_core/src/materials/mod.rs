//! # Materials Master
//!
//! Product specifications for the raw materials and finished boxes a
//! corrugation plant buys and sells. Each product type has its own variant
//! with explicit optional fields, so lookups are pattern matches rather than
//! string-keyed property bags.
//!
//! ## Product Types
//!
//! - **Corrugated box**: ply class, flute code and per-layer paper
//! - **Kraft paper**: GSM, BF, reel deckle, moisture, shade
//! - **Adhesive**: starch/gum solids and viscosity
//! - **Printing ink**: colour and viscosity
//!
//! ## Example
//!
//! ```rust
//! use corrugate_core::calculations::LayerInput;
//! use corrugate_core::materials::ProductSpecification;
//!
//! let paper = ProductSpecification::KraftPaper {
//!     gsm: Some(150),
//!     bf: Some(18),
//!     deckle_mm: Some(1400),
//!     moisture_pct: None,
//!     shade: Some("Natural".to_string()),
//! };
//!
//! assert_eq!(paper.gsm(), Some(150));
//! assert_eq!(LayerInput::from_paper(&paper), Some(LayerInput::new(150, 18)));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculations::box_spec::LayerInput;
use crate::flute::PlyClass;

/// Specification fields per product type.
///
/// ## JSON Serialization
///
/// Specifications serialize with a "type" discriminator:
///
/// ```json
/// { "type": "KraftPaper", "gsm": 150, "bf": 18, "deckle_mm": 1400 }
///
/// { "type": "CorrugatedBox", "ply_class": "5-ply", "flute_code": "BC", "layers": [] }
///
/// { "type": "Adhesive", "solid_content_pct": 22.0, "viscosity_cps": 45.0 }
///
/// { "type": "PrintingInk", "colour": "Pantone 286", "viscosity_sec": 18.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProductSpecification {
    CorrugatedBox {
        #[serde(default)]
        ply_class: PlyClass,
        #[serde(default)]
        flute_code: String,
        #[serde(default)]
        layers: Vec<LayerInput>,
    },
    KraftPaper {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gsm: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bf: Option<u32>,
        /// Reel width
        #[serde(default, skip_serializing_if = "Option::is_none")]
        deckle_mm: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        moisture_pct: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        shade: Option<String>,
    },
    Adhesive {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        solid_content_pct: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        viscosity_cps: Option<f64>,
    },
    PrintingInk {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        colour: Option<String>,
        /// Flow-cup seconds
        #[serde(default, skip_serializing_if = "Option::is_none")]
        viscosity_sec: Option<f64>,
    },
}

impl ProductSpecification {
    pub fn display_name(&self) -> &'static str {
        match self {
            ProductSpecification::CorrugatedBox { .. } => "Corrugated Box",
            ProductSpecification::KraftPaper { .. } => "Kraft Paper",
            ProductSpecification::Adhesive { .. } => "Adhesive",
            ProductSpecification::PrintingInk { .. } => "Printing Ink",
        }
    }

    /// Paper substance, for paper products
    pub fn gsm(&self) -> Option<u32> {
        match self {
            ProductSpecification::KraftPaper { gsm, .. } => *gsm,
            _ => None,
        }
    }

    /// Burst factor, for paper products
    pub fn bf(&self) -> Option<u32> {
        match self {
            ProductSpecification::KraftPaper { bf, .. } => *bf,
            _ => None,
        }
    }

    pub fn moisture_pct(&self) -> Option<f64> {
        match self {
            ProductSpecification::KraftPaper { moisture_pct, .. } => *moisture_pct,
            _ => None,
        }
    }

    pub fn flute_code(&self) -> Option<&str> {
        match self {
            ProductSpecification::CorrugatedBox { flute_code, .. } => Some(flute_code.as_str()),
            _ => None,
        }
    }

    pub fn ply_class(&self) -> Option<PlyClass> {
        match self {
            ProductSpecification::CorrugatedBox { ply_class, .. } => Some(*ply_class),
            _ => None,
        }
    }

    pub fn viscosity(&self) -> Option<f64> {
        match self {
            ProductSpecification::Adhesive { viscosity_cps, .. } => *viscosity_cps,
            ProductSpecification::PrintingInk { viscosity_sec, .. } => *viscosity_sec,
            _ => None,
        }
    }
}

impl fmt::Display for ProductSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductSpecification::KraftPaper { gsm: Some(gsm), bf: Some(bf), .. } => {
                write!(f, "Kraft Paper {} GSM / {} BF", gsm, bf)
            }
            ProductSpecification::CorrugatedBox { ply_class, flute_code, .. } => {
                write!(f, "Corrugated Box {} {}", ply_class, flute_code)
            }
            other => write!(f, "{}", other.display_name()),
        }
    }
}

impl LayerInput {
    /// Seed a layer from a paper specification.
    ///
    /// Returns `None` for non-paper products. A paper record missing GSM or
    /// BF contributes 0 for that value.
    pub fn from_paper(specification: &ProductSpecification) -> Option<Self> {
        match specification {
            ProductSpecification::KraftPaper { gsm, bf, .. } => {
                Some(LayerInput::new(gsm.unwrap_or(0), bf.unwrap_or(0)))
            }
            _ => None,
        }
    }
}

/// A material master entry.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "KP-150-18",
///   "name": "Kraft 150/18 Natural",
///   "unit": "kg",
///   "specification": { "type": "KraftPaper", "gsm": 150, "bf": 18 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub unit: String,
    pub specification: ProductSpecification,
}

impl MaterialRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, specification: ProductSpecification) -> Self {
        MaterialRecord {
            id: id.into(),
            name: name.into(),
            unit: "kg".to_string(),
            specification,
        }
    }

    /// Layer input if this record is a paper
    pub fn as_layer(&self) -> Option<LayerInput> {
        LayerInput::from_paper(&self.specification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kraft(gsm: Option<u32>, bf: Option<u32>) -> ProductSpecification {
        ProductSpecification::KraftPaper {
            gsm,
            bf,
            deckle_mm: None,
            moisture_pct: Some(7.5),
            shade: None,
        }
    }

    #[test]
    fn test_accessors_match_variant() {
        let paper = kraft(Some(120), Some(16));
        assert_eq!(paper.gsm(), Some(120));
        assert_eq!(paper.bf(), Some(16));
        assert_eq!(paper.moisture_pct(), Some(7.5));
        assert_eq!(paper.flute_code(), None);

        let ink = ProductSpecification::PrintingInk {
            colour: Some("Black".to_string()),
            viscosity_sec: Some(20.0),
        };
        assert_eq!(ink.gsm(), None);
        assert_eq!(ink.viscosity(), Some(20.0));
    }

    #[test]
    fn test_layer_from_paper() {
        assert_eq!(LayerInput::from_paper(&kraft(Some(150), None)), Some(LayerInput::new(150, 0)));

        let glue = ProductSpecification::Adhesive { solid_content_pct: Some(22.0), viscosity_cps: None };
        assert_eq!(LayerInput::from_paper(&glue), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(kraft(Some(150), Some(18)).to_string(), "Kraft Paper 150 GSM / 18 BF");
        assert_eq!(kraft(None, Some(18)).to_string(), "Kraft Paper");
        let board = ProductSpecification::CorrugatedBox {
            ply_class: PlyClass::FivePly,
            flute_code: "BC".to_string(),
            layers: vec![],
        };
        assert_eq!(board.to_string(), "Corrugated Box 5 Ply BC");
    }

    #[test]
    fn test_serialization_uses_type_tag() {
        let record = MaterialRecord::new("KP-150", "Kraft 150", kraft(Some(150), Some(18)));
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"type\":\"KraftPaper\""));
        assert!(!json.contains("deckle_mm"));

        let parsed: MaterialRecord = serde_json::from_str(
            r#"{"id":"INK-1","name":"Black","specification":{"type":"PrintingInk","colour":"Black"}}"#,
        )
        .unwrap();
        assert_eq!(parsed.unit, "");
        assert_eq!(parsed.specification.display_name(), "Printing Ink");
    }
}
