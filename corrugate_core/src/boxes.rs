//! Box master records.
//!
//! A `BoxRecord` is what the box master screen persists; the calculators
//! take the [`BoxConfiguration`] derived from it. Layers either carry GSM/BF
//! as entered or point at a paper in the materials master.

use serde::{Deserialize, Serialize};

use crate::calculations::box_spec::{default_safety_factor, default_stack_height, BoxConfiguration, LayerInput};
use crate::errors::{CalcError, CalcResult};
use crate::flute::PlyClass;
use crate::repository::MaterialRepository;
use crate::units::lenient_u32;

/// One paper layer of a saved box.
///
/// ```json
/// { "gsm": 150, "bf": 18 }
///
/// { "material_id": "KP-150-18" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoxLayer {
    /// Paper in the materials master; its GSM/BF replace the entered values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_id: Option<String>,

    #[serde(default, deserialize_with = "lenient_u32")]
    pub gsm: u32,

    #[serde(default, deserialize_with = "lenient_u32")]
    pub bf: u32,
}

impl BoxLayer {
    pub fn entered(gsm: u32, bf: u32) -> Self {
        BoxLayer {
            material_id: None,
            gsm,
            bf,
        }
    }

    pub fn from_material(material_id: impl Into<String>) -> Self {
        BoxLayer {
            material_id: Some(material_id.into()),
            ..BoxLayer::default()
        }
    }

    /// Calculator input for this layer.
    ///
    /// A referenced material must exist and be a paper.
    pub fn resolve<M>(&self, materials: &M) -> CalcResult<LayerInput>
    where
        M: MaterialRepository + ?Sized,
    {
        let material_id = match &self.material_id {
            Some(id) => id,
            None => return Ok(LayerInput::new(self.gsm, self.bf)),
        };
        let record = materials
            .find_material(material_id)?
            .ok_or_else(|| CalcError::not_found("Material", material_id.clone()))?;
        record.as_layer().ok_or_else(|| {
            CalcError::invalid_input(
                "layers.material_id",
                material_id.clone(),
                format!("{} is not a paper", record.specification.display_name()),
            )
        })
    }
}

impl From<LayerInput> for BoxLayer {
    fn from(layer: LayerInput) -> Self {
        BoxLayer::entered(layer.gsm, layer.bf)
    }
}

/// A saved box design.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "BOX-0042",
///   "name": "Shoe carton",
///   "box_type_id": "RSC",
///   "client": "Acme Footwear",
///   "length": 300,
///   "width": 200,
///   "height": 150,
///   "ply_class": "3-ply",
///   "flute_code": "B",
///   "layers": [{ "gsm": 150, "bf": 18 }, { "material_id": "KP-120-16" }, { "gsm": 150, "bf": 18 }],
///   "content_weight_kg": 20.0,
///   "stack_height": 8,
///   "safety_factor": 5.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Box style code (RSC, die-cut, ...) matched by special discounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_type_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub length: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub width: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub height: u32,
    #[serde(default)]
    pub ply_class: PlyClass,
    #[serde(default)]
    pub flute_code: String,
    #[serde(default)]
    pub layers: Vec<BoxLayer>,
    #[serde(default)]
    pub content_weight_kg: f64,
    #[serde(default = "default_stack_height")]
    pub stack_height: u32,
    #[serde(default = "default_safety_factor")]
    pub safety_factor: f64,
}

impl BoxRecord {
    /// Whether paper has been entered or referenced for any layer.
    ///
    /// Boxes without a ply specification are costed from their geometric
    /// weight instead.
    pub fn has_ply_specification(&self) -> bool {
        self.layers
            .iter()
            .any(|layer| layer.material_id.is_some() || layer.gsm > 0)
    }

    /// Calculator input for this box, with referenced papers looked up
    pub fn to_configuration<M>(&self, materials: &M) -> CalcResult<BoxConfiguration>
    where
        M: MaterialRepository + ?Sized,
    {
        let layers = self
            .layers
            .iter()
            .map(|layer| layer.resolve(materials))
            .collect::<CalcResult<Vec<_>>>()?;

        let label = if self.name.is_empty() { self.id.clone() } else { self.name.clone() };
        Ok(BoxConfiguration {
            label,
            length: self.length,
            width: self.width,
            height: self.height,
            ply_class: self.ply_class,
            flute_code: self.flute_code.clone(),
            content_weight_kg: self.content_weight_kg,
            stack_height: self.stack_height,
            safety_factor: self.safety_factor,
            layers,
        })
    }
}
