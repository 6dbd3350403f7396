//! # Flute / Ply Resolver
//!
//! Maps a ply class and a flute code (e.g. `"B"`, `"BC"`, `"ABC"`) onto the
//! flute-bearing layers of a corrugated board.
//!
//! ## Layer Layout
//!
//! Up to seven layers are tracked. Even indices are flat liners, odd indices
//! are fluted media:
//!
//! ```text
//! index:   0      1        2        3        4        5        6
//! name:    Top    Flute 1  Base 1   Flute 2  Base 2   Flute 3  Base 3
//! 3-ply:   [x      x        x]
//! 5-ply:   [x      x        x        x        x]
//! 7-ply:   [x      x        x        x        x        x        x]
//! ```
//!
//! ## Flute Take-Up Table
//!
//! | Flute | % |
//! |-------|---|
//! | A     | 60 |
//! | C     | 50 |
//! | B     | 40 |
//! | E     | 30 |
//! | other | 40 |
//!
//! The lookup is exact and case-sensitive. The resolver is total: malformed
//! codes never fail, they fall back to the default percentage.
//!
//! ## Example
//!
//! ```rust
//! use corrugate_core::flute::{resolve_flutes, PlyClass};
//!
//! let flutes = resolve_flutes(PlyClass::FivePly, "BC");
//! assert_eq!(flutes.len(), 2);
//! assert_eq!(flutes[0].layer_index, 1);
//! assert_eq!(flutes[0].flute_type, "B");
//! assert_eq!(flutes[0].flute_percent, 40);
//! assert_eq!(flutes[1].layer_index, 3);
//! assert_eq!(flutes[1].flute_percent, 50);
//! ```

use serde::{Deserialize, Serialize};

/// Maximum number of tracked layers (7-ply board)
pub const MAX_LAYERS: usize = 7;

/// Canonical layer names, top to bottom
pub const LAYER_NAMES: [&str; MAX_LAYERS] = [
    "Top", "Flute 1", "Base 1", "Flute 2", "Base 2", "Flute 3", "Base 3",
];

/// Take-up percentage used for any flute code not in the table
pub const DEFAULT_FLUTE_PERCENT: u32 = 40;

/// Board construction by number of paper layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlyClass {
    /// Single wall: liner / flute / liner
    #[default]
    #[serde(rename = "3-ply")]
    ThreePly,
    /// Double wall
    #[serde(rename = "5-ply")]
    FivePly,
    /// Triple wall
    #[serde(rename = "7-ply")]
    SevenPly,
}

impl PlyClass {
    /// All ply classes for UI selection
    pub const ALL: [PlyClass; 3] = [PlyClass::ThreePly, PlyClass::FivePly, PlyClass::SevenPly];

    /// Number of visible paper layers (3, 5 or 7)
    pub fn layer_count(&self) -> usize {
        match self {
            PlyClass::ThreePly => 3,
            PlyClass::FivePly => 5,
            PlyClass::SevenPly => 7,
        }
    }

    /// Number of fluted layers (1, 2 or 3)
    pub fn flute_layer_count(&self) -> usize {
        self.layer_count() / 2
    }

    /// Layer indices carrying a flute, in order
    pub fn flute_layer_indices(&self) -> Vec<usize> {
        (0..self.layer_count()).filter(|&i| is_flute_layer(i)).collect()
    }

    /// Create from a numeric ply count. Returns `None` for unsupported counts.
    pub fn from_count(count: u8) -> Option<Self> {
        match count {
            3 => Some(PlyClass::ThreePly),
            5 => Some(PlyClass::FivePly),
            7 => Some(PlyClass::SevenPly),
            _ => None,
        }
    }

    /// Get display label
    pub fn display_name(&self) -> &'static str {
        match self {
            PlyClass::ThreePly => "3 Ply",
            PlyClass::FivePly => "5 Ply",
            PlyClass::SevenPly => "7 Ply",
        }
    }
}

impl std::fmt::Display for PlyClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Whether the layer at `index` is a fluted medium
pub fn is_flute_layer(index: usize) -> bool {
    index % 2 == 1
}

/// Canonical name for a layer index (falls back to "Layer N" past the table)
pub fn layer_name(index: usize) -> String {
    LAYER_NAMES
        .get(index)
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("Layer {}", index + 1))
}

/// Flute take-up percentage for a flute code.
pub fn flute_percent(code: &str) -> u32 {
    match code {
        "A" => 60,
        "C" => 50,
        "B" => 40,
        "E" => 30,
        _ => DEFAULT_FLUTE_PERCENT,
    }
}

/// Flute assigned to one fluted layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FluteAssignment {
    /// Index into the layer stack (1, 3 or 5)
    pub layer_index: usize,
    /// Flute code for this layer; empty when the flute code was too short
    pub flute_type: String,
    /// Take-up percentage
    pub flute_percent: u32,
}

/// Resolve per-layer flute assignments for a ply class.
///
/// 3-ply boards use the whole code as the single flute type. 5- and 7-ply
/// boards take one character per fluted layer; missing characters leave the
/// flute type empty (default percentage) and surplus characters are ignored.
pub fn resolve_flutes(ply_class: PlyClass, flute_code: &str) -> Vec<FluteAssignment> {
    let indices = ply_class.flute_layer_indices();

    if ply_class == PlyClass::ThreePly {
        return indices
            .into_iter()
            .map(|layer_index| FluteAssignment {
                layer_index,
                flute_type: flute_code.to_string(),
                flute_percent: flute_percent(flute_code),
            })
            .collect();
    }

    let mut chars = flute_code.chars();
    indices
        .into_iter()
        .map(|layer_index| {
            let flute_type = chars.next().map(String::from).unwrap_or_default();
            let flute_percent = flute_percent(&flute_type);
            FluteAssignment {
                layer_index,
                flute_type,
                flute_percent,
            }
        })
        .collect()
}
