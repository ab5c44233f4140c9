use serde::{Deserialize, Serialize};

/// Preferences for the size and spacing of cubies.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeometryPreferences {
    /// Distance between the centers of adjacent cubies.
    pub cubie_size: f32,
    /// Empty space between adjacent cubies.
    pub gap_size: f32,
}
impl Default for GeometryPreferences {
    fn default() -> Self {
        Self {
            cubie_size: 1.0,
            gap_size: 0.02,
        }
    }
}
impl GeometryPreferences {
    /// Returns an error if the cubies would not form a lattice.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.cubie_size > 0.0 && self.cubie_size.is_finite()) {
            return Err(format!("cubie_size must be positive, got {}", self.cubie_size));
        }
        if !(self.gap_size >= 0.0 && self.gap_size.is_finite()) {
            return Err(format!("gap_size must not be negative, got {}", self.gap_size));
        }
        Ok(())
    }

    /// Returns the edge length of a rendered cubie.
    pub fn cubie_edge_length(&self) -> f32 {
        (self.cubie_size - self.gap_size).max(0.0)
    }
}
