//! # Cross-Section Geometry
//!
//! Rectangular reinforced-concrete section with two reinforcement layers.
//!
//! Three coordinate systems are in play:
//!
//! ```text
//!   absolute (from bottom)    normalized        local (from centroid)
//!   y = H  ─────────────      1.0               +H/2      top fiber
//!          ·  · layer 1 ·     y1_norm           y1_local
//!          │           │
//!          │     +     │                        0         centroid
//!          │           │
//!          ·  · layer 2 ·     y2_norm           y2_local
//!   y = 0  ─────────────      0.0               -H/2      bottom fiber
//! ```
//!
//! Layer 1 is located by its cover to the top edge, layer 2 by its
//! absolute position above the bottom edge.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Rectangular section geometry in SI units.
///
/// ## JSON Example
///
/// ```json
/// {
///   "width_m": 0.3,
///   "height_m": 0.5,
///   "layer1_offset_m": 0.05,
///   "layer2_position_m": 0.05
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionGeometry {
    /// Section width B (m)
    pub width_m: f64,

    /// Section height H (m)
    pub height_m: f64,

    /// Distance of reinforcement layer 1 (top) from the top edge (m)
    pub layer1_offset_m: f64,

    /// Position of reinforcement layer 2 (bottom) above the bottom edge (m)
    pub layer2_position_m: f64,
}

impl Default for SectionGeometry {
    /// 300 x 500 mm section with 50 mm to both layers.
    fn default() -> Self {
        SectionGeometry {
            width_m: 0.3,
            height_m: 0.5,
            layer1_offset_m: 0.05,
            layer2_position_m: 0.05,
        }
    }
}

impl SectionGeometry {
    /// Create a section from width, height and the two layer offsets.
    pub fn new(width_m: f64, height_m: f64, layer1_offset_m: f64, layer2_position_m: f64) -> Self {
        SectionGeometry {
            width_m,
            height_m,
            layer1_offset_m,
            layer2_position_m,
        }
    }

    /// Validate dimensions and layer placement.
    ///
    /// Both layers must lie inside the section and layer 2 must sit strictly
    /// below layer 1, otherwise the characteristic states are undefined.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.width_m > 0.0) || !self.width_m.is_finite() {
            return Err(CalcError::invalid_input(
                "width_m",
                self.width_m.to_string(),
                "Width must be positive",
            ));
        }
        if !(self.height_m > 0.0) || !self.height_m.is_finite() {
            return Err(CalcError::invalid_input(
                "height_m",
                self.height_m.to_string(),
                "Height must be positive",
            ));
        }
        if !(self.layer1_offset_m >= 0.0) || self.layer1_offset_m >= self.height_m {
            return Err(CalcError::invalid_input(
                "layer1_offset_m",
                self.layer1_offset_m.to_string(),
                "Top layer must lie within the section",
            ));
        }
        if !(self.layer2_position_m >= 0.0) || self.layer2_position_m >= self.height_m {
            return Err(CalcError::invalid_input(
                "layer2_position_m",
                self.layer2_position_m.to_string(),
                "Bottom layer must lie within the section",
            ));
        }
        if self.y2() >= self.y1() {
            return Err(CalcError::invalid_input(
                "layer2_position_m",
                self.layer2_position_m.to_string(),
                format!("Bottom layer must lie below the top layer (y1 = {} m)", self.y1()),
            ));
        }
        Ok(())
    }

    /// Absolute position of layer 1 above the bottom edge (m)
    pub fn y1(&self) -> f64 {
        self.height_m - self.layer1_offset_m
    }

    /// Absolute position of layer 2 above the bottom edge (m)
    pub fn y2(&self) -> f64 {
        self.layer2_position_m
    }

    /// Normalized position of layer 1 (0 = bottom, 1 = top)
    pub fn y1_norm(&self) -> f64 {
        self.y1() / self.height_m
    }

    /// Normalized position of layer 2 (0 = bottom, 1 = top)
    pub fn y2_norm(&self) -> f64 {
        self.y2() / self.height_m
    }

    /// Position of layer 1 relative to the centroid (m, positive up)
    pub fn y1_local(&self) -> f64 {
        self.y1() - 0.5 * self.height_m
    }

    /// Position of layer 2 relative to the centroid (m, positive up)
    pub fn y2_local(&self) -> f64 {
        self.y2() - 0.5 * self.height_m
    }

    /// Gross concrete area B·H (m²)
    pub fn area_m2(&self) -> f64 {
        self.width_m * self.height_m
    }
}
