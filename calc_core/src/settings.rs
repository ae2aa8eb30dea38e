//! # Calculation Settings
//!
//! Solver tolerances, diagram density and the diagram mode. Settings are
//! plain values passed into each calculation; nothing is stored globally.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::settings::{DiagramMode, SolverSettings};
//!
//! let settings: SolverSettings = serde_json::from_str(r#"{ "max_iterations": 80 }"#).unwrap();
//! assert_eq!(settings.max_iterations, 80);
//! assert_eq!(settings.relative_tolerance, 0.01);
//!
//! assert!(DiagramMode::default().includes_reinforcement());
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::characteristic::INTERVAL_COUNT;
use crate::calculations::reinforcement::ReinforcementVariant;
use crate::errors::{CalcError, CalcResult};

/// Default number of subdivisions per characteristic interval
pub const DEFAULT_DENSITY: usize = 10;

/// Convergence control for the design-point search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Relative moment tolerance (0.01 = 1 %)
    pub relative_tolerance: f64,

    /// Absolute moment tolerance (N·m)
    pub absolute_tolerance_nm: f64,

    /// Iteration cap for the regula-falsi loop
    pub max_iterations: usize,

    /// Subdivisions per interval of the diagram scanned for a bracket
    pub default_density: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            relative_tolerance: 0.01,
            absolute_tolerance_nm: 100.0,
            max_iterations: 50,
            default_density: DEFAULT_DENSITY,
        }
    }
}

impl SolverSettings {
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.relative_tolerance >= 0.0) {
            return Err(CalcError::invalid_input(
                "relative_tolerance",
                self.relative_tolerance.to_string(),
                "Tolerance cannot be negative",
            ));
        }
        if !(self.absolute_tolerance_nm >= 0.0) {
            return Err(CalcError::invalid_input(
                "absolute_tolerance_nm",
                self.absolute_tolerance_nm.to_string(),
                "Tolerance cannot be negative",
            ));
        }
        if self.relative_tolerance == 0.0 && self.absolute_tolerance_nm == 0.0 {
            return Err(CalcError::invalid_input(
                "absolute_tolerance_nm",
                "0",
                "At least one tolerance must be positive",
            ));
        }
        if self.max_iterations == 0 {
            return Err(CalcError::invalid_input(
                "max_iterations",
                "0",
                "At least one iteration is required",
            ));
        }
        if self.default_density == 0 {
            return Err(CalcError::invalid_input(
                "default_density",
                "0",
                "Density must be at least 1",
            ));
        }
        Ok(())
    }

    /// Uniform density array for the diagram scan.
    pub fn densities(&self) -> Vec<usize> {
        vec![self.default_density; INTERVAL_COUNT]
    }
}

/// What each diagram point carries besides the concrete resultant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum DiagramMode {
    /// Concrete forces and steel stresses only, no reinforcement areas
    ConcreteOnly,
    /// Reinforcement areas for the listed variants
    Reinforced { variants: Vec<ReinforcementVariant> },
}

impl Default for DiagramMode {
    fn default() -> Self {
        DiagramMode::Reinforced {
            variants: ReinforcementVariant::ALL.to_vec(),
        }
    }
}

impl DiagramMode {
    pub fn includes_reinforcement(&self) -> bool {
        matches!(self, DiagramMode::Reinforced { .. })
    }

    /// Variants solved per point (empty for concrete-only).
    pub fn variants(&self) -> &[ReinforcementVariant] {
        match self {
            DiagramMode::ConcreteOnly => &[],
            DiagramMode::Reinforced { variants } => variants,
        }
    }
}
