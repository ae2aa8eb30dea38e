//! # Section Analysis
//!
//! Evaluates one user-supplied strain state: layer strains and stresses,
//! the concrete resultant with its point of action, the neutral axis and
//! the reinforcement each variant needs to carry the design load.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::section_analysis::{calculate, SectionAnalysisInput};
//! use calc_core::strain::StrainState;
//!
//! let input = SectionAnalysisInput {
//!     strain: StrainState::new(-0.0035, 0.0),
//!     ..SectionAnalysisInput::default()
//! };
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.neutral_axis_depth_m, Some(0.5));
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::concrete_integration::compression_zone_centroid;
use crate::calculations::diagram::{DiagramBuilder, InteractionPoint};
use crate::errors::{CalcError, CalcResult};
use crate::loads::DesignLoad;
use crate::materials::Materials;
use crate::section::SectionGeometry;
use crate::settings::DiagramMode;
use crate::strain::StrainState;

/// Input for a single strain-state analysis.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Balanced",
///   "strain": { "eps_top": -0.0035, "eps_bottom": 0.002 },
///   "design_load": { "n_n": -300000.0, "m_nm": 100000.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionAnalysisInput {
    pub label: String,
    pub section: SectionGeometry,
    pub materials: Materials,
    pub strain: StrainState,
    pub design_load: DesignLoad,
    pub mode: DiagramMode,
}

impl Default for SectionAnalysisInput {
    /// Balanced failure of the default section
    fn default() -> Self {
        SectionAnalysisInput {
            label: String::new(),
            section: SectionGeometry::default(),
            materials: Materials::default(),
            strain: StrainState::new(-0.0035, 0.0),
            design_load: DesignLoad::default(),
            mode: DiagramMode::default(),
        }
    }
}

impl SectionAnalysisInput {
    pub fn validate(&self) -> CalcResult<()> {
        self.section.validate()?;
        self.materials.validate()?;
        self.design_load.validate()?;
        for (field, value) in [("eps_top", self.strain.eps_top), ("eps_bottom", self.strain.eps_bottom)] {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Strain must be finite"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionAnalysisResult {
    pub point: InteractionPoint,

    /// Height of the concrete resultant above the centroid (m)
    pub compression_zone_centroid_m: Option<f64>,

    /// Depth of the zero-strain line below the top fiber (m), when it
    /// crosses the section
    pub neutral_axis_depth_m: Option<f64>,
}

/// Depth of `ε = 0` below the top fiber, if it lies within `[0, H]`.
pub fn neutral_axis_depth(strain: &StrainState, height_m: f64) -> Option<f64> {
    let span = strain.eps_top - strain.eps_bottom;
    if span == 0.0 {
        return None;
    }
    // ε(η) = 0 at η = -εb/(εt - εb), η measured from the bottom
    let eta = -strain.eps_bottom / span;
    (0.0..=1.0).contains(&eta).then(|| (1.0 - eta) * height_m)
}

pub fn calculate(input: &SectionAnalysisInput) -> CalcResult<SectionAnalysisResult> {
    input.validate()?;

    let builder = DiagramBuilder::new(input.section, input.materials, input.design_load)
        .with_mode(input.mode.clone());
    let label = if input.label.is_empty() {
        "Strain state".to_string()
    } else {
        input.label.clone()
    };
    let point = builder.point(label, input.strain);

    Ok(SectionAnalysisResult {
        compression_zone_centroid_m: compression_zone_centroid(&point.concrete),
        neutral_axis_depth_m: neutral_axis_depth(&input.strain, input.section.height_m),
        point,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::reinforcement::{steel_forces, ReinforcementSolution};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_neutral_axis_depth() {
        let h = 0.5;
        assert_eq!(neutral_axis_depth(&StrainState::new(-0.0035, 0.0), h), Some(0.5));
        assert_eq!(neutral_axis_depth(&StrainState::new(0.0, 0.01), h), Some(0.0));
        let x = neutral_axis_depth(&StrainState::new(-0.0035, 0.0035), h).unwrap();
        assert_relative_eq!(x, 0.25);
        assert_eq!(neutral_axis_depth(&StrainState::new(-0.0035, -0.001), h), None);
        assert_eq!(neutral_axis_depth(&StrainState::uniform(0.002), h), None);
    }

    #[test]
    fn test_balanced_state() {
        let result = calculate(&SectionAnalysisInput::default()).unwrap();
        let p = &result.point;
        assert_eq!(p.label, "Strain state");
        assert_abs_diff_eq!(p.eps_s2, -0.0035 * 0.1, epsilon = 1e-15);
        let y = result.compression_zone_centroid_m.unwrap();
        assert!(y > 0.0);
        assert_eq!(p.reinforcement.len(), 3);
    }

    #[test]
    fn test_optimal_areas_reproduce_design_load() {
        let input = SectionAnalysisInput {
            strain: StrainState::new(-0.0035, 0.008),
            design_load: DesignLoad::from_kn(-300.0, 150.0),
            ..SectionAnalysisInput::default()
        };
        let result = calculate(&input).unwrap();
        let p = &result.point;
        let (as1, as2) = match p.reinforcement[0].solution() {
            Some(ReinforcementSolution::Optimal { as1_m2, as2_m2, .. }) => (*as1_m2, *as2_m2),
            other => panic!("unexpected: {other:?}"),
        };

        let section = input.section;
        let steel = steel_forces(
            as1,
            as2,
            section.y1_local(),
            section.y2_local(),
            p.k,
            p.q,
            &input.materials.steel,
        );
        let total = p.concrete + steel;
        assert_relative_eq!(total.n, -300e3, max_relative = 1e-9);
        assert_relative_eq!(-total.m, 150e3, max_relative = 1e-9);
    }

    #[test]
    fn test_non_finite_strain_rejected() {
        let input = SectionAnalysisInput {
            strain: StrainState::new(f64::NAN, 0.0),
            ..SectionAnalysisInput::default()
        };
        assert!(calculate(&input).is_err());
    }
}
