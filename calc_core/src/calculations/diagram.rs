//! # N-M Interaction Diagram
//!
//! Walks the characteristic strain states pairwise, interpolating the
//! extreme-fiber strains between each pair, and evaluates every resulting
//! strain state:
//!
//! - concrete resultant (closed-form integration)
//! - layer strains and stresses (bilinear steel law)
//! - reinforcement areas reconciling the state with the design load
//!
//! An interval with density `d` contributes its start state plus `d - 1`
//! intermediate states at `t = j/d`; the last characteristic state closes
//! the curve, so a diagram has `Σd + 1` points.
//!
//! ## Section totals
//!
//! Each point also reports `n_total_n` / `m_design_nm`, the resultant of the
//! concrete plus the single-layer reinforcement solution. When that solution
//! is degenerate (or the diagram is concrete-only) the steel term is skipped.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::diagram::{calculate, DiagramInput};
//!
//! let input = DiagramInput {
//!     densities: Some(vec![5, 5, 5, 10, 10, 5, 5, 5]),
//!     ..DiagramInput::default()
//! };
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.points.len(), 51);
//! assert_eq!(result.points[0].label, "Point 1");
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::characteristic::{characteristic_states, CharacteristicState, INTERVAL_COUNT};
use crate::calculations::concrete_integration::concrete_forces;
use crate::calculations::reinforcement::{self, ReinforcementInput, ReinforcementOutcome};
use crate::errors::{CalcError, CalcResult};
use crate::loads::DesignLoad;
use crate::materials::Materials;
use crate::section::SectionGeometry;
use crate::settings::{DiagramMode, DEFAULT_DENSITY};
use crate::strain::{Forces, StrainState};

/// Input for an interaction diagram.
///
/// Every field falls back to its default when absent from JSON.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Column C1",
///   "section": { "width_m": 0.3, "height_m": 0.5 },
///   "materials": { "concrete": { "fcd_pa": -20e6 } },
///   "design_load": { "n_n": -500000.0, "m_nm": 120000.0 },
///   "densities": [10, 10, 10, 10, 10, 10, 10, 10],
///   "mode": { "mode": "Reinforced", "variants": ["Optimal", "Uniform"] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramInput {
    /// User label for this diagram
    pub label: String,

    pub section: SectionGeometry,

    pub materials: Materials,

    /// Load the per-point reinforcement is sized for
    pub design_load: DesignLoad,

    /// Subdivisions per interval, one entry per interval (8).
    /// `None` uses the default density for every interval.
    pub densities: Option<Vec<usize>>,

    pub mode: DiagramMode,
}

impl DiagramInput {
    pub fn validate(&self) -> CalcResult<()> {
        self.section.validate()?;
        self.materials.validate()?;
        self.design_load.validate()?;
        if let Some(densities) = &self.densities {
            DiagramBuilder::validate_densities(densities)?;
        }
        Ok(())
    }
}

/// One evaluated strain state of the diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionPoint {
    /// "Point 3" for characteristic states, "Point 3-Point 4 (2/10)" between them
    pub label: String,

    pub strain: StrainState,

    /// Strain slope (1/m)
    pub k: f64,

    /// Strain at the centroid (-)
    pub q: f64,

    /// Strain at layer 1 (-)
    pub eps_s1: f64,

    /// Strain at layer 2 (-)
    pub eps_s2: f64,

    /// Stress at layer 1 (Pa)
    pub sigma_s1_pa: f64,

    /// Stress at layer 2 (Pa)
    pub sigma_s2_pa: f64,

    /// Concrete resultant, raw `Σσ·y` convention
    pub concrete: Forces,

    /// Steel resultant of the single-layer solution, when available
    pub steel: Option<Forces>,

    /// Concrete plus steel normal force (N)
    pub n_total_n: f64,

    /// Concrete plus steel design moment (N·m, positive compresses the top)
    pub m_design_nm: f64,

    /// One outcome per requested variant; empty in concrete-only mode
    pub reinforcement: Vec<ReinforcementOutcome>,
}

impl InteractionPoint {
    /// Concrete-only design moment `-Mc` (N·m)
    pub fn concrete_design_moment(&self) -> f64 {
        -self.concrete.m
    }
}

/// Reduced point of a concrete-only diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcretePoint {
    pub label: String,
    pub strain: StrainState,
    pub k: f64,
    pub q: f64,
    pub eps_s1: f64,
    pub eps_s2: f64,
    pub sigma_s1_pa: f64,
    pub sigma_s2_pa: f64,
    /// Concrete normal force (N)
    pub n_n: f64,
    /// Concrete moment, raw `Σσ·y` convention (N·m)
    pub m_nm: f64,
}

impl From<InteractionPoint> for ConcretePoint {
    fn from(p: InteractionPoint) -> Self {
        ConcretePoint {
            label: p.label,
            strain: p.strain,
            k: p.k,
            q: p.q,
            eps_s1: p.eps_s1,
            eps_s2: p.eps_s2,
            sigma_s1_pa: p.sigma_s1_pa,
            sigma_s2_pa: p.sigma_s2_pa,
            n_n: p.concrete.n,
            m_nm: p.concrete.m,
        }
    }
}

/// Full interaction diagram with the inputs it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionDiagramResult {
    pub points: Vec<InteractionPoint>,
    pub section: SectionGeometry,
    pub materials: Materials,
    pub design_load: DesignLoad,
}

impl InteractionDiagramResult {
    /// Smallest and largest design moment along the curve (N·m).
    pub fn moment_range(&self) -> (f64, f64) {
        moment_range(&self.points)
    }
}

/// Concrete-only diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcreteDiagramResult {
    pub points: Vec<ConcretePoint>,
    pub section: SectionGeometry,
    pub materials: Materials,
}

pub(crate) fn moment_range(points: &[InteractionPoint]) -> (f64, f64) {
    points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p.m_design_nm), hi.max(p.m_design_nm))
    })
}

/// Evaluates strain states of one section under one design load.
///
/// Inputs are assumed validated; [`calculate`] does that before building.
#[derive(Debug, Clone)]
pub struct DiagramBuilder {
    section: SectionGeometry,
    materials: Materials,
    design_load: DesignLoad,
    mode: DiagramMode,
    states: Vec<CharacteristicState>,
}

impl DiagramBuilder {
    pub fn new(section: SectionGeometry, materials: Materials, design_load: DesignLoad) -> Self {
        DiagramBuilder {
            states: characteristic_states(&section, &materials),
            section,
            materials,
            design_load,
            mode: DiagramMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: DiagramMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn states(&self) -> &[CharacteristicState] {
        &self.states
    }

    /// One entry per interval, each at least 1.
    pub fn validate_densities(densities: &[usize]) -> CalcResult<()> {
        if densities.len() != INTERVAL_COUNT {
            return Err(CalcError::invalid_input(
                "densities",
                format!("{densities:?}"),
                format!("Expected {INTERVAL_COUNT} entries, one per interval"),
            ));
        }
        if let Some(i) = densities.iter().position(|&d| d == 0) {
            return Err(CalcError::invalid_input(
                format!("densities[{i}]"),
                "0",
                "Density must be at least 1",
            ));
        }
        Ok(())
    }

    /// Ordered diagram points. `None` uses the default density everywhere.
    pub fn build(&self, densities: Option<&[usize]>) -> CalcResult<Vec<InteractionPoint>> {
        let default = [DEFAULT_DENSITY; INTERVAL_COUNT];
        let densities = densities.unwrap_or(&default[..]);
        Self::validate_densities(densities)?;

        let mut points = Vec::with_capacity(densities.iter().sum::<usize>() + 1);
        for (pair, &density) in self.states.windows(2).zip(densities) {
            let (from, to) = (&pair[0], &pair[1]);
            points.push(self.point(from.point.label().to_string(), from.strain));
            for j in 1..density {
                let t = j as f64 / density as f64;
                let label = format!("{}-{} ({}/{})", from.point, to.point, j, density);
                points.push(self.point(label, from.strain.lerp(&to.strain, t)));
            }
        }
        if let Some(last) = self.states.last() {
            points.push(self.point(last.point.label().to_string(), last.strain));
        }

        debug!(
            points = points.len(),
            reinforced = self.mode.includes_reinforcement(),
            "built interaction diagram"
        );
        Ok(points)
    }

    /// Evaluate a single strain state.
    pub fn point(&self, label: String, strain: StrainState) -> InteractionPoint {
        let section = &self.section;
        let steel_law = &self.materials.steel;
        let (k, q) = strain.params(section.height_m);

        let eps_s1 = strain.at_norm(section.y1_norm());
        let eps_s2 = strain.at_norm(section.y2_norm());
        let sigma_s1 = steel_law.stress(eps_s1);
        let sigma_s2 = steel_law.stress(eps_s2);

        let concrete = concrete_forces(section.width_m, section.height_m, k, q, &self.materials.concrete);

        let (steel, reinforcement) = if self.mode.includes_reinforcement() {
            let input = ReinforcementInput {
                concrete,
                sigma1_pa: sigma_s1,
                sigma2_pa: sigma_s2,
                y1_m: section.y1_local(),
                y2_m: section.y2_local(),
                load: self.design_load,
            };
            let steel = reinforcement::single_layer(&input)
                .ok()
                .map(|sol| sol.steel_forces(input.y1_m, input.y2_m));
            (steel, reinforcement::solve_all(self.mode.variants(), &input))
        } else {
            (None, Vec::new())
        };

        let total = concrete + steel.unwrap_or_default();

        InteractionPoint {
            label,
            strain,
            k,
            q,
            eps_s1,
            eps_s2,
            sigma_s1_pa: sigma_s1,
            sigma_s2_pa: sigma_s2,
            concrete,
            steel,
            n_total_n: total.n,
            m_design_nm: -total.m,
            reinforcement,
        }
    }
}

/// Interaction diagram with per-point reinforcement.
pub fn calculate(input: &DiagramInput) -> CalcResult<InteractionDiagramResult> {
    input.validate()?;

    let builder = DiagramBuilder::new(input.section, input.materials, input.design_load)
        .with_mode(input.mode.clone());
    let points = builder.build(input.densities.as_deref())?;

    Ok(InteractionDiagramResult {
        points,
        section: input.section,
        materials: input.materials,
        design_load: input.design_load,
    })
}

/// Concrete resultants only. The steel law still fixes the characteristic
/// states; `mode` and `design_load` are ignored.
pub fn calculate_concrete_only(input: &DiagramInput) -> CalcResult<ConcreteDiagramResult> {
    input.validate()?;

    let builder = DiagramBuilder::new(input.section, input.materials, input.design_load)
        .with_mode(DiagramMode::ConcreteOnly);
    let points = builder
        .build(input.densities.as_deref())?
        .into_iter()
        .map(ConcretePoint::from)
        .collect();

    Ok(ConcreteDiagramResult {
        points,
        section: input.section,
        materials: input.materials,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::reinforcement::ReinforcementVariant;
    use approx::assert_relative_eq;

    fn test_builder() -> DiagramBuilder {
        DiagramBuilder::new(SectionGeometry::default(), Materials::default(), DesignLoad::default())
    }

    #[test]
    fn test_point_count_follows_densities() {
        let points = test_builder().build(Some(&[5, 5, 5, 10, 10, 5, 5, 5][..])).unwrap();
        assert_eq!(points.len(), 51);

        let points = test_builder().build(None).unwrap();
        assert_eq!(points.len(), 81);

        let points = test_builder().build(Some(&[1; 8][..])).unwrap();
        assert_eq!(points.len(), 9);
    }

    #[test]
    fn test_density_length_mismatch_is_rejected() {
        let err = test_builder().build(Some(&[10; 7][..])).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let input = DiagramInput {
            densities: Some(vec![10; 9]),
            ..DiagramInput::default()
        };
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_zero_density_is_rejected() {
        let err = test_builder().build(Some(&[10, 10, 0, 10, 10, 10, 10, 10][..])).unwrap_err();
        assert!(err.to_string().contains("densities[2]"));
    }

    #[test]
    fn test_labels_and_endpoints() {
        let builder = test_builder();
        let points = builder.build(Some(&[2; 8][..])).unwrap();
        let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels[0], "Point 1");
        assert_eq!(labels[1], "Point 1-Point 2 (1/2)");
        assert_eq!(labels[2], "Point 2");
        assert_eq!(labels[3], "Point 2-Point 2b (1/2)");
        assert_eq!(labels[4], "Point 2b");
        assert_eq!(*labels.last().unwrap(), "Point 8");

        // Characteristic states are emitted exactly, not re-derived
        for (i, state) in builder.states().iter().enumerate() {
            assert_eq!(points[2 * i].strain, state.strain);
        }
    }

    #[test]
    fn test_intermediate_points_interpolate_extreme_strains() {
        let builder = test_builder();
        let points = builder.build(Some(&[4; 8][..])).unwrap();
        let s = builder.states();
        let expected = s[0].strain.lerp(&s[1].strain, 0.75);
        assert_relative_eq!(points[3].strain.eps_top, expected.eps_top);
        assert_relative_eq!(points[3].strain.eps_bottom, expected.eps_bottom);
    }

    #[test]
    fn test_point_fields_are_consistent() {
        let builder = test_builder();
        let section = SectionGeometry::default();
        let p = builder.point("check".to_string(), StrainState::new(-0.0035, 0.005));

        let (k, q) = p.strain.params(section.height_m);
        assert_eq!((p.k, p.q), (k, q));
        assert_relative_eq!(p.eps_s2, k * section.y2_local() + q, max_relative = 1e-12);
        assert_eq!(p.sigma_s2_pa, 435e6);
        assert_eq!(p.reinforcement.len(), 3);
        assert_eq!(p.reinforcement[0].variant, ReinforcementVariant::Optimal);

        // Single-layer steel closes the force balance onto the design load
        assert_relative_eq!(p.n_total_n, 0.0, epsilon = 1e-6);
        assert!(p.steel.is_some());
    }

    #[test]
    fn test_degenerate_point_skips_steel() {
        let builder = test_builder();
        // Bottom layer strain-free: single layer has no solution
        let section = SectionGeometry::default();
        let eta2 = section.y2_norm();
        let top = -0.003;
        let bottom = -top * eta2 / (1.0 - eta2);
        let p = builder.point("zero".to_string(), StrainState::new(top, bottom));
        assert!(p.eps_s2.abs() < 1e-15);
        assert!(p.steel.is_none());
        assert_eq!(p.n_total_n, p.concrete.n);
        assert_eq!(p.m_design_nm, p.concrete_design_moment());
    }

    #[test]
    fn test_concrete_only_mode() {
        let input = DiagramInput {
            mode: DiagramMode::ConcreteOnly,
            ..DiagramInput::default()
        };
        let result = calculate(&input).unwrap();
        assert!(result.points.iter().all(|p| p.reinforcement.is_empty() && p.steel.is_none()));

        let concrete = calculate_concrete_only(&DiagramInput::default()).unwrap();
        assert_eq!(concrete.points.len(), result.points.len());
        assert_eq!(concrete.points[0].n_n, -20e6 * 0.3 * 0.5);
        assert_eq!(concrete.points[80].n_n, 0.0);
    }

    #[test]
    fn test_moment_range_covers_design_moment() {
        let result = calculate(&DiagramInput::default()).unwrap();
        let (lo, hi) = result.moment_range();
        assert!(lo <= 30e3 && 30e3 <= hi);
        // Pure compression balanced by bottom steel in compression: 3 MN at 0.2 m
        assert_relative_eq!(result.points[0].m_design_nm, 600e3, max_relative = 1e-9);
    }

    #[test]
    fn test_invalid_section_rejected() {
        let input = DiagramInput {
            section: SectionGeometry::new(0.3, -0.5, 0.05, 0.05),
            ..DiagramInput::default()
        };
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_input_from_partial_json() {
        let input: DiagramInput =
            serde_json::from_str(r#"{ "label": "C1", "densities": [2, 2, 2, 2, 2, 2, 2, 2] }"#).unwrap();
        assert_eq!(input.section, SectionGeometry::default());
        assert_eq!(calculate(&input).unwrap().points.len(), 17);
    }
}
