//! # Design Point Search
//!
//! Finds the strain state on the interaction diagram whose design moment
//! matches a target moment, with reinforcement sized for the target normal
//! force.
//!
//! ## Method
//!
//! 1. Build the diagram with the target as design load.
//! 2. Take the first pair of consecutive points whose design moments
//!    enclose the target (inclusive, either order).
//! 3. Regula falsi on the extreme-fiber strains:
//!    `t = (M_target - M1)/(M2 - M1)`, evaluate the interpolated state and
//!    keep the sub-bracket that still encloses the target.
//!
//! The search stops once the moment error is below the absolute tolerance,
//! or below the relative tolerance for a non-zero target. Running out of
//! iterations is not an error: the last evaluated point is returned and
//! marked as not converged.
//!
//! The diagram is not guaranteed to be monotonic in M, so the first
//! enclosing pair is taken as is and the bracket is only narrowed in
//! strain space.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::design_point::{calculate, DesignInput};
//! use calc_core::loads::DesignLoad;
//!
//! let input = DesignInput {
//!     target: DesignLoad::from_kn(0.0, 30.0),
//!     ..DesignInput::default()
//! };
//! let result = calculate(&input).unwrap();
//! assert!(result.converged);
//! assert!(result.error_abs_nm < 100.0 || result.error_rel < 0.01);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::calculations::diagram::{moment_range, DiagramBuilder, InteractionPoint};
use crate::errors::{CalcError, CalcResult};
use crate::loads::DesignLoad;
use crate::materials::Materials;
use crate::section::SectionGeometry;
use crate::settings::SolverSettings;
use crate::strain::StrainState;

/// Bracket moments closer than this use the midpoint step (N·m).
const FLAT_BRACKET_TOLERANCE: f64 = 1e-9;

/// Targets smaller than this fall back to the absolute tolerance (N·m).
const ZERO_TARGET_TOLERANCE: f64 = 1e-6;

/// Input for a design-point search.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Beam B2 midspan",
///   "target": { "n_n": 0.0, "m_nm": 30000.0 },
///   "settings": { "relative_tolerance": 0.005, "max_iterations": 100 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignInput {
    pub label: String,
    pub section: SectionGeometry,
    pub materials: Materials,
    /// Target load (N, M)
    pub target: DesignLoad,
    pub settings: SolverSettings,
}

impl DesignInput {
    pub fn validate(&self) -> CalcResult<()> {
        self.section.validate()?;
        self.materials.validate()?;
        self.target.validate()?;
        self.settings.validate()
    }
}

/// Refined point plus convergence metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignResult {
    /// Last evaluated point, labelled with the outcome
    pub point: InteractionPoint,

    pub converged: bool,

    /// Regula-falsi steps taken
    pub iterations: usize,

    /// |M_point - M_target| (N·m)
    pub error_abs_nm: f64,

    /// Relative moment error; 0 for a zero target
    pub error_rel: f64,

    pub target: DesignLoad,

    /// Indices of the diagram points that first enclosed the target
    pub bracket: (usize, usize),
}

/// First `i` with the target between `points[i]` and `points[i + 1]`.
fn find_bracket(points: &[InteractionPoint], target: f64) -> Option<usize> {
    points.windows(2).position(|pair| {
        let (m1, m2) = (pair[0].m_design_nm, pair[1].m_design_nm);
        m1.min(m2) <= target && target <= m1.max(m2)
    })
}

/// Locate the design point for `input.target`.
pub fn calculate(input: &DesignInput) -> CalcResult<DesignResult> {
    input.validate()?;

    let settings = &input.settings;
    let target = input.target.m_nm;

    let builder = DiagramBuilder::new(input.section, input.materials, input.target);
    let points = builder.build(Some(settings.densities().as_slice()))?;

    let Some(i) = find_bracket(&points, target) else {
        let (min, max) = moment_range(&points);
        warn!(target, min, max, "target moment outside the diagram");
        return Err(CalcError::target_out_of_range(target, min, max));
    };
    debug!(from = %points[i].label, to = %points[i + 1].label, "bracket found");

    let mut lo: (StrainState, f64) = (points[i].strain, points[i].m_design_nm);
    let mut hi: (StrainState, f64) = (points[i + 1].strain, points[i + 1].m_design_nm);

    let mut last: Option<(InteractionPoint, f64)> = None;

    for iteration in 1..=settings.max_iterations {
        let (m1, m2) = (lo.1, hi.1);
        let t = if (m2 - m1).abs() < FLAT_BRACKET_TOLERANCE {
            0.5
        } else {
            (target - m1) / (m2 - m1)
        };

        let strain = lo.0.lerp(&hi.0, t);
        let mut point = builder.point(format!("Iteration {iteration}"), strain);
        let m_new = point.m_design_nm;
        let error_abs = (m_new - target).abs();

        trace!(
            iteration,
            t,
            eps_top = strain.eps_top,
            eps_bottom = strain.eps_bottom,
            m = m_new,
            error = error_abs,
            "regula falsi step"
        );

        let relative_ok = target.abs() > ZERO_TARGET_TOLERANCE && error_abs / target.abs() < settings.relative_tolerance;
        if error_abs < settings.absolute_tolerance_nm || relative_ok {
            point.label = format!("Design point (converged after {iteration} iterations)");
            debug!(iteration, error = error_abs, "design point converged");
            return Ok(finish(input, point, true, iteration, (i, i + 1)));
        }

        if (m1 - target) * (m_new - target) < 0.0 {
            hi = (strain, m_new);
        } else {
            lo = (strain, m_new);
        }
        last = Some((point, error_abs));
    }

    let iterations = settings.max_iterations;
    let Some((mut point, error_abs)) = last else {
        // validate() guarantees at least one iteration
        return Err(CalcError::invalid_input("max_iterations", "0", "At least one iteration is required"));
    };
    warn!(iterations, error = error_abs, "design point search did not converge");
    point.label = format!("Design point (max iterations {iterations} reached)");
    Ok(finish(input, point, false, iterations, (i, i + 1)))
}

fn finish(
    input: &DesignInput,
    point: InteractionPoint,
    converged: bool,
    iterations: usize,
    bracket: (usize, usize),
) -> DesignResult {
    let target = input.target.m_nm;
    let error_abs = (point.m_design_nm - target).abs();
    let error_rel = if target.abs() > ZERO_TARGET_TOLERANCE {
        error_abs / target.abs()
    } else {
        0.0
    };

    DesignResult {
        point,
        converged,
        iterations,
        error_abs_nm: error_abs,
        error_rel,
        target: input.target,
        bracket,
    }
}
