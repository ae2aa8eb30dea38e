//! # Reinforcement Area Solvers
//!
//! Closed-form steel areas that bring a strain state into equilibrium with
//! a design load. Layer `i` carries `Fsi = Asi·σi` at local height `yi`.
//! With the concrete resultant `(Nc, Mc)` in raw `Σσ·y` convention and the
//! design load `(Nd, Md)` in presentation convention the equilibrium is
//!
//! ```text
//! Nc + Fs1 + Fs2           = Nd
//! -(Mc + Fs1·y1 + Fs2·y2)  = Md
//! ```
//!
//! Variants:
//!
//! - [`ReinforcementVariant::Optimal`]: both areas free, both equations met
//!   (Cramer's rule, determinant `σ1·σ2·(y2 - y1)`).
//! - [`ReinforcementVariant::SingleLayer`]: bottom layer only; the force
//!   equation fixes `As2` and the resulting moment `Md` is reported.
//! - [`ReinforcementVariant::Uniform`]: `As1 = As2 = Astot/2`; the force
//!   equation fixes `Astot` and the resulting moment `Mdtot` is reported.
//!
//! A degenerate system yields a [`Degeneracy`] instead of NaN.

use serde::{Deserialize, Serialize};

use crate::loads::DesignLoad;
use crate::materials::SteelLaw;
use crate::strain::Forces;

/// Determinants and stresses below this are treated as zero.
pub const DEGENERACY_TOLERANCE: f64 = 1e-6;

/// Reinforcement design policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReinforcementVariant {
    /// Two independent areas As1, As2
    Optimal,
    /// Bottom layer only (As1 = 0)
    SingleLayer,
    /// Equal areas in both layers
    Uniform,
}

impl ReinforcementVariant {
    pub const ALL: [ReinforcementVariant; 3] = [
        ReinforcementVariant::Optimal,
        ReinforcementVariant::SingleLayer,
        ReinforcementVariant::Uniform,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ReinforcementVariant::Optimal => "Optimal (As1, As2)",
            ReinforcementVariant::SingleLayer => "Bottom layer only (As)",
            ReinforcementVariant::Uniform => "Uniform (Astot)",
        }
    }
}

/// Why a variant has no solution for a strain state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Degeneracy {
    /// σ1·σ2·(y2 - y1) vanishes
    SingularSystem { determinant: f64 },
    /// Bottom layer is unstressed
    ZeroBottomStress { sigma2_pa: f64 },
    /// σ1 + σ2 vanishes
    ZeroStressSum { sigma_sum_pa: f64 },
}

impl std::fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Degeneracy::SingularSystem { determinant } => {
                write!(f, "singular system (determinant {determinant:.3e})")
            }
            Degeneracy::ZeroBottomStress { sigma2_pa } => {
                write!(f, "bottom layer unstressed (σ2 = {sigma2_pa:.3e} Pa)")
            }
            Degeneracy::ZeroStressSum { sigma_sum_pa } => {
                write!(f, "layer stresses cancel (σ1 + σ2 = {sigma_sum_pa:.3e} Pa)")
            }
        }
    }
}

/// Everything a solver needs for one strain state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReinforcementInput {
    /// Concrete resultant (raw convention)
    pub concrete: Forces,
    /// Stress in layer 1 (Pa)
    pub sigma1_pa: f64,
    /// Stress in layer 2 (Pa)
    pub sigma2_pa: f64,
    /// Local height of layer 1 (m)
    pub y1_m: f64,
    /// Local height of layer 2 (m)
    pub y2_m: f64,
    /// Target load
    pub load: DesignLoad,
}

/// Areas (m²), layer forces (N) and, where not imposed, the achieved design
/// moment (N·m).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ReinforcementSolution {
    Optimal {
        as1_m2: f64,
        as2_m2: f64,
        fs1_n: f64,
        fs2_n: f64,
    },
    SingleLayer {
        as2_m2: f64,
        fs2_n: f64,
        md_nm: f64,
    },
    Uniform {
        astot_m2: f64,
        as1_m2: f64,
        as2_m2: f64,
        fs1_n: f64,
        fs2_n: f64,
        mdtot_nm: f64,
    },
}

impl ReinforcementSolution {
    pub fn variant(&self) -> ReinforcementVariant {
        match self {
            ReinforcementSolution::Optimal { .. } => ReinforcementVariant::Optimal,
            ReinforcementSolution::SingleLayer { .. } => ReinforcementVariant::SingleLayer,
            ReinforcementSolution::Uniform { .. } => ReinforcementVariant::Uniform,
        }
    }

    /// Layer areas `(As1, As2)` (m²)
    pub fn areas(&self) -> (f64, f64) {
        match *self {
            ReinforcementSolution::Optimal { as1_m2, as2_m2, .. } => (as1_m2, as2_m2),
            ReinforcementSolution::SingleLayer { as2_m2, .. } => (0.0, as2_m2),
            ReinforcementSolution::Uniform { as1_m2, as2_m2, .. } => (as1_m2, as2_m2),
        }
    }

    /// Total area As1 + As2 (m²)
    pub fn total_area(&self) -> f64 {
        let (as1, as2) = self.areas();
        as1 + as2
    }

    /// Layer forces `(Fs1, Fs2)` (N)
    pub fn layer_forces(&self) -> (f64, f64) {
        match *self {
            ReinforcementSolution::Optimal { fs1_n, fs2_n, .. } => (fs1_n, fs2_n),
            ReinforcementSolution::SingleLayer { fs2_n, .. } => (0.0, fs2_n),
            ReinforcementSolution::Uniform { fs1_n, fs2_n, .. } => (fs1_n, fs2_n),
        }
    }

    /// Steel resultant about the centroid (raw convention).
    pub fn steel_forces(&self, y1_m: f64, y2_m: f64) -> Forces {
        let (fs1, fs2) = self.layer_forces();
        Forces::at(fs1, y1_m) + Forces::at(fs2, y2_m)
    }

    /// Design moment achieved by the variant; `None` for the optimal
    /// variant, which meets the target moment by construction.
    pub fn achieved_moment(&self) -> Option<f64> {
        match *self {
            ReinforcementSolution::Optimal { .. } => None,
            ReinforcementSolution::SingleLayer { md_nm, .. } => Some(md_nm),
            ReinforcementSolution::Uniform { mdtot_nm, .. } => Some(mdtot_nm),
        }
    }
}

/// Result of one variant at one strain state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReinforcementOutcome {
    pub variant: ReinforcementVariant,
    pub result: Result<ReinforcementSolution, Degeneracy>,
}

impl ReinforcementOutcome {
    pub fn solution(&self) -> Option<&ReinforcementSolution> {
        self.result.as_ref().ok()
    }
}

/// Solve one variant.
pub fn solve(variant: ReinforcementVariant, input: &ReinforcementInput) -> Result<ReinforcementSolution, Degeneracy> {
    match variant {
        ReinforcementVariant::Optimal => optimal(input),
        ReinforcementVariant::SingleLayer => single_layer(input),
        ReinforcementVariant::Uniform => uniform(input),
    }
}

/// Solve each listed variant, in order.
pub fn solve_all(variants: &[ReinforcementVariant], input: &ReinforcementInput) -> Vec<ReinforcementOutcome> {
    variants
        .iter()
        .map(|&variant| ReinforcementOutcome {
            variant,
            result: solve(variant, input),
        })
        .collect()
}

/// Both areas free: meets `Nd` and `Md` exactly.
pub fn optimal(input: &ReinforcementInput) -> Result<ReinforcementSolution, Degeneracy> {
    let ReinforcementInput {
        concrete,
        sigma1_pa: s1,
        sigma2_pa: s2,
        y1_m: y1,
        y2_m: y2,
        load,
    } = *input;

    let rhs_n = load.n_n - concrete.n;
    let rhs_m = -load.m_nm - concrete.m;

    let determinant = s1 * s2 * (y2 - y1);
    if determinant.abs() < DEGENERACY_TOLERANCE {
        return Err(Degeneracy::SingularSystem { determinant });
    }

    let as1 = (rhs_n * y2 - rhs_m) / (s1 * (y2 - y1));
    let as2 = (rhs_m - y1 * rhs_n) / (s2 * (y2 - y1));

    Ok(ReinforcementSolution::Optimal {
        as1_m2: as1,
        as2_m2: as2,
        fs1_n: as1 * s1,
        fs2_n: as2 * s2,
    })
}

/// Bottom layer only: `As2 = (Nd - Nc)/σ2`, moment follows.
pub fn single_layer(input: &ReinforcementInput) -> Result<ReinforcementSolution, Degeneracy> {
    let s2 = input.sigma2_pa;
    if s2.abs() < DEGENERACY_TOLERANCE {
        return Err(Degeneracy::ZeroBottomStress { sigma2_pa: s2 });
    }

    let as2 = (input.load.n_n - input.concrete.n) / s2;
    let fs2 = as2 * s2;
    let md = -input.concrete.m - fs2 * input.y2_m;

    Ok(ReinforcementSolution::SingleLayer {
        as2_m2: as2,
        fs2_n: fs2,
        md_nm: md,
    })
}

/// Equal areas: `Astot = 2·(Nd - Nc)/(σ1 + σ2)`, moment follows.
pub fn uniform(input: &ReinforcementInput) -> Result<ReinforcementSolution, Degeneracy> {
    let sigma_sum = input.sigma1_pa + input.sigma2_pa;
    if sigma_sum.abs() < DEGENERACY_TOLERANCE {
        return Err(Degeneracy::ZeroStressSum { sigma_sum_pa: sigma_sum });
    }

    let astot = 2.0 * (input.load.n_n - input.concrete.n) / sigma_sum;
    let half = 0.5 * astot;
    let fs1 = half * input.sigma1_pa;
    let fs2 = half * input.sigma2_pa;
    let mdtot = -input.concrete.m - fs1 * input.y1_m - fs2 * input.y2_m;

    Ok(ReinforcementSolution::Uniform {
        astot_m2: astot,
        as1_m2: half,
        as2_m2: half,
        fs1_n: fs1,
        fs2_n: fs2,
        mdtot_nm: mdtot,
    })
}

/// Steel resultant for known areas under strain field `(k, q)`.
///
/// Layer strains are `k·y + q`; stresses follow the bilinear law.
pub fn steel_forces(
    as1_m2: f64,
    as2_m2: f64,
    y1_m: f64,
    y2_m: f64,
    k: f64,
    q: f64,
    steel: &SteelLaw,
) -> Forces {
    let layer = |area: f64, y: f64| Forces::at(area * steel.stress(k * y + q), y);
    layer(as1_m2, y1_m) + layer(as2_m2, y2_m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn input(concrete: Forces, s1: f64, s2: f64, load: DesignLoad) -> ReinforcementInput {
        ReinforcementInput {
            concrete,
            sigma1_pa: s1,
            sigma2_pa: s2,
            y1_m: 0.2,
            y2_m: -0.2,
            load,
        }
    }

    fn residuals(inp: &ReinforcementInput, sol: &ReinforcementSolution) -> (f64, f64) {
        let steel = sol.steel_forces(inp.y1_m, inp.y2_m);
        let n = inp.concrete.n + steel.n;
        let m = -(inp.concrete.m + steel.m);
        (n - inp.load.n_n, m - inp.load.m_nm)
    }

    #[test]
    fn test_optimal_satisfies_both_equations() {
        let cases = [
            (Forces::new(-1.2e6, -9.0e4), -435e6, 435e6, DesignLoad::new(-800e3, 150e3)),
            (Forces::new(-3.0e6, 0.0), -435e6, -435e6 * 0.8, DesignLoad::new(-3.5e6, 20e3)),
            (Forces::new(-2.0e5, -4.1e4), 120e6, 435e6, DesignLoad::new(100e3, -25e3)),
        ];
        for (concrete, s1, s2, load) in cases {
            let inp = input(concrete, s1, s2, load);
            let sol = optimal(&inp).unwrap();
            let (rn, rm) = residuals(&inp, &sol);
            let scale_n = load.n_n.abs().max(concrete.n.abs());
            let scale_m = load.m_nm.abs().max(concrete.m.abs()).max(1.0);
            assert!(rn.abs() / scale_n < 1e-6, "N residual {rn}");
            assert!(rm.abs() / scale_m < 1e-6, "M residual {rm}");
        }
    }

    #[test]
    fn test_optimal_singular_when_layer_unstressed() {
        let inp = input(Forces::new(-1e6, -5e4), 0.0, 435e6, DesignLoad::default());
        match optimal(&inp) {
            Err(Degeneracy::SingularSystem { determinant }) => assert_eq!(determinant, 0.0),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_optimal_singular_when_layers_coincide() {
        let mut inp = input(Forces::new(-1e6, -5e4), 435e6, 435e6, DesignLoad::default());
        inp.y1_m = -0.2;
        assert!(matches!(optimal(&inp), Err(Degeneracy::SingularSystem { .. })));
    }

    #[test]
    fn test_single_layer_matches_force_and_reports_moment() {
        let inp = input(Forces::new(-600e3, -110e3), -300e6, 435e6, DesignLoad::new(0.0, 30e3));
        let sol = single_layer(&inp).unwrap();
        let (as1, as2) = sol.areas();
        assert_eq!(as1, 0.0);
        assert_relative_eq!(as2 * 435e6, 600e3, max_relative = 1e-12);
        // Md = -Mc - Fs2·y2 = 110e3 + 600e3·0.2
        assert_relative_eq!(sol.achieved_moment().unwrap(), 230e3, max_relative = 1e-12);
        let (rn, _) = residuals(&inp, &sol);
        assert!(rn.abs() < 1e-6);
    }

    #[test]
    fn test_single_layer_zero_stress() {
        let inp = input(Forces::new(-600e3, -110e3), -300e6, 0.0, DesignLoad::default());
        assert!(matches!(
            single_layer(&inp),
            Err(Degeneracy::ZeroBottomStress { .. })
        ));
    }

    #[test]
    fn test_uniform_splits_area_equally() {
        let inp = input(Forces::new(-600e3, -110e3), -100e6, 435e6, DesignLoad::new(50e3, 0.0));
        let sol = uniform(&inp).unwrap();
        match sol {
            ReinforcementSolution::Uniform { astot_m2, as1_m2, as2_m2, mdtot_nm, .. } => {
                assert_eq!(as1_m2, as2_m2);
                assert_relative_eq!(astot_m2, 2.0 * 650e3 / 335e6, max_relative = 1e-12);
                let (_, rm) = residuals(&inp, &sol);
                // Reported moment is what the areas actually produce
                assert!((rm + inp.load.m_nm - mdtot_nm).abs() < 1e-6);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_uniform_zero_sum() {
        let inp = input(Forces::new(-600e3, -110e3), -435e6, 435e6, DesignLoad::default());
        assert!(matches!(uniform(&inp), Err(Degeneracy::ZeroStressSum { .. })));
    }

    #[test]
    fn test_optimal_consistent_with_single_layer() {
        // When the single-layer moment equals the target, the optimal variant needs no top steel
        let base = input(Forces::new(-600e3, -110e3), -300e6, 435e6, DesignLoad::new(0.0, 0.0));
        let md = single_layer(&base).unwrap().achieved_moment().unwrap();
        let inp = ReinforcementInput { load: DesignLoad::new(0.0, md), ..base };
        let (as1, as2) = optimal(&inp).unwrap().areas();
        assert!(as1.abs() < 1e-12);
        assert_relative_eq!(as2, single_layer(&inp).unwrap().areas().1, max_relative = 1e-10);
    }

    #[test]
    fn test_solve_all_keeps_order_and_reports_degeneracy() {
        let inp = input(Forces::new(-600e3, -110e3), -435e6, 435e6, DesignLoad::default());
        let out = solve_all(&ReinforcementVariant::ALL, &inp);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].variant, ReinforcementVariant::Optimal);
        assert!(out[0].solution().is_some());
        assert!(out[2].solution().is_none());
    }

    #[test]
    fn test_steel_forces_for_known_areas() {
        let steel = SteelLaw::default();
        // Uniform 1‰ tension: both layers at 200 MPa
        let f = steel_forces(1e-4, 2e-4, 0.2, -0.2, 0.0, 0.001, &steel);
        assert_relative_eq!(f.n, 3e-4 * 200e6, max_relative = 1e-9);
        assert_relative_eq!(f.m, 1e-4 * 200e6 * 0.2 - 2e-4 * 200e6 * 0.2, max_relative = 1e-9);
    }

    #[test]
    fn test_outcome_serialization() {
        let inp = input(Forces::new(-600e3, -110e3), -300e6, 0.0, DesignLoad::default());
        let out = solve_all(&[ReinforcementVariant::SingleLayer], &inp);
        let json = serde_json::to_string(&out[0]).unwrap();
        assert!(json.contains("ZeroBottomStress"));
        let back: ReinforcementOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, out[0]);
    }
}
