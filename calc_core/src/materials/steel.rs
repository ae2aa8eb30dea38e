//! Reinforcing Steel (bilinear design law)
//!
//! Elastic-perfectly plastic design law with a horizontal top branch:
//! `σ = clamp(ε·Es, -fyd, +fyd)`. The strain limit εud bounds the diagram
//! (steel rupture) but does not change the stress.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Modulus of elasticity of reinforcing steel per EC2 §3.2.7 (Pa)
pub const ES_DEFAULT_PA: f64 = 200e9;

/// Reinforcement ductility classes with fyk = 500 MPa (EC2 Annex C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReinforcementGrade {
    B500A,
    B500B,
    B500C,
}

impl ReinforcementGrade {
    pub const ALL: [ReinforcementGrade; 3] = [
        ReinforcementGrade::B500A,
        ReinforcementGrade::B500B,
        ReinforcementGrade::B500C,
    ];

    /// Characteristic yield strength fyk (MPa)
    pub fn fyk_mpa(&self) -> f64 {
        500.0
    }

    /// Characteristic strain at maximum load εuk (-)
    pub fn eps_uk(&self) -> f64 {
        match self {
            ReinforcementGrade::B500A => 0.025,
            ReinforcementGrade::B500B => 0.05,
            ReinforcementGrade::B500C => 0.075,
        }
    }

    /// Recommended design strain limit εud = 0.9·εuk (-)
    pub fn recommended_eps_ud(&self) -> f64 {
        0.9 * self.eps_uk()
    }

    pub fn name(&self) -> &'static str {
        match self {
            ReinforcementGrade::B500A => "B500A",
            ReinforcementGrade::B500B => "B500B",
            ReinforcementGrade::B500C => "B500C",
        }
    }

    /// Parse a grade name, case-insensitive.
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().replace([' ', '-'], "").as_str() {
            "B500A" => Ok(ReinforcementGrade::B500A),
            "B500B" => Ok(ReinforcementGrade::B500B),
            "B500C" => Ok(ReinforcementGrade::B500C),
            _ => Err(CalcError::material_not_found(s)),
        }
    }
}

impl std::str::FromStr for ReinforcementGrade {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReinforcementGrade::from_str_flexible(s)
    }
}

impl std::fmt::Display for ReinforcementGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Bilinear design law for reinforcement.
///
/// ## JSON Example
///
/// ```json
/// { "fyd_pa": 435000000.0, "es_pa": 200000000000.0, "eps_ud": 0.01 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteelLaw {
    /// Design yield strength fyd (Pa, positive)
    pub fyd_pa: f64,
    /// Modulus of elasticity Es (Pa)
    pub es_pa: f64,
    /// Design strain limit εud (-, positive)
    pub eps_ud: f64,
}

impl Default for SteelLaw {
    fn default() -> Self {
        SteelLaw {
            fyd_pa: 435e6,
            es_pa: ES_DEFAULT_PA,
            eps_ud: 0.01,
        }
    }
}

impl SteelLaw {
    pub fn new(fyd_pa: f64, es_pa: f64, eps_ud: f64) -> Self {
        SteelLaw { fyd_pa, es_pa, eps_ud }
    }

    /// Law for a grade: fyd = fyk/γs (EC2 recommends γs = 1.15).
    pub fn from_grade(grade: ReinforcementGrade, gamma_s: f64, eps_ud: f64) -> Self {
        SteelLaw {
            fyd_pa: grade.fyk_mpa() * 1e6 / gamma_s,
            es_pa: ES_DEFAULT_PA,
            eps_ud,
        }
    }

    /// Design yield strain εyd = fyd/Es
    pub fn eps_yd(&self) -> f64 {
        self.fyd_pa / self.es_pa
    }

    /// Validate `fyd > 0`, `Es > 0` and `εud > εyd`.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.fyd_pa > 0.0) || !self.fyd_pa.is_finite() {
            return Err(CalcError::invalid_input(
                "fyd_pa",
                self.fyd_pa.to_string(),
                "Design yield strength must be positive",
            ));
        }
        if !(self.es_pa > 0.0) || !self.es_pa.is_finite() {
            return Err(CalcError::invalid_input(
                "es_pa",
                self.es_pa.to_string(),
                "Modulus of elasticity must be positive",
            ));
        }
        if !(self.eps_ud > self.eps_yd()) || !self.eps_ud.is_finite() {
            return Err(CalcError::invalid_input(
                "eps_ud",
                self.eps_ud.to_string(),
                format!("Strain limit must exceed the yield strain {:.6}", self.eps_yd()),
            ));
        }
        Ok(())
    }

    /// Stress for a strain value (Pa), clamped to ±fyd.
    pub fn stress(&self, eps: f64) -> f64 {
        (eps * self.es_pa).clamp(-self.fyd_pa, self.fyd_pa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stress_elastic_and_plastic() {
        let s = SteelLaw::default();
        assert!((s.stress(0.001) - 200e6).abs() < 1e-3);
        assert!((s.stress(-0.001) + 200e6).abs() < 1e-3);
        assert_eq!(s.stress(0.01), 435e6);
        assert_eq!(s.stress(-0.0035), -435e6);
        assert_eq!(s.stress(0.0), 0.0);
    }

    #[test]
    fn test_eps_yd() {
        let s = SteelLaw::default();
        assert!((s.eps_yd() - 0.002175).abs() < 1e-12);
    }

    #[test]
    fn test_from_grade() {
        let s = SteelLaw::from_grade(ReinforcementGrade::B500B, 1.15, 0.01);
        assert!((s.fyd_pa - 434.78e6).abs() < 0.01e6);
        assert!(s.validate().is_ok());
        assert!((ReinforcementGrade::B500B.recommended_eps_ud() - 0.045).abs() < 1e-12);
    }

    #[test]
    fn test_grade_parsing() {
        assert_eq!("b500c".parse::<ReinforcementGrade>().unwrap(), ReinforcementGrade::B500C);
        assert!(ReinforcementGrade::from_str_flexible("B420").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_laws() {
        assert!(SteelLaw::new(0.0, 200e9, 0.01).validate().is_err());
        assert!(SteelLaw::new(435e6, -1.0, 0.01).validate().is_err());
        // εud below εyd
        assert!(SteelLaw::new(435e6, 200e9, 0.002).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite_strain_limit() {
        for eps_ud in [f64::INFINITY, f64::NAN] {
            match SteelLaw::new(435e6, 200e9, eps_ud).validate() {
                Err(CalcError::InvalidInput { field, .. }) => assert_eq!(field, "eps_ud"),
                other => panic!("unexpected: {other:?}"),
            }
        }
    }
}
