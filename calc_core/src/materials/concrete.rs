//! Concrete Materials (EC2 parabola-rectangle law)
//!
//! Design stress-strain law per EN 1992-1-1 §3.1.7 with exponent n = 2:
//!
//! ```text
//! σ(ε) = 0                              ε ≥ 0      (no tension)
//! σ(ε) = fcd·(1 - (1 - ε/εc2)²)         εc2 < ε < 0
//! σ(ε) = fcd                            ε ≤ εc2
//! ```
//!
//! Compression is negative throughout: `fcd < 0`, `εcu ≤ εc2 < 0`.
//! The class catalog stops at C50/60, the last class for which
//! εc2 = -2‰ and εcu2 = -3.5‰ with n = 2.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// EC2 strength classes (characteristic cylinder strength fck).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConcreteClass {
    #[serde(rename = "C12/15")]
    C12_15,
    #[serde(rename = "C16/20")]
    C16_20,
    #[serde(rename = "C20/25")]
    C20_25,
    #[serde(rename = "C25/30")]
    C25_30,
    #[serde(rename = "C30/37")]
    C30_37,
    #[serde(rename = "C35/45")]
    C35_45,
    #[serde(rename = "C40/50")]
    C40_50,
    #[serde(rename = "C45/55")]
    C45_55,
    #[serde(rename = "C50/60")]
    C50_60,
}

impl ConcreteClass {
    /// All classes for UI selection
    pub const ALL: [ConcreteClass; 9] = [
        ConcreteClass::C12_15,
        ConcreteClass::C16_20,
        ConcreteClass::C20_25,
        ConcreteClass::C25_30,
        ConcreteClass::C30_37,
        ConcreteClass::C35_45,
        ConcreteClass::C40_50,
        ConcreteClass::C45_55,
        ConcreteClass::C50_60,
    ];

    /// Characteristic cylinder strength fck (MPa)
    pub fn fck_mpa(&self) -> f64 {
        match self {
            ConcreteClass::C12_15 => 12.0,
            ConcreteClass::C16_20 => 16.0,
            ConcreteClass::C20_25 => 20.0,
            ConcreteClass::C25_30 => 25.0,
            ConcreteClass::C30_37 => 30.0,
            ConcreteClass::C35_45 => 35.0,
            ConcreteClass::C40_50 => 40.0,
            ConcreteClass::C45_55 => 45.0,
            ConcreteClass::C50_60 => 50.0,
        }
    }

    /// Class designation, e.g. "C30/37"
    pub fn name(&self) -> &'static str {
        match self {
            ConcreteClass::C12_15 => "C12/15",
            ConcreteClass::C16_20 => "C16/20",
            ConcreteClass::C20_25 => "C20/25",
            ConcreteClass::C25_30 => "C25/30",
            ConcreteClass::C30_37 => "C30/37",
            ConcreteClass::C35_45 => "C35/45",
            ConcreteClass::C40_50 => "C40/50",
            ConcreteClass::C45_55 => "C45/55",
            ConcreteClass::C50_60 => "C50/60",
        }
    }

    /// Parse "C30/37", "c30/37" or the cylinder-only form "C30".
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let normalized = s.trim().to_uppercase().replace(['_', '-'], "/");
        ConcreteClass::ALL
            .iter()
            .copied()
            .find(|class| {
                let name = class.name();
                normalized == name || name.split('/').next() == Some(normalized.as_str())
            })
            .ok_or_else(|| CalcError::material_not_found(s))
    }
}

impl std::str::FromStr for ConcreteClass {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConcreteClass::from_str_flexible(s)
    }
}

impl std::fmt::Display for ConcreteClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Design parabola-rectangle law.
///
/// ## JSON Example
///
/// ```json
/// { "fcd_pa": -20000000.0, "eps_c2": -0.002, "eps_cu": -0.0035 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcreteLaw {
    /// Design compressive strength fcd (Pa, negative)
    pub fcd_pa: f64,
    /// Strain at the end of the parabolic branch εc2 (-, negative)
    pub eps_c2: f64,
    /// Ultimate compressive strain εcu (-, negative, ≤ εc2)
    pub eps_cu: f64,
}

impl Default for ConcreteLaw {
    fn default() -> Self {
        ConcreteLaw {
            fcd_pa: -20e6,
            eps_c2: -0.002,
            eps_cu: -0.0035,
        }
    }
}

impl ConcreteLaw {
    pub fn new(fcd_pa: f64, eps_c2: f64, eps_cu: f64) -> Self {
        ConcreteLaw { fcd_pa, eps_c2, eps_cu }
    }

    /// Law for a strength class: fcd = -αcc·fck/γc.
    ///
    /// EC2 recommends αcc = 1.0 and γc = 1.5 for persistent design situations.
    pub fn from_class(class: ConcreteClass, alpha_cc: f64, gamma_c: f64) -> Self {
        ConcreteLaw {
            fcd_pa: -alpha_cc * class.fck_mpa() * 1e6 / gamma_c,
            eps_c2: -0.002,
            eps_cu: -0.0035,
        }
    }

    /// Validate the law invariants `fcd < 0` and `εcu ≤ εc2 < 0`.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.fcd_pa < 0.0) || !self.fcd_pa.is_finite() {
            return Err(CalcError::invalid_input(
                "fcd_pa",
                self.fcd_pa.to_string(),
                "Design compressive strength must be negative (compression)",
            ));
        }
        if !(self.eps_c2 < 0.0) || !self.eps_c2.is_finite() {
            return Err(CalcError::invalid_input(
                "eps_c2",
                self.eps_c2.to_string(),
                "Parabola end strain must be negative",
            ));
        }
        if !(self.eps_cu <= self.eps_c2) || !self.eps_cu.is_finite() {
            return Err(CalcError::invalid_input(
                "eps_cu",
                self.eps_cu.to_string(),
                format!("Ultimate strain must not exceed eps_c2 = {}", self.eps_c2),
            ));
        }
        Ok(())
    }

    /// Stress for a single strain value (Pa).
    pub fn stress(&self, eps: f64) -> f64 {
        if eps >= 0.0 {
            0.0
        } else if eps > self.eps_c2 {
            let r = 1.0 - eps / self.eps_c2;
            self.fcd_pa * (1.0 - r * r)
        } else {
            self.fcd_pa
        }
    }
}
