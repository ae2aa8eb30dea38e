//! Design loads acting on the cross-section
//!
//! A design load is the target `(N, M)` pair for which reinforcement is
//! sized. It follows the presentation convention of the diagram: tension
//! positive for `N`, and `M` positive when it compresses the top fiber
//! (the negative of the raw `Σσ·y` resultant).
//!
//! # Example
//!
//! ```
//! use calc_core::loads::DesignLoad;
//!
//! let load = DesignLoad::from_kn(0.0, 30.0);
//! assert_eq!(load.m_nm, 30_000.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::Unit;

/// Target normal force and bending moment in SI units.
///
/// ## JSON Example
///
/// ```json
/// { "n_n": -500000.0, "m_nm": 120000.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignLoad {
    /// Design normal force N (N, tension positive)
    pub n_n: f64,
    /// Design moment M (N·m, positive compresses the top fiber)
    pub m_nm: f64,
}

impl Default for DesignLoad {
    /// N = 0, M = 30 kN·m
    fn default() -> Self {
        DesignLoad { n_n: 0.0, m_nm: 30e3 }
    }
}

impl DesignLoad {
    pub fn new(n_n: f64, m_nm: f64) -> Self {
        DesignLoad { n_n, m_nm }
    }

    /// Build from kN and kN·m, the units loads are usually quoted in.
    pub fn from_kn(n_kn: f64, m_knm: f64) -> Self {
        DesignLoad {
            n_n: Unit::Kilonewton.to_si(n_kn),
            m_nm: Unit::KilonewtonMeter.to_si(m_knm),
        }
    }

    /// Reject non-finite values.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.n_n.is_finite() {
            return Err(CalcError::invalid_input("n_n", self.n_n.to_string(), "Normal force must be finite"));
        }
        if !self.m_nm.is_finite() {
            return Err(CalcError::invalid_input("m_nm", self.m_nm.to_string(), "Moment must be finite"));
        }
        Ok(())
    }
}
