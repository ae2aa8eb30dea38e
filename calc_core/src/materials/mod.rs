//! # Materials
//!
//! Design material laws for reinforced concrete sections.
//!
//! ## Material Types
//!
//! - **Concrete**: EC2 parabola-rectangle law, strength classes C12/15 to C50/60
//! - **Reinforcing steel**: bilinear law, grades B500A/B/C
//!
//! ## Example
//!
//! ```rust
//! use calc_core::materials::{ConcreteClass, ConcreteLaw, ReinforcementGrade, SteelLaw};
//!
//! let concrete = ConcreteLaw::from_class(ConcreteClass::C30_37, 1.0, 1.5);
//! let steel = SteelLaw::from_grade(ReinforcementGrade::B500B, 1.15, 0.01);
//!
//! assert_eq!(concrete.stress(0.001), 0.0);          // no tension
//! assert_eq!(steel.stress(0.01), steel.fyd_pa);     // yielded
//! ```

pub mod concrete;
pub mod steel;

pub use concrete::{ConcreteClass, ConcreteLaw};
pub use steel::{ReinforcementGrade, SteelLaw};

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;

/// Concrete and steel laws used together by one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Materials {
    pub concrete: ConcreteLaw,
    pub steel: SteelLaw,
}

impl Materials {
    pub fn new(concrete: ConcreteLaw, steel: SteelLaw) -> Self {
        Materials { concrete, steel }
    }

    /// Validate both laws.
    pub fn validate(&self) -> CalcResult<()> {
        self.concrete.validate()?;
        self.steel.validate()
    }
}
