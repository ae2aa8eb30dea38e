//! # Strain Fields and Force Resultants
//!
//! Plane sections remain plane: the strain over the section height is a
//! linear function. It is stored by its extreme-fiber values
//! `(eps_top, eps_bottom)` and can be converted exactly to the slope /
//! intercept form `ε(y) = k·y + q` with `y` measured upward from the
//! centroid:
//!
//! ```text
//! k = (eps_top - eps_bottom) / H
//! q = eps_top - k·H/2
//! ```
//!
//! Sign convention: compression strain and stress are negative.

use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Strain at a normalized height (0 = bottom fiber, 1 = top fiber).
///
/// Values of `y_norm` outside `[0, 1]` extrapolate the same line.
pub fn strain_at(eps_top: f64, eps_bottom: f64, y_norm: f64) -> f64 {
    eps_bottom + (eps_top - eps_bottom) * y_norm
}

/// Slope `k` (1/m) and centroid strain `q` (-) of the strain line.
pub fn strain_params(eps_top: f64, eps_bottom: f64, height_m: f64) -> (f64, f64) {
    let h2 = 0.5 * height_m;
    let k = (eps_top - eps_bottom) / height_m;
    let q = eps_top - k * h2;
    (k, q)
}

/// Linear strain field given by its extreme-fiber strains.
///
/// A fiber left out of the JSON is unstrained.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StrainState {
    /// Strain at the top fiber (-)
    pub eps_top: f64,
    /// Strain at the bottom fiber (-)
    pub eps_bottom: f64,
}

impl StrainState {
    pub fn new(eps_top: f64, eps_bottom: f64) -> Self {
        StrainState { eps_top, eps_bottom }
    }

    /// Same strain over the whole section.
    pub fn uniform(eps: f64) -> Self {
        StrainState::new(eps, eps)
    }

    /// Build from slope / centroid strain for a section of height `height_m`.
    pub fn from_params(k: f64, q: f64, height_m: f64) -> Self {
        let h2 = 0.5 * height_m;
        StrainState::new(k * h2 + q, k * (-h2) + q)
    }

    /// Slope / centroid strain for a section of height `height_m`.
    pub fn params(&self, height_m: f64) -> (f64, f64) {
        strain_params(self.eps_top, self.eps_bottom, height_m)
    }

    /// Strain at a normalized height (0 = bottom, 1 = top).
    pub fn at_norm(&self, y_norm: f64) -> f64 {
        strain_at(self.eps_top, self.eps_bottom, y_norm)
    }

    /// Linear interpolation of the extreme-fiber strains.
    ///
    /// `t = 0` returns `self`, `t = 1` returns `other`.
    pub fn lerp(&self, other: &StrainState, t: f64) -> StrainState {
        StrainState::new(
            self.eps_top + t * (other.eps_top - self.eps_top),
            self.eps_bottom + t * (other.eps_bottom - self.eps_bottom),
        )
    }
}

/// Stress resultant about the section centroid.
///
/// `m` is `Σ σ·y·dA` with `y` positive upward, so a section compressed at
/// the top has `m < 0`. Presentation reports the design moment as `-m`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Forces {
    /// Normal force (N)
    pub n: f64,
    /// Moment about the centroid (N·m)
    pub m: f64,
}

impl Forces {
    pub fn new(n: f64, m: f64) -> Self {
        Forces { n, m }
    }

    /// Resultant of a point force `n` acting at local height `y`.
    pub fn at(n: f64, y: f64) -> Self {
        Forces { n, m: n * y }
    }
}

impl Add for Forces {
    type Output = Forces;

    fn add(self, rhs: Forces) -> Forces {
        Forces::new(self.n + rhs.n, self.m + rhs.m)
    }
}
