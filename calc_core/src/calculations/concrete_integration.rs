//! # Concrete Stress Integration
//!
//! Resultant normal force and moment of the EC2 parabola-rectangle stress
//! block over a rectangular section under a linear strain field
//! `ε(y) = k·y + q` (y from the centroid, positive up).
//!
//! ## Closed-form approach
//!
//! The section height is split at the two roots of the strain line:
//!
//! ```text
//! y0   : ε(y0)   = 0     (tension / compression boundary)
//! yEc2 : ε(yEc2) = εc2   (parabola / constant boundary)
//! ```
//!
//! Each sub-interval is clipped to `[-H/2, H/2]` and integrated exactly.
//! With the normalized strain `e = ε/εc2 = a·y + c` (`a = k/εc2`,
//! `c = q/εc2`) the parabolic stress is a quadratic in `y`:
//!
//! ```text
//! σ = fcd·(2e - e²) = fcd·[(2a - 2ac)·y + (2c - c²) - a²·y²]
//! ```
//!
//! so `N = B∫σ dy` and `M = B∫σ·y dy` are polynomials up to `y⁴`.
//! The constant branch contributes `N = fcd·B·Δy` acting at the interval
//! midpoint.
//!
//! [`integrate_layered`] is a strip-by-strip midpoint rule kept as a
//! reference for the closed form.

use crate::materials::ConcreteLaw;
use crate::strain::Forces;

/// Slopes below this are treated as a uniform strain field (1/m).
pub const SLOPE_TOLERANCE: f64 = 1e-12;

/// Interval bounds closer than this are treated as equal (m).
const LENGTH_TOLERANCE: f64 = 1e-12;

fn is_less(a: f64, b: f64) -> bool {
    a < b - LENGTH_TOLERANCE
}

/// Concrete resultant for strain field `(k, q)` over a `width_m` x `height_m` section.
///
/// Only the concrete is integrated; tension carries no stress.
///
/// # Example
///
/// ```rust
/// use calc_core::calculations::concrete_integration::concrete_forces;
/// use calc_core::materials::ConcreteLaw;
///
/// let concrete = ConcreteLaw::default();
/// // Uniform crushing strain: full section at fcd, no moment
/// let f = concrete_forces(0.3, 0.5, 0.0, -0.0035, &concrete);
/// assert_eq!(f.n, -20e6 * 0.3 * 0.5);
/// assert_eq!(f.m, 0.0);
/// ```
pub fn concrete_forces(width_m: f64, height_m: f64, k: f64, q: f64, concrete: &ConcreteLaw) -> Forces {
    if k.abs() < SLOPE_TOLERANCE {
        let sigma = concrete.stress(q);
        return Forces::new(sigma * width_m * height_m, 0.0);
    }

    let fcd = concrete.fcd_pa;
    let eps_c2 = concrete.eps_c2;

    let h2 = 0.5 * height_m;
    let y_bottom = -h2;
    let y_top = h2;

    let y0 = -q / k;
    let y_ec2 = (eps_c2 - q) / k;

    let mut forces = Forces::default();

    // Parabolic branch lies between the two roots, whatever their order
    let ya = y_bottom.max(y_ec2.min(y0));
    let yb = y_top.min(y_ec2.max(y0));
    if is_less(ya, yb) {
        forces = forces + parabolic_segment(width_m, k / eps_c2, q / eps_c2, fcd, ya, yb);
    }

    // Constant branch: the side of yEc2 with ε ≤ εc2 depends on the sign of k
    let (ya, yb) = if k > 0.0 {
        (y_bottom, y_ec2.min(y_top))
    } else {
        (y_ec2.max(y_bottom), y_top)
    };
    if is_less(ya, yb) {
        let n = fcd * width_m * (yb - ya);
        forces = forces + Forces::at(n, 0.5 * (ya + yb));
    }

    forces
}

/// Exact integral of the parabolic branch over `[ya, yb]`.
fn parabolic_segment(width_m: f64, a: f64, c: f64, fcd: f64, ya: f64, yb: f64) -> Forces {
    let lin = 2.0 * a - 2.0 * a * c;
    let cst = 2.0 * c - c * c;
    let quad = a * a;

    let ya2 = ya * ya;
    let yb2 = yb * yb;
    let d1 = yb - ya;
    let d2 = 0.5 * (yb2 - ya2);
    let d3 = (yb2 * yb - ya2 * ya) / 3.0;
    let d4 = 0.25 * (yb2 * yb2 - ya2 * ya2);

    let n = fcd * width_m * (lin * d2 + cst * d1 - quad * d3);
    let m = fcd * width_m * (lin * d3 + cst * d2 - quad * d4);
    Forces::new(n, m)
}

/// Midpoint-rule integration over `layers` horizontal strips.
///
/// Same sign convention as [`concrete_forces`]; converges to it as the
/// number of strips grows.
pub fn integrate_layered(
    width_m: f64,
    height_m: f64,
    k: f64,
    q: f64,
    concrete: &ConcreteLaw,
    layers: usize,
) -> Forces {
    let layers = layers.max(1);
    let dy = height_m / layers as f64;
    let y_bottom = -0.5 * height_m;

    (0..layers).fold(Forces::default(), |acc, i| {
        let y = y_bottom + (i as f64 + 0.5) * dy;
        let sigma = concrete.stress(k * y + q);
        acc + Forces::at(sigma * width_m * dy, y)
    })
}

/// Height of the compression resultant above the centroid, `M/N` (m).
///
/// `None` when the section carries no concrete force.
pub fn compression_zone_centroid(forces: &Forces) -> Option<f64> {
    if forces.n.abs() > 1e-6 {
        Some(forces.m / forces.n)
    } else {
        None
    }
}
