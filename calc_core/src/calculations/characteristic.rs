//! # Characteristic Strain States
//!
//! The EC2 strain states that bound the regimes of the N-M interaction
//! diagram, ordered from pure compression to pure tension:
//!
//! | Label    | Top fiber         | Bottom fiber / layer constraint |
//! |----------|-------------------|---------------------------------|
//! | Point 1  | εcu               | εcu                             |
//! | Point 2  | εcu               | εc2                             |
//! | Point 2b | εcu               | 0                               |
//! | Point 3  | εcu               | layer 2 at εyd                  |
//! | Point 4  | εcu               | layer 2 at εud                  |
//! | Point 5  | εc2               | layer 2 at εud                  |
//! | Point 6  | 0                 | layer 2 at εud                  |
//! | Point 7  | layer 1 at εyd    | layer 2 at εud                  |
//! | Point 8  | εud               | εud                             |
//!
//! A layer constraint fixes the strain at the layer's normalized height
//! `η`: `ε(η) = ε_bottom + (ε_top - ε_bottom)·η`. With the top fiber known,
//! the bottom fiber follows as `(ε_layer - ε_top·η)/(1 - η)`. Point 7 fixes
//! two layers and solves the 2x2 system for both extremes.

use serde::{Deserialize, Serialize};

use crate::materials::Materials;
use crate::section::SectionGeometry;
use crate::strain::StrainState;

/// Number of characteristic states (and so `densities.len() + 1`).
pub const CHARACTERISTIC_STATE_COUNT: usize = 9;

/// Number of intervals between consecutive characteristic states.
pub const INTERVAL_COUNT: usize = CHARACTERISTIC_STATE_COUNT - 1;

/// Identity of a characteristic state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacteristicPoint {
    /// Uniform crushing strain εcu
    PureCompression,
    /// Top at εcu, bottom at εc2
    BottomAtEpsC2,
    /// Top at εcu, bottom fiber strain-free
    BottomAtZero,
    /// Top at εcu, bottom steel yielding
    BottomSteelYield,
    /// Top at εcu, bottom steel at its strain limit
    BottomSteelLimit,
    /// Top at εc2, bottom steel at its strain limit
    TopAtEpsC2,
    /// Top strain-free, bottom steel at its strain limit
    TopAtZero,
    /// Top steel yielding, bottom steel at its strain limit
    BothLayersLimit,
    /// Uniform steel strain limit εud
    PureTension,
}

impl CharacteristicPoint {
    /// All points in diagram order
    pub const ALL: [CharacteristicPoint; CHARACTERISTIC_STATE_COUNT] = [
        CharacteristicPoint::PureCompression,
        CharacteristicPoint::BottomAtEpsC2,
        CharacteristicPoint::BottomAtZero,
        CharacteristicPoint::BottomSteelYield,
        CharacteristicPoint::BottomSteelLimit,
        CharacteristicPoint::TopAtEpsC2,
        CharacteristicPoint::TopAtZero,
        CharacteristicPoint::BothLayersLimit,
        CharacteristicPoint::PureTension,
    ];

    /// Short label used for point names ("Point 2b")
    pub fn label(&self) -> &'static str {
        match self {
            CharacteristicPoint::PureCompression => "Point 1",
            CharacteristicPoint::BottomAtEpsC2 => "Point 2",
            CharacteristicPoint::BottomAtZero => "Point 2b",
            CharacteristicPoint::BottomSteelYield => "Point 3",
            CharacteristicPoint::BottomSteelLimit => "Point 4",
            CharacteristicPoint::TopAtEpsC2 => "Point 5",
            CharacteristicPoint::TopAtZero => "Point 6",
            CharacteristicPoint::BothLayersLimit => "Point 7",
            CharacteristicPoint::PureTension => "Point 8",
        }
    }

    /// Description of the governing regime
    pub fn description(&self) -> &'static str {
        match self {
            CharacteristicPoint::PureCompression => "Pure compression",
            CharacteristicPoint::BottomAtEpsC2 => "Concrete crushing, bottom at end of parabola",
            CharacteristicPoint::BottomAtZero => "Concrete crushing, neutral axis at bottom fiber",
            CharacteristicPoint::BottomSteelYield => "Concrete crushing, bottom steel yielding",
            CharacteristicPoint::BottomSteelLimit => "Concrete crushing, bottom steel at strain limit",
            CharacteristicPoint::TopAtEpsC2 => "Top at end of parabola, bottom steel at strain limit",
            CharacteristicPoint::TopAtZero => "Neutral axis at top fiber, bottom steel at strain limit",
            CharacteristicPoint::BothLayersLimit => "Top steel yielding, bottom steel at strain limit",
            CharacteristicPoint::PureTension => "Pure tension",
        }
    }
}

impl std::fmt::Display for CharacteristicPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One characteristic state with its strain field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacteristicState {
    pub point: CharacteristicPoint,
    pub strain: StrainState,
}

/// Bottom-fiber strain that puts a layer at normalized height `eta` at
/// `eps_layer`, given the top-fiber strain.
fn bottom_for_layer(eps_top: f64, eps_layer: f64, eta: f64) -> f64 {
    (eps_layer - eps_top * eta) / (1.0 - eta)
}

/// Characteristic states in diagram order.
///
/// Assumes validated geometry (layer 2 strictly below layer 1) and
/// validated material laws.
pub fn characteristic_states(section: &SectionGeometry, materials: &Materials) -> Vec<CharacteristicState> {
    let eps_cu = materials.concrete.eps_cu;
    let eps_c2 = materials.concrete.eps_c2;
    let eps_yd = materials.steel.eps_yd();
    let eps_ud = materials.steel.eps_ud;
    let eta1 = section.y1_norm();
    let eta2 = section.y2_norm();

    // Point 7: ε(η1) = εyd and ε(η2) = εud
    let slope = (eps_yd - eps_ud) / (eta1 - eta2);
    let bottom7 = eps_ud - slope * eta2;
    let top7 = bottom7 + slope;

    let strains = [
        StrainState::uniform(eps_cu),
        StrainState::new(eps_cu, eps_c2),
        StrainState::new(eps_cu, 0.0),
        StrainState::new(eps_cu, bottom_for_layer(eps_cu, eps_yd, eta2)),
        StrainState::new(eps_cu, bottom_for_layer(eps_cu, eps_ud, eta2)),
        StrainState::new(eps_c2, bottom_for_layer(eps_c2, eps_ud, eta2)),
        StrainState::new(0.0, bottom_for_layer(0.0, eps_ud, eta2)),
        StrainState::new(top7, bottom7),
        StrainState::uniform(eps_ud),
    ];

    CharacteristicPoint::ALL
        .iter()
        .zip(strains)
        .map(|(&point, strain)| CharacteristicState { point, strain })
        .collect()
}
