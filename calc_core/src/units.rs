//! # Presentation Units
//!
//! The core computes in plain SI `f64` values (m, Pa, N, N·m, m², strain as
//! a fraction). Engineers read sections in mm, MPa, kN, kN·m, cm² and ‰;
//! [`Unit`] converts between the two and carries the symbol used in report
//! headers.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::Unit;
//!
//! assert_eq!(Unit::Millimeter.from_si(0.5), 500.0);
//! assert_eq!(Unit::KilonewtonMeter.to_si(30.0), 30_000.0);
//! assert_eq!(Unit::PerMille.symbol(), "‰");
//! ```

/// How a presentation unit relates to its SI base.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Scale {
    /// presentation = SI · factor
    Up(f64),
    /// presentation = SI / factor
    Down(f64),
}

/// Presentation unit of a reported quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Length, from m
    Millimeter,
    /// Stress, from Pa
    Megapascal,
    /// Force, from N
    Kilonewton,
    /// Moment, from N·m
    KilonewtonMeter,
    /// Reinforcement area, from m²
    SquareCentimeter,
    /// Strain, from the dimensionless fraction
    PerMille,
    /// Strain slope, already SI (1/m)
    PerMeter,
}

impl Unit {
    fn scale(self) -> Scale {
        match self {
            Unit::Millimeter | Unit::PerMille => Scale::Up(1e3),
            Unit::SquareCentimeter => Scale::Up(1e4),
            Unit::Megapascal => Scale::Down(1e6),
            Unit::Kilonewton | Unit::KilonewtonMeter => Scale::Down(1e3),
            Unit::PerMeter => Scale::Up(1.0),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Millimeter => "mm",
            Unit::Megapascal => "MPa",
            Unit::Kilonewton => "kN",
            Unit::KilonewtonMeter => "kNm",
            Unit::SquareCentimeter => "cm²",
            Unit::PerMille => "‰",
            Unit::PerMeter => "1/m",
        }
    }

    /// SI value expressed in this unit.
    pub fn from_si(self, value: f64) -> f64 {
        match self.scale() {
            Scale::Up(f) => value * f,
            Scale::Down(f) => value / f,
        }
    }

    /// Value in this unit expressed in SI.
    pub fn to_si(self, value: f64) -> f64 {
        match self.scale() {
            Scale::Up(f) => value / f,
            Scale::Down(f) => value * f,
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}
