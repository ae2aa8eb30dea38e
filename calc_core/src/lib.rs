//! # calc_core - Reinforced Concrete Section Engine
//!
//! `calc_core` computes the N-M interaction diagram of a rectangular
//! reinforced-concrete section under the EC2 parabola-rectangle concrete
//! law and a bilinear steel law, and sizes reinforcement for a target
//! `(N, M)` pair. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **SI inside**: metres, pascals, newtons and plain strains; [`units`]
//!   converts for presentation
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::design_point::{calculate, DesignInput};
//! use calc_core::loads::DesignLoad;
//!
//! let input = DesignInput {
//!     target: DesignLoad::from_kn(-250.0, 120.0),
//!     ..DesignInput::default()
//! };
//! let result = calculate(&input).unwrap();
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("converged"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Interaction diagram, design point, section analysis
//! - [`section`] - Rectangular section with two reinforcement layers
//! - [`strain`] - Linear strain fields and force resultants
//! - [`materials`] - Concrete and reinforcing steel laws
//! - [`loads`] - Design loads
//! - [`settings`] - Solver tolerances and diagram mode
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod loads;
pub mod materials;
pub mod section;
pub mod settings;
pub mod strain;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationItem, CalculationOutput};
pub use errors::{CalcError, CalcResult};
pub use loads::DesignLoad;
pub use materials::{ConcreteLaw, Materials, SteelLaw};
pub use section::SectionGeometry;
pub use settings::{DiagramMode, SolverSettings};
pub use strain::{Forces, StrainState};
