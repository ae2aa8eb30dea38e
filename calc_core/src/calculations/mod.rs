//! # Section Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable, every field defaulted)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`diagram`] - N-M interaction diagram, with or without reinforcement
//! - [`design_point`] - Design point for a target (N, M)
//! - [`section_analysis`] - Evaluation of a single strain state
//!
//! The building blocks they share:
//!
//! - [`concrete_integration`] - Concrete resultant of a linear strain field
//! - [`characteristic`] - EC2 characteristic strain states
//! - [`reinforcement`] - Reinforcement area solvers

pub mod characteristic;
pub mod concrete_integration;
pub mod design_point;
pub mod diagram;
pub mod reinforcement;
pub mod section_analysis;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;

// Re-export commonly used types
pub use design_point::{DesignInput, DesignResult};
pub use diagram::{ConcreteDiagramResult, DiagramInput, InteractionDiagramResult, InteractionPoint};
pub use reinforcement::{ReinforcementOutcome, ReinforcementSolution, ReinforcementVariant};
pub use section_analysis::{SectionAnalysisInput, SectionAnalysisResult};

/// Enum wrapper for all calculation requests.
///
/// ## JSON Example
///
/// ```json
/// { "type": "DesignReinforcement", "label": "B2", "target": { "n_n": 0.0, "m_nm": 30000.0 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Interaction diagram with per-point reinforcement
    InteractionDiagram(DiagramInput),
    /// Interaction diagram of the plain concrete section
    ConcreteDiagram(DiagramInput),
    /// Design point search for a target load
    DesignReinforcement(DesignInput),
    /// Single strain-state analysis
    SectionAnalysis(SectionAnalysisInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::InteractionDiagram(d) | CalculationItem::ConcreteDiagram(d) => &d.label,
            CalculationItem::DesignReinforcement(d) => &d.label,
            CalculationItem::SectionAnalysis(s) => &s.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::InteractionDiagram(_) => "InteractionDiagram",
            CalculationItem::ConcreteDiagram(_) => "ConcreteDiagram",
            CalculationItem::DesignReinforcement(_) => "DesignReinforcement",
            CalculationItem::SectionAnalysis(_) => "SectionAnalysis",
        }
    }

    /// Run the calculation this item describes.
    pub fn run(&self) -> CalcResult<CalculationOutput> {
        Ok(match self {
            CalculationItem::InteractionDiagram(input) => CalculationOutput::InteractionDiagram(diagram::calculate(input)?),
            CalculationItem::ConcreteDiagram(input) => {
                CalculationOutput::ConcreteDiagram(diagram::calculate_concrete_only(input)?)
            }
            CalculationItem::DesignReinforcement(input) => {
                CalculationOutput::DesignReinforcement(design_point::calculate(input)?)
            }
            CalculationItem::SectionAnalysis(input) => CalculationOutput::SectionAnalysis(section_analysis::calculate(input)?),
        })
    }
}

/// Result of [`CalculationItem::run`], tagged like the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    InteractionDiagram(InteractionDiagramResult),
    ConcreteDiagram(ConcreteDiagramResult),
    DesignReinforcement(DesignResult),
    SectionAnalysis(SectionAnalysisResult),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_from_json() {
        let json = r#"{ "type": "DesignReinforcement", "label": "B2", "target": { "n_n": 0.0, "m_nm": 30000.0 } }"#;
        let item: CalculationItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.label(), "B2");
        assert_eq!(item.calc_type(), "DesignReinforcement");

        match item.run().unwrap() {
            CalculationOutput::DesignReinforcement(result) => assert!(result.converged),
            other => panic!("unexpected output: {other:?}"),
        }
    }

    #[test]
    fn test_concrete_diagram_item() {
        let item = CalculationItem::ConcreteDiagram(DiagramInput {
            densities: Some(vec![1; 8]),
            ..DiagramInput::default()
        });
        match item.run().unwrap() {
            CalculationOutput::ConcreteDiagram(result) => assert_eq!(result.points.len(), 9),
            other => panic!("unexpected output: {other:?}"),
        }
    }

    #[test]
    fn test_errors_propagate() {
        let item = CalculationItem::InteractionDiagram(DiagramInput {
            densities: Some(vec![3; 4]),
            ..DiagramInput::default()
        });
        assert_eq!(item.run().unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_output_is_tagged() {
        let item = CalculationItem::SectionAnalysis(SectionAnalysisInput::default());
        let json = serde_json::to_string(&item.run().unwrap()).unwrap();
        assert!(json.starts_with(r#"{"type":"SectionAnalysis""#));
    }
}
