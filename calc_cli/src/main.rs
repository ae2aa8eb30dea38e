//! # Section CLI
//!
//! Command-line front end for `calc_core`: interaction diagrams, concrete-only
//! diagrams, design-point searches and single strain-state analysis.
//!
//! Requests can be loaded from a JSON file (`--input`) in the same format
//! the library deserializes; flags override the design load. Results go to
//! stdout, logs and errors to stderr.
//!
//! ```text
//! calc_cli design --n-kn 0 --m-knm 30
//! calc_cli diagram --input column.json --format csv > column.csv
//! calc_cli analyze --eps-top -3.5 --eps-bottom 2.0 --verbose
//! ```

mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use calc_core::calculations::{DesignInput, DiagramInput, SectionAnalysisInput};
use calc_core::loads::DesignLoad;
use calc_core::units::Unit;
use calc_core::{CalcError, CalcResult, CalculationItem};

use report::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "calc_cli", version, about = "EC2 N-M interaction diagrams for rectangular RC sections")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    format: OutputFormat,

    /// Debug logging on stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interaction diagram with per-point reinforcement
    Diagram(RequestArgs),
    /// Interaction diagram of the plain concrete section
    Concrete(RequestArgs),
    /// Design point for a target load
    Design(RequestArgs),
    /// Forces and reinforcement for one strain state
    Analyze {
        #[command(flatten)]
        request: RequestArgs,

        /// Top fiber strain (‰)
        #[arg(long, allow_hyphen_values = true)]
        eps_top: Option<f64>,

        /// Bottom fiber strain (‰)
        #[arg(long, allow_hyphen_values = true)]
        eps_bottom: Option<f64>,
    },
}

#[derive(Debug, Args)]
struct RequestArgs {
    /// JSON request file
    #[arg(long)]
    input: Option<PathBuf>,

    /// Design normal force (kN, tension positive)
    #[arg(long, allow_hyphen_values = true)]
    n_kn: Option<f64>,

    /// Design moment (kNm)
    #[arg(long, allow_hyphen_values = true)]
    m_knm: Option<f64>,
}

impl RequestArgs {
    fn load<T: DeserializeOwned + Default>(&self) -> CalcResult<T> {
        match &self.input {
            Some(path) => read_json(path),
            None => Ok(T::default()),
        }
    }

    fn apply(&self, load: &mut DesignLoad) {
        if let Some(n_kn) = self.n_kn {
            load.n_n = Unit::Kilonewton.to_si(n_kn);
        }
        if let Some(m_knm) = self.m_knm {
            load.m_nm = Unit::KilonewtonMeter.to_si(m_knm);
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    info!(path = %path.display(), "reading request");
    let text = std::fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    Ok(serde_json::from_str(&text)?)
}

fn build_item(command: &Command) -> CalcResult<CalculationItem> {
    Ok(match command {
        Command::Diagram(args) => {
            let mut input: DiagramInput = args.load()?;
            args.apply(&mut input.design_load);
            CalculationItem::InteractionDiagram(input)
        }
        Command::Concrete(args) => CalculationItem::ConcreteDiagram(args.load()?),
        Command::Design(args) => {
            let mut input: DesignInput = args.load()?;
            args.apply(&mut input.target);
            CalculationItem::DesignReinforcement(input)
        }
        Command::Analyze {
            request,
            eps_top,
            eps_bottom,
        } => {
            let mut input: SectionAnalysisInput = request.load()?;
            request.apply(&mut input.design_load);
            if let Some(top) = eps_top {
                input.strain.eps_top = Unit::PerMille.to_si(*top);
            }
            if let Some(bottom) = eps_bottom {
                input.strain.eps_bottom = Unit::PerMille.to_si(*bottom);
            }
            CalculationItem::SectionAnalysis(input)
        }
    })
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> CalcResult<String> {
    let item = build_item(&cli.command)?;
    debug!(calc_type = item.calc_type(), label = item.label(), "running calculation");
    let output = item.run()?;
    report::render(&output, cli.format)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{json}");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_load() {
        let cli = Cli::parse_from(["calc_cli", "design", "--n-kn", "-250", "--m-knm", "120"]);
        match build_item(&cli.command).unwrap() {
            CalculationItem::DesignReinforcement(input) => {
                assert_eq!(input.target.n_n, -250e3);
                assert_eq!(input.target.m_nm, 120e3);
            }
            other => panic!("unexpected item: {other:?}"),
        }
    }

    #[test]
    fn test_analyze_strains_in_permille() {
        let cli = Cli::parse_from(["calc_cli", "analyze", "--eps-top", "-3.5", "--eps-bottom", "2"]);
        match build_item(&cli.command).unwrap() {
            CalculationItem::SectionAnalysis(input) => {
                assert_eq!(input.strain.eps_top, -0.0035);
                assert_eq!(input.strain.eps_bottom, 0.002);
            }
            other => panic!("unexpected item: {other:?}"),
        }
    }

    #[test]
    fn test_missing_input_file() {
        let cli = Cli::parse_from(["calc_cli", "diagram", "--input", "/nonexistent/request.json"]);
        let err = build_item(&cli.command).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
