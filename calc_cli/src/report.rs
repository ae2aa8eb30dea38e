//! Text rendering of calculation outputs.
//!
//! Converts SI results to presentation units (‰, MPa, kN, kNm, cm²) and
//! lays them out as an aligned table or as CSV.

use calc_core::calculations::design_point::DesignResult;
use calc_core::calculations::diagram::{ConcretePoint, InteractionPoint};
use calc_core::calculations::reinforcement::ReinforcementSolution;
use calc_core::calculations::section_analysis::SectionAnalysisResult;
use calc_core::units::Unit;
use calc_core::{CalcError, CalcResult, CalculationOutput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

/// Column name and presentation unit.
type Column = (&'static str, Option<Unit>);

const POINT_COLUMNS: [Column; 15] = [
    ("label", None),
    ("eps_top", Some(Unit::PerMille)),
    ("eps_bot", Some(Unit::PerMille)),
    ("eps_s1", Some(Unit::PerMille)),
    ("eps_s2", Some(Unit::PerMille)),
    ("sig_s1", Some(Unit::Megapascal)),
    ("sig_s2", Some(Unit::Megapascal)),
    ("Nc", Some(Unit::Kilonewton)),
    ("Mc", Some(Unit::KilonewtonMeter)),
    ("N", Some(Unit::Kilonewton)),
    ("M", Some(Unit::KilonewtonMeter)),
    ("As1", Some(Unit::SquareCentimeter)),
    ("As2", Some(Unit::SquareCentimeter)),
    ("As", Some(Unit::SquareCentimeter)),
    ("Astot", Some(Unit::SquareCentimeter)),
];

/// Convergence metadata appended to the design point in CSV.
const DESIGN_COLUMNS: [Column; 6] = [
    ("target_N", Some(Unit::Kilonewton)),
    ("target_M", Some(Unit::KilonewtonMeter)),
    ("error_abs", Some(Unit::KilonewtonMeter)),
    ("error_rel", None),
    ("iterations", None),
    ("converged", None),
];

const ANALYSIS_COLUMNS: [Column; 2] = [("z_c", Some(Unit::Millimeter)), ("x", Some(Unit::Millimeter))];

const CONCRETE_COLUMNS: [Column; 7] = [
    ("label", None),
    ("k", Some(Unit::PerMeter)),
    ("q", Some(Unit::PerMille)),
    ("eps_top", Some(Unit::PerMille)),
    ("eps_bot", Some(Unit::PerMille)),
    ("N", Some(Unit::Kilonewton)),
    ("M", Some(Unit::KilonewtonMeter)),
];

fn num(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// SI value in `unit`, "-" when absent.
fn quantity(value: Option<f64>, unit: Unit, decimals: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| num(unit.from_si(v), decimals))
}

fn point_row(p: &InteractionPoint) -> Vec<String> {
    let mut optimal = (None, None);
    let mut single = None;
    let mut uniform = None;
    for outcome in &p.reinforcement {
        match outcome.solution() {
            Some(ReinforcementSolution::Optimal { as1_m2, as2_m2, .. }) => optimal = (Some(*as1_m2), Some(*as2_m2)),
            Some(ReinforcementSolution::SingleLayer { as2_m2, .. }) => single = Some(*as2_m2),
            Some(ReinforcementSolution::Uniform { astot_m2, .. }) => uniform = Some(*astot_m2),
            None => {}
        }
    }

    let strain = |eps: f64| num(Unit::PerMille.from_si(eps), 3);
    let stress = |sigma: f64| num(Unit::Megapascal.from_si(sigma), 1);
    let force = |n: f64| num(Unit::Kilonewton.from_si(n), 1);
    let moment = |m: f64| num(Unit::KilonewtonMeter.from_si(m), 1);
    let area = |a: Option<f64>| quantity(a, Unit::SquareCentimeter, 2);

    vec![
        p.label.clone(),
        strain(p.strain.eps_top),
        strain(p.strain.eps_bottom),
        strain(p.eps_s1),
        strain(p.eps_s2),
        stress(p.sigma_s1_pa),
        stress(p.sigma_s2_pa),
        force(p.concrete.n),
        moment(p.concrete_design_moment()),
        force(p.n_total_n),
        moment(p.m_design_nm),
        area(optimal.0),
        area(optimal.1),
        area(single),
        area(uniform),
    ]
}

fn design_row(result: &DesignResult) -> Vec<String> {
    let mut row = point_row(&result.point);
    row.extend([
        num(Unit::Kilonewton.from_si(result.target.n_n), 1),
        num(Unit::KilonewtonMeter.from_si(result.target.m_nm), 1),
        num(Unit::KilonewtonMeter.from_si(result.error_abs_nm), 3),
        format!("{:.6}", result.error_rel),
        result.iterations.to_string(),
        result.converged.to_string(),
    ]);
    row
}

fn analysis_row(result: &SectionAnalysisResult) -> Vec<String> {
    let mut row = point_row(&result.point);
    row.extend([
        quantity(result.compression_zone_centroid_m, Unit::Millimeter, 1),
        quantity(result.neutral_axis_depth_m, Unit::Millimeter, 1),
    ]);
    row
}

fn concrete_row(p: &ConcretePoint) -> Vec<String> {
    let strain = |eps: f64| num(Unit::PerMille.from_si(eps), 3);
    vec![
        p.label.clone(),
        format!("{:.6}", Unit::PerMeter.from_si(p.k)),
        strain(p.q),
        strain(p.strain.eps_top),
        strain(p.strain.eps_bottom),
        num(Unit::Kilonewton.from_si(p.n_n), 1),
        num(Unit::KilonewtonMeter.from_si(-p.m_nm), 1),
    ]
}

fn table(columns: &[Column], rows: &[Vec<String>]) -> String {
    let headers: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
    let units: Vec<&str> = columns.iter().map(|(_, unit)| unit.map_or("", Unit::symbol)).collect();

    let mut widths: Vec<usize> = headers
        .iter()
        .zip(&units)
        .map(|(h, u)| h.chars().count().max(u.chars().count()))
        .collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, &w))| {
                let pad = w.saturating_sub(cell.chars().count());
                if i == 0 {
                    format!("{cell}{}", " ".repeat(pad))
                } else {
                    format!("{}{cell}", " ".repeat(pad))
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut out = String::new();
    out.push_str(&line(headers));
    out.push('\n');
    out.push_str(&line(units));
    out.push('\n');
    out.push_str(&"─".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}

fn csv_records(columns: &[Column], rows: &[Vec<String>]) -> csv::Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns.iter().map(|(name, unit)| match unit {
        Some(unit) => format!("{name} [{unit}]"),
        None => name.to_string(),
    }))?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.into_inner().map_err(|e| e.into_error().into())
}

fn csv_text(columns: &[Column], rows: &[Vec<String>]) -> CalcResult<String> {
    let bytes = csv_records(columns, rows).map_err(|e| CalcError::serialization(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CalcError::serialization(e.to_string()))
}

/// Render an output in `format`.
pub fn render(output: &CalculationOutput, format: OutputFormat) -> CalcResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(output)?),
        OutputFormat::Csv => render_csv(output),
        OutputFormat::Table => Ok(render_table(output)),
    }
}

fn render_csv(output: &CalculationOutput) -> CalcResult<String> {
    match output {
        CalculationOutput::InteractionDiagram(result) => {
            let rows: Vec<_> = result.points.iter().map(point_row).collect();
            csv_text(&POINT_COLUMNS, &rows)
        }
        CalculationOutput::ConcreteDiagram(result) => {
            let rows: Vec<_> = result.points.iter().map(concrete_row).collect();
            csv_text(&CONCRETE_COLUMNS, &rows)
        }
        CalculationOutput::DesignReinforcement(result) => {
            let columns = [&POINT_COLUMNS[..], &DESIGN_COLUMNS[..]].concat();
            csv_text(&columns, &[design_row(result)])
        }
        CalculationOutput::SectionAnalysis(result) => {
            let columns = [&POINT_COLUMNS[..], &ANALYSIS_COLUMNS[..]].concat();
            csv_text(&columns, &[analysis_row(result)])
        }
    }
}

fn render_table(output: &CalculationOutput) -> String {
    match output {
        CalculationOutput::InteractionDiagram(result) => {
            let rows: Vec<_> = result.points.iter().map(point_row).collect();
            table(&POINT_COLUMNS, &rows)
        }
        CalculationOutput::ConcreteDiagram(result) => {
            let rows: Vec<_> = result.points.iter().map(concrete_row).collect();
            table(&CONCRETE_COLUMNS, &rows)
        }
        CalculationOutput::DesignReinforcement(result) => {
            let mut text = table(&POINT_COLUMNS, &[point_row(&result.point)]);
            text.push('\n');
            text.push_str(&format!(
                "Target:     N = {:.1} kN, M = {:.1} kNm\n",
                Unit::Kilonewton.from_si(result.target.n_n),
                Unit::KilonewtonMeter.from_si(result.target.m_nm)
            ));
            text.push_str(&format!(
                "Error:      {:.3} kNm ({:.3} %)\n",
                Unit::KilonewtonMeter.from_si(result.error_abs_nm),
                100.0 * result.error_rel
            ));
            text.push_str(&format!(
                "Status:     {} after {} iterations\n",
                if result.converged { "converged" } else { "NOT converged" },
                result.iterations
            ));
            for outcome in &result.point.reinforcement {
                let detail = match &outcome.result {
                    Ok(sol) => format!("{} cm² total", quantity(Some(sol.total_area()), Unit::SquareCentimeter, 2)),
                    Err(reason) => format!("n/a ({reason})"),
                };
                text.push_str(&format!("  {:<24} {}\n", outcome.variant.display_name(), detail));
            }
            text
        }
        CalculationOutput::SectionAnalysis(result) => {
            let mm = |v: Option<f64>| quantity(v, Unit::Millimeter, 1);
            let mut text = table(&POINT_COLUMNS, &[point_row(&result.point)]);
            text.push('\n');
            text.push_str(&format!(
                "Compression resultant above centroid: {} mm\n",
                mm(result.compression_zone_centroid_m)
            ));
            text.push_str(&format!("Neutral axis depth: {} mm\n", mm(result.neutral_axis_depth_m)));
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_core::calculations::diagram::{self, DiagramInput};
    use calc_core::calculations::{design_point, section_analysis, DesignInput, SectionAnalysisInput};
    use calc_core::loads::DesignLoad;

    fn diagram_output() -> CalculationOutput {
        let input = DiagramInput {
            densities: Some(vec![1; 8]),
            ..DiagramInput::default()
        };
        CalculationOutput::InteractionDiagram(diagram::calculate(&input).unwrap())
    }

    fn parse(text: &str) -> (csv::StringRecord, Vec<csv::StringRecord>) {
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let headers = reader.headers().unwrap().clone();
        let records = reader.records().collect::<Result<Vec<_>, _>>().unwrap();
        (headers, records)
    }

    #[test]
    fn test_csv_has_one_line_per_point() {
        let text = render(&diagram_output(), OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with("label,eps_top [‰]"));
        assert!(lines[1].starts_with("Point 1,-3.500,-3.500"));
    }

    #[test]
    fn test_csv_quotes_label_with_comma() {
        let input = SectionAnalysisInput {
            label: "Beam, left".to_string(),
            ..SectionAnalysisInput::default()
        };
        let result = section_analysis::calculate(&input).unwrap();
        let output = CalculationOutput::SectionAnalysis(result);

        let text = render(&output, OutputFormat::Csv).unwrap();
        assert!(text.lines().nth(1).unwrap().starts_with("\"Beam, left\","));

        let (headers, records) = parse(&text);
        assert_eq!(headers.len(), POINT_COLUMNS.len() + ANALYSIS_COLUMNS.len());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), headers.len());
        assert_eq!(&records[0][0], "Beam, left");
    }

    #[test]
    fn test_csv_design_carries_convergence() {
        let input = DesignInput {
            target: DesignLoad::from_kn(0.0, 30.0),
            ..DesignInput::default()
        };
        let result = design_point::calculate(&input).unwrap();
        let iterations = result.iterations;
        let text = render(&CalculationOutput::DesignReinforcement(result), OutputFormat::Csv).unwrap();

        let (headers, records) = parse(&text);
        let row = &records[0];
        assert_eq!(row.len(), headers.len());
        let field = |name: &str| {
            let i = headers.iter().position(|h| h.starts_with(name)).unwrap();
            row[i].to_string()
        };
        assert_eq!(field("target_N [kN]"), "0.0");
        assert_eq!(field("target_M [kNm]"), "30.0");
        assert_eq!(field("iterations"), iterations.to_string());
        assert_eq!(field("converged"), "true");
        assert!(field("error_rel").parse::<f64>().unwrap() < 0.01);
    }

    #[test]
    fn test_table_aligns_columns() {
        let text = render(&diagram_output(), OutputFormat::Table).unwrap();
        let widths: Vec<usize> = text.lines().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_json_is_tagged_output() {
        let text = render(&diagram_output(), OutputFormat::Json).unwrap();
        match serde_json::from_str::<CalculationOutput>(&text).unwrap() {
            CalculationOutput::InteractionDiagram(result) => assert_eq!(result.points.len(), 9),
            other => panic!("unexpected output: {other:?}"),
        }
    }
}
