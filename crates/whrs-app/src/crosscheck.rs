//! Cross-check of stored evaluation rows against the current evaluator.
//!
//! The input is a comma separated file whose first line is a header. After
//! dropping the configured column indices, each row holds the 26 parameters
//! in [`whrs_cycle::PARAMS`] order. Every row is re-evaluated and each
//! parameter differing by more than the tolerance is reported.
//!
//! Case files were produced with the legacy ORC turbine outlet enthalpy, so
//! rows are re-evaluated in [`OrcTurbineOutlet::Legacy`] mode by default.

use crate::error::{AppError, AppResult};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use whrs_cycle::{OperatingPoint, OrcTurbineOutlet, PARAMS, ParamVector, WhrsEvaluator};
use whrs_fluids::PropertyEngine;

/// Extra columns of the historical case files.
pub const DEFAULT_DROPPED_COLUMNS: [usize; 3] = [23, 25, 26];

pub const DEFAULT_TOLERANCE: f64 = 1e-5;

const I_LOAD: usize = 0;
const I_JW_PUMP: usize = 5;
const I_RC_SUPERHEAT: usize = 11;
const I_RC_SUBCOOL: usize = 12;
const I_ORC_SUPERHEAT: usize = 13;
const I_ORC_SUBCOOL: usize = 14;
const I_ORC_PUMP: usize = 15;
const I_P_CHAMBER: usize = 17;

/// Header and numeric rows left after dropping columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

/// Parse `text`, dropping the columns at `dropped` from every line.
pub fn parse_csv(text: &str, dropped: &[usize]) -> AppResult<CsvTable> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty());

    let Some((_, first)) = lines.next() else {
        return Err(AppError::Csv {
            line: 1,
            message: "empty input".to_string(),
        });
    };
    let header = keep_columns(first, dropped);

    let mut rows = Vec::new();
    for (n, line) in lines {
        let fields = keep_columns(line, dropped);
        if fields.len() < PARAMS.len() {
            return Err(AppError::Csv {
                line: n + 1,
                message: format!("expected {} fields, found {}", PARAMS.len(), fields.len()),
            });
        }
        let row = fields
            .iter()
            .map(|f| {
                f.parse::<f64>().map_err(|e| AppError::Csv {
                    line: n + 1,
                    message: format!("'{f}': {e}"),
                })
            })
            .collect::<AppResult<Vec<f64>>>()?;
        rows.push(row);
    }

    debug!(rows = rows.len(), columns = header.len(), "parsed case file");
    Ok(CsvTable { header, rows })
}

fn keep_columns(line: &str, dropped: &[usize]) -> Vec<String> {
    line.split(',')
        .enumerate()
        .filter(|(i, _)| !dropped.contains(i))
        .map(|(_, f)| f.trim().to_string())
        .collect()
}

/// Some case files store the bar-equivalent inputs in Pa. Values above 100
/// are scaled back to bar.
pub fn apply_unit_shim(row: &mut [f64]) {
    for i in [I_JW_PUMP, I_ORC_PUMP, I_P_CHAMBER] {
        if row[i] > 100.0 {
            row[i] /= 100_000.0;
        }
    }
}

pub fn point_from_row(row: &[f64]) -> OperatingPoint {
    OperatingPoint {
        load: row[I_LOAD],
        jw_pump: row[I_JW_PUMP],
        rc_superheat: row[I_RC_SUPERHEAT],
        rc_subcool: row[I_RC_SUBCOOL],
        orc_superheat: row[I_ORC_SUPERHEAT],
        orc_subcool: row[I_ORC_SUBCOOL],
        orc_pump: row[I_ORC_PUMP],
        p_chamber: row[I_P_CHAMBER],
        fluid: None,
    }
}

/// One parameter differing between the file and the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mismatch {
    pub column: usize,
    pub csv_name: String,
    pub name: &'static str,
    pub csv: f64,
    pub calculated: f64,
}

impl Mismatch {
    pub fn diff(&self) -> f64 {
        (self.csv - self.calculated).abs()
    }
}

/// Result of re-evaluating one row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RowCheck {
    Checked { row: usize, mismatches: Vec<Mismatch> },
    Failed { row: usize, error: String },
}

impl RowCheck {
    pub fn is_clean(&self) -> bool {
        matches!(self, RowCheck::Checked { mismatches, .. } if mismatches.is_empty())
    }
}

/// Compare a stored row with a freshly computed parameter vector.
pub fn compare_row(
    header: &[String],
    row: &[f64],
    params: &ParamVector,
    tolerance: f64,
) -> Vec<Mismatch> {
    params
        .iter()
        .zip(row)
        .enumerate()
        .filter(|(_, ((_, _, calculated), csv))| (*calculated - **csv).abs() > tolerance)
        .map(|(column, ((name, _, calculated), &csv))| Mismatch {
            column,
            csv_name: header.get(column).cloned().unwrap_or_default(),
            name,
            csv,
            calculated,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrossCheck {
    pub dropped: Vec<usize>,
    pub tolerance: f64,
    /// ORC turbine outlet formula the rows are re-evaluated with
    pub orc_outlet: OrcTurbineOutlet,
}

impl Default for CrossCheck {
    fn default() -> Self {
        Self {
            dropped: DEFAULT_DROPPED_COLUMNS.to_vec(),
            tolerance: DEFAULT_TOLERANCE,
            orc_outlet: OrcTurbineOutlet::Legacy,
        }
    }
}

impl CrossCheck {
    /// Re-evaluate every row. The evaluator's own ORC outlet mode is
    /// restored afterwards.
    pub fn check_table<E: PropertyEngine>(
        &self,
        ev: &mut WhrsEvaluator<E>,
        table: &CsvTable,
    ) -> Vec<RowCheck> {
        let saved = ev.constants().orc_turbine_outlet;
        ev.constants_mut().orc_turbine_outlet = self.orc_outlet;
        let checks = self.check_rows(ev, table);
        ev.constants_mut().orc_turbine_outlet = saved;
        checks
    }

    fn check_rows<E: PropertyEngine>(
        &self,
        ev: &mut WhrsEvaluator<E>,
        table: &CsvTable,
    ) -> Vec<RowCheck> {
        table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut row = row.clone();
                apply_unit_shim(&mut row);
                let point = point_from_row(&row);
                match ev.evaluate(&point) {
                    Ok(_) => {
                        let mismatches = match ev.params() {
                            Some(params) => compare_row(&table.header, &row, params, self.tolerance),
                            None => Vec::new(),
                        };
                        for m in &mismatches {
                            warn!(row = i, column = m.column, name = m.name, csv = m.csv,
                                calculated = m.calculated, "parameter differs");
                        }
                        RowCheck::Checked { row: i, mismatches }
                    }
                    Err(e) => {
                        warn!(row = i, "evaluation failed: {e}");
                        RowCheck::Failed {
                            row: i,
                            error: e.to_string(),
                        }
                    }
                }
            })
            .collect()
    }

    pub fn check_file<E: PropertyEngine>(
        &self,
        ev: &mut WhrsEvaluator<E>,
        path: &Path,
    ) -> AppResult<Vec<RowCheck>> {
        let text = fs::read_to_string(path).map_err(|source| AppError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let table = parse_csv(&text, &self.dropped)?;
        Ok(self.check_table(ev, &table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(values: &[f64]) -> String {
        values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",")
    }

    #[test]
    fn drops_extra_columns() {
        let header: Vec<String> = (0..29).map(|i| format!("c{i}")).collect();
        let row: Vec<f64> = (0..29).map(|i| i as f64).collect();
        let text = format!("{}\n{}\n\n", header.join(","), line(&row));

        let table = parse_csv(&text, &DEFAULT_DROPPED_COLUMNS).unwrap();
        assert_eq!(table.header.len(), 26);
        assert_eq!(table.header[23], "c24");
        assert_eq!(table.header[24], "c27");
        let expected: Vec<f64> = (0..29)
            .filter(|i| ![23, 25, 26].contains(i))
            .map(|i| i as f64)
            .collect();
        assert_eq!(table.rows, vec![expected]);
    }

    #[test]
    fn short_or_malformed_rows() {
        let header = vec!["x"; 26].join(",");
        let short = format!("{header}\n1,2,3\n");
        assert!(matches!(parse_csv(&short, &[]), Err(AppError::Csv { line: 2, .. })));

        let mut fields = vec!["1"; 26];
        fields[4] = "abc";
        let bad = format!("{header}\n{}\n", fields.join(","));
        assert!(matches!(parse_csv(&bad, &[]), Err(AppError::Csv { line: 2, .. })));

        assert!(matches!(parse_csv("", &[]), Err(AppError::Csv { line: 1, .. })));
    }

    #[test]
    fn shim_only_scales_pascal_values() {
        let mut row = vec![0.0; 26];
        row[I_JW_PUMP] = 315_000.0;
        row[I_ORC_PUMP] = 6.6;
        row[I_P_CHAMBER] = 20_000.0;
        apply_unit_shim(&mut row);
        assert!((row[I_JW_PUMP] - 3.15).abs() < 1e-12);
        assert_eq!(row[I_ORC_PUMP], 6.6);
        assert!((row[I_P_CHAMBER] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn case_files_default_to_legacy_outlet() {
        let check = CrossCheck::default();
        assert_eq!(check.orc_outlet, OrcTurbineOutlet::Legacy);
        assert_eq!(check.dropped, vec![23, 25, 26]);
    }

    #[test]
    fn mismatches_above_tolerance() {
        let mut values = [0.0; 26];
        values[22] = 326.0;
        let params = ParamVector::new(values);
        let mut row = values.to_vec();
        row[22] = 326.000_001;
        row[25] = 0.5;
        let header: Vec<String> = ParamVector::header().split(',').map(String::from).collect();

        let found = compare_row(&header, &row, &params, DEFAULT_TOLERANCE);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "EPC");
        assert_eq!(found[0].csv_name, "EPC_o");
        assert_eq!(found[0].diff(), 0.5);
    }
}
