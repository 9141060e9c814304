//! Evaluation report rows.

use crate::error::AppResult;
use serde::Serialize;
use std::io::Write;
use whrs_cycle::{Advisory, CycleReport, Headline, OperatingPoint, ParamVector};

/// Compact summary of one evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub point: OperatingPoint,
    pub fluid: &'static str,
    pub headline: Headline,
    pub params: ParamVector,
    pub advisories: Vec<Advisory>,
}

impl From<&CycleReport> for ReportRow {
    fn from(report: &CycleReport) -> Self {
        Self {
            point: report.point,
            fluid: report.fluid.display_name,
            headline: report.headline,
            params: report.params.clone(),
            advisories: report.advisories.clone(),
        }
    }
}

/// Write the parameter header followed by one line per row.
pub fn write_csv<W: Write>(out: &mut W, rows: &[ReportRow]) -> AppResult<()> {
    writeln!(out, "{}", ParamVector::header())?;
    for row in rows {
        writeln!(out, "{}", row.params.to_csv_row())?;
    }
    Ok(())
}

/// Pretty-printed JSON of any serializable result.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> AppResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ReportRow {
        let mut values = [0.0; 26];
        values[0] = 60.0;
        values[25] = 0.27;
        ReportRow {
            point: OperatingPoint {
                load: 60.0,
                jw_pump: 3.15,
                rc_superheat: 8.0222,
                rc_subcool: 1e-4,
                orc_superheat: 1e-3,
                orc_subcool: 1e-3,
                orc_pump: 6.6,
                p_chamber: 0.2,
                fluid: None,
            },
            fluid: "Cyclohexane",
            headline: Headline {
                whrs_cycle_output: 467.0,
                co2_red: 20.6,
                epc: 0.27,
            },
            params: ParamVector::new(values),
            advisories: vec![Advisory::TegOccupancy { percent: 120.0 }],
        }
    }

    #[test]
    fn csv_rows_follow_header() {
        let mut out = Vec::new();
        write_csv(&mut out, &[row(), row()]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Load_i,"));
        assert!(lines[1].starts_with("60,"));
        assert!(lines[1].ends_with(",0.27"));
    }

    #[test]
    fn json_carries_advisories() {
        let mut out = Vec::new();
        write_json(&mut out, &[row()]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["fluid"], "Cyclohexane");
        assert_eq!(value[0]["advisories"][0]["kind"], "teg_occupancy");
        assert_eq!(value[0]["headline"]["epc"], 0.27);
    }
}
