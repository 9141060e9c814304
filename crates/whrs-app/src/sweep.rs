//! Operating variable sweeps.
//!
//! One control variable is stepped between two values while the others stay
//! at a base point. Failing points are recorded, not fatal.

use crate::error::{AppError, AppResult};
use serde::Serialize;
use std::fmt;
use tracing::debug;
use whrs_cycle::{Headline, OperatingPoint, OperatingVariable, WhrsEvaluator};
use whrs_fluids::PropertyEngine;

/// Type of sweep progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SweepType {
    /// Uniformly spaced points
    Linear,
    /// Logarithmically spaced points
    Logarithmic,
}

/// Definition of a single variable sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepDefinition {
    pub variable: OperatingVariable,
    pub start: f64,
    pub end: f64,
    pub num_points: usize,
    pub sweep_type: SweepType,
}

impl SweepDefinition {
    pub fn new(
        variable: OperatingVariable,
        start: f64,
        end: f64,
        num_points: usize,
        sweep_type: SweepType,
    ) -> AppResult<Self> {
        if num_points < 2 {
            return Err(AppError::InvalidInput(
                "Sweep must have at least 2 points".to_string(),
            ));
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(AppError::InvalidInput(format!(
                "Sweep bounds must be finite: {start} to {end}"
            )));
        }
        if (start - end).abs() < 1e-12 {
            return Err(AppError::InvalidInput(
                "Start and end values must be different".to_string(),
            ));
        }

        Ok(Self {
            variable,
            start,
            end,
            num_points,
            sweep_type,
        })
    }

    pub fn linear(variable: OperatingVariable, start: f64, end: f64, num_points: usize) -> AppResult<Self> {
        Self::new(variable, start, end, num_points, SweepType::Linear)
    }

    /// Generate all points in the sweep.
    pub fn generate_points(&self) -> Vec<f64> {
        match self.sweep_type {
            SweepType::Linear => self.generate_linear(),
            SweepType::Logarithmic => self.generate_logarithmic(),
        }
    }

    fn generate_linear(&self) -> Vec<f64> {
        let delta = (self.end - self.start) / (self.num_points - 1) as f64;
        let mut points: Vec<f64> = (0..self.num_points)
            .map(|i| self.start + i as f64 * delta)
            .collect();

        // Ensure exact endpoint
        points[self.num_points - 1] = self.end;
        points
    }

    fn generate_logarithmic(&self) -> Vec<f64> {
        // Fall back to linear unless both bounds are positive
        if self.start <= 0.0 || self.end <= 0.0 {
            return self.generate_linear();
        }

        let log_start = self.start.ln();
        let log_delta = (self.end.ln() - log_start) / (self.num_points - 1) as f64;
        let mut points: Vec<f64> = (0..self.num_points)
            .map(|i| (log_start + i as f64 * log_delta).exp())
            .collect();

        // Ensure exact endpoint
        points[self.num_points - 1] = self.end;
        points
    }
}

impl fmt::Display for SweepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sweep {} from {} to {} ({} points, {})",
            self.variable, self.start, self.end, self.num_points, self.sweep_type
        )
    }
}

/// Outcome of one sweep point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SweepOutcome {
    Evaluated(Headline),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub value: f64,
    pub outcome: SweepOutcome,
}

/// Evaluate every point of `def`, starting from `base`.
pub fn run_sweep<E: PropertyEngine>(
    ev: &mut WhrsEvaluator<E>,
    base: &OperatingPoint,
    def: &SweepDefinition,
) -> Vec<SweepPoint> {
    debug!(sweep = %def, "running sweep");
    def.generate_points()
        .into_iter()
        .map(|value| {
            let mut point = *base;
            point.set(def.variable, value);
            let outcome = match ev.evaluate(&point) {
                Ok(h) => SweepOutcome::Evaluated(h),
                Err(e) => SweepOutcome::Failed(e.to_string()),
            };
            SweepPoint { value, outcome }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_sweep() {
        let sweep = SweepDefinition::linear(OperatingVariable::Load, 50.0, 100.0, 6).unwrap();
        let points = sweep.generate_points();
        assert_eq!(points, vec![50.0, 60.0, 70.0, 80.0, 90.0, 100.0]);
    }

    #[test]
    fn exact_endpoint() {
        let sweep = SweepDefinition::linear(OperatingVariable::PChamber, 0.09, 0.2, 7).unwrap();
        let points = sweep.generate_points();
        assert_eq!(points[0], 0.09);
        assert_eq!(points[6], 0.2);
    }

    #[test]
    fn logarithmic_sweep() {
        let sweep = SweepDefinition::new(
            OperatingVariable::RcSubcool,
            1e-4,
            1.0,
            5,
            SweepType::Logarithmic,
        )
        .unwrap();
        let points = sweep.generate_points();
        assert_eq!(points.len(), 5);
        assert!((points[1] - 1e-3).abs() < 1e-12);
        assert!((points[2] - 1e-2).abs() < 1e-12);
        assert_eq!(points[4], 1.0);
    }

    #[test]
    fn invalid_sweeps() {
        assert!(SweepDefinition::linear(OperatingVariable::Load, 50.0, 100.0, 1).is_err());
        assert!(SweepDefinition::linear(OperatingVariable::Load, 60.0, 60.0, 5).is_err());
        assert!(SweepDefinition::linear(OperatingVariable::Load, f64::NAN, 60.0, 5).is_err());
    }

    #[test]
    fn display() {
        let sweep = SweepDefinition::linear(OperatingVariable::OrcPump, 5.59, 6.6, 3).unwrap();
        assert_eq!(sweep.to_string(), "Sweep ORC_Pump from 5.59 to 6.6 (3 points, Linear)");
    }
}
