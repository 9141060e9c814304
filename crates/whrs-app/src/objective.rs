//! Weighted rank objective over the headline outputs.
//!
//! A search treats the evaluator as a black box: it proposes control
//! variables and receives a scalar score, or learns that the point is
//! infeasible.

use crate::error::{AppError, AppResult};
use tracing::warn;
use whrs_cycle::{Headline, OperatingPoint, OperatingVariable, WhrsEvaluator};
use whrs_fluids::PropertyEngine;

/// Linear ranking model `w0 * output + w1 * CO2_red + w2 * EPC`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankObjective {
    pub weights: [f64; 3],
    fixed_load: Option<f64>,
}

impl RankObjective {
    pub fn new(weights: [f64; 3]) -> Self {
        Self {
            weights,
            fixed_load: None,
        }
    }

    /// Objective that pins the load when the evaluator's Load range has
    /// `min == max`.
    pub fn for_evaluator<E: PropertyEngine>(weights: [f64; 3], ev: &WhrsEvaluator<E>) -> Self {
        let load = ev.ranges().get(OperatingVariable::Load);
        let objective = Self::new(weights);
        if load.is_pinned() {
            objective.with_fixed_load(load.min)
        } else {
            objective
        }
    }

    pub fn with_fixed_load(mut self, load: f64) -> Self {
        self.fixed_load = Some(load);
        self
    }

    pub fn fixed_load(&self) -> Option<f64> {
        self.fixed_load
    }

    /// Number of search variables: seven with a pinned load, eight otherwise.
    pub fn dimension(&self) -> usize {
        if self.fixed_load.is_some() { 7 } else { 8 }
    }

    pub fn target(&self, h: &Headline) -> f64 {
        let [w0, w1, w2] = self.weights;
        h.whrs_cycle_output * w0 + h.co2_red * w1 + h.epc * w2
    }

    /// Build an operating point from search variables in
    /// [`OperatingVariable::ALL`] order, without Load when it is pinned.
    pub fn point_from_vars(&self, vars: &[f64]) -> AppResult<OperatingPoint> {
        if vars.len() != self.dimension() {
            return Err(AppError::InvalidInput(format!(
                "expected {} variables, got {}",
                self.dimension(),
                vars.len()
            )));
        }

        let mut point = OperatingPoint {
            load: 0.0,
            jw_pump: 0.0,
            rc_superheat: 0.0,
            rc_subcool: 0.0,
            orc_superheat: 0.0,
            orc_subcool: 0.0,
            orc_pump: 0.0,
            p_chamber: 0.0,
            fluid: None,
        };
        let free = OperatingVariable::ALL
            .into_iter()
            .filter(|v| !(self.fixed_load.is_some() && *v == OperatingVariable::Load));
        for (var, &value) in free.zip(vars) {
            point.set(var, value);
        }
        if let Some(load) = self.fixed_load {
            point.load = load;
        }
        Ok(point)
    }

    /// Score `point`, overriding its load when one is pinned.
    pub fn score<E: PropertyEngine>(
        &self,
        ev: &mut WhrsEvaluator<E>,
        point: &OperatingPoint,
    ) -> AppResult<f64> {
        let mut point = *point;
        if let Some(load) = self.fixed_load {
            point.load = load;
        }
        let headline = ev.evaluate(&point)?;
        Ok(self.target(&headline))
    }

    /// Like [`score`](Self::score), with failures logged and mapped to `None`.
    pub fn score_or_infeasible<E: PropertyEngine>(
        &self,
        ev: &mut WhrsEvaluator<E>,
        point: &OperatingPoint,
    ) -> Option<f64> {
        match self.score(ev, point) {
            Ok(score) => Some(score),
            Err(e) => {
                warn!(?point, "infeasible operating point: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_target() {
        let objective = RankObjective::new([1.0, 2.0, -100.0]);
        let h = Headline {
            whrs_cycle_output: 500.0,
            co2_red: 20.0,
            epc: 0.25,
        };
        assert_eq!(objective.target(&h), 500.0 + 40.0 - 25.0);
    }

    #[test]
    fn pinned_load_takes_seven_variables() {
        let objective = RankObjective::new([1.0, 0.0, 0.0]).with_fixed_load(75.0);
        assert_eq!(objective.dimension(), 7);

        let point = objective
            .point_from_vars(&[3.15, 8.0, 1e-4, 1e-3, 1e-3, 6.6, 0.2])
            .unwrap();
        assert_eq!(point.load, 75.0);
        assert_eq!(point.jw_pump, 3.15);
        assert_eq!(point.p_chamber, 0.2);

        assert!(matches!(
            objective.point_from_vars(&[60.0, 3.15, 8.0, 1e-4, 1e-3, 1e-3, 6.6, 0.2]),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn free_load_takes_eight_variables() {
        let objective = RankObjective::new([1.0, 0.0, 0.0]);
        let point = objective
            .point_from_vars(&[60.0, 3.15, 8.0, 1e-4, 1e-3, 1e-3, 6.6, 0.2])
            .unwrap();
        assert_eq!(point.load, 60.0);
        assert_eq!(point.orc_pump, 6.6);
    }
}
