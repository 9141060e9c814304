//! Pareto comparison of headline outputs.
//!
//! Output and CO2 reduction are maximized, EPC is minimized. Pairs with a
//! decided order are the training examples of a pairwise ranking learner.

use serde::Serialize;
use whrs_cycle::Headline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Dominance {
    /// The first tuple is at least as good in every objective.
    Better,
    /// The second tuple is at least as good in every objective.
    Worse,
    Undecided,
}

/// Compare `a` against `b`. Equal tuples are undecided.
pub fn dominance(a: &Headline, b: &Headline) -> Dominance {
    if a == b {
        return Dominance::Undecided;
    }
    if a.whrs_cycle_output >= b.whrs_cycle_output && a.co2_red >= b.co2_red && a.epc <= b.epc {
        return Dominance::Better;
    }
    if a.whrs_cycle_output <= b.whrs_cycle_output && a.co2_red <= b.co2_red && a.epc >= b.epc {
        return Dominance::Worse;
    }
    Dominance::Undecided
}

/// Ordered `(better, worse)` index pairs among `headlines`.
pub fn decided_pairs(headlines: &[Headline]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..headlines.len() {
        for j in i + 1..headlines.len() {
            match dominance(&headlines[i], &headlines[j]) {
                Dominance::Better => pairs.push((i, j)),
                Dominance::Worse => pairs.push((j, i)),
                Dominance::Undecided => {}
            }
        }
    }
    pairs
}
