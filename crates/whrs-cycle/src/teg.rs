//! Thermoelectric generators on the engine block.

use crate::advisory::{Advisory, check};
use crate::constants::PlantConstants;
use crate::source::HeatSources;
use serde::Serialize;

/// Module coverage of the engine surface and the block heat it intercepts.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TegLayout {
    /// Share of the engine area covered by modules [%]
    pub occupancy: f64,
    /// Block heat diverted through the modules [kW]
    pub q_teg: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TegState {
    pub occupancy: f64,
    pub q_teg: f64,
    pub hot: f64,
    pub cold: f64,
    pub gradient: f64,
    /// Electrical output of all modules [kW]
    pub output_kw: f64,
}

pub fn layout(c: &PlantConstants, src: &HeatSources) -> (TegLayout, Vec<Advisory>) {
    let mut adv = Vec::new();
    let occupancy = c.n_teg * c.a_teg / c.a_engine * 100.0;
    check(&mut adv, occupancy > 100.0, Advisory::TegOccupancy { percent: occupancy });

    let layout = TegLayout {
        occupancy,
        q_teg: src.heat_block * (occupancy / 100.0),
    };
    (layout, adv)
}

/// Output of one module [W] for a hot-to-cold gradient [K].
///
/// Tiers are checked in ascending order and the last matching tier wins, so
/// 121 K and above yields the top tier. Gradients strictly between 60 and 61 K
/// fall in the middle tier.
pub fn module_output_w(gradient: f64) -> f64 {
    let mut w = if gradient <= 60.0 { 0.901 } else { 3.299 };
    if gradient >= 121.0 {
        w = 6.299;
    }
    w
}

pub fn generate(c: &PlantConstants, layout: TegLayout, cold: f64) -> (TegState, Vec<Advisory>) {
    let mut adv = Vec::new();
    let hot = c.teg_hot;
    check(&mut adv, cold >= hot, Advisory::TegTemperaturesInconsistent { hot, cold });

    let gradient = hot - cold;
    let state = TegState {
        occupancy: layout.occupancy,
        q_teg: layout.q_teg,
        hot,
        cold,
        gradient,
        output_kw: module_output_w(gradient) * c.n_teg / 1000.0,
    };
    (state, adv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries() {
        assert_eq!(module_output_w(60.0), 0.901);
        assert_eq!(module_output_w(61.0), 3.299);
        assert_eq!(module_output_w(120.999), 3.299);
        assert_eq!(module_output_w(121.0), 6.299);
        assert_eq!(module_output_w(-5.0), 0.901);
    }

    #[test]
    fn gap_between_first_tiers() {
        assert_eq!(module_output_w(60.5), 3.299);
    }

    #[test]
    fn output_for_hundred_modules() {
        let c = PlantConstants::default();
        let layout = TegLayout {
            occupancy: 0.4468,
            q_teg: 1.0,
        };
        let (state, adv) = generate(&c, layout, 326.0);
        assert!(adv.is_empty());
        assert!((state.output_kw - 0.0901).abs() < 1e-12);
        assert!((state.gradient - (335.115 - 326.0)).abs() < 1e-9);
    }

    #[test]
    fn cold_side_above_hot_side() {
        let c = PlantConstants::default();
        let layout = TegLayout {
            occupancy: 1.0,
            q_teg: 1.0,
        };
        let (_, adv) = generate(&c, layout, 340.0);
        assert_eq!(
            adv,
            vec![Advisory::TegTemperaturesInconsistent {
                hot: c.teg_hot,
                cold: 340.0
            }]
        );
    }

    #[test]
    fn occupancy_over_engine_area() {
        let c = PlantConstants {
            n_teg: 30_000.0,
            ..PlantConstants::default()
        };
        let src = crate::source::HeatSources {
            load: 60.0,
            power: 1800.0,
            fo_consumption: 198.74,
            fo_baseline: 198.74,
            exh_in: 639.15,
            m_exh: 3.92,
            heat_block: 236.744,
            q_exh: 1050.0,
            t_avg_exh: 518.0,
            hp_pump: 315_000.0,
            cp_sw: 4.18,
        };
        let (layout, adv) = layout(&c, &src);
        assert!(layout.occupancy > 100.0);
        assert!(matches!(adv[..], [Advisory::TegOccupancy { .. }]));
        assert!(layout.q_teg > src.heat_block);
    }
}
