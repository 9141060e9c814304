//! Seawater routing.
//!
//! One seawater stream cools, in series, the ORC condenser, the RC condenser,
//! the desalination condenser and the TEG cold plates. Each pass loses
//! `exchanger_dp`. The desalination pass vaporizes the distillate; the
//! remaining brine cools the TEGs.

use crate::constants::PlantConstants;
use crate::desalination::DesalinationState;
use crate::error::{CycleError, CycleResult};
use crate::orc::OrcState;
use crate::props::{Fluid, PropertySource};
use crate::rankine::RankineState;
use crate::source::HeatSources;
use serde::Serialize;
use whrs_fluids::{PropKey, WATER};

/// Temperature, pressure, enthalpy and entropy of the stream at one point.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SeawaterPoint {
    pub t: f64,
    pub p: f64,
    pub h: f64,
    pub s: f64,
}

impl SeawaterPoint {
    fn at<P: PropertySource + ?Sized>(water: &mut Fluid<'_, P>, t: f64, p: f64) -> CycleResult<Self> {
        Ok(Self {
            t,
            p,
            h: water.h_pt(p, t)?,
            s: water.s_pt(p, t)?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeawaterState {
    pub inlet: SeawaterPoint,
    pub orc_out: SeawaterPoint,
    /// RC condenser inlet, equal to the ORC condenser outlet
    pub rc_in: SeawaterPoint,
    pub rc_out: SeawaterPoint,
    pub des_in: SeawaterPoint,
    /// Brine leaving desalination at its inlet temperature
    pub des_out: SeawaterPoint,
    /// Saturated liquid and vapor enthalpy in the chamber [kJ/kg]
    pub h_chamber_f: f64,
    pub h_chamber_g: f64,
    /// Distillate mass flow [kg/s]
    pub m_distillate: f64,
    /// Fresh water production [m³/day]
    pub daily_distillate: f64,
    /// Brine mass flow cooling the TEGs [kg/s]
    pub m_brine: f64,
    pub t_teg_out: f64,
    pub p_teg_out: f64,
    /// Seawater side RC condenser irreversibility
    pub i_cond_sw_rc: f64,
    /// Seawater side ORC condenser irreversibility
    pub i_cond_sw_orc: f64,
    /// Seawater side desalination irreversibility
    pub i_des_sw: f64,
}

impl SeawaterState {
    /// Cold side temperature of the TEGs.
    pub fn teg_cold(&self) -> f64 {
        self.des_out.t
    }
}

/// Route the seawater through the condensers and the desalination unit.
///
/// `q_teg` is the heat rejected to the brine by the TEG cold plates.
///
/// # Errors
/// `PhysicalInconsistency` when the stream leaves the plant too hot or below
/// the minimum pressure.
pub fn route<P: PropertySource + ?Sized>(
    c: &PlantConstants,
    src: &HeatSources,
    des: &DesalinationState,
    rc: &RankineState,
    orc: &OrcState,
    q_teg: f64,
    props: &mut P,
) -> CycleResult<SeawaterState> {
    let mut water = Fluid::new(props, WATER);
    let capacity = c.m_sw * src.cp_sw;
    let dp = c.exchanger_dp;
    let t_env = c.t_env;

    let inlet = SeawaterPoint::at(&mut water, c.t_sw_in, c.p_sw_in)?;
    let orc_out = SeawaterPoint::at(&mut water, inlet.t + orc.q_cond / capacity, inlet.p - dp)?;
    let rc_in = SeawaterPoint::at(&mut water, orc_out.t, orc_out.p)?;
    let rc_out = SeawaterPoint::at(&mut water, rc_in.t + rc.q_cond_jw / capacity, rc_in.p - dp)?;
    let des_in = SeawaterPoint::at(&mut water, rc_out.t, rc_out.p)?;
    let des_out = SeawaterPoint::at(&mut water, des_in.t, des_in.p - dp)?;

    let h_chamber_f = water.sat_p(PropKey::H, des.p_chamber, 0.0)?;
    let h_chamber_g = water.sat_p(PropKey::H, des.p_chamber, 1.0)?;
    let m_distillate = des.q_sw_des
        / (src.cp_sw * (des.t_des - des_in.t)
            + (h_chamber_g - h_chamber_f)
            + src.cp_sw * (des.t_distillate - des.t_des));
    let m_brine = c.m_sw - m_distillate;

    let t_teg_out = des_out.t + q_teg / (m_brine * src.cp_sw);
    let p_teg_out = des_out.p - dp;
    check_outlet(c, t_teg_out, p_teg_out)?;

    Ok(SeawaterState {
        inlet,
        orc_out,
        rc_in,
        rc_out,
        des_in,
        des_out,
        h_chamber_f,
        h_chamber_g,
        m_distillate,
        daily_distillate: m_distillate * 3600.0 * 24.0 / c.sw_density,
        m_brine,
        t_teg_out,
        p_teg_out,
        i_cond_sw_rc: c.m_sw * (rc_out.h - rc_in.h - t_env * (rc_out.s - rc_in.s)),
        i_cond_sw_orc: c.m_sw * (inlet.h - orc_out.h - t_env * (inlet.s - orc_out.s)),
        i_des_sw: c.m_sw * (des_in.h - des_out.h - t_env * (des_in.s - des_out.s)),
    })
}

/// Bounds on the seawater returned overboard.
pub fn check_outlet(c: &PlantConstants, t: f64, p: f64) -> CycleResult<()> {
    if t >= c.t_sw_out_max {
        return Err(CycleError::PhysicalInconsistency {
            what: "seawater leaves the plant above the temperature limit",
            value: t,
            limit: c.t_sw_out_max,
        });
    }
    if p <= c.p_sw_out_min {
        return Err(CycleError::PhysicalInconsistency {
            what: "seawater leaves the plant below the pressure limit",
            value: p,
            limit: c.p_sw_out_min,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outlet_limits() {
        let c = PlantConstants::default();
        assert!(check_outlet(&c, 326.0, 200_000.0).is_ok());
        assert!(matches!(
            check_outlet(&c, 333.15, 200_000.0),
            Err(CycleError::PhysicalInconsistency { limit, .. }) if limit == 333.15
        ));
        assert!(matches!(
            check_outlet(&c, 326.0, 100_000.0),
            Err(CycleError::PhysicalInconsistency { limit, .. }) if limit == 100_000.0
        ));
        assert!(check_outlet(&c, 326.0, 100_000.1).is_ok());
    }
}
