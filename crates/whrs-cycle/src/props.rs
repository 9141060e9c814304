//! Property access for the cycle stages.

use crate::error::CycleResult;
use whrs_fluids::{FluidResult, PropKey, PropertyCache, PropertyEngine, PropertyQuery};

/// Anything that resolves property queries.
///
/// Implemented by [`PropertyCache`]; tests can substitute a fixed table.
pub trait PropertySource {
    fn lookup(&mut self, query: &PropertyQuery) -> FluidResult<f64>;
}

impl<E: PropertyEngine> PropertySource for PropertyCache<E> {
    fn lookup(&mut self, query: &PropertyQuery) -> FluidResult<f64> {
        PropertyCache::lookup(self, query)
    }
}

/// Property lookups against one fluid.
///
/// Enthalpies and entropies come back in kJ/kg and kJ/(kg·K); temperatures,
/// pressures and densities stay in SI.
pub(crate) struct Fluid<'a, P: ?Sized> {
    props: &'a mut P,
    code: &'a str,
}

impl<'a, P: PropertySource + ?Sized> Fluid<'a, P> {
    pub(crate) fn new(props: &'a mut P, code: &'a str) -> Self {
        Self { props, code }
    }

    fn si(&mut self, out: PropKey, in1: PropKey, v1: f64, in2: PropKey, v2: f64) -> CycleResult<f64> {
        let q = PropertyQuery::state(out, in1, v1, in2, v2, self.code);
        Ok(self.props.lookup(&q)?)
    }

    /// Single-phase property at (T, P).
    pub(crate) fn at_tp(&mut self, out: PropKey, t: f64, p: f64) -> CycleResult<f64> {
        self.si(out, PropKey::T, t, PropKey::P, p)
    }

    pub(crate) fn h_tp(&mut self, t: f64, p: f64) -> CycleResult<f64> {
        Ok(self.at_tp(PropKey::H, t, p)? / 1000.0)
    }

    pub(crate) fn s_tp(&mut self, t: f64, p: f64) -> CycleResult<f64> {
        Ok(self.at_tp(PropKey::S, t, p)? / 1000.0)
    }

    /// Seawater states are queried pressure first.
    pub(crate) fn h_pt(&mut self, p: f64, t: f64) -> CycleResult<f64> {
        Ok(self.si(PropKey::H, PropKey::P, p, PropKey::T, t)? / 1000.0)
    }

    pub(crate) fn s_pt(&mut self, p: f64, t: f64) -> CycleResult<f64> {
        Ok(self.si(PropKey::S, PropKey::P, p, PropKey::T, t)? / 1000.0)
    }

    /// Temperature at (P, h) with `h` in kJ/kg.
    pub(crate) fn t_ph(&mut self, p: f64, h: f64) -> CycleResult<f64> {
        self.si(PropKey::T, PropKey::P, p, PropKey::H, h * 1000.0)
    }

    pub(crate) fn s_ph(&mut self, p: f64, h: f64) -> CycleResult<f64> {
        Ok(self.si(PropKey::S, PropKey::P, p, PropKey::H, h * 1000.0)? / 1000.0)
    }

    /// Saturation property at pressure `p` and quality `q`.
    pub(crate) fn sat_p(&mut self, out: PropKey, p: f64, q: f64) -> CycleResult<f64> {
        let v = self.si(out, PropKey::P, p, PropKey::Q, q)?;
        Ok(match out {
            PropKey::H | PropKey::S | PropKey::Cpmass => v / 1000.0,
            _ => v,
        })
    }

    /// Saturation property at temperature `t` and quality `q`.
    pub(crate) fn sat_t(&mut self, out: PropKey, t: f64, q: f64) -> CycleResult<f64> {
        let v = self.si(out, PropKey::T, t, PropKey::Q, q)?;
        Ok(match out {
            PropKey::H | PropKey::S | PropKey::Cpmass => v / 1000.0,
            _ => v,
        })
    }

    /// Saturation temperature at `p`, quality given first.
    pub(crate) fn t_sat_qp(&mut self, q: f64, p: f64) -> CycleResult<f64> {
        self.si(PropKey::T, PropKey::Q, q, PropKey::P, p)
    }

    pub(crate) fn t_crit(&mut self) -> CycleResult<f64> {
        let q = PropertyQuery::trivial(PropKey::Tcrit, self.code);
        Ok(self.props.lookup(&q)?)
    }
}


#[cfg(test)]
mod tests {
    use super::stub::stub_cache;
    use super::*;

    #[test]
    fn fluid_helper_converts_to_kj() {
        let mut props = stub_cache();
        let mut water = Fluid::new(&mut props, "Water");
        let h = water.h_tp(373.15, 1e6).unwrap();
        assert!((h - 420.0).abs() < 1e-9);
        let hg = water.sat_p(PropKey::H, 50_000.0, 1.0).unwrap();
        assert!(hg > 2300.0);
        let t = water.t_ph(1e6, h).unwrap();
        assert!((t - 373.15).abs() < 1e-9);
        assert_eq!(props.engine().calls(), 3);
    }
}
