//! Unit conversions at the input boundary.
//!
//! Operating inputs arrive in bar and plant constants in Celsius; the cycle
//! works in Pa and K throughout.

use uom::si::f64::{Pressure, ThermodynamicTemperature};
use uom::si::pressure::{bar as bar_unit, pascal};
use uom::si::thermodynamic_temperature::{degree_celsius, kelvin};

#[inline]
pub fn bar(v: f64) -> Pressure {
    Pressure::new::<bar_unit>(v)
}

#[inline]
pub fn celsius(v: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<degree_celsius>(v)
}

#[inline]
pub fn to_pa(p: Pressure) -> f64 {
    p.get::<pascal>()
}

#[inline]
pub fn to_k(t: ThermodynamicTemperature) -> f64 {
    t.get::<kelvin>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_to_pascal() {
        assert!((to_pa(bar(3.15)) - 315_000.0).abs() < 1e-6);
        assert!((to_pa(bar(0.2)) - 20_000.0).abs() < 1e-9);
    }

    #[test]
    fn celsius_to_kelvin() {
        assert!((to_k(celsius(55.0)) - 328.15).abs() < 1e-9);
        assert!((to_k(celsius(15.13)) - 288.28).abs() < 1e-9);
    }
}
