// xf-core/src/units.rs

use uom::si::f64::Pressure as UomPressure;

// Public canonical unit types (SI, f64)
pub type Pressure = UomPressure;

/// Tension magnitude in megapascal.
#[inline]
pub fn mpa(v: f64) -> Pressure {
    use uom::si::pressure::megapascal;
    Pressure::new::<megapascal>(v)
}

#[inline]
pub fn to_mpa(p: Pressure) -> f64 {
    use uom::si::pressure::megapascal;
    p.get::<megapascal>()
}
