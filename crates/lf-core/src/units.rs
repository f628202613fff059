// lf-core/src/units.rs

use crate::Real;
use uom::si::f64::Pressure as UomPressure;
use uom::si::pressure::{inch_of_mercury, kilopascal};

/// 1 kPa expressed in inches of mercury.
pub const INHG_PER_KPA: Real = 0.295299830714;

/// Convert a vacuum magnitude from kilopascals to inches of mercury.
///
/// Non-finite input yields `None`; callers guard before display or payload
/// shaping.
#[inline]
pub fn kpa_to_inhg(kpa: Real) -> Option<Real> {
    if !kpa.is_finite() {
        return None;
    }
    Some(UomPressure::new::<kilopascal>(kpa).get::<inch_of_mercury>())
}

/// Inverse of [`kpa_to_inhg`].
#[inline]
pub fn inhg_to_kpa(inhg: Real) -> Option<Real> {
    if !inhg.is_finite() {
        return None;
    }
    Some(UomPressure::new::<inch_of_mercury>(inhg).get::<kilopascal>())
}

/// Round to 2 decimal places for display. Internal computation never
/// rounds prematurely.
#[inline]
pub fn round2(v: Real) -> Real {
    (v * 100.0).round() / 100.0
}
