//! # Angular separation and position angle
//!
//! Small-field (tangent-plane) approximation around the mean declination of
//! the two points:
//!
//! ```text
//! δ̄   = (δ1 + δ2) / 2
//! Δδ  = (δ2 − δ1)            [mas]
//! Δα* = (α2 − α1) · |cos δ̄|  [mas]
//! ```
//!
//! The separation is `hypot(Δδ, Δα*)` and the angle `atan2(Δδ, Δα*)`, measured
//! from east towards north, pointing from point 1 to point 2. Close to the
//! poles `cos δ̄ → 0` and the RA difference is lost; this is not corrected.

use crate::{
    astrometry::SkyPosition,
    constants::{Degree, MilliArcSec, Radian, DEG_TO_MAS, RADEG},
};

/// Tangent-plane offsets (Δα*, Δδ) in mas from point 1 to point 2.
fn offsets_mas(ra_1: Degree, dec_1: Degree, ra_2: Degree, dec_2: Degree) -> (f64, f64) {
    let dec_avg = 0.5 * (dec_1 + dec_2);

    let delta_dec = (dec_2 - dec_1) * DEG_TO_MAS;
    let delta_ra = (ra_2 - ra_1) * DEG_TO_MAS * (dec_avg * RADEG).cos().abs();
    (delta_ra, delta_dec)
}

/// Angular separation between two objects on the sky, in mas.
pub fn separation(ra_1: Degree, dec_1: Degree, ra_2: Degree, dec_2: Degree) -> MilliArcSec {
    let (delta_ra, delta_dec) = offsets_mas(ra_1, dec_1, ra_2, dec_2);
    delta_dec.hypot(delta_ra)
}

/// Angle north of east from object 1 to object 2, in radians within `(-π, π]`.
///
/// For microlensing, object 1 is the lens and object 2 the source, so that
/// the angle gives the direction of the deflection (away from the lens).
pub fn position_angle(ra_1: Degree, dec_1: Degree, ra_2: Degree, dec_2: Degree) -> Radian {
    let (delta_ra, delta_dec) = offsets_mas(ra_1, dec_1, ra_2, dec_2);
    delta_dec.atan2(delta_ra)
}

/// Lens–source configuration at one epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensSourceGeometry {
    /// Angular separation, mas
    pub separation: MilliArcSec,
    /// Direction from the lens towards the source, north of east, radians
    pub position_angle: Radian,
}

impl LensSourceGeometry {
    /// Geometry of `source` relative to `lens`.
    pub fn between(lens: &SkyPosition, source: &SkyPosition) -> Self {
        LensSourceGeometry {
            separation: separation(lens.ra, lens.dec, source.ra, source.dec),
            position_angle: position_angle(lens.ra, lens.dec, source.ra, source.dec),
        }
    }
}
