use crate::{
    constants::{Degree, MilliArcSec, Radian, MAS_TO_DEG},
    lens_errors::LensError,
};

/// Tangent-plane deflection of the source, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeflectionVector {
    /// Offset along right ascension, already multiplied by `cos(dec)`
    pub ra_cos_dec: Degree,
    /// Offset along declination
    pub dec: Degree,
}

/// Check that an Einstein radius can be used as a length scale.
///
/// Return
/// ----------
/// * `Ok(())` for a finite, strictly positive `θE`, [`LensError::DegenerateEinsteinRadius`] otherwise.
pub fn validate_einstein_radius(einstein_radius: MilliArcSec) -> Result<(), LensError> {
    if einstein_radius.is_finite() && einstein_radius > 0.0 {
        Ok(())
    } else {
        Err(LensError::DegenerateEinsteinRadius(einstein_radius))
    }
}

/// Magnitude of the astrometric microlensing deflection in the partially
/// resolved regime.
///
/// ```text
/// u = separation / θE
/// δ = ½ · (sqrt(u² + 4) − u) · θE
/// ```
///
/// `δ` decreases monotonically with `u`, equals `θE` at `u = 0` and tends to
/// `θE / u = θE² / separation` far from the lens.
///
/// Arguments
/// -----------------
/// * `separation`: lens–source angular separation in mas.
/// * `einstein_radius`: Einstein radius of the lens–source system in mas.
///
/// Return
/// ----------
/// * The deflection magnitude in mas, or [`LensError::DegenerateEinsteinRadius`] when `θE` is
///   zero, negative or not finite.
pub fn deflection_magnitude(
    separation: MilliArcSec,
    einstein_radius: MilliArcSec,
) -> Result<MilliArcSec, LensError> {
    validate_einstein_radius(einstein_radius)?;

    let u = separation / einstein_radius;
    Ok(0.5 * ((u * u + 4.0).sqrt() - u) * einstein_radius)
}

/// Split a deflection magnitude along a position angle (north of east).
///
/// Return
/// ----------
/// * `(δ·cos(angle), δ·sin(angle))` converted from mas to degrees.
pub fn deflection_vector(magnitude: MilliArcSec, angle: Radian) -> DeflectionVector {
    let (sin, cos) = angle.sin_cos();
    DeflectionVector {
        ra_cos_dec: magnitude * cos * MAS_TO_DEG,
        dec: magnitude * sin * MAS_TO_DEG,
    }
}
