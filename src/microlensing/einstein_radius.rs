use crate::{
    constants::{MilliArcSec, SolarMass, EINSTEIN_RADIUS_FACTOR},
    lens_errors::LensError,
};

/// Angular Einstein radius of a lens–source configuration.
///
/// `1/parallax` is assumed to be a good distance estimator. A negative
/// source parallax is set to zero (source at infinity), the lens parallax is
/// used as given.
///
/// Arguments
/// -----------------
/// * `mass`: lens mass in solar masses.
/// * `lens_parallax`: lens parallax in mas.
/// * `source_parallax`: source parallax in mas.
///
/// Return
/// ----------
/// * `θE` in mas.
/// * [`LensError::InvalidLensMass`] for a negative or non-finite mass.
/// * [`LensError::SourceCloserThanLens`] when `lens_parallax < source_parallax` (after the
///   clamp), a physically inconsistent pair.
/// * [`LensError::DegenerateEinsteinRadius`] when a parallax is NaN.
pub fn einstein_radius(
    mass: SolarMass,
    lens_parallax: MilliArcSec,
    source_parallax: MilliArcSec,
) -> Result<MilliArcSec, LensError> {
    if !mass.is_finite() || mass < 0.0 {
        return Err(LensError::InvalidLensMass(mass));
    }

    let source_parallax = source_parallax.max(0.0);
    if lens_parallax < source_parallax {
        return Err(LensError::SourceCloserThanLens {
            lens_parallax,
            source_parallax,
        });
    }

    let theta_e = EINSTEIN_RADIUS_FACTOR * (mass * (lens_parallax - source_parallax)).sqrt();
    if !theta_e.is_finite() {
        return Err(LensError::DegenerateEinsteinRadius(theta_e));
    }
    Ok(theta_e)
}
