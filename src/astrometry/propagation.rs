//! # Epoch propagation of catalog positions
//!
//! Apparent position of a star, as seen from the Earth, at an arbitrary epoch:
//!
//! ```text
//! Δt     = t − t_ref                                           [yr]
//! Δα*_pm = Δt · μα* / cos δ0                                   [mas]
//! Δδ_pm  = Δt · μδ                                             [mas]
//! Δα_plx = ϖ · (sin α0 · X − cos α0 · Y) / cos δ0              [mas]
//! Δδ_plx = ϖ · (X cos α0 sin δ0 + Y sin α0 sin δ0 − Z cos δ0)  [mas]
//! ```
//!
//! with `(X, Y, Z)` the barycentric position of the Earth in AU (Urban &
//! Seidelmann 2013, §7.2.2.3). The offsets are added to `(α0, δ0)` after a
//! mas → degree conversion. No relativistic or orbital term is included.

use nalgebra::Vector3;

use crate::{
    astrometry::{AstrometricSolution, SkyPosition},
    constants::{JulianYear, MAS_TO_DEG, RADEG},
    ephemeris::EarthEphemeris,
    lens_errors::LensError,
};

/// Position of a star at `epoch` given the Earth barycentric position at that epoch.
///
/// Negative parallaxes are clamped to zero, for lenses and sources alike.
///
/// Arguments
/// -----------------
/// * `solution`: reference-epoch astrometry of the star.
/// * `epoch`: target epoch in Julian years.
/// * `earth_position`: barycentric position of the Earth at `epoch`, in AU (ICRS axes).
///
/// Return
/// ----------
/// * The apparent [`SkyPosition`] in degrees. At `epoch == ref_epoch` with a zero
///   (or clamped) parallax this is exactly `(ra0, dec0)`.
pub fn propagate(
    solution: &AstrometricSolution,
    epoch: JulianYear,
    earth_position: &Vector3<f64>,
) -> SkyPosition {
    let parallax = solution.clamped_parallax();

    let (sin_ra0, cos_ra0) = (solution.ra0 * RADEG).sin_cos();
    let (sin_dec0, cos_dec0) = (solution.dec0 * RADEG).sin_cos();

    let (x, y, z) = (earth_position.x, earth_position.y, earth_position.z);

    let dt = epoch - solution.ref_epoch;
    let d_ra_pm = dt * solution.pmra / cos_dec0;
    let d_dec_pm = dt * solution.pmdec;

    let d_ra_plx = parallax * (sin_ra0 * x - cos_ra0 * y) / cos_dec0;
    let d_dec_plx = parallax * (x * cos_ra0 * sin_dec0 + y * sin_ra0 * sin_dec0 - z * cos_dec0);

    SkyPosition::new(
        solution.ra0 + (d_ra_pm + d_ra_plx) * MAS_TO_DEG,
        solution.dec0 + (d_dec_pm + d_dec_plx) * MAS_TO_DEG,
    )
}

/// Same as [`propagate`], looking the Earth position up in `ephemeris`.
///
/// Return
/// ----------
/// * The propagated position, or the error raised by the ephemeris lookup.
pub fn propagate_with<E>(
    solution: &AstrometricSolution,
    epoch: JulianYear,
    ephemeris: &E,
) -> Result<SkyPosition, LensError>
where
    E: EarthEphemeris + ?Sized,
{
    let earth = ephemeris.earth_position(epoch)?;
    Ok(propagate(solution, epoch, &earth))
}
