//! # Lensed trajectory synthesis
//!
//! This module drives the per-epoch computation that turns two catalog
//! solutions (source and lens), a lens mass and an observation schedule into
//! the unlensed and lensed trajectories of the source.
//!
//! ## Pipeline
//!
//! 1. **Einstein radius** – computed and validated once for the pair
//!    ([`einstein_radius`](crate::microlensing::einstein_radius::einstein_radius)).
//! 2. For every epoch, in the order of the schedule:
//!    - propagate source and lens with the Earth position at that epoch
//!      ([`propagate`](crate::astrometry::propagation::propagate)),
//!    - reference declination = mean of the two propagated declinations,
//!    - separation and position angle, lens first
//!      ([`LensSourceGeometry`](crate::astrometry::separation::LensSourceGeometry)),
//!    - deflection magnitude and tangent-plane vector
//!      ([`deflection`](crate::microlensing::deflection)),
//!    - lensed position: `ra + Δα*/cos(ref_dec)`, `dec + shift` with the shift chosen by
//!      [`DeclinationShift`](crate::trajectory::params::DeclinationShift).
//! 3. **Closest approach** – index of the smallest separation.
//!
//! Epochs are independent of each other: with
//! [`TrajectoryParams::parallel`](crate::trajectory::params::TrajectoryParams) the loop runs on
//! the `rayon` pool and rows are collected back in schedule order. A failure
//! aborts the whole synthesis and, on both paths, the error reported is the
//! one of the earliest failing epoch in schedule order.
//!
//! ## Example
//!
//! ```rust
//! use lensfit::astrometry::AstrometricSolution;
//! use lensfit::ephemeris::FixedEarthPosition;
//! use lensfit::trajectory::TrajectorySynthesizer;
//!
//! let source = AstrometricSolution::new(100.0, 10.0, 0.0, 0.0, 0.0, 2015.5);
//! let lens = AstrometricSolution::new(100.0, 10.000003, 0.0, 0.0, 5.0, 2015.5);
//!
//! let earth = FixedEarthPosition::default();
//! let synthesizer = TrajectorySynthesizer::new(&earth);
//! let result = synthesizer
//!     .synthesize(&source, &lens, 0.5, &[2015.0, 2015.5, 2016.0])
//!     .unwrap();
//!
//! assert_eq!(result.len(), 3);
//! ```

use itertools::Itertools;
use rayon::prelude::*;

use crate::{
    astrometry::{
        propagation::propagate, separation::LensSourceGeometry, AstrometricSolution, SkyPosition,
    },
    constants::{Degree, JulianYear, MilliArcSec, SolarMass, RADEG},
    ephemeris::EarthEphemeris,
    lens_errors::LensError,
    microlensing::{
        deflection::{deflection_magnitude, deflection_vector, validate_einstein_radius},
        einstein_radius::einstein_radius,
    },
};

use params::{DeclinationShift, TrajectoryParams};

pub mod display;
pub mod params;

/// Positions of the source at one epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryRow {
    /// Epoch, Julian year
    pub epoch: JulianYear,
    /// Source position without lensing, degrees
    pub unlensed: SkyPosition,
    /// Source position including the deflection, degrees
    pub lensed: SkyPosition,
    /// Lens–source separation, mas
    pub separation: MilliArcSec,
    /// Deflection magnitude, mas
    pub deflection: MilliArcSec,
}

/// Unlensed and lensed trajectories of a source over a schedule.
///
/// Rows are index-aligned with the input epochs.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryResult {
    rows: Vec<TrajectoryRow>,
    einstein_radius: MilliArcSec,
    closest_approach: Option<usize>,
}

impl TrajectoryResult {
    fn new(rows: Vec<TrajectoryRow>, einstein_radius: MilliArcSec) -> Self {
        let closest_approach = rows
            .iter()
            .position_min_by(|a, b| a.separation.total_cmp(&b.separation));
        TrajectoryResult {
            rows,
            einstein_radius,
            closest_approach,
        }
    }

    pub fn rows(&self) -> &[TrajectoryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Einstein radius of the pair, mas
    pub fn einstein_radius(&self) -> MilliArcSec {
        self.einstein_radius
    }

    /// Index of the smallest lens–source separation (first one on ties),
    /// `None` for an empty trajectory.
    pub fn closest_approach_index(&self) -> Option<usize> {
        self.closest_approach
    }

    /// Row of the smallest lens–source separation.
    pub fn closest_approach(&self) -> Option<&TrajectoryRow> {
        self.closest_approach.map(|i| &self.rows[i])
    }

    pub fn epochs(&self) -> Vec<JulianYear> {
        self.rows.iter().map(|r| r.epoch).collect()
    }

    pub fn unlensed_ra(&self) -> Vec<Degree> {
        self.rows.iter().map(|r| r.unlensed.ra).collect()
    }

    pub fn unlensed_dec(&self) -> Vec<Degree> {
        self.rows.iter().map(|r| r.unlensed.dec).collect()
    }

    pub fn lensed_ra(&self) -> Vec<Degree> {
        self.rows.iter().map(|r| r.lensed.ra).collect()
    }

    pub fn lensed_dec(&self) -> Vec<Degree> {
        self.rows.iter().map(|r| r.lensed.dec).collect()
    }

    pub fn separations(&self) -> Vec<MilliArcSec> {
        self.rows.iter().map(|r| r.separation).collect()
    }
}

/// Per-epoch lensed trajectory computation for one lens–source pair.
///
/// The Earth ephemeris is borrowed, the synthesizer holds no other state:
/// the same inputs always produce the same [`TrajectoryResult`].
#[derive(Debug, Clone)]
pub struct TrajectorySynthesizer<'a, E: ?Sized> {
    ephemeris: &'a E,
    params: TrajectoryParams,
}

impl<'a, E> TrajectorySynthesizer<'a, E>
where
    E: EarthEphemeris + Sync + ?Sized,
{
    /// Synthesizer with the default [`TrajectoryParams`].
    pub fn new(ephemeris: &'a E) -> Self {
        Self::with_params(ephemeris, TrajectoryParams::default())
    }

    pub fn with_params(ephemeris: &'a E, params: TrajectoryParams) -> Self {
        TrajectorySynthesizer { ephemeris, params }
    }

    pub fn params(&self) -> &TrajectoryParams {
        &self.params
    }

    /// Compute the unlensed and lensed trajectories of `source`.
    ///
    /// Arguments
    /// -----------------
    /// * `source`: astrometric solution of the background source.
    /// * `lens`: astrometric solution of the foreground lens.
    /// * `lens_mass`: lens mass in solar masses.
    /// * `epochs`: observation epochs in Julian years (UTC), processed in the given order.
    ///
    /// Return
    /// ----------
    /// * A [`TrajectoryResult`] with one row per epoch (empty for an empty schedule).
    /// * [`LensError::InvalidLensMass`], [`LensError::SourceCloserThanLens`] or
    ///   [`LensError::DegenerateEinsteinRadius`] if the pair has no usable Einstein radius,
    ///   checked before any epoch is processed.
    /// * Any ephemeris error, or [`LensError::NonFiniteDeflection`], aborts the whole computation.
    pub fn synthesize(
        &self,
        source: &AstrometricSolution,
        lens: &AstrometricSolution,
        lens_mass: SolarMass,
        epochs: &[JulianYear],
    ) -> Result<TrajectoryResult, LensError> {
        let theta_e = einstein_radius(lens_mass, lens.parallax, source.parallax)?;
        validate_einstein_radius(theta_e)?;

        log::info!(
            "Synthesizing {} epochs (θE = {:.4} mas, mass = {} Msun, {})",
            epochs.len(),
            theta_e,
            lens_mass,
            self.params
        );

        let rows = if self.params.runs_parallel(epochs.len()) {
            // collected per epoch first so the error reported is the earliest in schedule order
            epochs
                .par_iter()
                .map(|&epoch| self.synthesize_epoch(source, lens, theta_e, epoch))
                .collect::<Vec<_>>()
                .into_iter()
                .collect::<Result<Vec<_>, _>>()?
        } else {
            let mut rows = Vec::with_capacity(epochs.len());
            for &epoch in epochs {
                rows.push(self.synthesize_epoch(source, lens, theta_e, epoch)?);
            }
            rows
        };

        let result = TrajectoryResult::new(rows, theta_e);
        if let Some(closest) = result.closest_approach() {
            log::info!(
                "Closest approach at epoch {:.4}: separation {:.3} mas, deflection {:.4} mas",
                closest.epoch,
                closest.separation,
                closest.deflection
            );
        }
        Ok(result)
    }

    fn synthesize_epoch(
        &self,
        source: &AstrometricSolution,
        lens: &AstrometricSolution,
        theta_e: MilliArcSec,
        epoch: JulianYear,
    ) -> Result<TrajectoryRow, LensError> {
        let earth = self.ephemeris.earth_position(epoch)?;

        let source_pos = propagate(source, epoch, &earth);
        let lens_pos = propagate(lens, epoch, &earth);

        let ref_dec = 0.5 * (source_pos.dec + lens_pos.dec);

        let geometry = LensSourceGeometry::between(&lens_pos, &source_pos);
        let deflection = deflection_magnitude(geometry.separation, theta_e)?;
        let vector = deflection_vector(deflection, geometry.position_angle);

        let dec_shift = match self.params.declination_shift {
            DeclinationShift::FromRaComponent => vector.ra_cos_dec,
            DeclinationShift::FromDecComponent => vector.dec,
        };

        let lensed = SkyPosition::new(
            source_pos.ra + vector.ra_cos_dec / (ref_dec * RADEG).cos(),
            source_pos.dec + dec_shift,
        );

        if !lensed.is_finite() || !geometry.separation.is_finite() {
            return Err(LensError::NonFiniteDeflection { epoch });
        }

        log::trace!(
            "epoch {epoch:.5}: separation {:.4} mas, angle {:.4} rad, deflection {:.5} mas",
            geometry.separation,
            geometry.position_angle,
            deflection
        );

        Ok(TrajectoryRow {
            epoch,
            unlensed: source_pos,
            lensed,
            separation: geometry.separation,
            deflection,
        })
    }
}

/// Synthesize a trajectory with the default parameters.
///
/// Shorthand for `TrajectorySynthesizer::new(ephemeris).synthesize(...)`.
pub fn synthesize<E>(
    source: &AstrometricSolution,
    lens: &AstrometricSolution,
    lens_mass: SolarMass,
    epochs: &[JulianYear],
    ephemeris: &E,
) -> Result<TrajectoryResult, LensError>
where
    E: EarthEphemeris + Sync + ?Sized,
{
    TrajectorySynthesizer::new(ephemeris).synthesize(source, lens, lens_mass, epochs)
}
