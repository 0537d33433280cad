//! # Microlensing event driver
//!
//! A [`MicrolensingEvent`] is a (source, lens) pair of Gaia identifiers.
//! [`MicrolensingEvent::predict`] resolves everything the
//! [`TrajectorySynthesizer`] needs through the catalog collaborators:
//!
//! 1. astrometric solutions of the source and of the lens,
//! 2. observation epochs of the source,
//! 3. mass estimate of the lens,
//!
//! then synthesizes the lensed trajectory. Any failure is wrapped in
//! [`LensError::EventFailed`] so that the caller knows which event broke.
//!
//! ## Example
//!
//! ```rust,no_run
//! use camino::Utf8Path;
//! use lensfit::catalog::{gaia::GaiaCsvCatalog, gost::GostScheduleDir, lens_mass::LensMassTable};
//! use lensfit::ephemeris::horizon_table::HorizonVectorTable;
//! use lensfit::event::MicrolensingEvent;
//! use lensfit::trajectory::params::TrajectoryParams;
//!
//! let gaia = GaiaCsvCatalog::from_file(Utf8Path::new("data/gaia.csv")).unwrap();
//! let masses = LensMassTable::from_file(Utf8Path::new("data/lens_masses.csv")).unwrap();
//! let gost = GostScheduleDir::new("data/GOST");
//! let earth = HorizonVectorTable::from_file(Utf8Path::new("data/earth.txt")).unwrap();
//!
//! let event = MicrolensingEvent::new(5853498713160606720, 5853498713160606721);
//! let result = event
//!     .predict(&gaia, &masses, &gost, &earth, &TrajectoryParams::default())
//!     .unwrap();
//! println!("{result:#}");
//! ```

use std::fmt;

use crate::{
    catalog::{AstrometricCatalog, LensMassCatalog, ObservationSchedule},
    constants::SourceId,
    ephemeris::EarthEphemeris,
    lens_errors::LensError,
    trajectory::{params::TrajectoryParams, TrajectoryResult, TrajectorySynthesizer},
};

/// A candidate lensing event: a background source and a foreground lens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MicrolensingEvent {
    pub source_id: SourceId,
    pub lens_id: SourceId,
}

impl MicrolensingEvent {
    pub fn new(source_id: SourceId, lens_id: SourceId) -> Self {
        MicrolensingEvent { source_id, lens_id }
    }

    /// Predict the unlensed and lensed trajectories of the source.
    ///
    /// Arguments
    /// -----------------
    /// * `catalog`: astrometric solutions of both stars.
    /// * `masses`: lens mass estimates.
    /// * `schedule`: observation epochs of the source.
    /// * `ephemeris`: Earth barycentric position provider.
    /// * `params`: synthesis configuration.
    ///
    /// Return
    /// ----------
    /// * The [`TrajectoryResult`] over the source schedule, or
    ///   [`LensError::EventFailed`] wrapping the first error met.
    pub fn predict<C, M, S, E>(
        &self,
        catalog: &C,
        masses: &M,
        schedule: &S,
        ephemeris: &E,
        params: &TrajectoryParams,
    ) -> Result<TrajectoryResult, LensError>
    where
        C: AstrometricCatalog + ?Sized,
        M: LensMassCatalog + ?Sized,
        S: ObservationSchedule + ?Sized,
        E: EarthEphemeris + Sync + ?Sized,
    {
        self.run(catalog, masses, schedule, ephemeris, params)
            .map_err(|err| {
                log::warn!("{self} failed: {err}");
                LensError::EventFailed {
                    source_id: self.source_id,
                    lens_id: self.lens_id,
                    source: Box::new(err),
                }
            })
    }

    fn run<C, M, S, E>(
        &self,
        catalog: &C,
        masses: &M,
        schedule: &S,
        ephemeris: &E,
        params: &TrajectoryParams,
    ) -> Result<TrajectoryResult, LensError>
    where
        C: AstrometricCatalog + ?Sized,
        M: LensMassCatalog + ?Sized,
        S: ObservationSchedule + ?Sized,
        E: EarthEphemeris + Sync + ?Sized,
    {
        log::info!("Predicting deflection for {self}");

        let source = catalog.solution(self.source_id)?;
        let lens = catalog.solution(self.lens_id)?;
        let epochs = schedule.epochs(self.source_id)?;
        let lens_mass = masses.lens_mass(self.lens_id)?;

        log::debug!(
            "{} epochs, lens mass {lens_mass} Msun, parallaxes {} / {} mas (lens / source)",
            epochs.len(),
            lens.parallax,
            source.parallax
        );

        TrajectorySynthesizer::with_params(ephemeris, params.clone())
            .synthesize(&source, &lens, lens_mass, &epochs)
    }
}

impl fmt::Display for MicrolensingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event(source={}, lens={})", self.source_id, self.lens_id)
    }
}
