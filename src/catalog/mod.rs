//! # Offline catalog collaborators
//!
//! The prediction of a lensing event needs three inputs besides the Earth
//! ephemeris, each keyed by a Gaia source identifier:
//!
//! | Capability | Trait | File-backed implementation |
//! |---|---|---|
//! | Astrometric solution of a star | [`AstrometricCatalog`] | [`GaiaCsvCatalog`](crate::catalog::gaia::GaiaCsvCatalog) |
//! | Mass estimate of a lens | [`LensMassCatalog`] | [`LensMassTable`](crate::catalog::lens_mass::LensMassTable) |
//! | Epochs at which Gaia observed a source | [`ObservationSchedule`] | [`GostScheduleDir`](crate::catalog::gost::GostScheduleDir) |
//!
//! Unknown identifiers are reported with a dedicated [`LensError`] variant,
//! never with a default value.

use crate::{
    astrometry::AstrometricSolution,
    constants::{JulianYear, SolarMass, SourceId},
    lens_errors::LensError,
};

pub mod gaia;
pub mod gost;
pub mod lens_mass;

/// Source of reference-epoch astrometric solutions.
pub trait AstrometricCatalog {
    /// Solution of `source_id`, or [`LensError::SolutionNotFound`].
    fn solution(&self, source_id: SourceId) -> Result<AstrometricSolution, LensError>;
}

/// Source of lens mass estimates.
pub trait LensMassCatalog {
    /// Mass of `lens_id` in solar masses, or [`LensError::LensMassNotFound`].
    fn lens_mass(&self, lens_id: SourceId) -> Result<SolarMass, LensError>;
}

/// Source of observation epochs.
pub trait ObservationSchedule {
    /// Observation epochs of `source_id` as UTC Julian years, in file order,
    /// or [`LensError::ScheduleNotFound`].
    fn epochs(&self, source_id: SourceId) -> Result<Vec<JulianYear>, LensError>;
}
