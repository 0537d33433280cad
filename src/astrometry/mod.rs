//! # Stellar astrometry
//!
//! Catalog astrometric solutions and the two geometric primitives built on
//! them:
//!
//! - [`propagation`](crate::astrometry::propagation) advances a reference-epoch
//!   solution to an arbitrary epoch (linear proper motion + annual parallax),
//! - [`separation`](crate::astrometry::separation) measures the angular separation
//!   and the position angle between two sky positions.
//!
//! ## Units
//!
//! - Positions: **degrees** (ICRS).
//! - Proper motions: **mas/yr**, `pmra` already multiplied by `cos(dec)` (Gaia convention).
//! - Parallax: **mas**.
//! - Epochs: **Julian years**.

use serde::Deserialize;

use crate::constants::{Degree, JulianYear, MasPerYear, MilliArcSec, SourceId};

pub mod propagation;
pub mod separation;

/// Catalog astrometry of a star at its reference epoch.
///
/// Fields
/// -----------------
/// * `ra0`, `dec0` – reference position in degrees.
/// * `pmra` – proper motion in right ascension, `μα* = μα·cos(δ)`, in mas/yr.
/// * `pmdec` – proper motion in declination, in mas/yr.
/// * `parallax` – parallax in mas; noisy catalog values can be negative and are clamped
///   to zero wherever a distance proxy is needed (see [`AstrometricSolution::clamped_parallax`]).
/// * `ref_epoch` – reference epoch of the solution, in Julian years.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AstrometricSolution {
    pub ra0: Degree,
    pub dec0: Degree,
    pub pmra: MasPerYear,
    pub pmdec: MasPerYear,
    pub parallax: MilliArcSec,
    pub ref_epoch: JulianYear,
}

impl AstrometricSolution {
    pub fn new(
        ra0: Degree,
        dec0: Degree,
        pmra: MasPerYear,
        pmdec: MasPerYear,
        parallax: MilliArcSec,
        ref_epoch: JulianYear,
    ) -> Self {
        AstrometricSolution {
            ra0,
            dec0,
            pmra,
            pmdec,
            parallax,
            ref_epoch,
        }
    }

    /// Parallax with negative values replaced by zero.
    pub fn clamped_parallax(&self) -> MilliArcSec {
        self.parallax.max(0.0)
    }

    /// Reference position of the solution.
    pub fn reference_position(&self) -> SkyPosition {
        SkyPosition::new(self.ra0, self.dec0)
    }
}

/// A (ra, dec) pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyPosition {
    pub ra: Degree,
    pub dec: Degree,
}

impl SkyPosition {
    pub fn new(ra: Degree, dec: Degree) -> Self {
        SkyPosition { ra, dec }
    }

    pub fn is_finite(&self) -> bool {
        self.ra.is_finite() && self.dec.is_finite()
    }
}

/// One row of a Gaia archive export (`gaia_source` table).
///
/// Two-parameter solutions leave the proper motion and parallax columns
/// empty, hence the `Option`s.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub(crate) struct GaiaSourceRecord {
    pub source_id: SourceId,
    pub ra: Degree,
    pub dec: Degree,
    pub pmra: Option<MasPerYear>,
    pub pmdec: Option<MasPerYear>,
    pub parallax: Option<MilliArcSec>,
    pub ref_epoch: JulianYear,
}

impl GaiaSourceRecord {
    pub fn is_two_parameter(&self) -> bool {
        self.pmra.is_none() || self.pmdec.is_none() || self.parallax.is_none()
    }
}

impl From<&GaiaSourceRecord> for AstrometricSolution {
    fn from(record: &GaiaSourceRecord) -> Self {
        AstrometricSolution::new(
            record.ra,
            record.dec,
            record.pmra.unwrap_or(0.0),
            record.pmdec.unwrap_or(0.0),
            record.parallax.unwrap_or(0.0),
            record.ref_epoch,
        )
    }
}
