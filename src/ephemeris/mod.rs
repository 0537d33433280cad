//! # Earth ephemeris providers
//!
//! The parallactic displacement of a star needs the barycentric position of
//! the Earth at each epoch. This module defines the capability
//! ([`EarthEphemeris`](crate::ephemeris::EarthEphemeris)) and its providers:
//!
//! - any closure `Fn(JulianYear) -> Vector3<f64>` (handy in tests),
//! - [`FixedEarthPosition`](crate::ephemeris::FixedEarthPosition), a constant position,
//! - [`HorizonVectorTable`](crate::ephemeris::horizon_table::HorizonVectorTable), a tabulated
//!   JPL Horizons vector table interpolated in time.
//!
//! Positions are expressed in **AU**, ICRS axes, relative to the solar-system
//! barycenter. Epochs are **UTC Julian years**, the convention of the
//! observation schedules.

use nalgebra::Vector3;

use crate::{constants::JulianYear, lens_errors::LensError};

pub mod horizon_table;

/// Provider of the Earth barycentric position.
pub trait EarthEphemeris {
    /// Barycentric position of the Earth in AU at a UTC Julian year.
    fn earth_position(&self, epoch: JulianYear) -> Result<Vector3<f64>, LensError>;
}

impl<F> EarthEphemeris for F
where
    F: Fn(JulianYear) -> Vector3<f64>,
{
    fn earth_position(&self, epoch: JulianYear) -> Result<Vector3<f64>, LensError> {
        Ok(self(epoch))
    }
}

/// Constant Earth position, whatever the epoch.
///
/// `FixedEarthPosition::default()` puts the Earth at the barycenter, which
/// disables the parallactic term entirely.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedEarthPosition(pub Vector3<f64>);

impl EarthEphemeris for FixedEarthPosition {
    fn earth_position(&self, _epoch: JulianYear) -> Result<Vector3<f64>, LensError> {
        Ok(self.0)
    }
}
