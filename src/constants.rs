//! # Constants and type definitions for lensfit
//!
//! This module centralizes the **unit conversion factors**, the **microlensing
//! constant** and the **type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Angle conversions (degrees ↔ milliarcseconds, degrees ↔ radians)
//! - Time conversions (Julian years ↔ Julian dates)
//! - Einstein radius prefactor for parallaxes in milliarcseconds
//! - Type aliases making the unit of every scalar explicit in signatures

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// Degrees → milliarcseconds
pub const DEG_TO_MAS: f64 = 3600.0 * 1000.0;

/// Milliarcseconds → degrees
pub const MAS_TO_DEG: f64 = 1.0 / DEG_TO_MAS;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Julian date of the J2000.0 epoch
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian year expressed as the J2000.0 epoch
pub const J2000_JYEAR: f64 = 2000.0;

/// Number of days in a Julian year
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

// -------------------------------------------------------------------------------------------------
// Microlensing
// -------------------------------------------------------------------------------------------------

/// Prefactor of the angular Einstein radius, in mas, when the lens mass is
/// given in solar masses and both parallaxes in milliarcseconds:
/// `θE = 2.854 · sqrt(M · (ϖ_lens − ϖ_source))`.
pub const EINSTEIN_RADIUS_FACTOR: f64 = 2.854;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in milliarcseconds
pub type MilliArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Proper motion in milliarcseconds per year
pub type MasPerYear = f64;
/// Epoch expressed as a Julian year (e.g. `2015.5`)
pub type JulianYear = f64;
/// Julian date (days)
pub type JulianDate = f64;
/// Mass in solar masses
pub type SolarMass = f64;

/// Gaia source identifier (used for both sources and lenses)
pub type SourceId = u64;
