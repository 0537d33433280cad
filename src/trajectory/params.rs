//! # Trajectory synthesis parameters
//!
//! [`TrajectoryParams`](crate::trajectory::params::TrajectoryParams) gathers the
//! tunable behavior of the [`TrajectorySynthesizer`](crate::trajectory::TrajectorySynthesizer):
//!
//! - which deflection component shifts the declination of the lensed position
//!   ([`DeclinationShift`](crate::trajectory::params::DeclinationShift)),
//! - whether the epoch loop runs on the `rayon` thread pool, and from how many epochs on.
//!
//! ## Example
//!
//! ```rust
//! use lensfit::trajectory::params::{DeclinationShift, TrajectoryParams};
//!
//! let params = TrajectoryParams::builder()
//!     .declination_shift(DeclinationShift::FromDecComponent)
//!     .parallel(true)
//!     .parallel_threshold(512)
//!     .build()
//!     .unwrap();
//! assert!(params.parallel);
//! ```

use std::fmt;

use crate::lens_errors::LensError;

/// Deflection component added to the source declination.
///
/// Published predictions were computed by adding the RA component (`δ·cos θ`)
/// of the deflection vector to the declination instead of the declination
/// component (`δ·sin θ`). That behavior stays the default so that results
/// remain comparable with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeclinationShift {
    /// `lensed_dec = dec + δ·cos θ`
    #[default]
    FromRaComponent,
    /// `lensed_dec = dec + δ·sin θ`
    FromDecComponent,
}

impl fmt::Display for DeclinationShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclinationShift::FromRaComponent => write!(f, "ra-component"),
            DeclinationShift::FromDecComponent => write!(f, "dec-component"),
        }
    }
}

/// Configuration of the trajectory synthesis.
///
/// Fields
/// -----------------
/// * `declination_shift` – deflection component applied to the declination.
/// * `parallel` – run the per-epoch computation on the `rayon` thread pool.
/// * `parallel_threshold` – minimum number of epochs before the parallel path is taken;
///   shorter schedules always run sequentially.
///
/// Defaults
/// -----------------
/// * `declination_shift`: [`DeclinationShift::FromRaComponent`]
/// * `parallel`: false
/// * `parallel_threshold`: 256
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryParams {
    pub declination_shift: DeclinationShift,
    pub parallel: bool,
    pub parallel_threshold: usize,
}

impl TrajectoryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`TrajectoryParamsBuilder`] initialized with the defaults.
    pub fn builder() -> TrajectoryParamsBuilder {
        TrajectoryParamsBuilder::new()
    }

    /// Whether a schedule of `n_epochs` epochs is processed in parallel.
    pub fn runs_parallel(&self, n_epochs: usize) -> bool {
        self.parallel && n_epochs >= self.parallel_threshold
    }
}

impl Default for TrajectoryParams {
    fn default() -> Self {
        TrajectoryParams {
            declination_shift: DeclinationShift::default(),
            parallel: false,
            parallel_threshold: 256,
        }
    }
}

/// Builder for [`TrajectoryParams`], with validation.
#[derive(Debug, Clone, Default)]
pub struct TrajectoryParamsBuilder {
    params: TrajectoryParams,
}

impl TrajectoryParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: TrajectoryParams::default(),
        }
    }

    pub fn declination_shift(mut self, v: DeclinationShift) -> Self {
        self.params.declination_shift = v;
        self
    }
    pub fn parallel(mut self, v: bool) -> Self {
        self.params.parallel = v;
        self
    }
    pub fn parallel_threshold(mut self, v: usize) -> Self {
        self.params.parallel_threshold = v;
        self
    }

    /// Finalize the builder.
    ///
    /// Validation rules
    /// -----------------
    /// * `parallel_threshold ≥ 1`.
    ///
    /// Returns
    /// -----------------
    /// * `Ok(TrajectoryParams)` or [`LensError::InvalidTrajectoryParameter`].
    pub fn build(self) -> Result<TrajectoryParams, LensError> {
        if self.params.parallel_threshold == 0 {
            return Err(LensError::InvalidTrajectoryParameter(
                "parallel_threshold must be >= 1".into(),
            ));
        }
        Ok(self.params)
    }
}

impl fmt::Display for TrajectoryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Trajectory Synthesis Parameters")?;
            writeln!(f, "-------------------------------")?;
            writeln!(
                f,
                "  declination_shift  = {:<16}# Deflection component added to dec",
                self.declination_shift.to_string()
            )?;
            writeln!(
                f,
                "  parallel           = {:<16}# Rayon epoch loop",
                self.parallel
            )?;
            write!(
                f,
                "  parallel_threshold = {:<16}# Min epochs for the parallel path",
                self.parallel_threshold
            )
        } else {
            write!(
                f,
                "TrajectoryParams(declination_shift={}, parallel={}, parallel_threshold={})",
                self.declination_shift, self.parallel, self.parallel_threshold
            )
        }
    }
}
