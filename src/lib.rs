pub mod astrometry;
pub mod catalog;
pub mod constants;
pub mod ephemeris;
pub mod event;
pub mod lens_errors;
pub mod microlensing;
pub mod output;
pub mod time;
pub mod trajectory;

pub use astrometry::{AstrometricSolution, SkyPosition};
pub use event::MicrolensingEvent;
pub use lens_errors::LensError;
pub use trajectory::{synthesize, TrajectoryResult, TrajectoryRow, TrajectorySynthesizer};
