use thiserror::Error;

use crate::constants::{JulianDate, JulianYear, SourceId};

#[derive(Error, Debug)]
pub enum LensError {
    #[error(
        "Source closer than the lens: lens parallax={lens_parallax} mas < source parallax={source_parallax} mas"
    )]
    SourceCloserThanLens {
        lens_parallax: f64,
        source_parallax: f64,
    },

    #[error("Lens mass must be finite and non-negative, got {0} Msun")]
    InvalidLensMass(f64),

    #[error("Einstein radius must be finite and strictly positive, got {0} mas")]
    DegenerateEinsteinRadius(f64),

    #[error("Lensed position is not finite at epoch {epoch}")]
    NonFiniteDeflection { epoch: JulianYear },

    #[error("No astrometric solution found for source: {0}")]
    SolutionNotFound(SourceId),

    #[error("No lens mass estimate found for lens: {0}")]
    LensMassNotFound(SourceId),

    #[error("Observation schedule for source {0} not found")]
    ScheduleNotFound(SourceId),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Error during the Horizons vector table parsing: {0}")]
    HorizonParseError(String),

    #[error("Epoch JD {epoch} outside of the ephemeris range [{start}, {end}]")]
    EphemerisOutOfRange {
        epoch: JulianDate,
        start: JulianDate,
        end: JulianDate,
    },

    #[error("Columns of different lengths: expected {expected} values, got {got}")]
    ColumnLengthMismatch { expected: usize, got: usize },

    #[error("Invalid trajectory parameter: {0}")]
    InvalidTrajectoryParameter(String),

    #[error("Deflection prediction failed for source {source_id} / lens {lens_id}: {source}")]
    EventFailed {
        source_id: SourceId,
        lens_id: SourceId,
        #[source]
        source: Box<LensError>,
    },
}

impl PartialEq for LensError {
    fn eq(&self, other: &Self) -> bool {
        use LensError::*;
        match (self, other) {
            (
                SourceCloserThanLens {
                    lens_parallax: l1,
                    source_parallax: s1,
                },
                SourceCloserThanLens {
                    lens_parallax: l2,
                    source_parallax: s2,
                },
            ) => l1 == l2 && s1 == s2,
            (InvalidLensMass(a), InvalidLensMass(b)) => a == b || (a.is_nan() && b.is_nan()),
            (DegenerateEinsteinRadius(a), DegenerateEinsteinRadius(b)) => {
                a == b || (a.is_nan() && b.is_nan())
            }
            (NonFiniteDeflection { epoch: a }, NonFiniteDeflection { epoch: b }) => a == b,
            (SolutionNotFound(a), SolutionNotFound(b)) => a == b,
            (LensMassNotFound(a), LensMassNotFound(b)) => a == b,
            (ScheduleNotFound(a), ScheduleNotFound(b)) => a == b,

            // Not comparable: equal when same variant
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,

            (InvalidDate(a), InvalidDate(b)) => a == b,
            (HorizonParseError(a), HorizonParseError(b)) => a == b,
            (
                EphemerisOutOfRange {
                    epoch: e1,
                    start: s1,
                    end: t1,
                },
                EphemerisOutOfRange {
                    epoch: e2,
                    start: s2,
                    end: t2,
                },
            ) => e1 == e2 && s1 == s2 && t1 == t2,
            (
                ColumnLengthMismatch {
                    expected: e1,
                    got: g1,
                },
                ColumnLengthMismatch {
                    expected: e2,
                    got: g2,
                },
            ) => e1 == e2 && g1 == g2,
            (InvalidTrajectoryParameter(a), InvalidTrajectoryParameter(b)) => a == b,
            (
                EventFailed {
                    source_id: s1,
                    lens_id: l1,
                    source: e1,
                },
                EventFailed {
                    source_id: s2,
                    lens_id: l2,
                    source: e2,
                },
            ) => s1 == s2 && l1 == l2 && e1 == e2,

            _ => false,
        }
    }
}
