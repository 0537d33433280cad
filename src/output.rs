//! # Trajectory persistence
//!
//! CSV writers for the products of a [`TrajectoryResult`] and the relative
//! offsets used to plot them.
//!
//! Files are headerless, comma-separated, one epoch per line:
//!
//! | File | Columns |
//! |---|---|
//! | `unlensed_positions.csv` | epoch \[Julian year\], ra \[deg\], dec \[deg\] |
//! | `lensed_positions.csv` | epoch \[Julian year\], ra \[deg\], dec \[deg\] |
//! | `separations.csv` | epoch \[Julian year\], separation \[mas\] |

use camino::Utf8Path;
use itertools::izip;

use crate::{
    constants::{Degree, JulianYear, MilliArcSec, DEG_TO_MAS},
    lens_errors::LensError,
    trajectory::TrajectoryResult,
};

pub const UNLENSED_POSITIONS_FILE: &str = "unlensed_positions.csv";
pub const LENSED_POSITIONS_FILE: &str = "lensed_positions.csv";
pub const SEPARATIONS_FILE: &str = "separations.csv";

fn check_lengths(expected: usize, others: &[usize]) -> Result<(), LensError> {
    match others.iter().find(|&&n| n != expected) {
        Some(&got) => Err(LensError::ColumnLengthMismatch { expected, got }),
        None => Ok(()),
    }
}

fn headerless_writer(path: &Utf8Path) -> Result<csv::Writer<std::fs::File>, LensError> {
    Ok(csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?)
}

/// Write `epoch,ra,dec` rows to `path`.
///
/// The three slices must have the same length.
pub fn write_positions(
    path: &Utf8Path,
    epochs: &[JulianYear],
    ra: &[Degree],
    dec: &[Degree],
) -> Result<(), LensError> {
    check_lengths(epochs.len(), &[ra.len(), dec.len()])?;

    let mut writer = headerless_writer(path)?;
    for row in izip!(epochs, ra, dec) {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `epoch,separation` rows to `path`.
pub fn write_separations(
    path: &Utf8Path,
    epochs: &[JulianYear],
    separations: &[MilliArcSec],
) -> Result<(), LensError> {
    check_lengths(epochs.len(), &[separations.len()])?;

    let mut writer = headerless_writer(path)?;
    for row in epochs.iter().zip(separations) {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Save the unlensed positions, lensed positions and separations of
/// `result` in `dir`, created if needed.
pub fn save_trajectory(dir: &Utf8Path, result: &TrajectoryResult) -> Result<(), LensError> {
    std::fs::create_dir_all(dir)?;

    let epochs = result.epochs();
    write_positions(
        &dir.join(UNLENSED_POSITIONS_FILE),
        &epochs,
        &result.unlensed_ra(),
        &result.unlensed_dec(),
    )?;
    write_positions(
        &dir.join(LENSED_POSITIONS_FILE),
        &epochs,
        &result.lensed_ra(),
        &result.lensed_dec(),
    )?;
    write_separations(&dir.join(SEPARATIONS_FILE), &epochs, &result.separations())?;

    log::info!("Trajectory of {} epochs saved in {dir}", result.len());
    Ok(())
}

/// Offsets of positions from a reference point, in mas.
///
/// Both axes use the plain degree to mas factor: the RA offset is a
/// coordinate difference, not multiplied by `cos(dec)`.
///
/// Return
/// ------
/// * `(Δra, Δdec)` vectors, index-aligned with the inputs
pub fn tangent_offsets(
    ra: &[Degree],
    dec: &[Degree],
    ra_ref: Degree,
    dec_ref: Degree,
) -> (Vec<MilliArcSec>, Vec<MilliArcSec>) {
    (
        ra.iter().map(|r| (r - ra_ref) * DEG_TO_MAS).collect(),
        dec.iter().map(|d| (d - dec_ref) * DEG_TO_MAS).collect(),
    )
}

#[cfg(test)]
mod output_test {
    use super::*;
    use approx::assert_relative_eq;

    fn utf8_dir(tmp: &tempfile::TempDir) -> &Utf8Path {
        Utf8Path::from_path(tmp.path()).unwrap()
    }

    #[test]
    fn test_write_positions() {
        let tmp = tempfile::tempdir().unwrap();
        let path = utf8_dir(&tmp).join("positions.csv");

        write_positions(&path, &[2015.5, 2016.0], &[100.0, 100.25], &[-10.5, 10.0]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "2015.5,100.0,-10.5\n2016.0,100.25,10.0\n");
    }

    #[test]
    fn test_mismatched_columns() {
        let tmp = tempfile::tempdir().unwrap();
        let path = utf8_dir(&tmp).join("positions.csv");

        let err = write_positions(&path, &[2015.5, 2016.0], &[100.0], &[10.0, 10.0]).unwrap_err();
        assert_eq!(
            err,
            LensError::ColumnLengthMismatch {
                expected: 2,
                got: 1
            }
        );
        assert!(!path.exists());

        let err = write_separations(&path, &[2015.5], &[10.8, 11.0]).unwrap_err();
        assert_eq!(
            err,
            LensError::ColumnLengthMismatch {
                expected: 1,
                got: 2
            }
        );
    }

    #[test]
    fn test_write_separations() {
        let tmp = tempfile::tempdir().unwrap();
        let path = utf8_dir(&tmp).join("seps.csv");

        write_separations(&path, &[2015.5], &[10.8]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "2015.5,10.8\n");
    }

    #[test]
    fn test_tangent_offsets() {
        let (d_ra, d_dec) = tangent_offsets(&[100.0, 100.001], &[10.0, 9.999], 100.0, 10.0);
        assert_eq!(d_ra[0], 0.0);
        assert_eq!(d_dec[0], 0.0);
        assert_relative_eq!(d_ra[1], 3600.0, epsilon = 1e-6);
        assert_relative_eq!(d_dec[1], -3600.0, epsilon = 1e-6);
    }
}
