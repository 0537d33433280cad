//! Gaia Observation Forecast Tool (GOST) schedules.
//!
//! GOST exports one CSV file per target. The files are stored in a single
//! directory as `<source_id>_GOST.csv`. Column names come with leading
//! spaces (`" ObservationTimeAtGaia[UTC]"`), so headers and fields are
//! trimmed before matching; the only column used is the ISO-8601 UTC
//! observation time.
//!
//! ```text
//! Target, ra[rad], dec[rad], ra[h:m:s], dec[d:m:s], ObservationTimeAtGaia[UTC], CcdRow[1-7], ...
//! 5853498713160606720, 3.807, -1.094, 14:29:43, -62:40:46, 2014-08-22T20:02:37.282, 3, ...
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

use crate::{
    catalog::ObservationSchedule,
    constants::{JulianYear, SourceId},
    lens_errors::LensError,
    time::iso_utc_to_jyear,
};

#[derive(Debug, Deserialize)]
struct GostRecord {
    #[serde(rename = "ObservationTimeAtGaia[UTC]")]
    observation_time: String,
}

/// Directory of GOST exports.
#[derive(Debug, Clone, PartialEq)]
pub struct GostScheduleDir {
    dir: Utf8PathBuf,
}

impl GostScheduleDir {
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        GostScheduleDir { dir: dir.into() }
    }

    /// Path of the schedule file of `source_id`.
    pub fn schedule_path(&self, source_id: SourceId) -> Utf8PathBuf {
        self.dir.join(format!("{source_id}_GOST.csv"))
    }
}

/// Read the observation epochs of a single GOST file.
///
/// Return
/// ------
/// * UTC Julian years in file order, [`LensError::InvalidDate`] on an unparsable time
pub fn read_gost_file(path: &Utf8Path) -> Result<Vec<JulianYear>, LensError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    csv_reader
        .deserialize::<GostRecord>()
        .map(|record| iso_utc_to_jyear(&record?.observation_time))
        .collect()
}

impl ObservationSchedule for GostScheduleDir {
    fn epochs(&self, source_id: SourceId) -> Result<Vec<JulianYear>, LensError> {
        let path = self.schedule_path(source_id);
        if !path.is_file() {
            return Err(LensError::ScheduleNotFound(source_id));
        }
        let epochs = read_gost_file(&path)?;
        log::debug!("{} GOST epochs read from {path}", epochs.len());
        Ok(epochs)
    }
}
