//! # JPL Horizons vector table
//!
//! Reader for the text output of a JPL Horizons `VECTORS` query of the Earth
//! (`COMMAND='399'`) relative to the solar-system barycenter
//! (`CENTER='500@0'`), in AU, with CSV formatting enabled. Such a file can be
//! produced by submitting the batch input returned by
//! [`HorizonVectorTable::batch_input`](crate::ephemeris::horizon_table::HorizonVectorTable::batch_input)
//! to the Horizons file API.
//!
//! The relevant part of the output looks like:
//!
//! ```text
//!             JDTDB,            Calendar Date (TDB),                      X,                      Y,                      Z,
//! **************************************************************************************************************************
//! $$SOE
//! 2459400.032916666, A.D. 2021-Jul-04 12:47:24.0000,  2.195672929244244E-01, -9.108330730147444E-01, -3.948423288985838E-01,
//! $$EOE
//! ```
//!
//! Rows are sorted by date and the position at an arbitrary epoch is
//! linearly interpolated between the two bracketing rows. With a one-day
//! step the interpolation error on the Earth position stays below 4e-5 AU,
//! i.e. below 1e-3 mas of parallactic shift for parallaxes up to 20 mas.

use camino::Utf8Path;
use itertools::Itertools;
use nalgebra::Vector3;
use regex::Regex;

use crate::{
    constants::{JulianDate, JulianYear},
    ephemeris::EarthEphemeris,
    lens_errors::LensError,
    time::{jyear_to_jd, jyear_utc_to_jd_tdb},
};

/// One row of the Horizons vector table. Unused columns are ignored.
#[derive(Debug, serde::Deserialize, PartialEq)]
struct VectorRecord {
    #[serde(rename = "JDTDB")]
    jd_tdb: f64,
    #[serde(rename = "X")]
    x: f64, // AU
    #[serde(rename = "Y")]
    y: f64, // AU
    #[serde(rename = "Z")]
    z: f64, // AU
}

/// Tabulated barycentric Earth positions, sorted by TDB Julian date.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizonVectorTable {
    jd_tdb: Vec<JulianDate>,
    positions: Vec<Vector3<f64>>,
}

impl HorizonVectorTable {
    /// Parse the raw text returned by Horizons.
    ///
    /// Argument
    /// --------
    /// * `horizon_response`: full Horizons output (header and `$$SOE`/`$$EOE` block)
    ///
    /// Return
    /// ------
    /// * the table, or [`LensError::HorizonParseError`] when the markers, the column header
    ///   or the records cannot be found
    pub fn from_horizon_str(horizon_response: &str) -> Result<Self, LensError> {
        // data between the start/end of ephemeris markers
        let data_regex = Regex::new(r"(?s)\$\$SOE[ \t]*\r?\n(.*?)\$\$EOE")
            .map_err(|e| LensError::HorizonParseError(e.to_string()))?;
        // CSV header line, starting with the JDTDB column
        let header_regex = Regex::new(r"(?m)^[ \t]*JDTDB[ \t]*,.*$")
            .map_err(|e| LensError::HorizonParseError(e.to_string()))?;

        let data = data_regex
            .captures(horizon_response)
            .and_then(|c| c.get(1))
            .ok_or_else(|| {
                LensError::HorizonParseError("missing $$SOE/$$EOE data block".into())
            })?
            .as_str();

        let header = header_regex
            .find(horizon_response)
            .ok_or_else(|| LensError::HorizonParseError("missing JDTDB column header".into()))?
            .as_str()
            .trim_end_matches('\r');

        let csv_data = format!("{header}\n{}", data.replace('\r', ""));
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(csv_data.as_bytes());

        let records = csv_reader
            .deserialize::<VectorRecord>()
            .collect::<Result<Vec<_>, _>>()?;

        if records.is_empty() {
            return Err(LensError::HorizonParseError(
                "no record between $$SOE and $$EOE".into(),
            ));
        }

        let (jd_tdb, positions) = records
            .into_iter()
            .sorted_by(|a, b| a.jd_tdb.total_cmp(&b.jd_tdb))
            .dedup_by(|a, b| a.jd_tdb == b.jd_tdb)
            .map(|r| (r.jd_tdb, Vector3::new(r.x, r.y, r.z)))
            .unzip();

        Ok(HorizonVectorTable { jd_tdb, positions })
    }

    /// Read a Horizons vector table saved on disk.
    pub fn from_file(path: &Utf8Path) -> Result<Self, LensError> {
        let content = std::fs::read_to_string(path)?;
        let table = Self::from_horizon_str(&content)?;
        log::debug!(
            "Loaded {} Earth vectors from {path} (JD TDB {:.3} → {:.3})",
            table.len(),
            table.jd_range().0,
            table.jd_range().1
        );
        Ok(table)
    }

    /// Number of tabulated rows.
    pub fn len(&self) -> usize {
        self.jd_tdb.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jd_tdb.is_empty()
    }

    /// First and last tabulated TDB Julian dates.
    pub fn jd_range(&self) -> (JulianDate, JulianDate) {
        (
            self.jd_tdb.first().copied().unwrap_or(f64::NAN),
            self.jd_tdb.last().copied().unwrap_or(f64::NAN),
        )
    }

    /// Earth position at a TDB Julian date.
    ///
    /// Return
    /// ------
    /// * the interpolated position in AU, or [`LensError::EphemerisOutOfRange`] when
    ///   `jd_tdb` falls outside the tabulated dates
    pub fn position_at_jd_tdb(&self, jd_tdb: JulianDate) -> Result<Vector3<f64>, LensError> {
        let (start, end) = self.jd_range();
        if !(jd_tdb >= start && jd_tdb <= end) {
            return Err(LensError::EphemerisOutOfRange {
                epoch: jd_tdb,
                start,
                end,
            });
        }

        // first tabulated date >= jd_tdb
        let upper = self.jd_tdb.partition_point(|&t| t < jd_tdb);
        if self.jd_tdb[upper] == jd_tdb {
            return Ok(self.positions[upper]);
        }

        let lower = upper - 1;
        let (t0, t1) = (self.jd_tdb[lower], self.jd_tdb[upper]);
        let frac = (jd_tdb - t0) / (t1 - t0);
        Ok(self.positions[lower].lerp(&self.positions[upper], frac))
    }

    /// Horizons batch input requesting the table this reader expects.
    ///
    /// Arguments
    /// ---------
    /// * `start`, `stop`: covered epochs as Julian years (TDB)
    /// * `step`: Horizons step size, e.g. `"1 d"` or `"6 h"`
    ///
    /// Return
    /// ------
    /// * the batch input text, to be sent to `https://ssd.jpl.nasa.gov/api/horizons_file.api`
    pub fn batch_input(start: JulianYear, stop: JulianYear, step: &str) -> String {
        format!(
            "
!$$SOF
COMMAND='399'
OBJ_DATA='NO'
MAKE_EPHEM='YES'
TABLE_TYPE='VECTORS'
CENTER='500@0'
START_TIME='JD {:.6}'
STOP_TIME='JD {:.6}'
STEP_SIZE='{}'
CSV_FORMAT=YES
REF_SYSTEM=ICRF
OUT_UNITS=AU-D
REF_PLANE=FRAME
VEC_TABLE=1
",
            jyear_to_jd(start),
            jyear_to_jd(stop),
            step
        )
    }
}

impl EarthEphemeris for HorizonVectorTable {
    fn earth_position(&self, epoch: JulianYear) -> Result<Vector3<f64>, LensError> {
        self.position_at_jd_tdb(jyear_utc_to_jd_tdb(epoch))
    }
}

#[cfg(test)]
mod horizon_table_test {
    use super::*;
    use approx::assert_relative_eq;

    const FAKE_HORIZON: &str = "
Reference frame : ICRF
*******************************************************************************
            JDTDB,            Calendar Date (TDB),                      X,                      Y,                      Z,
**************************************************************************************************************************
$$SOE
2457206.500000000, A.D. 2015-Jul-03 00:00:00.0000,  2.000000000000000E-01, -9.000000000000000E-01, -4.000000000000000E-01,
2457205.500000000, A.D. 2015-Jul-02 00:00:00.0000,  1.000000000000000E-01, -1.000000000000000E+00, -3.000000000000000E-01,
$$EOE
**************************************************************************************************************************
";

    #[test]
    fn test_parse_sorts_records() {
        let table = HorizonVectorTable::from_horizon_str(FAKE_HORIZON).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.jd_range(), (2457205.5, 2457206.5));
        assert_eq!(
            table.position_at_jd_tdb(2457205.5).unwrap(),
            Vector3::new(0.1, -1.0, -0.3)
        );
    }

    #[test]
    fn test_linear_interpolation() {
        let table = HorizonVectorTable::from_horizon_str(FAKE_HORIZON).unwrap();
        let mid = table.position_at_jd_tdb(2457206.0).unwrap();
        assert_relative_eq!(mid.x, 0.15, epsilon = 1e-12);
        assert_relative_eq!(mid.y, -0.95, epsilon = 1e-12);
        assert_relative_eq!(mid.z, -0.35, epsilon = 1e-12);
    }

    #[test]
    fn test_out_of_range() {
        let table = HorizonVectorTable::from_horizon_str(FAKE_HORIZON).unwrap();
        let err = table.position_at_jd_tdb(2457300.0).unwrap_err();
        assert_eq!(
            err,
            LensError::EphemerisOutOfRange {
                epoch: 2457300.0,
                start: 2457205.5,
                end: 2457206.5
            }
        );
        assert!(table.earth_position(2030.0).is_err());
    }

    #[test]
    fn test_utc_julian_year_lookup() {
        // 2015.5 UTC is 2015-07-02T21:00:00 UTC, inside the table
        let table = HorizonVectorTable::from_horizon_str(FAKE_HORIZON).unwrap();
        let pos = table.earth_position(2015.5).unwrap();
        assert!(pos.x > 0.18 && pos.x < 0.19);
    }

    #[test]
    fn test_missing_block() {
        let err = HorizonVectorTable::from_horizon_str("no ephemeris here").unwrap_err();
        assert!(matches!(err, LensError::HorizonParseError(_)));
    }

    #[test]
    fn test_empty_block() {
        let text = "            JDTDB,  X,  Y,  Z,\n$$SOE\n$$EOE\n";
        let err = HorizonVectorTable::from_horizon_str(text).unwrap_err();
        assert_eq!(
            err,
            LensError::HorizonParseError("no record between $$SOE and $$EOE".into())
        );
    }

    #[test]
    fn test_batch_input() {
        let input = HorizonVectorTable::batch_input(2014.5, 2017.5, "1 d");
        assert!(input.contains("CENTER='500@0'"));
        assert!(input.contains("START_TIME='JD 2456841.125000'"));
        assert!(input.contains("STEP_SIZE='1 d'"));
    }
}
