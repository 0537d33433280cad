use hifitime::Epoch;
use std::str::FromStr;

use crate::constants::{JulianDate, JulianYear, DAYS_PER_JULIAN_YEAR, J2000_JD, J2000_JYEAR};
use crate::lens_errors::LensError;

/// Transformation from Julian year to Julian date, in the same time scale
///
/// Argument
/// --------
/// * `jyear`: epoch as a Julian year (e.g. 2015.5)
///
/// Return
/// ------
/// * the corresponding Julian date
pub fn jyear_to_jd(jyear: JulianYear) -> JulianDate {
    J2000_JD + (jyear - J2000_JYEAR) * DAYS_PER_JULIAN_YEAR
}

/// Transformation from Julian date to Julian year, in the same time scale
pub fn jd_to_jyear(jd: JulianDate) -> JulianYear {
    J2000_JYEAR + (jd - J2000_JD) / DAYS_PER_JULIAN_YEAR
}

/// Build an [`Epoch`] from a Julian year expressed in the UTC time scale.
pub fn epoch_from_jyear_utc(jyear: JulianYear) -> Epoch {
    Epoch::from_jde_utc(jyear_to_jd(jyear))
}

/// Transformation from a UTC Julian year to a TDB Julian date
///
/// Observation schedules are expressed in UTC while the JPL vector tables
/// are tabulated in TDB.
///
/// Argument
/// --------
/// * `jyear`: epoch as a UTC Julian year
///
/// Return
/// ------
/// * the Julian date of the same instant in the TDB time scale
pub fn jyear_utc_to_jd_tdb(jyear: JulianYear) -> JulianDate {
    epoch_from_jyear_utc(jyear).to_jde_tdb_days()
}

/// Transformation from a date in the format YYYY-MM-ddTHH:mm:ss(.sss) (UTC) to a Julian year (UTC)
///
/// Argument
/// --------
/// * `date`: an ISO-8601 date string, surrounding whitespace is ignored
///
/// Return
/// ------
/// * the date as a UTC Julian year, or [`LensError::InvalidDate`] if the string cannot be parsed
pub fn iso_utc_to_jyear(date: &str) -> Result<JulianYear, LensError> {
    let epoch = Epoch::from_str(date.trim())
        .map_err(|e| LensError::InvalidDate(format!("{}: {e}", date.trim())))?;
    Ok(jd_to_jyear(epoch.to_jde_utc_days()))
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_jyear_to_jd() {
        assert_eq!(jyear_to_jd(2000.0), 2451545.0);
        assert_eq!(jyear_to_jd(2015.5), 2457206.375);
        assert_eq!(jd_to_jyear(2457206.375), 2015.5);
    }

    #[test]
    fn test_iso_utc_to_jyear() {
        let jyear = iso_utc_to_jyear("2000-01-01T12:00:00").unwrap();
        assert_relative_eq!(jyear, 2000.0, epsilon = 1e-12);

        let jyear = iso_utc_to_jyear(" 2015-07-02T21:00:00.000 ").unwrap();
        assert_relative_eq!(jyear, 2015.5, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_date() {
        let err = iso_utc_to_jyear("not a date").unwrap_err();
        assert!(matches!(err, LensError::InvalidDate(_)));
    }

    #[test]
    fn test_utc_to_tdb_offset() {
        // TDB runs ahead of UTC by 32.184 s + leap seconds (36 s in mid 2015)
        let jd_utc = jyear_to_jd(2015.5);
        let jd_tdb = jyear_utc_to_jd_tdb(2015.5);
        let offset_s = (jd_tdb - jd_utc) * 86_400.0;
        assert!((offset_s - 68.184).abs() < 0.01, "offset = {offset_s}");
    }
}
