#![allow(dead_code)]

use std::fmt::Write as _;

use camino::{Utf8Path, Utf8PathBuf};
use lensfit::{
    astrometry::AstrometricSolution,
    constants::{JulianDate, MAS_TO_DEG, RADEG},
};
use nalgebra::Vector3;

pub const SOURCE_ID: u64 = 4_050_000_000_000_000_001;
pub const LENS_ID: u64 = 4_050_000_000_000_000_002;
pub const LENS_MASS: f64 = 0.6;

pub const GAIA_FILE: &str = "gaia.csv";
pub const MASS_FILE: &str = "lens_masses.csv";
pub const GOST_DIR: &str = "GOST";
pub const HORIZON_FILE: &str = "earth_vectors.txt";

/// First and last tabulated TDB Julian dates of the synthetic Horizons table.
pub const TABLE_START_JD: JulianDate = 2_456_990.5;
pub const TABLE_DAYS: usize = 800;

pub fn source() -> AstrometricSolution {
    AstrometricSolution::new(266.0, -29.0, -1.2, -3.0, 0.3, 2015.5)
}

/// Lens moving east at 150 mas/yr, passing 3 mas north of the source around 2016.0.
pub fn lens() -> AstrometricSolution {
    let cos_dec = (-29.0 * RADEG).cos();
    let ra_offset = -0.5 * (150.0 + 1.2) * MAS_TO_DEG / cos_dec;
    let dec_offset = (3.0 - 0.5 * 3.0) * MAS_TO_DEG;
    AstrometricSolution::new(266.0 + ra_offset, -29.0 + dec_offset, 150.0, 0.0, 10.0, 2015.5)
}

/// Circular, inclined Earth orbit around the barycenter (AU), as a function of the TDB JD.
pub fn earth_orbit(jd_tdb: JulianDate) -> Vector3<f64> {
    let phase = std::f64::consts::TAU * (jd_tdb - 2_451_545.0) / 365.25;
    Vector3::new(phase.cos(), 0.917 * phase.sin(), 0.398 * phase.sin())
}

/// Horizons-like vector table sampling [`earth_orbit`] once a day.
pub fn horizon_text() -> String {
    let mut text = String::from(
        "*******************************************************************************\n\
         Ephemeris / API_USER\n\
         Center body name: Solar System Barycenter (0)     {source: DE441}\n\
         *******************************************************************************\n\
                     JDTDB,            Calendar Date (TDB),                      X,                      Y,                      Z,\n\
         **************************************************************************************************************************\n\
         $$SOE\n",
    );
    for day in 0..TABLE_DAYS {
        let jd = TABLE_START_JD + day as f64;
        let pos = earth_orbit(jd);
        writeln!(
            text,
            "{jd:.9}, A.D. 2000-Jan-01 00:00:00.0000, {:.15E}, {:.15E}, {:.15E},",
            pos.x, pos.y, pos.z
        )
        .unwrap();
    }
    text.push_str("$$EOE\n*******************************************************************************\n");
    text
}

/// GOST schedule: the 15th of every month of 2015 and 2016, at noon UTC.
pub fn gost_text() -> String {
    let mut text = String::from("Target, ra[rad], dec[rad], ObservationTimeAtGaia[UTC], CcdRow[1-7]\n");
    for year in 2015..=2016 {
        for month in 1..=12 {
            writeln!(
                text,
                "{SOURCE_ID}, 4.642, -0.506, {year}-{month:02}-15T12:00:00.000, 4"
            )
            .unwrap();
        }
    }
    text
}

fn gaia_line(id: u64, s: &AstrometricSolution) -> String {
    format!(
        "{id},{:.12},{:.12},{},{},{},{},15.1\n",
        s.ra0, s.dec0, s.pmra, s.pmdec, s.parallax, s.ref_epoch
    )
}

/// Write every input file of an event prediction in `dir`.
pub fn write_fixture(dir: &Utf8Path) {
    let gaia = format!(
        "source_id,ra,dec,pmra,pmdec,parallax,ref_epoch,phot_g_mean_mag\n{}{}",
        gaia_line(SOURCE_ID, &source()),
        gaia_line(LENS_ID, &lens())
    );
    std::fs::write(dir.join(GAIA_FILE), gaia).unwrap();

    std::fs::write(
        dir.join(MASS_FILE),
        format!("lens_id,source_id,mass\n{LENS_ID},{SOURCE_ID},{LENS_MASS}\n"),
    )
    .unwrap();

    let gost_dir = dir.join(GOST_DIR);
    std::fs::create_dir_all(&gost_dir).unwrap();
    std::fs::write(gost_dir.join(format!("{SOURCE_ID}_GOST.csv")), gost_text()).unwrap();

    std::fs::write(dir.join(HORIZON_FILE), horizon_text()).unwrap();
}

pub fn utf8_tempdir() -> (tempfile::TempDir, Utf8PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let path = Utf8Path::from_path(tmp.path()).unwrap().to_owned();
    (tmp, path)
}
