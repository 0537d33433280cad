//! Lens mass estimates.
//!
//! A CSV export with (at least) the columns `lens_id` and `mass` (solar
//! masses), typically extracted from a predicted-events catalog. A lens can
//! take part in several events and thus appear on several rows: only the
//! first row of each lens is used.

use std::{collections::HashMap, io};

use camino::Utf8Path;
use serde::Deserialize;

use crate::{
    catalog::LensMassCatalog,
    constants::{SolarMass, SourceId},
    lens_errors::LensError,
};

#[derive(Debug, Deserialize)]
struct LensMassRecord {
    lens_id: SourceId,
    mass: SolarMass,
}

/// Lens masses keyed by the Gaia identifier of the lens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LensMassTable {
    masses: HashMap<SourceId, SolarMass>,
}

impl LensMassTable {
    pub fn from_file(path: &Utf8Path) -> Result<Self, LensError> {
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(file)?;
        log::debug!("Loaded {} lens masses from {path}", table.masses.len());
        Ok(table)
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, LensError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut masses = HashMap::new();
        for record in csv_reader.deserialize::<LensMassRecord>() {
            let record = record?;
            masses.entry(record.lens_id).or_insert(record.mass);
        }
        Ok(LensMassTable { masses })
    }

    pub fn insert(&mut self, lens_id: SourceId, mass: SolarMass) {
        self.masses.insert(lens_id, mass);
    }
}

impl LensMassCatalog for LensMassTable {
    fn lens_mass(&self, lens_id: SourceId) -> Result<SolarMass, LensError> {
        self.masses
            .get(&lens_id)
            .copied()
            .ok_or(LensError::LensMassNotFound(lens_id))
    }
}
