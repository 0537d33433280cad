//! Gaia archive export reader.
//!
//! Expects a CSV file with a header containing at least the `gaia_source`
//! columns `source_id, ra, dec, pmra, pmdec, parallax, ref_epoch` (extra
//! columns are ignored). Two-parameter solutions, whose proper motion and
//! parallax cells are empty, are kept with zeros in place of the missing
//! values.

use std::{collections::HashMap, io};

use camino::Utf8Path;

use crate::{
    astrometry::{AstrometricSolution, GaiaSourceRecord},
    catalog::AstrometricCatalog,
    constants::SourceId,
    lens_errors::LensError,
};

/// In-memory table of Gaia astrometric solutions, keyed by `source_id`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GaiaCsvCatalog {
    solutions: HashMap<SourceId, AstrometricSolution>,
}

impl GaiaCsvCatalog {
    /// Read a Gaia CSV export.
    pub fn from_file(path: &Utf8Path) -> Result<Self, LensError> {
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_reader(file)?;
        log::debug!("Loaded {} Gaia solutions from {path}", catalog.len());
        Ok(catalog)
    }

    /// Read Gaia CSV content from any reader.
    ///
    /// When a `source_id` appears several times, the first row is kept.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, LensError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut solutions = HashMap::new();
        for record in csv_reader.deserialize::<GaiaSourceRecord>() {
            let record = record?;
            if record.is_two_parameter() {
                log::warn!(
                    "Source {} has a two-parameter solution, missing proper motion/parallax set to 0",
                    record.source_id
                );
            }
            solutions
                .entry(record.source_id)
                .or_insert_with(|| AstrometricSolution::from(&record));
        }

        Ok(GaiaCsvCatalog { solutions })
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Add or replace a solution.
    pub fn insert(&mut self, source_id: SourceId, solution: AstrometricSolution) {
        self.solutions.insert(source_id, solution);
    }
}

impl AstrometricCatalog for GaiaCsvCatalog {
    fn solution(&self, source_id: SourceId) -> Result<AstrometricSolution, LensError> {
        self.solutions
            .get(&source_id)
            .copied()
            .ok_or(LensError::SolutionNotFound(source_id))
    }
}
