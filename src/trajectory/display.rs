//! # Tabular display for lensed trajectories
//!
//! `{}` prints a one-line summary of a [`TrajectoryResult`], `{:#}` renders
//! every row with [`comfy-table`](https://docs.rs/comfy-table/latest/comfy_table/):
//! epoch, unlensed and lensed positions (degrees), lensed − unlensed offsets
//! (mas, RA offset multiplied by `cos(dec)`), separation and deflection (mas).
//! The closest-approach row is flagged with `*`.

use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::constants::{DEG_TO_MAS, RADEG};

use super::{TrajectoryResult, TrajectoryRow};

fn right(content: String) -> Cell {
    Cell::new(content).set_alignment(CellAlignment::Right)
}

/// Lensed − unlensed offsets in mas, (Δα*, Δδ).
fn lensing_offsets(row: &TrajectoryRow) -> (f64, f64) {
    let cos_dec = (row.unlensed.dec * RADEG).cos();
    (
        (row.lensed.ra - row.unlensed.ra) * cos_dec * DEG_TO_MAS,
        (row.lensed.dec - row.unlensed.dec) * DEG_TO_MAS,
    )
}

impl TrajectoryResult {
    fn render_table(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("#"),
            Cell::new("Epoch [yr]"),
            Cell::new("RA [deg]"),
            Cell::new("DEC [deg]"),
            Cell::new("RA lensed [deg]"),
            Cell::new("DEC lensed [deg]"),
            Cell::new("ΔRA* [mas]"),
            Cell::new("ΔDEC [mas]"),
            Cell::new("Sep [mas]"),
            Cell::new("δ [mas]"),
        ]);

        for (i, row) in self.rows.iter().enumerate() {
            let marker = if Some(i) == self.closest_approach {
                format!("{i}*")
            } else {
                i.to_string()
            };
            let (d_ra, d_dec) = lensing_offsets(row);

            table.add_row(Row::from(vec![
                right(marker),
                right(format!("{:.6}", row.epoch)),
                right(format!("{:.9}", row.unlensed.ra)),
                right(format!("{:.9}", row.unlensed.dec)),
                right(format!("{:.9}", row.lensed.ra)),
                right(format!("{:.9}", row.lensed.dec)),
                right(format!("{d_ra:+.4}")),
                right(format!("{d_dec:+.4}")),
                right(format!("{:.3}", row.separation)),
                right(format!("{:.4}", row.deflection)),
            ]));
        }

        table.to_string()
    }
}

impl fmt::Display for TrajectoryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Einstein radius: {:.4} mas", self.einstein_radius)?;
            write!(f, "{}", self.render_table())
        } else {
            match self.closest_approach() {
                Some(closest) => write!(
                    f,
                    "TrajectoryResult({} epochs, θE={:.4} mas, closest approach {:.3} mas at {:.4})",
                    self.len(),
                    self.einstein_radius,
                    closest.separation,
                    closest.epoch
                ),
                None => write!(
                    f,
                    "TrajectoryResult(0 epochs, θE={:.4} mas)",
                    self.einstein_radius
                ),
            }
        }
    }
}

#[cfg(test)]
mod display_test {
    use crate::{
        astrometry::AstrometricSolution, ephemeris::FixedEarthPosition, trajectory::synthesize,
    };

    #[test]
    fn test_summary_and_table() {
        let source = AstrometricSolution::new(100.0, 10.0, 0.0, 0.0, 0.0, 2015.5);
        let lens = AstrometricSolution::new(100.0, 10.000003, 0.0, 0.0, 5.0, 2015.5);
        let earth = FixedEarthPosition::default();

        let result = synthesize(&source, &lens, 0.5, &[2015.5, 2016.0], &earth).unwrap();
        assert_eq!(
            result.to_string(),
            "TrajectoryResult(2 epochs, θE=4.5126 mas, closest approach 10.800 mas at 2015.5000)"
        );

        let table = format!("{result:#}");
        assert!(table.starts_with("Einstein radius: 4.5126 mas"));
        assert!(table.contains("0*"));
        assert!(table.contains("2015.500000"));

        let empty = synthesize(&source, &lens, 0.5, &[], &earth).unwrap();
        assert_eq!(empty.to_string(), "TrajectoryResult(0 epochs, θE=4.5126 mas)");
    }
}
