use std::{env, process};

use camino::{Utf8Path, Utf8PathBuf};
use lensfit::{
    catalog::{gaia::GaiaCsvCatalog, gost::GostScheduleDir, lens_mass::LensMassTable},
    constants::SourceId,
    ephemeris::horizon_table::HorizonVectorTable,
    output::{save_trajectory, tangent_offsets},
    trajectory::params::TrajectoryParams,
    LensError, MicrolensingEvent,
};

const USAGE: &str = "\
Usage:
  predict_deflection <SOURCE_ID> <LENS_ID> [DATA_DIR] [--parallel]

DATA_DIR (default: data) must contain
  gaia.csv            Gaia export (source_id, ra, dec, pmra, pmdec, parallax, ref_epoch)
  lens_masses.csv     lens_id, mass
  GOST/               <SOURCE_ID>_GOST.csv schedules
  earth_vectors.txt   Horizons VECTORS table of the Earth, CENTER='500@0'

Outputs are written in outputs/<SOURCE_ID>_<LENS_ID>/.";

fn parse_id(arg: Option<&String>) -> SourceId {
    match arg.and_then(|a| a.parse().ok()) {
        Some(id) => id,
        None => {
            eprintln!("{USAGE}");
            process::exit(2);
        }
    }
}

/// Load the offline inputs, predict the lensed trajectory of the source,
/// print it and save it.
fn main() -> Result<(), LensError> {
    let mut args = env::args().skip(1).collect::<Vec<_>>();
    let parallel = if let Some(pos) = args.iter().position(|a| a == "--parallel") {
        args.remove(pos);
        true
    } else {
        false
    };

    let source_id = parse_id(args.first());
    let lens_id = parse_id(args.get(1));
    let data_dir = Utf8PathBuf::from(args.get(2).map(String::as_str).unwrap_or("data"));

    println!("Loading Gaia solutions...");
    let gaia = GaiaCsvCatalog::from_file(&data_dir.join("gaia.csv"))?;
    println!("Loading lens masses...");
    let masses = LensMassTable::from_file(&data_dir.join("lens_masses.csv"))?;
    println!("Loading Earth ephemeris...");
    let earth = HorizonVectorTable::from_file(&data_dir.join("earth_vectors.txt"))?;
    let gost = GostScheduleDir::new(data_dir.join("GOST"));

    let params = TrajectoryParams::builder().parallel(parallel).build()?;
    println!("{params:#}\n");

    let event = MicrolensingEvent::new(source_id, lens_id);
    let result = event.predict(&gaia, &masses, &gost, &earth, &params)?;
    println!("{result:#}");

    let output_dir = Utf8Path::new("outputs").join(format!("{source_id}_{lens_id}"));
    save_trajectory(&output_dir, &result)?;
    println!("Saved in {output_dir}");

    // offsets around the unlensed position at closest approach, in mas
    if let Some(closest) = result.closest_approach() {
        let (ra_ref, dec_ref) = (closest.unlensed.ra, closest.unlensed.dec);
        let (u_ra, u_dec) =
            tangent_offsets(&result.unlensed_ra(), &result.unlensed_dec(), ra_ref, dec_ref);
        let (l_ra, l_dec) =
            tangent_offsets(&result.lensed_ra(), &result.lensed_dec(), ra_ref, dec_ref);

        println!("\nOffsets from the closest approach position at {:.4} [mas]", closest.epoch);
        println!(
            "{:>12} {:>12} {:>12} {:>12} {:>12}",
            "epoch", "ΔRA", "ΔDEC", "ΔRA lensed", "ΔDEC lensed"
        );
        for (i, epoch) in result.epochs().iter().enumerate() {
            println!(
                "{epoch:>12.5} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
                u_ra[i], u_dec[i], l_ra[i], l_dec[i]
            );
        }
    }

    Ok(())
}
