use approx::assert_relative_eq;
use lensfit::{
    astrometry::{
        propagation::propagate,
        separation::{position_angle, separation},
    },
    constants::MAS_TO_DEG,
    ephemeris::FixedEarthPosition,
    microlensing::{deflection::deflection_magnitude, einstein_radius::einstein_radius},
    synthesize,
    trajectory::params::{DeclinationShift, TrajectoryParams},
    AstrometricSolution, LensError, SkyPosition, TrajectorySynthesizer,
};
use nalgebra::Vector3;

fn source() -> AstrometricSolution {
    AstrometricSolution::new(100.0, 10.0, 0.0, 0.0, 0.0, 2015.5)
}

fn lens_due_north() -> AstrometricSolution {
    AstrometricSolution::new(100.0, 10.000003, 0.0, 0.0, 5.0, 2015.5)
}

#[test]
fn test_reference_epoch_is_identity() {
    let star = AstrometricSolution::new(201.3, -47.9, 512.0, -88.0, -0.4, 2015.5);
    let pos = propagate(&star, 2015.5, &Vector3::new(0.3, -0.9, -0.4));
    assert_eq!(pos, star.reference_position());
    assert_eq!(pos, SkyPosition::new(201.3, -47.9));
}

#[test]
fn test_separation_properties() {
    let (ra_1, dec_1, ra_2, dec_2) = (150.0, -20.0, 150.001, -19.9995);
    assert_eq!(separation(ra_1, dec_1, ra_1, dec_1), 0.0);
    assert_relative_eq!(
        separation(ra_1, dec_1, ra_2, dec_2),
        separation(ra_2, dec_2, ra_1, dec_1),
        epsilon = 1e-9
    );

    let forward = position_angle(ra_1, dec_1, ra_2, dec_2);
    let backward = position_angle(ra_2, dec_2, ra_1, dec_1);
    assert_relative_eq!(
        (forward - backward).abs(),
        std::f64::consts::PI,
        epsilon = 1e-9
    );
}

#[test]
fn test_einstein_radius_reference_value() {
    assert_relative_eq!(einstein_radius(1.0, 10.0, 5.0).unwrap(), 6.3817, epsilon = 1e-4);
    assert!(matches!(
        einstein_radius(1.0, 5.0, 10.0),
        Err(LensError::SourceCloserThanLens { .. })
    ));
}

#[test]
fn test_deflection_limits() {
    let theta_e = 2.0;
    assert_relative_eq!(deflection_magnitude(0.0, theta_e).unwrap(), theta_e);

    // far field: δ → θE² / (2u) with u = sep / θE
    let sep = 2000.0;
    let u = sep / theta_e;
    assert_relative_eq!(
        deflection_magnitude(sep, theta_e).unwrap(),
        theta_e * theta_e / (2.0 * u),
        max_relative = 1e-5
    );
}

#[test]
fn test_lens_due_north_scenario() {
    let earth = FixedEarthPosition(Vector3::zeros());
    let result = synthesize(&source(), &lens_due_north(), 0.5, &[2015.5], &earth).unwrap();
    let row = result.rows()[0];

    assert_relative_eq!(result.einstein_radius(), 4.5126, epsilon = 1e-4);
    assert_relative_eq!(row.separation, 10.8, epsilon = 1e-6);

    let u = row.separation / result.einstein_radius();
    let expected = 0.5 * ((u * u + 4.0).sqrt() - u) * result.einstein_radius();
    assert_relative_eq!(row.deflection, expected, epsilon = 1e-12);

    // default shift takes the RA component, which is zero for a lens due north
    assert_relative_eq!(row.lensed.dec, row.unlensed.dec, epsilon = 1e-15);

    let corrected = TrajectorySynthesizer::with_params(
        &earth,
        TrajectoryParams::builder()
            .declination_shift(DeclinationShift::FromDecComponent)
            .build()
            .unwrap(),
    )
    .synthesize(&source(), &lens_due_north(), 0.5, &[2015.5])
    .unwrap();
    let row = corrected.rows()[0];
    assert_relative_eq!(
        row.lensed.dec,
        10.0 - expected * MAS_TO_DEG,
        epsilon = 1e-12
    );
}

#[test]
fn test_length_and_empty_schedule() {
    let earth = FixedEarthPosition::default();
    let epochs: Vec<f64> = (0..50).map(|i| 2014.0 + 0.07 * i as f64).collect();

    let result = synthesize(&source(), &lens_due_north(), 0.5, &epochs, &earth).unwrap();
    assert_eq!(result.len(), epochs.len());
    assert_eq!(result.lensed_ra().len(), epochs.len());

    let empty = synthesize(&source(), &lens_due_north(), 0.5, &[], &earth).unwrap();
    assert!(empty.is_empty());
    assert!(empty.closest_approach().is_none());
}
