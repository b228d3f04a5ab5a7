// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::f64::consts::FRAC_PI_2;

use approx::{assert_abs_diff_eq, assert_abs_diff_ne};
use indexmap::IndexMap;
use marlu::{c64, Jones};
use nalgebra::{Matrix3, Vector3};

use super::*;
use crate::{
    coeffs::{read_coefficient_file, ChannelSet, CoefficientRecord, CoefficientSet},
    constants::POLCRDROT,
    math::{rot_z, spherical_basis_from_angles},
    telescope::{Band, BeamModel, LookupError, StationFeed},
};

fn lba_record() -> CoefficientRecord {
    read_coefficient_file("test_files/hamaker_lba_synthetic.cc").unwrap()
}

fn lba_element() -> DualPolarizationElement {
    DualPolarizationElement::from_record(lba_record())
}

fn is_finite(j: Jones<f64>) -> bool {
    (0..4).all(|i| j[i].is_finite())
}

#[test]
fn zenith_response_is_identity() {
    let element = lba_element();
    let j = element.polarimeter().jones(60e6, 0.0, 0.0);
    assert_abs_diff_eq!(j, Jones::identity(), epsilon = 1e-12);
    let j = element.jones_along(60e6, 0.0, 0.0);
    assert_abs_diff_eq!(j, Jones::identity(), epsilon = 1e-12);
}

#[test]
fn polynomial_evaluation_matches_direct_sum() {
    let record = lba_record();
    let polarimeter = HamakerPolarimeter::from_record(record.clone());
    let (freq, theta, phi): (f64, f64, f64) = (45e6, 0.7, 1.1);

    let freqn = (freq - record.freq_center) / record.freq_range;
    let (num_k, num_i, num_j, _) = record.coeffs.dim();
    let mut expected = [c64::default(); 4];
    for k in 0..num_k {
        let mut p = [c64::default(); 2];
        for i in 0..num_i {
            for j in 0..num_j {
                for (c, p_c) in p.iter_mut().enumerate() {
                    *p_c += record.coeffs[(k, i, j, c)]
                        * theta.powi(i as i32)
                        * freqn.powi(j as i32);
                }
            }
        }
        let kappa = (-1.0_f64).powi(k as i32) * (2 * k + 1) as f64;
        expected[0] += p[0] * (kappa * phi).cos();
        expected[1] -= p[1] * (kappa * phi).sin();
        expected[2] += p[0] * (kappa * phi).sin();
        expected[3] += p[1] * (kappa * phi).cos();
    }

    let j = polarimeter.jones(freq, theta, phi);
    assert_abs_diff_eq!(j, Jones::from(expected), epsilon = 1e-12);
    // Make sure this direction is actually interesting.
    assert_abs_diff_ne!(j, Jones::identity(), epsilon = 1e-3);
}

#[test]
fn synthetic_lba_reference_values() {
    let polarimeter = lba_element().polarimeter().clone();
    let cases = [
        (
            (45e6, 0.7, 1.1),
            [
                c64::new(0.46458300551854836, 0.009104444403025672),
                c64::new(-0.8886407762752769, 0.01212089766199602),
                c64::new(0.906154463368661, -0.01788804506472813),
                c64::new(0.45057103527614456, 0.006169150316822719),
            ],
        ),
        (
            (80e6, 0.3, -0.4),
            [
                c64::new(0.9235613840998524, -0.004782741078273978),
                c64::new(0.38523439741516063, 0.0006769944764249958),
                c64::new(-0.3876824051381334, -0.0020221104948746817),
                c64::new(0.9254478128825941, -0.0016012425138830389),
            ],
        ),
        // Only theta is away from its reference value here; this pins which
        // tensor axis holds the powers of theta.
        (
            (60e6, 1.2, 0.0),
            [
                c64::new(1.0984, -0.128832),
                c64::new(0.0, 0.0),
                c64::new(0.0, 0.0),
                c64::new(0.98128, -0.064416),
            ],
        ),
    ];
    for ((freq, theta, phi), expected) in cases {
        let j = polarimeter.jones(freq, theta, phi);
        assert_abs_diff_eq!(j, Jones::from(expected), epsilon = 1e-12);
    }
}

#[test]
fn rotation_moves_the_basis_with_the_element() {
    let element = lba_element();
    let rotation = POLCRDROT * rot_z(0.3);
    let rotated = element.rotated(&rotation);
    for (theta, phi) in [(0.1, 0.2), (0.8, -2.0), (1.4, 3.0)] {
        let basis = spherical_basis_from_angles(theta, phi);
        let expected = element.jones_in_basis(150e6, &basis);
        let j = rotated.jones_in_basis(150e6, &(rotation * basis));
        assert_abs_diff_eq!(j, expected, epsilon = 1e-10);
    }
}

#[test]
fn rotated_is_pure_and_accumulates() {
    let element = lba_element();
    let once = element.rotated(&POLCRDROT);
    assert_eq!(element.rotation(), &Matrix3::identity());
    assert_eq!(once.rotation(), &POLCRDROT);

    let stn_rot = rot_z(1.0);
    let composed = once.rotated(&stn_rot);
    assert_abs_diff_eq!(*composed.rotation(), stn_rot * POLCRDROT, epsilon = 1e-15);
    // The original is untouched.
    assert_eq!(once.rotation(), &POLCRDROT);
    assert_eq!(once.polarimeter(), element.polarimeter());
}

#[test]
fn double_rotation_is_not_single_rotation() {
    let element = lba_element();
    let once = element.rotated(&POLCRDROT);
    let twice = once.rotated(&POLCRDROT);
    assert_abs_diff_ne!(*once.rotation(), *twice.rotation(), epsilon = 1e-6);

    let (theta, phi) = (0.6, 0.4);
    let j_once = once.jones_along(50e6, theta, phi);
    let j_twice = twice.jones_along(50e6, theta, phi);
    assert_abs_diff_ne!(j_once, j_twice, epsilon = 1e-6);

    // Rotating twice is the same as rotating once by the square.
    let squared = element.rotated(&(POLCRDROT * POLCRDROT));
    assert_abs_diff_eq!(
        squared.jones_along(50e6, theta, phi),
        j_twice,
        epsilon = 1e-12
    );
}

#[test]
fn element_dipoles_sit_at_45_degrees_in_the_station() {
    // The x dipole of the element points along (-1, -1) in the station frame.
    let x_dipole = POLCRDROT * Vector3::x();
    assert_abs_diff_eq!(
        x_dipole,
        Vector3::new(-1.0, -1.0, 0.0).normalize(),
        epsilon = 1e-15
    );
    assert_abs_diff_eq!(POLCRDROT.determinant(), 1.0, epsilon = 1e-15);
}

#[test]
fn horizon_directions_are_evaluated() {
    let j = lba_element().jones_along(30e6, FRAC_PI_2 + 0.2, 0.5);
    assert!(is_finite(j));
}

#[test]
fn out_of_band_frequencies_are_only_flagged() {
    let set = CoefficientSet::new(lba_record(), ChannelSet::for_band(Band::LBA));
    let polarimeter = HamakerPolarimeter::from_coefficient_set(set);
    assert_eq!(polarimeter.channels().map(|c| c.len()), Some(512));
    assert_eq!(polarimeter.num_harmonics(), 2);
    assert!(polarimeter.check_freq(60e6));
    assert!(!polarimeter.check_freq(150e6));
    assert!(is_finite(polarimeter.jones(150e6, 0.3, 0.3)));

    // Without channels, nothing is out of band.
    assert!(HamakerPolarimeter::from_record(lba_record()).check_freq(1e12));
}

#[test]
fn station_models_rotate_their_own_copy() {
    let base = lba_element().rotated(&POLCRDROT);
    let rot_a = rot_z(0.5);
    let rot_b = rot_z(-1.2);
    let a = StationBeamModel::new(Vector3::zeros(), rot_a, StationFeed::Lba, &base);
    let b = StationBeamModel::new(Vector3::x(), rot_b, StationFeed::Lba, &base);
    assert_abs_diff_eq!(*a.feed_pattern.rotation(), rot_a * POLCRDROT, epsilon = 1e-15);
    assert_abs_diff_eq!(*b.feed_pattern.rotation(), rot_b * POLCRDROT, epsilon = 1e-15);
    assert_eq!(base.rotation(), &POLCRDROT);
}

#[test]
fn artifacts_round_trip_through_json() {
    let element = lba_element().rotated(&POLCRDROT);
    let json = serde_json::to_string(&element).unwrap();
    let element2: DualPolarizationElement = serde_json::from_str(&json).unwrap();
    assert_eq!(element2, element);

    let mut stations = IndexMap::new();
    for (id, angle) in [("CS001", 0.1), ("SE607", 0.2)] {
        stations.insert(
            id.to_string(),
            StationBeamModel::new(
                Vector3::new(3826923.5, 460915.4, 5064643.5),
                rot_z(angle),
                StationFeed::Hba,
                &element,
            ),
        );
    }
    let model = TelescopeBandModel {
        telescope: "LOFAR".to_string(),
        band: Band::HBA,
        beam_model: BeamModel::Hamaker,
        stations,
    };
    let json = serde_json::to_string(&model).unwrap();
    let model2: TelescopeBandModel = serde_json::from_str(&json).unwrap();
    assert_eq!(model2, model);
    assert_eq!(
        model2.stations.keys().collect::<Vec<_>>(),
        ["CS001", "SE607"]
    );
}

#[test]
fn unknown_station_lookup_fails() {
    let model = TelescopeBandModel {
        telescope: "LOFAR".to_string(),
        band: Band::LBA,
        beam_model: BeamModel::Hamaker,
        stations: IndexMap::new(),
    };
    assert!(matches!(
        model.station("CS001"),
        Err(LookupError::UnknownStation { .. })
    ));
}
