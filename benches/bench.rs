// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use criterion::*;
use hifitime::Epoch;
use nalgebra::{Matrix3, Vector3};

use stationbeam::{
    beam::{DualPolarizationElement, StationBeamModel},
    coeffs::read_coefficient_file,
    constants::POLCRDROT,
    field::{evaluate_station, FieldDirections, LmGrid, Pointing, RefFrame},
    telescope::StationFeed,
};

fn station() -> StationBeamModel {
    let base = DualPolarizationElement::from_record(
        read_coefficient_file("test_files/hamaker_lba_synthetic.cc").unwrap(),
    )
    .rotated(&POLCRDROT);
    StationBeamModel::new(
        Vector3::new(3826577.0, 461022.9, 5064892.7),
        Matrix3::identity(),
        StationFeed::Lba,
        &base,
    )
}

fn field_evaluation(c: &mut Criterion) {
    let station = station();
    let epoch = Epoch::from_gregorian_utc(2012, 4, 21, 18, 0, 0, 0);

    let grid = FieldDirections::Grid(LmGrid::default());
    c.bench_function("default lm grid", |b| {
        b.iter(|| evaluate_station(&station, 60e6, epoch, &grid))
    });

    let point = FieldDirections::Point(Pointing {
        lon: 0.5,
        lat: 0.8,
        frame: RefFrame::J2000,
    });
    c.bench_function("single J2000 direction", |b| {
        b.iter(|| evaluate_station(&station, 60e6, epoch, &point))
    });

    let large = FieldDirections::Grid(LmGrid::square(100));
    let mut group = c.benchmark_group("large grids");
    group.sample_size(10);
    group.bench_function("100x100 lm grid", |b| {
        b.iter(|| evaluate_station(&station, 60e6, epoch, &large))
    });
    group.finish();
}

criterion_group!(benches, field_evaluation);
criterion_main!(benches);
