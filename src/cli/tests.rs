// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use clap::Parser;

use super::*;

#[test]
fn test_gen_models_args() {
    let args = Stationbeam::try_parse_from([
        "stationbeam",
        "gen-models",
        "LOFAR",
        "--lba",
        "lba.cc",
        "--telescopes-dir",
        "confs",
        "--data-dir",
        "out",
    ])
    .unwrap();
    assert!(matches!(args.command, Command::GenModels(_)));
    assert_eq!(args.global_opts.telescopes_dir(), PathBuf::from("confs"));
    assert_eq!(args.global_opts.store().root(), PathBuf::from("out").as_path());
}

#[test]
fn test_default_data_dir() {
    let args = Stationbeam::try_parse_from(["stationbeam", "assemble", "LOFAR", "LBA"]).unwrap();
    assert!(matches!(args.command, Command::Assemble(_)));
    assert_eq!(args.global_opts.data_dir, PathBuf::from(TELEDATADIR));
}

#[test]
fn test_subcommands_are_inferred() {
    let args = Stationbeam::try_parse_from(["stationbeam", "ass", "LOFAR", "HBA"]).unwrap();
    assert!(matches!(args.command, Command::Assemble(_)));
}

#[test]
fn test_fov_jones_negative_pointing() {
    let args = Stationbeam::try_parse_from([
        "stationbeam",
        "fov-jones",
        "print",
        "LOFAR",
        "LBA",
        "SE607",
        "Hamaker",
        "2012-04-21T18:00:00",
        "-0.5,0.3,J2000",
        "60e6",
    ]);
    assert!(args.is_ok(), "{:?}", args.err());
    assert!(matches!(args.unwrap().command, Command::FovJones(_)));
}

#[test]
fn test_fov_jones_rejects_unknown_action() {
    let args = Stationbeam::try_parse_from([
        "stationbeam",
        "fov-jones",
        "plot",
        "LOFAR",
        "LBA",
        "SE607",
        "Hamaker",
        "2012-04-21T18:00:00",
        "0,0,STN",
        "60e6",
    ]);
    assert!(args.is_err());
}

#[test]
fn test_missing_subcommand_args() {
    assert!(Stationbeam::try_parse_from(["stationbeam", "fov-jones", "print"]).is_err());
    assert!(Stationbeam::try_parse_from(["stationbeam"]).is_err());
}

#[test]
fn test_gen_models_needs_a_source() {
    let args = Stationbeam::try_parse_from(["stationbeam", "gen-models", "LOFAR"]).unwrap();
    let result = match args.command {
        Command::GenModels(a) => a.run(&args.global_opts),
        _ => unreachable!(),
    };
    assert!(matches!(result, Err(StationbeamError::Argument(_))));
}
