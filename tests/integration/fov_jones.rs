// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests for evaluating Jones matrices from the command line.

use crate::*;

const TIME: &str = "2012-04-21T18:00:00";

fn fov_jones(ws: &Workspace, band: &str, pointing: &str, freq: &str) -> Command {
    let mut cmd = ws.cmd();
    cmd.args([
        "fov-jones", "print", "LOFAR", band, "SE607", "Hamaker", TIME, pointing, freq,
    ]);
    cmd
}

#[test]
fn test_station_frame_grid() {
    let ws = Workspace::new();
    ws.gen_models();
    let out = ws.data_dir.join("jones.txt");

    let cmd = fov_jones(&ws, "LBA", "0,1.5707963,STN", "60e6")
        .arg("-o")
        .arg(&out)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));

    let contents = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 900);
    for line in lines {
        assert_eq!(line.split(", ").count(), 6, "{line}");
    }
}

#[test]
fn test_j2000_point_to_stdout() {
    let ws = Workspace::new();
    ws.gen_models();

    let cmd = fov_jones(&ws, "HBA", "-0.5,0.9,J2000", "150e6").ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    let rows: Vec<&str> = stdout
        .lines()
        .filter(|l| l.split(", ").count() == 6)
        .collect();
    assert_eq!(rows.len(), 1, "{stdout}");
}

#[test]
fn test_bad_pointing_fails() {
    let ws = Workspace::new();
    ws.gen_models();

    let cmd = fov_jones(&ws, "LBA", "0,0,GALACTIC", "60e6").ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("J2000"), "{stderr}");

    let cmd = fov_jones(&ws, "LBA", "0.1", "60e6").ok();
    assert!(cmd.is_err());
}

#[test]
fn test_bad_time_fails() {
    let ws = Workspace::new();
    ws.gen_models();
    let mut cmd = ws.cmd();
    let cmd = cmd
        .args([
            "fov-jones", "print", "LOFAR", "LBA", "SE607", "Hamaker", "yesterday", "0,0,J2000",
            "60e6",
        ])
        .ok();
    assert!(cmd.is_err());
}

#[test]
fn test_unknown_band_fails() {
    let ws = Workspace::new();
    ws.gen_models();
    let cmd = fov_jones(&ws, "MBA", "0,0,J2000", "60e6").ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("LBA"), "{stderr}");
}

#[test]
fn test_bad_frequency_fails() {
    let ws = Workspace::new();
    let cmd = fov_jones(&ws, "LBA", "0,0,J2000", "sixty").ok();
    assert!(cmd.is_err());
}

#[test]
fn test_missing_model_fails() {
    let ws = Workspace::new();
    let cmd = fov_jones(&ws, "LBA", "0,0,J2000", "60e6").ok();
    assert!(cmd.is_err());
}
