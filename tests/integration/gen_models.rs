// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests for generating and assembling model artifacts.

use crate::*;

#[test]
fn test_gen_models_writes_all_artifacts() {
    let ws = Workspace::new();
    ws.gen_models();

    for band in ["LBA", "HBA"] {
        assert!(ws
            .data_dir
            .join(format!("HA_LOFAR_elresp_{band}.json"))
            .exists());
        assert!(ws
            .data_dir
            .join(format!("DP_LOFAR_model_{band}_Hamaker.json"))
            .exists());
        let model = ws.model_file(band);
        assert!(model.exists(), "{} is missing", model.display());
        let contents = std::fs::read_to_string(model).unwrap();
        assert!(contents.contains("CS001"));
        assert!(contents.contains("SE607"));
    }
}

#[test]
fn test_gen_models_single_band() {
    let ws = Workspace::new();
    let cmd = ws
        .cmd()
        .arg("gen-models")
        .arg("LOFAR")
        .arg("--lba")
        .arg("test_files/hamaker_lba_synthetic.cc")
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    assert!(ws.model_file("LBA").exists());
    assert!(!ws.model_file("HBA").exists());
}

#[test]
fn test_gen_models_without_sources_fails() {
    let ws = Workspace::new();
    let cmd = ws.cmd().arg("gen-models").arg("LOFAR").ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("--lba"), "{stderr}");
}

#[test]
fn test_gen_models_bad_source_fails() {
    let ws = Workspace::new();
    let cmd = ws
        .cmd()
        .arg("gen-models")
        .arg("LOFAR")
        .arg("--lba")
        .arg("test_files/does_not_exist.cc")
        .ok();
    assert!(cmd.is_err());
}

#[test]
fn test_assemble_after_gen_models() {
    let ws = Workspace::new();
    ws.gen_models();
    std::fs::remove_file(ws.model_file("HBA")).unwrap();

    let cmd = ws.cmd().arg("assemble").arg("LOFAR").arg("HBA").ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    assert!(ws.model_file("HBA").exists());
}

#[test]
fn test_assemble_without_artifacts_fails() {
    let ws = Workspace::new();
    let cmd = ws.cmd().arg("assemble").arg("LOFAR").arg("LBA").ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("gen-models"), "{stderr}");
}

#[test]
fn test_assemble_unknown_telescope_fails() {
    let ws = Workspace::new();
    let cmd = ws.cmd().arg("assemble").arg("MeerKAT").arg("LBA").ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("LOFAR"), "{stderr}");
}
