// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod fov_jones;
mod gen_models;

use std::path::{Path, PathBuf};
use std::process::Output;
use std::str::from_utf8;

use assert_cmd::{output::OutputError, Command};
use tempfile::TempDir;

fn stationbeam() -> Command {
    Command::cargo_bin("stationbeam").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// A scratch area holding a copy of the test telescope configuration and an
/// empty artifact directory.
struct Workspace {
    // Keep the directory alive for the duration of the test.
    _tmp: TempDir,
    telescopes_dir: PathBuf,
    data_dir: PathBuf,
}

impl Workspace {
    fn new() -> Workspace {
        let tmp = TempDir::new().expect("couldn't make tmp dir");
        let telescopes_dir = tmp.path().join("telescopes");
        std::fs::create_dir_all(&telescopes_dir).unwrap();
        std::fs::copy(
            "test_files/telescopes/LOFAR.toml",
            telescopes_dir.join("LOFAR.toml"),
        )
        .unwrap();
        let data_dir = tmp.path().join("data");
        Workspace {
            _tmp: tmp,
            telescopes_dir,
            data_dir,
        }
    }

    /// A stationbeam command pointed at this workspace.
    fn cmd(&self) -> Command {
        let mut cmd = stationbeam();
        cmd.arg("--telescopes-dir")
            .arg(&self.telescopes_dir)
            .arg("--data-dir")
            .arg(&self.data_dir);
        cmd
    }

    fn model_file(&self, band: &str) -> PathBuf {
        self.telescopes_dir
            .join("LOFAR")
            .join(format!("LOFAR_{band}_Hamaker.json"))
    }

    /// Run gen-models for both bands; panics if it fails.
    fn gen_models(&self) {
        let cmd = self
            .cmd()
            .arg("gen-models")
            .arg("LOFAR")
            .arg("--lba")
            .arg(Path::new("test_files/hamaker_lba_synthetic.cc"))
            .arg("--hba")
            .arg(Path::new("test_files/hamaker_hba_synthetic.cc"))
            .ok();
        assert!(cmd.is_ok(), "gen-models failed: {:?}", get_cmd_output(cmd));
    }
}

#[test]
fn test_no_args_is_an_error() {
    let cmd = stationbeam().ok();
    assert!(cmd.is_err());
}

#[test]
fn test_help_lists_subcommands() {
    let cmd = stationbeam().arg("--help").ok();
    assert!(cmd.is_ok());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("gen-models"));
    assert!(stdout.contains("assemble"));
    assert!(stdout.contains("fov-jones"));
}
