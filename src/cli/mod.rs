// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line interface code. More specific options for `stationbeam`
//! subcommands are contained in modules.
//!
//! Only 3 things should be public in this module: `Stationbeam`,
//! `Stationbeam::run`, and `StationbeamError`.

mod assemble;
mod error;
mod fov_jones;
mod gen_models;
#[cfg(test)]
mod tests;

pub use error::StationbeamError;

use std::path::PathBuf;

use clap::{AppSettings, Args, Parser, Subcommand};
use log::{debug, info};

use crate::{
    constants::{DEFAULT_TELESCOPES_DIR, TELEDATADIR, TELESCOPES_DIR_ENV},
    io::ArtifactStore,
    telescope::TelescopeRegistry,
};

// Add build-time information from the "built" crate.
include!(concat!(env!("OUT_DIR"), "/built.rs"));

#[derive(Debug, Parser)]
#[clap(
    version,
    about = "Jones-matrix beam models for LOFAR-like phased-array radio telescope stations"
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
#[clap(disable_help_subcommand = true)]
#[clap(infer_subcommands = true)]
#[clap(propagate_version = true)]
#[clap(infer_long_args = true)]
pub struct Stationbeam {
    #[clap(flatten)]
    global_opts: GlobalArgs,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv). The default is to print only high-level information.
    #[clap(short, long, parse(from_occurrences))]
    #[clap(global = true)]
    verbosity: u8,

    /// The directory containing telescope configuration files (toml or json).
    /// If not given, the STATIONBEAM_TELESCOPES_DIR environment variable is
    /// used, and then "./telescopes".
    #[clap(long)]
    #[clap(global = true)]
    telescopes_dir: Option<PathBuf>,

    /// The directory holding intermediate model artifacts.
    #[clap(long, default_value = TELEDATADIR)]
    #[clap(global = true)]
    data_dir: PathBuf,
}

impl GlobalArgs {
    fn telescopes_dir(&self) -> PathBuf {
        match (&self.telescopes_dir, std::env::var_os(TELESCOPES_DIR_ENV)) {
            (Some(dir), _) => dir.clone(),
            (None, Some(dir)) => PathBuf::from(dir),
            (None, None) => PathBuf::from(DEFAULT_TELESCOPES_DIR),
        }
    }

    fn registry(&self) -> Result<TelescopeRegistry, StationbeamError> {
        let dir = self.telescopes_dir();
        debug!("Reading telescopes from {}", dir.display());
        Ok(TelescopeRegistry::from_dir(dir)?)
    }

    fn store(&self) -> ArtifactStore {
        ArtifactStore::new(&self.data_dir)
    }
}

#[derive(Debug, Subcommand)]
#[clap(arg_required_else_help = true)]
enum Command {
    /// Convert native Hamaker-Arts coefficient sources into model artifacts,
    /// then assemble the models of the given bands for every station.
    #[clap(arg_required_else_help = true)]
    GenModels(gen_models::GenModelsArgs),

    /// Assemble the model of one band of a telescope from previously generated
    /// artifacts.
    #[clap(arg_required_else_help = true)]
    Assemble(assemble::AssembleArgs),

    /// Evaluate a station's Jones matrices over its field of view.
    #[clap(arg_required_else_help = true)]
    FovJones(fov_jones::FovJonesArgs),
}

impl Stationbeam {
    pub fn run(self) -> Result<(), StationbeamError> {
        setup_logging(self.global_opts.verbosity).expect("Failed to initialise logging.");

        let sub_command = match &self.command {
            Command::GenModels(_) => "gen-models",
            Command::Assemble(_) => "assemble",
            Command::FovJones(_) => "fov-jones",
        };
        info!("stationbeam {} {}", sub_command, env!("CARGO_PKG_VERSION"));
        display_build_info();

        match self.command {
            Command::GenModels(args) => args.run(&self.global_opts)?,
            Command::Assemble(args) => args.run(&self.global_opts)?,
            Command::FovJones(args) => args.run(&self.global_opts)?,
        }

        info!("stationbeam {} complete.", sub_command);
        Ok(())
    }
}

/// Activate a logger. All log messages are put onto `stdout`. `env_logger`
/// automatically only uses colours and fancy symbols if we're on a tty (e.g. a
/// terminal); piped output will be formatted sensibly. Source code lines are
/// displayed in log messages when verbosity >= 3.
fn setup_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stdout);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(log::LevelFilter::Info),
        1 => builder.filter_level(log::LevelFilter::Debug),
        2 => builder.filter_level(log::LevelFilter::Trace),
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
            builder.format(|buf, record| {
                use std::io::Write;

                let timestamp = buf.timestamp();
                let level = record.level();
                let target = record.target();
                let line = record.line().unwrap_or(0);
                let message = record.args();

                writeln!(buf, "[{timestamp} {level} {target}:{line}] {message}")
            })
        }
    };
    builder.try_init()
}

/// Write many info-level log lines of how this executable was compiled.
fn display_build_info() {
    let dirty = match GIT_DIRTY {
        Some(true) => " (dirty)",
        _ => "",
    };
    match GIT_COMMIT_HASH_SHORT {
        Some(hash) => {
            info!("Compiled on git commit hash: {hash}{dirty}");
        }
        None => info!("Compiled on git commit hash: <no git info>"),
    }
    if let Some(hr) = GIT_HEAD_REF {
        info!("            git head ref: {}", hr);
    }
    info!("            {}", BUILT_TIME_UTC);
    info!("         with compiler {}", RUSTC_VERSION);
    info!("");
}
