// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

use super::{Band, BeamModel, BANDS_COMMA_SEPARATED, BEAM_MODELS_COMMA_SEPARATED};

/// Errors from unrecognised names or malformed telescope configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("'{0}' is not one of the available bands (available bands are: {})", *BANDS_COMMA_SEPARATED)]
    UnknownBand(String),

    #[error("'{0}' is not one of the available beam models (available models are: {})", *BEAM_MODELS_COMMA_SEPARATED)]
    UnknownBeamModel(String),

    #[error("'{got}' is not one of the available reference frames (available frames are: {valid})")]
    UnknownFrame { got: String, valid: String },

    #[error("Telescope {telescope}: station {station} appears more than once in the {band} band")]
    DuplicateStation {
        telescope: String,
        band: Band,
        station: String,
    },

    #[error("Telescope configuration file {file:?} doesn't have a recognised file extension! Valid extensions are: toml, json")]
    BadExtension { file: PathBuf },

    #[error("Couldn't decode {kind} structure from {file:?}:\n{err}")]
    Decode {
        kind: &'static str,
        file: PathBuf,
        err: String,
    },

    #[error("Couldn't search for telescope configuration files: {0}")]
    Glob(String),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

/// Errors from looking up telescopes, bands or stations that don't exist.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Telescope '{name}' is not known (known telescopes are: {valid})")]
    UnknownTelescope { name: String, valid: String },

    #[error("Telescope {telescope} doesn't have the {band} band (available bands are: {valid})")]
    BandNotAvailable {
        telescope: String,
        band: Band,
        valid: String,
    },

    #[error("Telescope {telescope} has no station '{station}' in the {band} band")]
    UnknownStation {
        telescope: String,
        band: Band,
        station: String,
    },

    #[error("Telescope {telescope} doesn't offer the {model} beam model in the {band} band (available models are: {valid})")]
    BeamModelNotAvailable {
        telescope: String,
        band: Band,
        model: BeamModel,
        valid: String,
    },
}
