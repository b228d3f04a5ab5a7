// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all stationbeam-related errors. This should be the *only*
//! error enum that is publicly visible.

use thiserror::Error;

use crate::{
    assemble::AssembleError,
    coeffs::CoeffParseError,
    field::FieldError,
    io::ArtifactError,
    telescope::{ConfigError, LookupError},
};

/// The *only* publicly visible error from stationbeam. Each error message
/// should include a hint, unless it's "generic".
#[derive(Error, Debug)]
pub enum StationbeamError {
    /// A malformed Hamaker-Arts coefficient source.
    #[error("{0}\n\nCoefficient sources need frequency-center, frequency-range, coefficient-shape and coefficient-array declarations")]
    Parse(String),

    /// An unrecognised name or a malformed telescope configuration.
    #[error("{0}")]
    Config(String),

    /// Something asked for isn't available.
    #[error("{0}\n\nCheck the telescope configuration files (see --telescopes-dir)")]
    Lookup(String),

    /// A model artifact couldn't be read or written.
    #[error("{0}\n\nModel artifacts are made with 'stationbeam gen-models' and 'stationbeam assemble'")]
    Artifact(String),

    /// A malformed command-line argument.
    #[error("{0}")]
    Argument(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<CoeffParseError> for StationbeamError {
    fn from(e: CoeffParseError) -> Self {
        match e {
            CoeffParseError::IO(e) => Self::from(e),
            _ => Self::Parse(e.to_string()),
        }
    }
}

impl From<ConfigError> for StationbeamError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::IO(e) => Self::from(e),
            _ => Self::Config(e.to_string()),
        }
    }
}

impl From<LookupError> for StationbeamError {
    fn from(e: LookupError) -> Self {
        Self::Lookup(e.to_string())
    }
}

impl From<ArtifactError> for StationbeamError {
    fn from(e: ArtifactError) -> Self {
        Self::Artifact(e.to_string())
    }
}

impl From<AssembleError> for StationbeamError {
    fn from(e: AssembleError) -> Self {
        match e {
            AssembleError::Parse(e) => Self::from(e),
            AssembleError::Config(e) => Self::from(e),
            AssembleError::Lookup(e) => Self::from(e),
            AssembleError::Artifact(e) => Self::from(e),
        }
    }
}

impl From<FieldError> for StationbeamError {
    fn from(e: FieldError) -> Self {
        match e {
            FieldError::BadPointing(_) | FieldError::BadTime(_) | FieldError::GridShape { .. } => {
                Self::Argument(e.to_string())
            }
            FieldError::Config(e) => Self::from(e),
            FieldError::Lookup(e) => Self::from(e),
            FieldError::Artifact(e) => Self::from(e),
        }
    }
}

impl From<std::io::Error> for StationbeamError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
