// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::{
    coeffs::CoeffParseError,
    io::ArtifactError,
    telescope::{ConfigError, LookupError},
};

#[derive(Error, Debug)]
pub enum AssembleError {
    #[error(transparent)]
    Parse(#[from] CoeffParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}
