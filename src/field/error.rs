// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::{
    io::ArtifactError,
    telescope::{ConfigError, LookupError},
};

#[derive(Error, Debug)]
pub enum FieldError {
    #[error("Couldn't parse pointing '{0}'; expected 'lon,lat,FRAME' with angles in radians")]
    BadPointing(String),

    #[error("Couldn't parse time '{0}'; expected YYYY-MM-DDTHH:MM:SS (UTC)")]
    BadTime(String),

    #[error("The l grid has shape {l:?} but the m grid has shape {m:?}")]
    GridShape { l: (usize, usize), m: (usize, usize) },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}
