// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Artifact {0:?} doesn't exist; has it been generated?")]
    Missing(PathBuf),

    #[error("Couldn't (de)serialise the JSON artifact {file:?}: {err}")]
    Json {
        file: PathBuf,
        err: serde_json::Error,
    },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
