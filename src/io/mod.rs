// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reading and writing model artifacts.
//!
//! All artifacts are JSON. Intermediate artifacts (coefficient sets and base
//! dual-polarised elements) live in an [`ArtifactStore`]; the final
//! telescope-band models live wherever the telescope says they do.

mod error;

pub use error::ArtifactError;

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use log::{debug, trace};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    beam::DualPolarizationElement,
    coeffs::CoefficientSet,
    constants::TELEDATADIR,
    telescope::{Band, BeamModel},
};

/// A directory of intermediate model artifacts, keyed by telescope, band and
/// beam model.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl Default for ArtifactStore {
    fn default() -> Self {
        ArtifactStore::new(TELEDATADIR)
    }
}

impl ArtifactStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> ArtifactStore {
        ArtifactStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn coefficient_set_path(&self, telescope: &str, band: Band) -> PathBuf {
        self.root.join(format!("HA_{telescope}_elresp_{band}.json"))
    }

    pub fn dual_pol_path(&self, telescope: &str, band: Band, model: BeamModel) -> PathBuf {
        self.root
            .join(format!("DP_{telescope}_model_{band}_{model}.json"))
    }

    pub fn save_coefficient_set(
        &self,
        telescope: &str,
        band: Band,
        set: &CoefficientSet,
    ) -> Result<PathBuf, ArtifactError> {
        let path = self.coefficient_set_path(telescope, band);
        write_artifact(&path, set)?;
        Ok(path)
    }

    pub fn load_coefficient_set(
        &self,
        telescope: &str,
        band: Band,
    ) -> Result<CoefficientSet, ArtifactError> {
        read_artifact(self.coefficient_set_path(telescope, band))
    }

    pub fn save_dual_pol(
        &self,
        telescope: &str,
        band: Band,
        model: BeamModel,
        element: &DualPolarizationElement,
    ) -> Result<PathBuf, ArtifactError> {
        let path = self.dual_pol_path(telescope, band, model);
        write_artifact(&path, element)?;
        Ok(path)
    }

    pub fn load_dual_pol(
        &self,
        telescope: &str,
        band: Band,
        model: BeamModel,
    ) -> Result<DualPolarizationElement, ArtifactError> {
        read_artifact(self.dual_pol_path(telescope, band, model))
    }
}

/// Serialise `value` as JSON into `path`, creating parent directories as
/// needed. Any existing file is overwritten.
pub fn write_artifact<T: Serialize, P: AsRef<Path>>(
    path: P,
    value: &T,
) -> Result<(), ArtifactError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    trace!("Writing artifact {}", path.display());
    let mut f = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut f, value).map_err(|err| ArtifactError::Json {
        file: path.to_path_buf(),
        err,
    })?;
    f.flush()?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Deserialise a JSON artifact from `path`.
pub fn read_artifact<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, ArtifactError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ArtifactError::Missing(path.to_path_buf()));
    }
    debug!("Reading artifact {}", path.display());
    let f = BufReader::new(File::open(path)?);
    serde_json::from_reader(f).map_err(|err| ArtifactError::Json {
        file: path.to_path_buf(),
        err,
    })
}
