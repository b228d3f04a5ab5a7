// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The telescope registry. Each telescope is described by a configuration
//! file (toml or json) listing its bands, the beam models available for each
//! band and the geometry of every station.
//!
//! A registry is constructed explicitly (either telescope by telescope or from
//! a directory of configuration files) and then only queried.

use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
    str::FromStr,
};

use indexmap::IndexMap;
use itertools::Itertools;
use log::{debug, trace, warn};
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use super::{Band, BeamModel, ConfigError, LookupError};

/// Where a station is and how it is oriented.
#[derive(Debug, Clone, PartialEq)]
pub struct StationGeometry {
    /// The station position in ITRF-like Cartesian coordinates \[metres\].
    pub position: Vector3<f64>,

    /// The diameter of the station \[metres\].
    pub diameter: f64,

    /// The rotation taking station-local coordinates to global (ITRF)
    /// coordinates, i.e. `r_itrf = rotation * r_local`.
    pub rotation: Matrix3<f64>,
}

/// The beam models and stations of one band of a telescope.
#[derive(Debug, Clone, Default)]
pub struct BandInfo {
    pub beam_models: Vec<BeamModel>,
    pub stations: IndexMap<String, StationGeometry>,
}

/// Everything known about a single telescope.
#[derive(Debug, Clone)]
pub struct TelescopePlugin {
    name: String,

    /// The directory holding the assembled telescope-band beam models.
    data_dir: PathBuf,

    bands: IndexMap<Band, BandInfo>,
}

impl TelescopePlugin {
    pub fn new<S: Into<String>, P: Into<PathBuf>>(name: S, data_dir: P) -> TelescopePlugin {
        TelescopePlugin {
            name: name.into(),
            data_dir: data_dir.into(),
            bands: IndexMap::new(),
        }
    }

    /// Declare that this telescope has `band`, with the given beam models.
    pub fn add_band(&mut self, band: Band, beam_models: Vec<BeamModel>) {
        self.bands.entry(band).or_default().beam_models = beam_models;
    }

    /// Add a station to a band. The band is created if it doesn't exist yet.
    pub fn add_station<S: Into<String>>(
        &mut self,
        band: Band,
        id: S,
        geometry: StationGeometry,
    ) -> Result<(), ConfigError> {
        let id = id.into();
        let stations = &mut self.bands.entry(band).or_default().stations;
        if stations.contains_key(&id) {
            return Err(ConfigError::DuplicateStation {
                telescope: self.name.clone(),
                band,
                station: id,
            });
        }
        trace!("{} {band}: added station {id}", self.name);
        stations.insert(id, geometry);
        Ok(())
    }

    /// Read a telescope configuration file. Relative data directories are
    /// relative to the directory containing the file.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<TelescopePlugin, ConfigError> {
        let file = file.as_ref();
        debug!("Attempting to parse telescope configuration file {}", file.display());

        let file_type = file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ConfigFileType::from_str(&e).ok());
        let mut contents = String::new();
        let config: TelescopeConfigFile = match file_type {
            Some(ConfigFileType::Toml) => {
                File::open(file)?.read_to_string(&mut contents)?;
                toml::from_str(&contents).map_err(|err| ConfigError::Decode {
                    kind: "toml",
                    file: file.to_path_buf(),
                    err: err.to_string(),
                })?
            }
            Some(ConfigFileType::Json) => {
                File::open(file)?.read_to_string(&mut contents)?;
                serde_json::from_str(&contents).map_err(|err| ConfigError::Decode {
                    kind: "json",
                    file: file.to_path_buf(),
                    err: err.to_string(),
                })?
            }
            None => {
                return Err(ConfigError::BadExtension {
                    file: file.to_path_buf(),
                })
            }
        };

        let base_dir = file.parent().unwrap_or_else(|| Path::new("."));
        config.into_plugin(base_dir)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn get_bands(&self) -> Vec<Band> {
        self.bands.keys().copied().collect()
    }

    pub fn band(&self, band: Band) -> Result<&BandInfo, LookupError> {
        self.bands
            .get(&band)
            .ok_or_else(|| LookupError::BandNotAvailable {
                telescope: self.name.clone(),
                band,
                valid: self.bands.keys().join(", "),
            })
    }

    pub fn get_stations(&self, band: Band) -> Result<Vec<&str>, LookupError> {
        Ok(self.band(band)?.stations.keys().map(|s| s.as_str()).collect())
    }

    pub fn get_beammodels(&self, band: Band) -> Result<&[BeamModel], LookupError> {
        Ok(&self.band(band)?.beam_models)
    }

    pub fn station(&self, band: Band, station: &str) -> Result<&StationGeometry, LookupError> {
        self.band(band)?
            .stations
            .get(station)
            .ok_or_else(|| LookupError::UnknownStation {
                telescope: self.name.clone(),
                band,
                station: station.to_string(),
            })
    }

    /// Check that this telescope offers `model` for `band`.
    pub fn check_beammodel(&self, band: Band, model: BeamModel) -> Result<(), LookupError> {
        let models = self.get_beammodels(band)?;
        if models.contains(&model) {
            Ok(())
        } else {
            Err(LookupError::BeamModelNotAvailable {
                telescope: self.name.clone(),
                band,
                model,
                valid: models.iter().join(", "),
            })
        }
    }

    /// The directory and file name of the assembled beam model for a band and
    /// beam model.
    pub fn telbndmdl_dir_file(&self, band: Band, model: BeamModel) -> (PathBuf, String) {
        (
            self.data_dir.clone(),
            format!("{}_{band}_{model}.json", self.name),
        )
    }

    /// The path of the assembled beam model for a band and beam model.
    pub fn model_path(&self, band: Band, model: BeamModel) -> PathBuf {
        let (dir, file) = self.telbndmdl_dir_file(band, model);
        dir.join(file)
    }
}

/// The known telescopes.
#[derive(Debug, Clone, Default)]
pub struct TelescopeRegistry {
    plugins: IndexMap<String, TelescopePlugin>,
}

impl TelescopeRegistry {
    pub fn new() -> TelescopeRegistry {
        TelescopeRegistry::default()
    }

    /// Add a telescope. A telescope with the same name is replaced.
    pub fn register(&mut self, plugin: TelescopePlugin) {
        if let Some(old) = self.plugins.insert(plugin.name.clone(), plugin) {
            warn!("Telescope {} was registered twice; using the latest", old.name);
        }
    }

    /// Build a registry from every toml and json file in `dir`.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<TelescopeRegistry, ConfigError> {
        let dir = dir.as_ref();
        let mut registry = TelescopeRegistry::new();
        for ext in ["toml", "json"] {
            let pattern = dir.join(format!("*.{ext}"));
            let paths = glob::glob(&pattern.to_string_lossy())
                .map_err(|e| ConfigError::Glob(e.to_string()))?;
            for path in paths {
                let path = path.map_err(|e| ConfigError::Glob(e.to_string()))?;
                registry.register(TelescopePlugin::from_file(path)?);
            }
        }
        debug!(
            "Telescopes found in {}: {}",
            dir.display(),
            registry.plugins.keys().join(", ")
        );
        Ok(registry)
    }

    pub fn get(&self, telescope: &str) -> Result<&TelescopePlugin, LookupError> {
        self.plugins
            .get(telescope)
            .ok_or_else(|| LookupError::UnknownTelescope {
                name: telescope.to_string(),
                valid: self.plugins.keys().join(", "),
            })
    }

    pub fn telescopes(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(|s| s.as_str())
    }
}

/// Station positions and names of a band of a telescope, in the order the
/// telescope lists them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayConfig {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub diameters: Vec<f64>,
    pub station_ids: Vec<String>,
}

/// A source of station geometry.
pub trait GeometrySource {
    /// Get the positions, diameters and IDs of all stations of a telescope's
    /// band.
    fn read_array_config(&self, telescope: &str, band: Band) -> Result<ArrayConfig, LookupError>;

    /// Get the rotation taking a station's local coordinates to global
    /// coordinates.
    fn read_alignment(
        &self,
        telescope: &str,
        station: &str,
        band: Band,
    ) -> Result<Matrix3<f64>, LookupError>;
}

impl GeometrySource for TelescopeRegistry {
    fn read_array_config(&self, telescope: &str, band: Band) -> Result<ArrayConfig, LookupError> {
        let info = self.get(telescope)?.band(band)?;
        let mut config = ArrayConfig::default();
        for (id, geometry) in &info.stations {
            config.x.push(geometry.position.x);
            config.y.push(geometry.position.y);
            config.z.push(geometry.position.z);
            config.diameters.push(geometry.diameter);
            config.station_ids.push(id.clone());
        }
        Ok(config)
    }

    fn read_alignment(
        &self,
        telescope: &str,
        station: &str,
        band: Band,
    ) -> Result<Matrix3<f64>, LookupError> {
        Ok(self.get(telescope)?.station(band, station)?.rotation)
    }
}

#[derive(Debug, Display, EnumIter, EnumString)]
enum ConfigFileType {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

#[derive(Debug, Serialize, Deserialize)]
struct TelescopeConfigFile {
    name: String,

    /// Relative to the configuration file. Defaults to a directory named after
    /// the telescope.
    #[serde(default)]
    data_dir: Option<PathBuf>,

    bands: IndexMap<String, BandConfigFile>,
}

#[derive(Debug, Serialize, Deserialize)]
struct BandConfigFile {
    #[serde(default)]
    beam_models: Vec<String>,

    #[serde(default)]
    stations: Vec<StationConfigFile>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StationConfigFile {
    id: String,

    position: [f64; 3],

    #[serde(default)]
    diameter: f64,

    /// Row major.
    rotation: [[f64; 3]; 3],
}

impl TelescopeConfigFile {
    fn into_plugin(self, base_dir: &Path) -> Result<TelescopePlugin, ConfigError> {
        let data_dir = base_dir.join(self.data_dir.unwrap_or_else(|| PathBuf::from(&self.name)));
        let mut plugin = TelescopePlugin::new(self.name, data_dir);
        for (band_name, band_config) in self.bands {
            let band = Band::parse(&band_name)?;
            let beam_models = band_config
                .beam_models
                .iter()
                .map(|m| BeamModel::parse(m))
                .collect::<Result<Vec<_>, _>>()?;
            plugin.add_band(band, beam_models);

            for StationConfigFile {
                id,
                position,
                diameter,
                rotation,
            } in band_config.stations
            {
                let rotation = Matrix3::from_fn(|r, c| rotation[r][c]);
                plugin.add_station(
                    band,
                    id,
                    StationGeometry {
                        position: Vector3::from(position),
                        diameter,
                        rotation,
                    },
                )?;
            }
        }
        Ok(plugin)
    }
}
