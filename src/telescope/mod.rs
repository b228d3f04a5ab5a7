// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Telescope metadata: bands, beam models, and the registry of telescopes
//! that supplies station geometry.

mod error;
mod registry;

pub use error::{ConfigError, LookupError};
pub use registry::{
    ArrayConfig, BandInfo, GeometrySource, StationGeometry, TelescopePlugin, TelescopeRegistry,
};

use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

lazy_static::lazy_static! {
    pub(crate) static ref BANDS_COMMA_SEPARATED: String = Band::iter().join(", ");

    pub(crate) static ref BEAM_MODELS_COMMA_SEPARATED: String = BeamModel::iter().join(", ");
}

/// Observing bands of LOFAR-like stations.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[allow(clippy::upper_case_acronyms)]
pub enum Band {
    /// Low-band antennas (10-90 MHz).
    LBA,

    /// High-band antennas (110-250 MHz).
    HBA,
}

impl Band {
    /// Parse a band name, complaining with the list of valid bands if it isn't
    /// recognised.
    pub fn parse(s: &str) -> Result<Band, ConfigError> {
        Band::from_str(s).map_err(|_| ConfigError::UnknownBand(s.to_string()))
    }
}

/// Families of antenna beam models.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum BeamModel {
    /// Hamaker-Arts polynomial coefficients.
    Hamaker,
}

impl BeamModel {
    /// Parse a beam-model name, complaining with the list of valid models if
    /// it isn't recognised.
    pub fn parse(s: &str) -> Result<BeamModel, ConfigError> {
        BeamModel::from_str(s).map_err(|_| ConfigError::UnknownBeamModel(s.to_string()))
    }
}

/// The kind of feed a station uses for a band. This is decided by the band
/// alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum StationFeed {
    /// Single dual-polarised dipoles.
    Lba,

    /// Tiles of dual-polarised bow-tie dipoles.
    Hba,
}

impl StationFeed {
    pub fn for_band(band: Band) -> StationFeed {
        match band {
            Band::LBA => StationFeed::Lba,
            Band::HBA => StationFeed::Hba,
        }
    }
}
