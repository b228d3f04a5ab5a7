// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use indexmap::IndexMap;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use super::DualPolarizationElement;
use crate::telescope::{Band, BeamModel, LookupError, StationFeed};

/// The beam model of a single station in a single band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationBeamModel {
    /// ITRF-like Cartesian position \[metres\].
    pub position: Vector3<f64>,

    /// Takes station-frame coordinates to global coordinates.
    pub rotation: Matrix3<f64>,

    pub feed: StationFeed,

    /// The station's element, with its outer frame being the global frame.
    pub feed_pattern: DualPolarizationElement,
}

impl StationBeamModel {
    /// Make a station model out of an element expressed in the station frame.
    /// The station gets its own copy of the element, rotated into the global
    /// frame.
    pub fn new(
        position: Vector3<f64>,
        rotation: Matrix3<f64>,
        feed: StationFeed,
        station_frame_element: &DualPolarizationElement,
    ) -> StationBeamModel {
        StationBeamModel {
            position,
            rotation,
            feed,
            feed_pattern: station_frame_element.rotated(&rotation),
        }
    }
}

/// The beam models of every station of a telescope in one band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelescopeBandModel {
    pub telescope: String,
    pub band: Band,
    pub beam_model: BeamModel,
    pub stations: IndexMap<String, StationBeamModel>,
}

impl TelescopeBandModel {
    pub fn station(&self, id: &str) -> Result<&StationBeamModel, LookupError> {
        self.stations
            .get(id)
            .ok_or_else(|| LookupError::UnknownStation {
                telescope: self.telescope.clone(),
                band: self.band,
                station: id.to_string(),
            })
    }
}
