// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Generation of model artifacts: coefficient sets and base elements from
//! native coefficient sources, and telescope-band models from a base element
//! and station geometry.

mod error;

pub use error::AssembleError;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{debug, info, warn};
use nalgebra::Vector3;

use crate::{
    beam::{DualPolarizationElement, StationBeamModel, TelescopeBandModel},
    coeffs::{read_coefficient_file, ChannelSet, CoefficientSet},
    constants::POLCRDROT,
    io::{write_artifact, ArtifactStore},
    telescope::{
        Band, BeamModel, GeometrySource, LookupError, StationFeed, TelescopeRegistry,
    },
};

/// Parse a native coefficient source and tag it with the band's channels.
pub fn convert_cc_to_coefficient_set<P: AsRef<Path>>(
    source: P,
    band: Band,
) -> Result<CoefficientSet, AssembleError> {
    let source = source.as_ref();
    let record = read_coefficient_file(source)?;
    let expected_tag = band.to_string().to_lowercase();
    if record.band != expected_tag {
        warn!(
            "{} declares {} coefficients, but is being used for the {band} band",
            source.display(),
            record.band
        );
    }
    Ok(CoefficientSet::new(record, ChannelSet::for_band(band)))
}

/// Build the (unrotated) base element of a coefficient set.
pub fn convert_coefficient_set_to_dual_pol(set: CoefficientSet) -> DualPolarizationElement {
    DualPolarizationElement::from_coefficient_set(set)
}

/// For each band and its native coefficient source: make the coefficient set
/// artifact, then (from the stored artifact) the base element artifact of the
/// Hamaker model. Returns the paths of all written artifacts.
pub fn gen_antmodel_files<P: AsRef<Path>>(
    store: &ArtifactStore,
    telescope: &str,
    inputs: &[(Band, P)],
) -> Result<Vec<PathBuf>, AssembleError> {
    let mut written = Vec::with_capacity(inputs.len() * 2);
    for (band, source) in inputs {
        let band = *band;
        info!("Converting {} for {telescope} {band}", source.as_ref().display());
        let set = convert_cc_to_coefficient_set(source, band)?;
        written.push(store.save_coefficient_set(telescope, band, &set)?);

        let set = store.load_coefficient_set(telescope, band)?;
        let element = convert_coefficient_set_to_dual_pol(set);
        written.push(store.save_dual_pol(telescope, band, BeamModel::Hamaker, &element)?);
    }
    for path in &written {
        info!("Saved {}", path.display());
    }
    Ok(written)
}

/// Put a copy of `base` (an element in its build frame) into every station of
/// a telescope's band. The base element is rotated into the station frame
/// once, and then into each station's global orientation.
pub fn assemble_telescope_band<G: GeometrySource>(
    geometry: &G,
    base: &DualPolarizationElement,
    telescope: &str,
    band: Band,
    beam_model: BeamModel,
) -> Result<TelescopeBandModel, LookupError> {
    let station_frame = base.rotated(&POLCRDROT);
    let feed = StationFeed::for_band(band);
    let config = geometry.read_array_config(telescope, band)?;

    let mut stations = IndexMap::with_capacity(config.station_ids.len());
    for (i, id) in config.station_ids.iter().enumerate() {
        let position = Vector3::new(config.x[i], config.y[i], config.z[i]);
        let rotation = geometry.read_alignment(telescope, id, band)?;
        debug!("{telescope} {band}: adding station {id} ({feed} feed) at {position:?}");
        stations.insert(
            id.clone(),
            StationBeamModel::new(position, rotation, feed, &station_frame),
        );
    }

    Ok(TelescopeBandModel {
        telescope: telescope.to_string(),
        band,
        beam_model,
        stations,
    })
}

/// Assemble the model of a telescope's band from the stored base element and
/// write it where the telescope keeps its models. `band` and `beam_model` are
/// names, and are validated here.
pub fn save_telescope_band(
    registry: &TelescopeRegistry,
    store: &ArtifactStore,
    telescope: &str,
    band: &str,
    beam_model: &str,
) -> Result<PathBuf, AssembleError> {
    let band = Band::parse(band)?;
    let beam_model = BeamModel::parse(beam_model)?;
    let plugin = registry.get(telescope)?;
    plugin.check_beammodel(band, beam_model)?;

    let base = store.load_dual_pol(telescope, band, beam_model)?;
    let model = assemble_telescope_band(registry, &base, telescope, band, beam_model)?;
    debug!(
        "{telescope} {band} {beam_model}: assembled {} stations",
        model.stations.len()
    );

    let path = plugin.model_path(band, beam_model);
    write_artifact(&path, &model)?;
    info!("Saved {}", path.display());
    Ok(path)
}
