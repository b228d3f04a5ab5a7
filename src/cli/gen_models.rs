// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

use super::{GlobalArgs, StationbeamError};
use crate::{
    assemble::{gen_antmodel_files, save_telescope_band},
    telescope::Band,
};

/// Generate model artifacts from native Hamaker-Arts coefficient sources.
#[derive(Parser, Debug)]
pub struct GenModelsArgs {
    /// The name of the telescope, as given in its configuration file.
    telescope: String,

    /// The coefficient source (C++ header) of the low-band antennas.
    #[clap(long)]
    lba: Option<PathBuf>,

    /// The coefficient source (C++ header) of the high-band antennas.
    #[clap(long)]
    hba: Option<PathBuf>,
}

impl GenModelsArgs {
    pub(super) fn run(self, global: &GlobalArgs) -> Result<(), StationbeamError> {
        let GenModelsArgs {
            telescope,
            lba,
            hba,
        } = self;
        let inputs: Vec<(Band, PathBuf)> = [(Band::LBA, lba), (Band::HBA, hba)]
            .into_iter()
            .filter_map(|(band, source)| source.map(|s| (band, s)))
            .collect();
        if inputs.is_empty() {
            return Err(StationbeamError::Argument(
                "No coefficient sources were given; use --lba and/or --hba".to_string(),
            ));
        }

        let registry = global.registry()?;
        let plugin = registry.get(&telescope)?;
        let store = global.store();
        gen_antmodel_files(&store, &telescope, &inputs)?;

        let offered = plugin.get_bands();
        for (band, _) in &inputs {
            if !offered.contains(band) {
                warn!("Telescope {telescope} doesn't have the {band} band; not assembling it");
                continue;
            }
            for model in plugin.get_beammodels(*band)? {
                let path = save_telescope_band(
                    &registry,
                    &store,
                    &telescope,
                    &band.to_string(),
                    &model.to_string(),
                )?;
                info!("{telescope} {band} {model} model: {}", path.display());
            }
        }

        Ok(())
    }
}
