// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::Parser;

use super::{GlobalArgs, StationbeamError};
use crate::{assemble::save_telescope_band, telescope::BeamModel};

/// Assemble a telescope-band beam model.
#[derive(Parser, Debug)]
pub struct AssembleArgs {
    /// The name of the telescope, as given in its configuration file.
    telescope: String,

    /// The band, e.g. LBA or HBA.
    band: String,

    /// The beam model.
    #[clap(default_value_t = BeamModel::Hamaker.to_string())]
    beam_model: String,
}

impl AssembleArgs {
    pub(super) fn run(self, global: &GlobalArgs) -> Result<(), StationbeamError> {
        let registry = global.registry()?;
        save_telescope_band(
            &registry,
            &global.store(),
            &self.telescope,
            &self.band,
            &self.beam_model,
        )?;
        Ok(())
    }
}
