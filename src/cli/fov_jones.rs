// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use clap::{ArgEnum, Parser};
use log::info;

use super::{GlobalArgs, StationbeamError};
use crate::{
    field::{evaluate_beam, parse_time, FieldQuery, JonesField, LmGrid, Pointing},
    telescope::{Band, BeamModel},
};

#[derive(ArgEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum FovAction {
    /// Write the Jones matrices as text.
    Print,
}

/// Evaluate a station's Jones matrices. Pointings in the AZEL or STN frames
/// sweep the default (l,m) grid of the station; J2000 pointings give a single
/// direction.
#[derive(Parser, Debug)]
pub struct FovJonesArgs {
    #[clap(arg_enum)]
    action: FovAction,

    /// The name of the telescope, as given in its configuration file.
    telescope: String,

    /// The band, e.g. LBA or HBA.
    band: String,

    /// The station ID, e.g. SE607.
    station: String,

    /// The beam model, e.g. Hamaker.
    beam_model: String,

    /// The UTC time of the observation, formatted as YYYY-MM-DDTHH:MM:SS.
    time: String,

    /// The pointing, formatted as "lon,lat,FRAME" with angles in radians and
    /// FRAME one of J2000, AZEL or STN.
    #[clap(allow_hyphen_values = true)]
    pointing: String,

    /// The frequency [Hz].
    freq_hz: f64,

    /// Write the results to this file instead of stdout. Each line holds the
    /// x and y direction cosines of a sample (in the pointing's frame),
    /// followed by its J00, J01, J10 and J11 values.
    #[clap(short, long)]
    output: Option<PathBuf>,
}

impl FovJonesArgs {
    pub(super) fn run(self, global: &GlobalArgs) -> Result<(), StationbeamError> {
        let band = Band::parse(&self.band)?;
        let beam_model = BeamModel::parse(&self.beam_model)?;
        let epoch = parse_time(&self.time)?;
        let pointing: Pointing = self.pointing.parse()?;
        let lm_grid = if pointing.frame.is_station() {
            Some(LmGrid::default())
        } else {
            None
        };

        let registry = global.registry()?;
        let query = FieldQuery {
            telescope: &self.telescope,
            station: &self.station,
            band,
            beam_model,
            freq_hz: self.freq_hz,
            pointing,
            epoch,
            lm_grid,
        };
        let field = evaluate_beam(&registry, &query)?;

        match self.action {
            FovAction::Print => match &self.output {
                Some(path) => {
                    let mut out = BufWriter::new(File::create(path)?);
                    write_jones_field(&field, &mut out)?;
                    out.flush()?;
                    info!("Wrote {} Jones matrices to {}", field.len(), path.display());
                }
                None => {
                    let stdout = std::io::stdout();
                    let mut out = stdout.lock();
                    write_jones_field(&field, &mut out)?;
                }
            },
        }

        Ok(())
    }
}

/// Write one line per sample: x, y, J00, J01, J10, J11, where x and y are the
/// first two components of r̂ in the field's frame.
fn write_jones_field<W: Write>(field: &JonesField, out: &mut W) -> std::io::Result<()> {
    let basis = field.frame_basis();
    for ((i, j), jones) in field.jones.indexed_iter() {
        let x = basis[(i, j, 0, 0)];
        let y = basis[(i, j, 1, 0)];
        writeln!(
            out,
            "{x}, {y}, {}, {}, {}, {}",
            jones[0], jones[1], jones[2], jones[3]
        )?;
    }
    Ok(())
}
