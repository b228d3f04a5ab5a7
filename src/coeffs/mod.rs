// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Hamaker-Arts coefficients: the native-format parser, the parsed
//! [`CoefficientRecord`] and the channel-tagged [`CoefficientSet`] that is
//! persisted as an artifact.

mod error;
mod parse;

pub use error::{ChannelSetError, CoeffParseError};
pub use parse::{parse_coefficients, read_coefficient_file};

use log::debug;
use marlu::c64;
use ndarray::Array4;
use serde::{Deserialize, Serialize};
use vec1::{vec1, Vec1};

use crate::{
    constants::{NR_CHANNELS, SAMPFREQ},
    telescope::Band,
};

/// Hamaker-Arts polynomial coefficients of a dual-polarised antenna, as parsed
/// from a native source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientRecord {
    /// The centre of the frequency interval the model is valid for \[Hz\].
    pub freq_center: f64,

    /// The half-width of the frequency interval the model is valid for \[Hz\].
    /// Frequencies are normalised with `(freq - freq_center) / freq_range`.
    pub freq_range: f64,

    /// The coefficients. The dimensions are (harmonic, power of theta, power of
    /// normalised frequency, polarisation). The last dimension always has
    /// length [`crate::constants::NR_POLS`].
    pub coeffs: Array4<c64>,

    /// The identifier prefix of the coefficient array, e.g. "default_".
    pub version: String,

    /// The band tag of the coefficient array, i.e. "lba" or "hba".
    pub band: String,

    /// The number of elements the coefficient array declared.
    pub num_elements: usize,
}

/// An ordered, non-empty list of frequency channels \[Hz\].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct ChannelSet(Vec1<f64>);

impl TryFrom<Vec<f64>> for ChannelSet {
    type Error = ChannelSetError;

    fn try_from(freqs_hz: Vec<f64>) -> Result<ChannelSet, ChannelSetError> {
        ChannelSet::new(freqs_hz)
    }
}

#[allow(clippy::len_without_is_empty)]
impl ChannelSet {
    /// Make a new channel set. The frequencies must be strictly increasing.
    pub fn new(freqs_hz: Vec<f64>) -> Result<ChannelSet, ChannelSetError> {
        let freqs = Vec1::try_from_vec(freqs_hz).map_err(|_| ChannelSetError::Empty)?;
        if let Some((index, pair)) = freqs
            .windows(2)
            .enumerate()
            .find(|(_, pair)| pair[1] <= pair[0])
        {
            return Err(ChannelSetError::NotIncreasing {
                index: index + 1,
                freq: pair[1],
            });
        }
        Ok(ChannelSet(freqs))
    }

    /// The nominal channels of a band. The LBA uses the first Nyquist zone
    /// ([`NR_CHANNELS`] channels over [0, [`SAMPFREQ`])). The HBA concatenates
    /// the second and third Nyquist zones (100-200 MHz and 200-300 MHz) into a
    /// single axis of `2 * NR_CHANNELS` channels over [`SAMPFREQ`, `3 *
    /// SAMPFREQ`).
    pub fn for_band(band: Band) -> ChannelSet {
        let (start, stop, num_chans) = match band {
            Band::LBA => (0.0, SAMPFREQ, NR_CHANNELS),
            Band::HBA => (SAMPFREQ, 3.0 * SAMPFREQ, 2 * NR_CHANNELS),
        };
        let width = (stop - start) / num_chans as f64;
        let mut freqs = vec1![start];
        for i in 1..num_chans {
            freqs.push(start + width * i as f64);
        }
        debug!(
            "{band} channels: {num_chans} from {start} Hz in steps of {width} Hz"
        );
        ChannelSet(freqs)
    }

    pub fn as_slice(&self) -> &[f64] {
        self.0.as_slice()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first(&self) -> f64 {
        *self.0.first()
    }

    pub fn last(&self) -> f64 {
        *self.0.last()
    }
}

/// A [`CoefficientRecord`] along with the frequency channels it will be used
/// for. This is what gets persisted for a (telescope, band).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientSet {
    pub record: CoefficientRecord,
    pub channels: ChannelSet,
}

impl CoefficientSet {
    pub fn new(record: CoefficientRecord, channels: ChannelSet) -> CoefficientSet {
        CoefficientSet { record, channels }
    }
}
