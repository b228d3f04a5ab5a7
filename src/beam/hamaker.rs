// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Evaluation of Hamaker-Arts polynomial antenna models.

use log::warn;
use marlu::{c64, Jones};
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};

use crate::coeffs::{ChannelSet, CoefficientRecord, CoefficientSet};

/// The polarimetric voltage response of a dual-polarised antenna, modelled
/// with Hamaker-Arts coefficients.
///
/// The response is a sum over harmonics `k` of polynomials in the angle from
/// the antenna's z axis (theta) and normalised frequency, multiplied by
/// `cos(κφ)`/`sin(κφ)` terms where `κ = (-1)^k (2k + 1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HamakerPolarimeter {
    freq_center: f64,
    freq_range: f64,

    /// (harmonic, power of theta, power of normalised frequency, polarisation)
    coeffs: Array4<c64>,

    /// The channels this model was generated for, if known.
    channels: Option<ChannelSet>,
}

impl HamakerPolarimeter {
    pub fn from_record(record: CoefficientRecord) -> HamakerPolarimeter {
        HamakerPolarimeter {
            freq_center: record.freq_center,
            freq_range: record.freq_range,
            coeffs: record.coeffs,
            channels: None,
        }
    }

    pub fn from_coefficient_set(set: CoefficientSet) -> HamakerPolarimeter {
        HamakerPolarimeter {
            channels: Some(set.channels),
            ..HamakerPolarimeter::from_record(set.record)
        }
    }

    pub fn channels(&self) -> Option<&ChannelSet> {
        self.channels.as_ref()
    }

    pub fn num_harmonics(&self) -> usize {
        self.coeffs.len_of(Axis(0))
    }

    /// Complain if `freq_hz` lies outside the channels this model was made
    /// for. The model is still usable there. Returns true if the frequency is
    /// inside.
    pub fn check_freq(&self, freq_hz: f64) -> bool {
        match &self.channels {
            Some(chans) if freq_hz < chans.first() || freq_hz > chans.last() => {
                warn!(
                    "Frequency {freq_hz} Hz is outside the model's channels ({} - {} Hz)",
                    chans.first(),
                    chans.last()
                );
                false
            }
            _ => true,
        }
    }

    /// Get the Jones matrix of the antenna at a frequency \[Hz\] in the
    /// direction (`theta`, `phi`) \[radians\] of the antenna's own frame. Rows
    /// are the two feeds, columns the theta and phi components of the incident
    /// field.
    pub fn jones(&self, freq_hz: f64, theta: f64, phi: f64) -> Jones<f64> {
        let freqn = (freq_hz - self.freq_center) / self.freq_range;
        let mut j = [c64::default(); 4];
        for (k, harmonic) in self.coeffs.outer_iter().enumerate() {
            let p0 = horner2(harmonic.index_axis(Axis(2), 0), theta, freqn);
            let p1 = horner2(harmonic.index_axis(Axis(2), 1), theta, freqn);

            let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
            let kappa = sign * (2 * k + 1) as f64;
            let (s, c) = (kappa * phi).sin_cos();
            j[0] += p0 * c;
            j[1] += -p1 * s;
            j[2] += p0 * s;
            j[3] += p1 * c;
        }
        Jones::from(j)
    }
}

/// Evaluate `Σ_i x^i Σ_j y^j coeffs[i, j]` with Horner's rule in both
/// variables.
fn horner2(coeffs: ArrayView2<c64>, x: f64, y: f64) -> c64 {
    coeffs
        .outer_iter()
        .rev()
        .fold(c64::default(), |acc_x, row| {
            let p_y = row.iter().rev().fold(c64::default(), |acc_y, &c| acc_y * y + c);
            acc_x * x + p_y
        })
}
