// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Evaluation of station beam models over a field of view.
//!
//! Three frames are involved. The station frame has x and y in the station
//! plane and z along the station normal; azimuths are measured from +y towards
//! +x. The global frame is ITRF-like; a station's rotation takes station-frame
//! vectors into it. The sky frame is J2000 Cartesian, related to the global
//! frame by a rotation through the Greenwich mean sidereal time (precession
//! and nutation are ignored).

mod error;

pub use error::FieldError;

use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime, Timelike};
use hifitime::{Duration, Epoch};
use itertools::Itertools;
use log::{debug, trace};
use marlu::{precession::get_lmst, Jones};
use nalgebra::{Matrix3, Vector3};
use ndarray::prelude::*;
use rayon::prelude::*;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    beam::{StationBeamModel, TelescopeBandModel},
    constants::DEFAULT_LM_GRID_SIZE,
    io::read_artifact,
    math::{
        azel_to_cart, linspace, lm_to_cart, radec_to_cart, rot_z, spherical_basis,
    },
    telescope::{Band, BeamModel, ConfigError, TelescopeRegistry},
};

/// The reference frame of a pointing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
#[allow(clippy::upper_case_acronyms)]
pub enum RefFrame {
    /// Right ascension and declination.
    J2000,

    /// Azimuth and elevation in the station frame.
    AZEL,

    /// The station frame itself. Grids are always in this frame.
    STN,
}

impl RefFrame {
    pub fn parse(s: &str) -> Result<RefFrame, ConfigError> {
        RefFrame::from_str(s).map_err(|_| ConfigError::UnknownFrame {
            got: s.to_string(),
            valid: RefFrame::iter().join(", "),
        })
    }

    pub fn is_station(self) -> bool {
        matches!(self, RefFrame::AZEL | RefFrame::STN)
    }
}

/// A direction: longitude-like and latitude-like angles \[radians\] in a
/// reference frame, i.e. (RA, Dec) for [`RefFrame::J2000`] and (az, el)
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointing {
    pub lon: f64,
    pub lat: f64,
    pub frame: RefFrame,
}

impl FromStr for Pointing {
    type Err = FieldError;

    /// Parse "lon,lat,FRAME", e.g. "0.5,1.1,J2000".
    fn from_str(s: &str) -> Result<Pointing, FieldError> {
        let bad = || FieldError::BadPointing(s.to_string());
        let (lon, lat, frame) = s
            .split(',')
            .map(|part| part.trim())
            .collect_tuple()
            .ok_or_else(bad)?;
        Ok(Pointing {
            lon: lon.parse().map_err(|_| bad())?,
            lat: lat.parse().map_err(|_| bad())?,
            frame: RefFrame::parse(frame)?,
        })
    }
}

/// Parse a UTC time formatted like "2024-03-20T12:00:00".
pub fn parse_time(s: &str) -> Result<Epoch, FieldError> {
    let dt = NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%dT%H:%M:%S")
        .map_err(|_| FieldError::BadTime(s.to_string()))?;
    Ok(Epoch::from_gregorian_utc(
        dt.year(),
        dt.month() as u8,
        dt.day() as u8,
        dt.hour() as u8,
        dt.minute() as u8,
        dt.second() as u8,
        0,
    ))
}

/// A rectangular grid of station-frame direction cosines. Both arrays have
/// the shape of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct LmGrid {
    l: Array2<f64>,
    m: Array2<f64>,
}

impl Default for LmGrid {
    fn default() -> Self {
        LmGrid::square(DEFAULT_LM_GRID_SIZE)
    }
}

impl LmGrid {
    pub fn new(l: Array2<f64>, m: Array2<f64>) -> Result<LmGrid, FieldError> {
        if l.dim() != m.dim() {
            return Err(FieldError::GridShape {
                l: l.dim(),
                m: m.dim(),
            });
        }
        Ok(LmGrid { l, m })
    }

    /// `size` x `size` samples covering [-1, 1] in both l and m (edges
    /// included). l varies along the second axis, m along the first.
    pub fn square(size: usize) -> LmGrid {
        let samples = linspace(-1.0, 1.0, size, true);
        LmGrid {
            l: Array2::from_shape_fn((size, size), |(_, j)| samples[j]),
            m: Array2::from_shape_fn((size, size), |(i, _)| samples[i]),
        }
    }

    /// A grid with a single sample.
    pub fn single(l: f64, m: f64) -> LmGrid {
        LmGrid {
            l: Array2::from_elem((1, 1), l),
            m: Array2::from_elem((1, 1), m),
        }
    }

    pub fn dim(&self) -> (usize, usize) {
        self.l.dim()
    }

    pub fn l(&self) -> ArrayView2<f64> {
        self.l.view()
    }

    pub fn m(&self) -> ArrayView2<f64> {
        self.m.view()
    }
}

/// The directions a station is evaluated at.
#[derive(Debug, Clone)]
pub enum FieldDirections {
    Point(Pointing),
    Grid(LmGrid),
}

/// The response of a station in one direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSample {
    /// Expressed in the basis of the query's frame.
    pub jones: Jones<f64>,

    /// Columns r̂, θ̂, φ̂ in station-frame coordinates.
    pub station_basis: Matrix3<f64>,

    /// Columns r̂, θ̂, φ̂ in J2000 coordinates.
    pub sky_basis: Matrix3<f64>,
}

/// Station responses over a set of directions. Point evaluations have shape
/// (1, 1). Bases have shape (grid rows, grid columns, 3, 3), with the last
/// axis selecting r̂, θ̂ or φ̂.
#[derive(Debug, Clone)]
pub struct JonesField {
    /// The frame whose basis the Jones matrices are expressed in.
    pub frame: RefFrame,

    pub jones: Array2<Jones<f64>>,
    pub station_basis: Array4<f64>,
    pub sky_basis: Array4<f64>,
}

impl JonesField {
    fn new(frame: RefFrame, samples: Vec<FieldSample>, dim: (usize, usize)) -> JonesField {
        let (rows, cols) = dim;
        let mut field = JonesField {
            frame,
            jones: Array2::default(dim),
            station_basis: Array4::zeros((rows, cols, 3, 3)),
            sky_basis: Array4::zeros((rows, cols, 3, 3)),
        };
        for (index, sample) in samples.into_iter().enumerate() {
            let (i, j) = (index / cols, index % cols);
            field.jones[(i, j)] = sample.jones;
            for r in 0..3 {
                for c in 0..3 {
                    field.station_basis[(i, j, r, c)] = sample.station_basis[(r, c)];
                    field.sky_basis[(i, j, r, c)] = sample.sky_basis[(r, c)];
                }
            }
        }
        field
    }

    pub fn dim(&self) -> (usize, usize) {
        self.jones.dim()
    }

    pub fn len(&self) -> usize {
        self.jones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jones.is_empty()
    }

    pub fn sample(&self, i: usize, j: usize) -> FieldSample {
        FieldSample {
            jones: self.jones[(i, j)],
            station_basis: Matrix3::from_fn(|r, c| self.station_basis[(i, j, r, c)]),
            sky_basis: Matrix3::from_fn(|r, c| self.sky_basis[(i, j, r, c)]),
        }
    }

    /// The bases of the frame the Jones matrices are expressed in.
    pub fn frame_basis(&self) -> ArrayView4<f64> {
        if self.frame.is_station() {
            self.station_basis.view()
        } else {
            self.sky_basis.view()
        }
    }
}

/// The rotations between a station's frames at some time.
struct Frames<'a> {
    station: &'a StationBeamModel,

    /// Takes ITRF coordinates to J2000 coordinates.
    itrf_to_j2000: Matrix3<f64>,
}

impl<'a> Frames<'a> {
    fn new(station: &'a StationBeamModel, epoch: Epoch) -> Frames<'a> {
        let gmst = get_lmst(0.0, epoch, Duration::from_seconds(0.0));
        trace!("GMST at {epoch}: {gmst} rad");
        Frames {
            station,
            itrf_to_j2000: rot_z(gmst),
        }
    }

    /// Evaluate along a station-frame direction; the Jones matrix is
    /// expressed in the station-frame spherical basis.
    fn from_station(&self, freq_hz: f64, r_stn: &Vector3<f64>) -> FieldSample {
        let station_basis = spherical_basis(r_stn);
        let rotation = &self.station.rotation;
        let jones = self
            .station
            .feed_pattern
            .jones_in_basis(freq_hz, &(rotation * station_basis));
        let r_j2000 = self.itrf_to_j2000 * rotation * r_stn;
        FieldSample {
            jones,
            station_basis,
            sky_basis: spherical_basis(&r_j2000),
        }
    }

    /// Evaluate along the J2000 direction (`ra`, `dec`); the Jones matrix is
    /// expressed in the J2000 spherical basis.
    fn from_j2000(&self, freq_hz: f64, ra: f64, dec: f64) -> FieldSample {
        let sky_basis = spherical_basis(&radec_to_cart(ra, dec));
        let itrf_basis = self.itrf_to_j2000.transpose() * sky_basis;
        let jones = self
            .station
            .feed_pattern
            .jones_in_basis(freq_hz, &itrf_basis);
        let r_stn = self.station.rotation.transpose() * itrf_basis.column(0);
        FieldSample {
            jones,
            station_basis: spherical_basis(&r_stn),
            sky_basis,
        }
    }
}

/// Evaluate a station's beam at a frequency \[Hz\] and time. A grid is always
/// in the station frame; points outside the unit circle give NaNs.
pub fn evaluate_station(
    station: &StationBeamModel,
    freq_hz: f64,
    epoch: Epoch,
    directions: &FieldDirections,
) -> JonesField {
    station.feed_pattern.polarimeter().check_freq(freq_hz);
    let frames = Frames::new(station, epoch);
    match directions {
        FieldDirections::Point(Pointing { lon, lat, frame }) => {
            let sample = match frame {
                RefFrame::J2000 => frames.from_j2000(freq_hz, *lon, *lat),
                RefFrame::AZEL | RefFrame::STN => {
                    frames.from_station(freq_hz, &azel_to_cart(*lon, *lat))
                }
            };
            JonesField::new(*frame, vec![sample], (1, 1))
        }

        FieldDirections::Grid(grid) => {
            let (rows, cols) = grid.dim();
            debug!("Evaluating a {rows}x{cols} (l,m) grid at {freq_hz} Hz");
            let samples = (0..rows * cols)
                .into_par_iter()
                .map(|index| {
                    let (i, j) = (index / cols, index % cols);
                    let r_stn = lm_to_cart(grid.l[(i, j)], grid.m[(i, j)]);
                    frames.from_station(freq_hz, &r_stn)
                })
                .collect();
            JonesField::new(RefFrame::STN, samples, (rows, cols))
        }
    }
}

/// Everything needed to evaluate a station's beam.
#[derive(Debug, Clone)]
pub struct FieldQuery<'a> {
    pub telescope: &'a str,
    pub station: &'a str,
    pub band: Band,
    pub beam_model: BeamModel,
    pub freq_hz: f64,
    pub pointing: Pointing,
    pub epoch: Epoch,

    /// If given, the pointing is ignored and the grid is evaluated instead.
    pub lm_grid: Option<LmGrid>,
}

/// Load the assembled model of the query's telescope band and evaluate the
/// query's station.
pub fn evaluate_beam(
    registry: &TelescopeRegistry,
    query: &FieldQuery,
) -> Result<JonesField, FieldError> {
    let plugin = registry.get(query.telescope)?;
    plugin.check_beammodel(query.band, query.beam_model)?;
    let model: TelescopeBandModel = read_artifact(plugin.model_path(query.band, query.beam_model))?;
    let station = model.station(query.station)?;

    let directions = match &query.lm_grid {
        Some(grid) => FieldDirections::Grid(grid.clone()),
        None => FieldDirections::Point(query.pointing),
    };
    Ok(evaluate_station(
        station,
        query.freq_hz,
        query.epoch,
        &directions,
    ))
}
