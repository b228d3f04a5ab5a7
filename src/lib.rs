// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Jones-matrix beam models for LOFAR-like phased-array radio telescope stations.

Hamaker-Arts coefficient sources are parsed into coefficient sets, turned into
dual-polarisation element models, assembled per telescope band with each
station's geometry, and finally evaluated as Jones matrices over a station's
field of view.
 */

pub mod assemble;
pub mod beam;
mod cli;
pub mod coeffs;
pub mod constants;
pub mod field;
pub mod io;
pub(crate) mod math;
pub mod telescope;

// Re-exports.
pub use cli::{Stationbeam, StationbeamError};
