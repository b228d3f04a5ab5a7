// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision.
 */

use std::f64::consts::FRAC_1_SQRT_2;

use nalgebra::Matrix3;

/// The number of polarisation channels (feeds) of a dual-polarised antenna.
/// This is the length of the last dimension of a Hamaker-Arts coefficient
/// tensor.
pub const NR_POLS: usize = 2;

/// The sampling frequency of LOFAR stations \[Hz\]. Each Nyquist zone is this
/// wide.
pub const SAMPFREQ: f64 = 100e6;

/// The number of frequency channels per Nyquist zone.
pub const NR_CHANNELS: usize = 512;

/// The number of (l,m) samples along each axis of the default field-of-view
/// grid.
pub const DEFAULT_LM_GRID_SIZE: usize = 30;

/// The directory containing artifacts for RIME-level work (coefficient sets
/// and base dual-polarised elements).
pub const TELEDATADIR: &str = "data";

/// The directory searched for telescope configuration files when none is
/// given.
pub const DEFAULT_TELESCOPES_DIR: &str = "telescopes";

/// The environment variable that may point at a directory of telescope
/// configuration files.
pub const TELESCOPES_DIR_ENV: &str = "STATIONBEAM_TELESCOPES_DIR";

/// Element-build frame to station frame rotation of LOFAR antennas. It takes x-
/// and y-directed dipoles and places them along (-1,-1) and (+1,-1)
/// respectively, i.e. 45 degrees to the station meridian. Applying it more than
/// once to the same element is a mistake.
#[rustfmt::skip]
pub const POLCRDROT: Matrix3<f64> = Matrix3::new(
    -FRAC_1_SQRT_2,  FRAC_1_SQRT_2, 0.0,
    -FRAC_1_SQRT_2, -FRAC_1_SQRT_2, 0.0,
               0.0,            0.0, 1.0,
);
