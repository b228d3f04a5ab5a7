// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to model the beam responses of LOFAR-like stations.
//!
//! A [`HamakerPolarimeter`] evaluates the Hamaker-Arts polynomial model of an
//! antenna in its own frame. A [`DualPolarizationElement`] places that antenna
//! in an outer frame and expresses its Jones matrices in a caller's basis; it
//! is never rotated in place, so a single base element can be shared between
//! many [`StationBeamModel`]s, each with its own rotated copy.

mod dual_pol;
mod hamaker;
mod station;
#[cfg(test)]
mod tests;

pub use dual_pol::DualPolarizationElement;
pub use hamaker::HamakerPolarimeter;
pub use station::{StationBeamModel, TelescopeBandModel};
