// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use marlu::{c64, Jones};
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use super::HamakerPolarimeter;
use crate::{
    coeffs::{CoefficientRecord, CoefficientSet},
    math::{cart_to_sph, spherical_basis_from_angles},
};

/// A single physical antenna with two nominally-orthogonal feeds, both
/// described by one Hamaker-Arts coefficient tensor.
///
/// The element carries a rotation from its own (build) frame into an outer
/// frame. Directions and bases given to [`DualPolarizationElement::jones_in_basis`]
/// are in the outer frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualPolarizationElement {
    polarimeter: HamakerPolarimeter,

    /// Takes element coordinates to outer-frame coordinates.
    rotation: Matrix3<f64>,
}

impl DualPolarizationElement {
    pub fn new(polarimeter: HamakerPolarimeter) -> DualPolarizationElement {
        DualPolarizationElement {
            polarimeter,
            rotation: Matrix3::identity(),
        }
    }

    pub fn from_record(record: CoefficientRecord) -> DualPolarizationElement {
        Self::new(HamakerPolarimeter::from_record(record))
    }

    pub fn from_coefficient_set(set: CoefficientSet) -> DualPolarizationElement {
        Self::new(HamakerPolarimeter::from_coefficient_set(set))
    }

    pub fn polarimeter(&self) -> &HamakerPolarimeter {
        &self.polarimeter
    }

    pub fn rotation(&self) -> &Matrix3<f64> {
        &self.rotation
    }

    /// Get a copy of this element placed into a new outer frame, where
    /// `rotation` takes the current outer frame into the new one. Rotations
    /// accumulate; `self` is untouched.
    pub fn rotated(&self, rotation: &Matrix3<f64>) -> DualPolarizationElement {
        DualPolarizationElement {
            polarimeter: self.polarimeter.clone(),
            rotation: rotation * self.rotation,
        }
    }

    /// Get the Jones matrix at a frequency \[Hz\] for the direction and
    /// polarisation basis given by the columns of `basis` (r̂, θ̂, φ̂, in outer
    /// frame coordinates). The columns of the result correspond to θ̂ and φ̂
    /// of `basis`.
    pub fn jones_in_basis(&self, freq_hz: f64, basis: &Matrix3<f64>) -> Jones<f64> {
        let to_element = self.rotation.transpose();
        let r_el = to_element * basis.column(0);
        let (theta_el, phi_el) = cart_to_sph(&r_el);
        let basis_el = spherical_basis_from_angles(theta_el, phi_el);

        let theta_hat = to_element * basis.column(1);
        let phi_hat = to_element * basis.column(2);
        let t = [
            basis_el.column(1).dot(&theta_hat),
            basis_el.column(1).dot(&phi_hat),
            basis_el.column(2).dot(&theta_hat),
            basis_el.column(2).dot(&phi_hat),
        ];
        let projection = Jones::from(t.map(|v| c64::new(v, 0.0)));

        self.polarimeter.jones(freq_hz, theta_el, phi_el) * projection
    }

    /// Get the Jones matrix at a frequency \[Hz\] in the direction (`theta`,
    /// `phi`) \[radians\] of the outer frame, expressed in the outer frame's
    /// spherical basis.
    pub fn jones_along(&self, freq_hz: f64, theta: f64, phi: f64) -> Jones<f64> {
        self.jones_in_basis(freq_hz, &spherical_basis_from_angles(theta, phi))
    }
}
