// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Some helper mathematics for directions and bases.
//!
//! Spherical coordinates follow the ISO convention: theta is measured from
//! the +z axis and phi from the +x axis towards +y.


use nalgebra::{Matrix3, Vector3};

/// Convert a Cartesian direction into spherical (theta, phi) angles
/// \[radians\]. The vector doesn't need to be normalised.
pub(crate) fn cart_to_sph(r: &Vector3<f64>) -> (f64, f64) {
    let norm = r.norm();
    // Rounding can push the ratio just outside [-1, 1].
    let theta = (r.z / norm).clamp(-1.0, 1.0).acos();
    let phi = r.y.atan2(r.x);
    (theta, phi)
}

/// Convert spherical (theta, phi) angles \[radians\] into a unit Cartesian
/// direction.
pub(crate) fn sph_to_cart(theta: f64, phi: f64) -> Vector3<f64> {
    let (s_theta, c_theta) = theta.sin_cos();
    let (s_phi, c_phi) = phi.sin_cos();
    Vector3::new(s_theta * c_phi, s_theta * s_phi, c_theta)
}

/// Get the local spherical basis at the spherical angles (theta, phi). The
/// columns of the returned matrix are r̂, θ̂ and φ̂.
pub(crate) fn spherical_basis_from_angles(theta: f64, phi: f64) -> Matrix3<f64> {
    let (s_theta, c_theta) = theta.sin_cos();
    let (s_phi, c_phi) = phi.sin_cos();
    let r_hat = sph_to_cart(theta, phi);
    let theta_hat = Vector3::new(c_theta * c_phi, c_theta * s_phi, -s_theta);
    let phi_hat = Vector3::new(-s_phi, c_phi, 0.0);
    Matrix3::from_columns(&[r_hat, theta_hat, phi_hat])
}

/// Get the local spherical basis (columns r̂, θ̂, φ̂) in the direction of `r`.
/// A direction with NaN components produces a basis full of NaNs.
pub(crate) fn spherical_basis(r: &Vector3<f64>) -> Matrix3<f64> {
    if r.iter().any(|v| v.is_nan()) {
        return Matrix3::from_element(f64::NAN);
    }
    let (theta, phi) = cart_to_sph(r);
    spherical_basis_from_angles(theta, phi)
}

/// A rotation of vectors by `angle` \[radians\] about the +z axis.
pub(crate) fn rot_z(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    #[rustfmt::skip]
    let m = Matrix3::new(
          c,  -s, 0.0,
          s,   c, 0.0,
        0.0, 0.0, 1.0,
    );
    m
}

/// A station-frame direction from an azimuth (measured from +y towards +x)
/// and an elevation (measured up from the station plane) \[radians\].
pub(crate) fn azel_to_cart(az: f64, el: f64) -> Vector3<f64> {
    let (s_az, c_az) = az.sin_cos();
    let (s_el, c_el) = el.sin_cos();
    Vector3::new(c_el * s_az, c_el * c_az, s_el)
}

/// A direction from direction cosines (l, m). The third component is `sqrt(1 -
/// l^2 - m^2)`, which is NaN when (l, m) lies outside the unit circle.
pub(crate) fn lm_to_cart(l: f64, m: f64) -> Vector3<f64> {
    Vector3::new(l, m, (1.0 - l * l - m * m).sqrt())
}

/// An equatorial direction (right ascension, declination) \[radians\] as a
/// Cartesian unit vector.
pub(crate) fn radec_to_cart(ra: f64, dec: f64) -> Vector3<f64> {
    let (s_ra, c_ra) = ra.sin_cos();
    let (s_dec, c_dec) = dec.sin_cos();
    Vector3::new(c_dec * c_ra, c_dec * s_ra, s_dec)
}

/// `n` evenly-spaced samples starting at `start`. If `endpoint` is true, the
/// last sample is `stop`, otherwise the samples stop one step short of it
/// (like numpy's `linspace(..., endpoint=False)`).
pub(crate) fn linspace(start: f64, stop: f64, n: usize, endpoint: bool) -> Vec<f64> {
    let divisor = match (endpoint, n) {
        (_, 0) => return vec![],
        (true, 1) => return vec![start],
        (true, _) => (n - 1) as f64,
        (false, _) => n as f64,
    };
    let step = (stop - start) / divisor;
    (0..n).map(|i| start + step * i as f64).collect()
}
