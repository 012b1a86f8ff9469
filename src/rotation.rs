//! # Orbital-plane to display-frame rotation
//!
//! An orbit is computed in its **perifocal frame**: a 2D frame in the
//! orbital plane with the periapsis direction as x-axis. Orienting it in
//! the display frame takes three elemental rotations, applied in a fixed
//! order:
//!
//! 1. about **Z** by `ω` (argument of periapsis) — orients the ellipse
//!    within its own plane,
//! 2. about **X** by `i` (inclination) — tilts the orbital plane,
//! 3. about **Z** by `Ω` (longitude of ascending node) — orients the line
//!    of nodes.
//!
//! The composition order is the standard astronomical convention and is
//! load-bearing: swapping `ω` and `Ω` produces a wrong but plausible-looking
//! orbit. [`OrbitTransform`] freezes the composed matrix so the three
//! rotations are paid once per element set, not once per evaluated point.

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::{Radian, RADEG};
use crate::elements::OrbitalElements;

/// Construct a right-handed 3×3 rotation matrix around one of the principal
/// axes (X, Y, or Z).
///
/// This builds a [`nalgebra::Matrix3`] representing an **active rotation**
/// of a 3D vector by an angle `alpha` around the chosen axis, in the direct
/// (counter-clockwise) sense.
///
/// Arguments
/// ---------
/// * `alpha` - Rotation angle in **radians**.
/// * `k` - Index of the axis of rotation: `0` → X, `1` → Y, `2` → Z.
///
/// Return
/// ------
/// * A 3×3 orthonormal matrix `R` such that the rotated vector is `x' = R · x`.
///
/// Panics
/// ------
/// * If `k > 2`, as only axes 0–2 are valid.
pub fn rotmt(alpha: Radian, k: usize) -> Matrix3<f64> {
    let axis = match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        2 => Vector3::z_axis(),
        _ => panic!("**** ROTMT: invalid axis index {k} (must be 0,1,2) ****"),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Composed perifocal → display-frame rotation for one element set.
///
/// A pure derivation of the three orientation angles: equal elements always
/// produce an equal transform, so callers may cache one per element set and
/// must rebuild it whenever the elements change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitTransform {
    matrix: Matrix3<f64>,
}

impl OrbitTransform {
    /// Derive the composed rotation from an element set.
    ///
    /// Angles are taken from the elements in degrees and converted here,
    /// exactly once. The matrix is `Rz(Ω) · Rx(i) · Rz(ω)`, i.e. `ω`
    /// innermost and `Ω` outermost.
    pub fn from_elements(elements: &OrbitalElements) -> Self {
        let incl = elements.inclination * RADEG;
        let node = elements.ascending_node_longitude * RADEG;
        let peri = elements.periapsis_argument * RADEG;

        Self {
            matrix: rotmt(node, 2) * rotmt(incl, 0) * rotmt(peri, 2),
        }
    }

    /// Rotate a perifocal-frame vector into the display frame.
    pub fn apply(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.matrix * v
    }

    /// The composed rotation matrix.
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }
}
