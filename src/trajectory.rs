//! # Static trajectory sampling
//!
//! Discretizes an orbit into an ordered polyline of display-frame points by
//! sweeping the true anomaly over its valid domain:
//!
//! - **Elliptic** (`e < 1`): the full turn `[0, 2π]`, endpoint included, so
//!   the polyline closes on itself.
//! - **Hyperbolic** (`e > 1`): a clipped arc around periapsis. The true
//!   anomaly is bounded by the asymptote angle `arccos(−1/e)`; the sweep
//!   stops at a fraction of that bound and points beyond a radius cutoff are
//!   discarded, since the conic equation diverges near the bound.
//!
//! Sampling is a pure function of the element set: identical elements yield
//! identical polylines, and the output is regenerated (never patched in
//! place) when the elements change.

use nalgebra::Vector3;

use crate::constants::{DPI, HYPERBOLIC_SWEEP_FRACTION, MAX_PATH_RADIUS, PATH_SAMPLES};
use crate::elements::{OrbitClass, OrbitalElements};
use crate::errors::OrbitError;
use crate::kepler::true_anomaly_limit;
use crate::rotation::OrbitTransform;

/// Sample the display polyline of an orbit at the default resolution
/// ([`PATH_SAMPLES`] true-anomaly steps).
///
/// Arguments
/// ---------
/// * `elements`: validated-on-entry element set.
///
/// Return
/// ------
/// * Ordered points in the display frame (AU). Elliptic paths hold
///   `PATH_SAMPLES + 1` points with the last equal to the first; hyperbolic
///   paths hold at most that many after radius clipping.
///
/// Errors
/// ------
/// * Any [`OrbitError`] validation variant; no path is produced for a
///   non-physical element set.
pub fn sample_path(elements: &OrbitalElements) -> Result<Vec<Vector3<f64>>, OrbitError> {
    sample_path_with(elements, PATH_SAMPLES)
}

/// Sample the display polyline at a caller-chosen resolution.
///
/// `samples` is a display-quality knob, not a correctness parameter; values
/// below 1 are clamped to 1.
pub fn sample_path_with(
    elements: &OrbitalElements,
    samples: usize,
) -> Result<Vec<Vector3<f64>>, OrbitError> {
    elements.validate()?;
    let transform = OrbitTransform::from_elements(elements);
    let samples = samples.max(1);

    let path = match elements.orbit_class() {
        OrbitClass::Elliptic => sample_ellipse(elements, &transform, samples),
        OrbitClass::Hyperbolic => sample_hyperbola(elements, &transform, samples),
    };
    Ok(path)
}

/// Point on the conic at true anomaly `nu`, rotated into the display frame.
fn conic_point(semi_latus: f64, e: f64, nu: f64, transform: &OrbitTransform) -> Vector3<f64> {
    let r = semi_latus / (1.0 + e * nu.cos());
    transform.apply(&Vector3::new(r * nu.cos(), r * nu.sin(), 0.0))
}

fn sample_ellipse(
    elements: &OrbitalElements,
    transform: &OrbitTransform,
    samples: usize,
) -> Vec<Vector3<f64>> {
    let e = elements.eccentricity;
    let semi_latus = elements.semi_major_axis * (1.0 - e * e);

    (0..=samples)
        .map(|i| {
            let nu = DPI * i as f64 / samples as f64;
            conic_point(semi_latus, e, nu, transform)
        })
        .collect()
}

fn sample_hyperbola(
    elements: &OrbitalElements,
    transform: &OrbitTransform,
    samples: usize,
) -> Vec<Vector3<f64>> {
    let e = elements.eccentricity;
    // a < 0 and 1 - e² < 0, so the semi-latus rectum comes out positive.
    let semi_latus = elements.semi_major_axis * (1.0 - e * e);
    let sweep = HYPERBOLIC_SWEEP_FRACTION * true_anomaly_limit(e);

    (0..=samples)
        .filter_map(|i| {
            let nu = -sweep + 2.0 * sweep * i as f64 / samples as f64;
            let point = conic_point(semi_latus, e, nu, transform);
            (point.norm() <= MAX_PATH_RADIUS).then_some(point)
        })
        .collect()
}
