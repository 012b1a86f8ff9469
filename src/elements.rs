//! # Classical orbital elements
//!
//! This module defines the [`OrbitalElements`] value type: the six classical
//! Keplerian parameters `(a, e, i, Ω, ω, M₀)` plus an optional reference
//! epoch, as supplied by a form, a selection, or a backend response.
//!
//! ## Units
//!
//! - Lengths: **AU**
//! - Angles: **degrees** (the input convention of every producer of this
//!   type; conversion to radians happens exactly once, when derived state is
//!   computed from the element set)
//! - Time: **days**; the reference epoch is a [`hifitime::Epoch`]
//!
//! ## Sign conventions
//!
//! - Elliptic orbits (`e < 1`): `a > 0`.
//! - Hyperbolic trajectories (`e > 1`): `a < 0`.
//! - Parabolic input (`e = 1` within 1e-12) has no finite-element
//!   representation and is rejected by [`OrbitalElements::validate`].
//!
//! ## Lifecycle
//!
//! An element set is immutable once constructed and fully self-describing:
//! every derived quantity (rotation transform, mean motion, period, apsis
//! distances) is a pure function of the six numbers. Validation is fail-fast
//! and re-run by every consumer entry point, so a malformed set can never
//! leak NaN positions into a caller.

use hifitime::Epoch;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{Days, Degree, DAYS_PER_YEAR, DPI, RADEG};
use crate::errors::OrbitError;

/// Eccentricity band below which an orbit is treated as exactly parabolic
/// and rejected.
const PARABOLIC_EPS: f64 = 1e-12;

/// Conic classification of a validated element set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitClass {
    /// Bound orbit, `e < 1`, closed path.
    Elliptic,
    /// Unbound trajectory, `e > 1`, open path.
    Hyperbolic,
}

/// Classical Keplerian orbital elements.
///
/// Units
/// -----
/// * `semi_major_axis`: AU (`> 0` elliptic, `< 0` hyperbolic).
/// * `eccentricity`: unitless.
/// * `inclination`: degrees (Ω, i, ω may be any real value).
/// * `ascending_node_longitude`: degrees (Ω).
/// * `periapsis_argument`: degrees (ω).
/// * `mean_anomaly`: degrees, at `reference_epoch` (M₀; 0 when unused).
/// * `reference_epoch`: optional absolute epoch; needed only for
///   absolute-time propagation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: Degree,
    pub ascending_node_longitude: Degree,
    pub periapsis_argument: Degree,
    pub mean_anomaly: Degree,
    pub reference_epoch: Option<Epoch>,
}

impl OrbitalElements {
    /// Build a validated element set with no epoch state.
    ///
    /// The mean anomaly defaults to zero and the reference epoch to `None`;
    /// use [`OrbitalElements::at_epoch`] to attach both when absolute-time
    /// propagation is needed.
    ///
    /// Arguments
    /// ---------
    /// * `semi_major_axis`: AU.
    /// * `eccentricity`: unitless, `≥ 0`, not 1.
    /// * `inclination`: degrees.
    /// * `ascending_node_longitude`: degrees.
    /// * `periapsis_argument`: degrees.
    ///
    /// Errors
    /// ------
    /// * Any [`OrbitError`] validation variant for non-physical input.
    pub fn new(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination: Degree,
        ascending_node_longitude: Degree,
        periapsis_argument: Degree,
    ) -> Result<Self, OrbitError> {
        let elements = Self {
            semi_major_axis,
            eccentricity,
            inclination,
            ascending_node_longitude,
            periapsis_argument,
            mean_anomaly: 0.0,
            reference_epoch: None,
        };
        elements.validate()?;
        Ok(elements)
    }

    /// Attach a mean anomaly (degrees) and its reference epoch.
    pub fn at_epoch(mut self, mean_anomaly: Degree, reference_epoch: Epoch) -> Self {
        self.mean_anomaly = mean_anomaly;
        self.reference_epoch = Some(reference_epoch);
        self
    }

    /// Check the element set against the crate's physicality rules.
    ///
    /// Consumers ([`sample_path`](crate::trajectory::sample_path),
    /// [`position_at`](crate::propagation::position_at), the
    /// [`Propagator`](crate::propagation::Propagator)) call this on entry, so
    /// a set built by struct literal gets the same fail-fast treatment as one
    /// built through [`OrbitalElements::new`].
    ///
    /// Errors
    /// ------
    /// * [`OrbitError::NonFiniteElement`] – NaN or infinity in any field.
    /// * [`OrbitError::NegativeEccentricity`] – `e < 0`.
    /// * [`OrbitError::ParabolicOrbit`] – `e = 1` within 1e-12.
    /// * [`OrbitError::NonPositiveSemiMajorAxis`] – `a ≤ 0` with `e < 1`.
    /// * [`OrbitError::HyperbolicSemiMajorAxisSign`] – `a ≥ 0` with `e > 1`.
    pub fn validate(&self) -> Result<(), OrbitError> {
        let fields = [
            (self.semi_major_axis, "semi_major_axis"),
            (self.eccentricity, "eccentricity"),
            (self.inclination, "inclination"),
            (self.ascending_node_longitude, "ascending_node_longitude"),
            (self.periapsis_argument, "periapsis_argument"),
            (self.mean_anomaly, "mean_anomaly"),
        ];
        for (value, name) in fields {
            if !value.is_finite() {
                return Err(OrbitError::NonFiniteElement(name));
            }
        }

        if self.eccentricity < 0.0 {
            return Err(OrbitError::NegativeEccentricity(self.eccentricity));
        }
        if (self.eccentricity - 1.0).abs() < PARABOLIC_EPS {
            return Err(OrbitError::ParabolicOrbit);
        }
        if self.eccentricity < 1.0 && self.semi_major_axis <= 0.0 {
            return Err(OrbitError::NonPositiveSemiMajorAxis(self.semi_major_axis));
        }
        if self.eccentricity > 1.0 && self.semi_major_axis >= 0.0 {
            return Err(OrbitError::HyperbolicSemiMajorAxisSign(
                self.semi_major_axis,
            ));
        }
        Ok(())
    }

    /// Conic classification. Meaningful on a validated set.
    pub fn orbit_class(&self) -> OrbitClass {
        if self.eccentricity < 1.0 {
            OrbitClass::Elliptic
        } else {
            OrbitClass::Hyperbolic
        }
    }

    /// Mean motion `n = 2π / T` in radians per day, with `T = |a|^1.5` years
    /// (Kepler's third law in solar-mass-normalized units).
    pub fn mean_motion(&self) -> f64 {
        DPI / (DAYS_PER_YEAR * self.semi_major_axis.abs().powf(1.5))
    }

    /// Orbital period in days; `None` for an unbound trajectory.
    pub fn period_days(&self) -> Option<Days> {
        (self.orbit_class() == OrbitClass::Elliptic)
            .then(|| self.semi_major_axis.powf(1.5) * DAYS_PER_YEAR)
    }

    /// Orbital period in Julian years; `None` for an unbound trajectory.
    pub fn period_years(&self) -> Option<f64> {
        self.period_days().map(|days| days / DAYS_PER_YEAR)
    }

    /// Periapsis distance `a(1 − e)` in AU (valid for both conic classes;
    /// the sign conventions make the product positive either way).
    pub fn perihelion_distance(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Apoapsis distance `a(1 + e)` in AU; `None` for an unbound trajectory.
    pub fn aphelion_distance(&self) -> Option<f64> {
        (self.orbit_class() == OrbitClass::Elliptic)
            .then(|| self.semi_major_axis * (1.0 + self.eccentricity))
    }

    /// Mean anomaly at epoch, converted to radians.
    pub(crate) fn mean_anomaly_rad(&self) -> f64 {
        self.mean_anomaly * RADEG
    }
}

impl fmt::Display for OrbitalElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Orbital Elements")?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  a   (semi-major axis)       = {:.6} AU",
            self.semi_major_axis
        )?;
        writeln!(
            f,
            "  e   (eccentricity)          = {:.6}",
            self.eccentricity
        )?;
        writeln!(
            f,
            "  i   (inclination)           = {:.6}°",
            self.inclination
        )?;
        writeln!(
            f,
            "  Ω   (longitude of node)     = {:.6}°",
            self.ascending_node_longitude
        )?;
        writeln!(
            f,
            "  ω   (argument of periapsis) = {:.6}°",
            self.periapsis_argument
        )?;
        writeln!(
            f,
            "  M₀  (mean anomaly at epoch) = {:.6}°",
            self.mean_anomaly
        )?;
        match self.period_days() {
            Some(period) => writeln!(f, "  T   (orbital period)        = {period:.4} days")?,
            None => writeln!(f, "  T   (orbital period)        = unbound")?,
        }
        if let Some(epoch) = self.reference_epoch {
            writeln!(f, "  t₀  (reference epoch)       = {epoch}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test_elements {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn halley_like() -> OrbitalElements {
        OrbitalElements::new(17.8, 0.967, 162.26, 58.42, 111.33).unwrap()
    }

    #[test]
    fn valid_elliptic_set_passes() {
        let earth = OrbitalElements::new(1.0, 0.0167, 0.0, -11.261, 114.208).unwrap();
        assert_eq!(earth.orbit_class(), OrbitClass::Elliptic);
        assert_eq!(earth.mean_anomaly, 0.0);
        assert!(earth.reference_epoch.is_none());
    }

    #[test]
    fn rejects_non_finite_fields() {
        assert_eq!(
            OrbitalElements::new(f64::NAN, 0.1, 0.0, 0.0, 0.0),
            Err(OrbitError::NonFiniteElement("semi_major_axis"))
        );
        assert_eq!(
            OrbitalElements::new(1.0, 0.1, f64::INFINITY, 0.0, 0.0),
            Err(OrbitError::NonFiniteElement("inclination"))
        );
    }

    #[test]
    fn rejects_negative_eccentricity() {
        assert_eq!(
            OrbitalElements::new(1.0, -0.2, 0.0, 0.0, 0.0),
            Err(OrbitError::NegativeEccentricity(-0.2))
        );
    }

    #[test]
    fn rejects_parabolic_eccentricity() {
        assert_eq!(
            OrbitalElements::new(-1.0, 1.0, 0.0, 0.0, 0.0),
            Err(OrbitError::ParabolicOrbit)
        );
    }

    #[test]
    fn rejects_non_positive_axis_for_ellipse() {
        assert_eq!(
            OrbitalElements::new(0.0, 0.3, 0.0, 0.0, 0.0),
            Err(OrbitError::NonPositiveSemiMajorAxis(0.0))
        );
        assert_eq!(
            OrbitalElements::new(-2.0, 0.3, 0.0, 0.0, 0.0),
            Err(OrbitError::NonPositiveSemiMajorAxis(-2.0))
        );
    }

    #[test]
    fn rejects_positive_axis_for_hyperbola() {
        assert_eq!(
            OrbitalElements::new(3.0, 1.2, 0.0, 0.0, 0.0),
            Err(OrbitError::HyperbolicSemiMajorAxisSign(3.0))
        );
        assert!(OrbitalElements::new(-3.0, 1.2, 0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn earth_like_period_is_one_julian_year() {
        let earth = OrbitalElements::new(1.0, 0.0167, 0.0, -11.261, 114.208).unwrap();
        assert_abs_diff_eq!(earth.period_days().unwrap(), 365.25, epsilon = 1e-9);
        assert_abs_diff_eq!(earth.period_years().unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(
            earth.mean_motion(),
            DPI / 365.25,
            max_relative = 1e-12
        );
    }

    #[test]
    fn halley_like_apsis_distances() {
        let halley = halley_like();
        assert_relative_eq!(halley.perihelion_distance(), 0.5874, max_relative = 1e-3);
        assert_relative_eq!(
            halley.aphelion_distance().unwrap(),
            35.0126,
            max_relative = 1e-3
        );
    }

    #[test]
    fn hyperbolic_set_has_no_period() {
        let hyper = OrbitalElements::new(-5.0, 1.5, 20.0, 0.0, 0.0).unwrap();
        assert_eq!(hyper.orbit_class(), OrbitClass::Hyperbolic);
        assert!(hyper.period_days().is_none());
        assert!(hyper.aphelion_distance().is_none());
        assert!(hyper.perihelion_distance() > 0.0);
        assert!(hyper.mean_motion().is_finite());
    }

    #[test]
    fn tiny_axis_mean_motion_is_finite() {
        let close = OrbitalElements::new(0.01, 0.0, 0.0, 0.0, 0.0).unwrap();
        assert!(close.mean_motion().is_finite());
        assert!(close.mean_motion() > 0.0);
    }

    #[test]
    fn at_epoch_attaches_state() {
        let epoch = Epoch::from_gregorian_utc_at_midnight(2025, 6, 1);
        let earth = OrbitalElements::new(1.0, 0.0167, 0.0, -11.261, 114.208)
            .unwrap()
            .at_epoch(357.517, epoch);
        assert_eq!(earth.mean_anomaly, 357.517);
        assert_eq!(earth.reference_epoch, Some(epoch));
    }

    #[test]
    fn display_lists_all_elements() {
        let text = halley_like().to_string();
        assert!(text.contains("semi-major axis"));
        assert!(text.contains("17.8"));
        assert!(text.contains("orbital period"));
    }
}
