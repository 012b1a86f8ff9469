//! # Time-based propagation
//!
//! Turns an element set and an instant into a single display-frame position:
//!
//! 1. mean anomaly `M(t) = M₀ + n·Δt` from the elapsed days,
//! 2. eccentric (or hyperbolic) anomaly via the bounded Newton solver,
//! 3. closed-form perifocal position,
//! 4. rotation into the display frame.
//!
//! Two time conventions exist and are kept explicit per call through
//! [`PropagationTime`]: an arbitrary animation clock (`Elapsed`) and an
//! absolute epoch (`Absolute`, which requires the element set to carry its
//! reference epoch). Mixing the two silently desynchronizes animations, so
//! the choice is part of the call signature rather than ambient state.
//!
//! The per-frame cost is one bounded Newton solve plus one matrix-vector
//! product; [`Propagator`] keeps the rotation transform, mean motion, and
//! sampled path cached per element set so a rendering loop pays the
//! derivations only when the elements change.

use hifitime::{Epoch, Unit};
use nalgebra::Vector3;

use crate::constants::{Days, Radian};
use crate::elements::{OrbitClass, OrbitalElements};
use crate::errors::OrbitError;
use crate::kepler::{solve_kepler, solve_kepler_hyperbolic, KeplerSolution};
use crate::rotation::OrbitTransform;
use crate::trajectory::sample_path;

/// The time convention of a propagation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropagationTime {
    /// Days elapsed on an arbitrary animation clock whose origin is the
    /// element set's epoch state (`M₀` at zero elapsed time).
    Elapsed(Days),
    /// An absolute instant; valid only for elements carrying a
    /// `reference_epoch`.
    Absolute(Epoch),
}

/// Display-frame position of a body at the given instant.
///
/// A pure function: equal inputs give equal positions, and nothing is
/// cached between calls. Rendering loops that evaluate every frame should
/// prefer [`Propagator::advance`], which reuses the derived state.
///
/// Arguments
/// ---------
/// * `elements`: validated-on-entry element set.
/// * `time`: explicit time convention, see [`PropagationTime`].
///
/// Errors
/// ------
/// * Any validation variant of [`OrbitError`].
/// * [`OrbitError::MissingReferenceEpoch`] for an `Absolute` call on an
///   element set without an epoch.
pub fn position_at(
    elements: &OrbitalElements,
    time: PropagationTime,
) -> Result<Vector3<f64>, OrbitError> {
    elements.validate()?;
    let transform = OrbitTransform::from_elements(elements);
    let elapsed = elapsed_days(elements, time)?;
    let mean_anomaly = elements.mean_anomaly_rad() + elements.mean_motion() * elapsed;

    let (position, _) = propagate(
        elements.semi_major_axis,
        elements.eccentricity,
        elements.orbit_class(),
        mean_anomaly,
        &transform,
    );
    Ok(position)
}

/// Resolve a [`PropagationTime`] to days elapsed since the epoch state.
fn elapsed_days(elements: &OrbitalElements, time: PropagationTime) -> Result<Days, OrbitError> {
    match time {
        PropagationTime::Elapsed(days) => Ok(days),
        PropagationTime::Absolute(instant) => {
            let epoch = elements
                .reference_epoch
                .ok_or(OrbitError::MissingReferenceEpoch)?;
            Ok((instant - epoch).to_unit(Unit::Day))
        }
    }
}

/// Solve for the anomaly and map it to a display-frame position.
///
/// A solver timeout is soft: the best iterate is used and reported through
/// the returned [`KeplerSolution`].
fn propagate(
    semi_major_axis: f64,
    eccentricity: f64,
    class: OrbitClass,
    mean_anomaly: Radian,
    transform: &OrbitTransform,
) -> (Vector3<f64>, KeplerSolution) {
    let a = semi_major_axis;
    let e = eccentricity;

    let (solution, perifocal) = match class {
        OrbitClass::Elliptic => {
            let solution = solve_kepler(mean_anomaly, e);
            let ecc_anomaly = solution.anomaly;
            let x = a * (ecc_anomaly.cos() - e);
            let y = a * (1.0 - e * e).sqrt() * ecc_anomaly.sin();
            (solution, Vector3::new(x, y, 0.0))
        }
        OrbitClass::Hyperbolic => {
            let solution = solve_kepler_hyperbolic(mean_anomaly, e);
            let hyp_anomaly = solution.anomaly;
            // a < 0: both coordinates come out with the conventional signs.
            let x = a * (hyp_anomaly.cosh() - e);
            let y = -a * (e * e - 1.0).sqrt() * hyp_anomaly.sinh();
            (solution, Vector3::new(x, y, 0.0))
        }
    };

    (transform.apply(&perifocal), solution)
}

/// Derived state of one element set, rebuilt whenever the elements change.
#[derive(Debug, Clone)]
struct OrbitCache {
    transform: OrbitTransform,
    mean_motion: f64,
    mean_anomaly_epoch: Radian,
    path: Vec<Vector3<f64>>,
}

impl OrbitCache {
    fn derive(elements: &OrbitalElements) -> Result<Self, OrbitError> {
        Ok(Self {
            transform: OrbitTransform::from_elements(elements),
            mean_motion: elements.mean_motion(),
            mean_anomaly_epoch: elements.mean_anomaly_rad(),
            path: sample_path(elements)?,
        })
    }
}

/// Per-body animation state for a frame-driven caller.
///
/// Holds the current element set (possibly none: "nothing to draw" is a
/// legitimate state, not an error), the derived state cached per element
/// set, and an elapsed-days clock stepped by an external scheduler. The
/// propagator owns no timers and performs no blocking work; a rendering
/// loop calls [`Propagator::advance`] once per frame and stops calling to
/// cancel.
#[derive(Debug, Clone, Default)]
pub struct Propagator {
    elements: Option<OrbitalElements>,
    cache: Option<OrbitCache>,
    elapsed: Days,
    last_solution: Option<KeplerSolution>,
}

impl Propagator {
    /// An empty propagator: no elements, empty path, `advance` yields `None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a propagator preloaded with a validated element set.
    pub fn with_elements(elements: OrbitalElements) -> Result<Self, OrbitError> {
        let mut propagator = Self::new();
        propagator.set_elements(Some(elements))?;
        Ok(propagator)
    }

    /// Replace (or clear) the element set, rebuilding all derived state.
    ///
    /// The rotation transform, mean motion, and sampled path are recomputed
    /// synchronously here and nowhere else, so they can never go stale with
    /// respect to the owning elements. On a validation error the propagator
    /// reverts to the empty state rather than keeping a stale orbit on
    /// screen.
    ///
    /// The elapsed clock is preserved across element changes; call
    /// [`Propagator::reset_clock`] for a fresh animation.
    pub fn set_elements(&mut self, elements: Option<OrbitalElements>) -> Result<(), OrbitError> {
        self.last_solution = None;
        match elements {
            None => {
                self.elements = None;
                self.cache = None;
                Ok(())
            }
            Some(elements) => match OrbitCache::derive(&elements) {
                Ok(cache) => {
                    self.elements = Some(elements);
                    self.cache = Some(cache);
                    Ok(())
                }
                Err(err) => {
                    self.elements = None;
                    self.cache = None;
                    Err(err)
                }
            },
        }
    }

    /// Drop the element set and its derived state.
    pub fn clear(&mut self) {
        self.elements = None;
        self.cache = None;
        self.last_solution = None;
    }

    /// The currently loaded element set, if any.
    pub fn elements(&self) -> Option<&OrbitalElements> {
        self.elements.as_ref()
    }

    /// Cached display polyline; empty when no elements are loaded.
    pub fn path(&self) -> &[Vector3<f64>] {
        self.cache.as_ref().map(|c| c.path.as_slice()).unwrap_or(&[])
    }

    /// Elapsed days on the animation clock.
    pub fn elapsed(&self) -> Days {
        self.elapsed
    }

    /// Rewind the animation clock to the epoch state.
    pub fn reset_clock(&mut self) {
        self.elapsed = 0.0;
    }

    /// Step the animation clock by `dt` days and return the new position.
    ///
    /// Returns `None` when no elements are loaded; the clock still advances
    /// so a body that appears later joins the animation in phase.
    pub fn advance(&mut self, dt: Days) -> Option<Vector3<f64>> {
        self.elapsed += dt;
        let (position, solution) = self.eval()?;
        self.last_solution = Some(solution);
        Some(position)
    }

    /// Position at the current clock without advancing it.
    pub fn position(&self) -> Option<Vector3<f64>> {
        self.eval().map(|(position, _)| position)
    }

    /// Whether the most recent solve met its tolerance. `true` when nothing
    /// has been evaluated yet; a `false` reading means the last position
    /// used the best bounded iterate.
    pub fn last_converged(&self) -> bool {
        self.last_solution.map(|s| s.converged).unwrap_or(true)
    }

    fn eval(&self) -> Option<(Vector3<f64>, KeplerSolution)> {
        let elements = self.elements.as_ref()?;
        let cache = self.cache.as_ref()?;
        let mean_anomaly = cache.mean_anomaly_epoch + cache.mean_motion * self.elapsed;
        Some(propagate(
            elements.semi_major_axis,
            elements.eccentricity,
            elements.orbit_class(),
            mean_anomaly,
            &cache.transform,
        ))
    }
}
