//! # Kepler equation solvers
//!
//! Newton-Raphson solution of Kepler's transcendental equation, relating
//! mean anomaly to eccentric anomaly along a conic trajectory:
//!
//! - Elliptic (`e < 1`): `E − e·sin E = M`
//! - Hyperbolic (`e > 1`): `e·sinh F − F = M`
//!
//! Both solvers share the same bounded-time policy: iterate until the Newton
//! step falls below [`KEPLER_TOLERANCE`](crate::constants::KEPLER_TOLERANCE)
//! or the [`KEPLER_MAX_ITER`](crate::constants::KEPLER_MAX_ITER) ceiling is
//! hit, whichever comes first. Hitting the ceiling is not a failure: the best
//! iterate is returned and the [`KeplerSolution::converged`] flag is cleared,
//! so callers that need guaranteed precision can detect the shortfall while
//! display-oriented callers keep their bounded per-frame cost.

use crate::constants::{Radian, DPI, KEPLER_MAX_ITER, KEPLER_TOLERANCE};

/// Outcome of a bounded Newton-Raphson solve.
///
/// `anomaly` is the eccentric anomaly `E` for elliptic input, the hyperbolic
/// anomaly `F` for hyperbolic input, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    /// Best iterate reached by the solver (radians).
    pub anomaly: Radian,
    /// True when the last Newton step was below tolerance.
    pub converged: bool,
    /// Number of iterations actually performed.
    pub iterations: usize,
}

/// Return the principal value of an angle in radians, in `[0, 2π)`.
pub fn principal_angle(a: Radian) -> Radian {
    a.rem_euclid(DPI)
}

/// Solve the elliptic Kepler equation `E − e·sin E = M` for `E`.
///
/// The mean anomaly may be any real number; no prior reduction to `[0, 2π)`
/// is required. The iteration starts from `E₀ = M` and applies the standard
/// Newton update `E ← E − (E − e·sin E − M)/(1 − e·cos E)`.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: mean anomaly `M` (radians, any real value).
/// * `eccentricity`: eccentricity `e`, `0 ≤ e < 1`.
///
/// Return
/// ------
/// * A [`KeplerSolution`] holding the eccentric anomaly `E`. For `e = 0` the
///   equation is the identity and `E == M` exactly, in one iteration.
pub fn solve_kepler(mean_anomaly: Radian, eccentricity: f64) -> KeplerSolution {
    let mut ecc_anomaly = mean_anomaly;

    for iter in 1..=KEPLER_MAX_ITER {
        let delta = (ecc_anomaly - eccentricity * ecc_anomaly.sin() - mean_anomaly)
            / (1.0 - eccentricity * ecc_anomaly.cos());
        ecc_anomaly -= delta;

        if delta.abs() < KEPLER_TOLERANCE {
            return KeplerSolution {
                anomaly: ecc_anomaly,
                converged: true,
                iterations: iter,
            };
        }
    }

    KeplerSolution {
        anomaly: ecc_anomaly,
        converged: false,
        iterations: KEPLER_MAX_ITER,
    }
}

/// Solve the hyperbolic Kepler equation `e·sinh F − F = M` for `F`.
///
/// Newton iteration on `f(F) = e·sinh F − F − M` with derivative
/// `f'(F) = e·cosh F − 1`, starting from `F₀ = asinh(M/e)`. The initial
/// guess keeps the first sinh evaluation near the solution even for large
/// mean anomalies, where `F₀ = M` would overflow the iteration.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: hyperbolic mean anomaly `M` (radians, any real value).
/// * `eccentricity`: eccentricity `e > 1`.
///
/// Return
/// ------
/// * A [`KeplerSolution`] holding the hyperbolic anomaly `F`.
pub fn solve_kepler_hyperbolic(mean_anomaly: Radian, eccentricity: f64) -> KeplerSolution {
    let mut hyp_anomaly = (mean_anomaly / eccentricity).asinh();

    for iter in 1..=KEPLER_MAX_ITER {
        let delta = (eccentricity * hyp_anomaly.sinh() - hyp_anomaly - mean_anomaly)
            / (eccentricity * hyp_anomaly.cosh() - 1.0);
        hyp_anomaly -= delta;

        if delta.abs() < KEPLER_TOLERANCE {
            return KeplerSolution {
                anomaly: hyp_anomaly,
                converged: true,
                iterations: iter,
            };
        }
    }

    KeplerSolution {
        anomaly: hyp_anomaly,
        converged: false,
        iterations: KEPLER_MAX_ITER,
    }
}

/// True-anomaly bound of a hyperbolic trajectory, `arccos(−1/e)`.
///
/// The radius diverges as the true anomaly approaches this angle on either
/// side of periapsis; path sampling stays strictly inside it.
///
/// Arguments
/// ---------
/// * `eccentricity`: eccentricity `e > 1`.
pub fn true_anomaly_limit(eccentricity: f64) -> Radian {
    (-1.0 / eccentricity).acos()
}

#[cfg(test)]
mod kepler_test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn residual(m: f64, e: f64, ecc_anomaly: f64) -> f64 {
        (ecc_anomaly - e * ecc_anomaly.sin() - m).abs()
    }

    #[test]
    fn circular_orbit_is_identity() {
        for m in [-7.3, -PI, 0.0, 0.5, 2.0 * PI, 31.4] {
            let sol = solve_kepler(m, 0.0);
            assert_eq!(sol.anomaly, m);
            assert!(sol.converged);
            assert_eq!(sol.iterations, 1);
        }
    }

    #[test]
    fn residual_below_tolerance_over_grid() {
        for &e in &[0.0, 0.1, 0.3, 0.5, 0.7, 0.9, 0.967, 0.99] {
            let mut m = -10.0 * PI;
            while m <= 10.0 * PI {
                let sol = solve_kepler(m, e);
                assert!(
                    residual(m, e, sol.anomaly) < 1e-5,
                    "residual too large for M={m}, e={e}"
                );
                m += 0.37;
            }
        }
    }

    #[test]
    fn unreduced_mean_anomaly_is_accepted() {
        let sol_base = solve_kepler(1.2, 0.4);
        let sol_wrapped = solve_kepler(1.2 + DPI, 0.4);
        assert_abs_diff_eq!(sol_wrapped.anomaly - DPI, sol_base.anomaly, epsilon = 1e-6);
    }

    #[test]
    fn high_eccentricity_stays_bounded() {
        for m in [1e-3, 0.1, 1.0, PI - 0.1, 5.0] {
            let sol = solve_kepler(m, 0.999);
            assert!(sol.anomaly.is_finite());
            assert!(sol.iterations <= KEPLER_MAX_ITER);
            assert!(residual(m, 0.999, sol.anomaly) < 1e-5);
        }
    }

    #[test]
    fn hyperbolic_residual_below_tolerance() {
        for &e in &[1.05, 1.3, 2.0, 5.0] {
            for m in [-20.0, -3.0, -0.5, 0.0, 0.5, 3.0, 20.0] {
                let sol = solve_kepler_hyperbolic(m, e);
                let res = (e * sol.anomaly.sinh() - sol.anomaly - m).abs();
                assert!(sol.converged, "no convergence for M={m}, e={e}");
                assert!(res < 1e-5, "residual too large for M={m}, e={e}");
            }
        }
    }

    #[test]
    fn hyperbolic_zero_mean_anomaly_is_periapsis() {
        let sol = solve_kepler_hyperbolic(0.0, 1.5);
        assert_eq!(sol.anomaly, 0.0);
        assert!(sol.converged);
    }

    #[test]
    fn test_principal_angle() {
        assert_abs_diff_eq!(principal_angle(3.0 * PI), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(principal_angle(-PI / 2.0), 1.5 * PI, epsilon = 1e-12);
        assert_eq!(principal_angle(0.0), 0.0);
    }

    #[test]
    fn test_true_anomaly_limit() {
        // The bound opens up from π/2 (e → ∞) to π (e → 1⁺).
        assert!(true_anomaly_limit(1.01) > 0.9 * PI);
        assert_abs_diff_eq!(true_anomaly_limit(2.0), (-0.5f64).acos(), epsilon = 1e-12);
        assert!(true_anomaly_limit(1000.0) < 0.51 * PI);
    }
}
