//! # Constants and type definitions for orbitrace
//!
//! This module centralizes the **unit-conversion factors**, **solver
//! tolerances**, and **display-sampling tunables** used throughout the
//! `orbitrace` library.
//!
//! ## Overview
//!
//! - Unit conversions (degrees ↔ radians, years ↔ days)
//! - Kepler-equation solver policy (tolerance, iteration ceiling)
//! - Path-sampling resolution and hyperbolic clipping parameters
//! - Core type aliases used across the crate
//!
//! The sampling parameters are rendering tunables, not physical constants:
//! they control how a trajectory is discretized for display and can be
//! overridden per call where the API allows it.

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Number of days in a Julian year
pub const DAYS_PER_YEAR: f64 = 365.25;

// -------------------------------------------------------------------------------------------------
// Kepler solver policy
// -------------------------------------------------------------------------------------------------

/// Absolute convergence tolerance on the Newton step (radians)
pub const KEPLER_TOLERANCE: f64 = 1e-6;

/// Iteration ceiling of the Newton-Raphson loop. Reaching it is not an
/// error: the best iterate is returned with its convergence flag cleared.
pub const KEPLER_MAX_ITER: usize = 100;

// -------------------------------------------------------------------------------------------------
// Path sampling tunables
// -------------------------------------------------------------------------------------------------

/// Default number of true-anomaly steps when discretizing a trajectory
pub const PATH_SAMPLES: usize = 360;

/// Fraction of the hyperbolic asymptote angle swept on each side of
/// periapsis. Sampling all the way to the asymptote would blow up the
/// radius, so the sweep stops short of it.
pub const HYPERBOLIC_SWEEP_FRACTION: f64 = 0.95;

/// Radius cutoff for hyperbolic path points (AU). Points farther out are
/// discarded rather than drawn.
pub const MAX_PATH_RADIUS: f64 = 200.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Duration in days
pub type Days = f64;
