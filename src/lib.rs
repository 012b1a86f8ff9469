//! # orbitrace
//!
//! Orbital-mechanics propagation core for displaying solar-system bodies:
//! given six classical Keplerian elements, produce the 3D trajectory
//! polyline of the orbit and the instantaneous body position at any epoch.
//!
//! The crate is the numerical heart of a comet/planet viewer; orbit
//! determination, rendering, networking, and persistence all live elsewhere.
//!
//! ## Typical workflow
//!
//! ```rust
//! use orbitrace::{OrbitalElements, Propagator};
//!
//! // Comet-Halley-like elements (AU and degrees).
//! let elements = OrbitalElements::new(17.8, 0.967, 162.26, 58.42, 111.33)?;
//!
//! // Static path for display.
//! let polyline = orbitrace::sample_path(&elements)?;
//! assert!(!polyline.is_empty());
//!
//! // Frame-driven animation.
//! let mut body = Propagator::with_elements(elements)?;
//! let position = body.advance(0.5); // half a day per frame
//! assert!(position.is_some());
//! # Ok::<(), orbitrace::OrbitError>(())
//! ```
//!
//! ## Conventions
//!
//! Distances in AU, angles in degrees at the API surface (radians
//! internally), durations in days. Elliptic orbits carry `a > 0`, hyperbolic
//! trajectories `a < 0`; parabolic input is rejected.

pub mod constants;
pub mod elements;
pub mod errors;
pub mod kepler;
pub mod propagation;
pub mod rotation;
pub mod trajectory;

pub use elements::{OrbitClass, OrbitalElements};
pub use errors::OrbitError;
pub use kepler::{solve_kepler, solve_kepler_hyperbolic, KeplerSolution};
pub use propagation::{position_at, PropagationTime, Propagator};
pub use rotation::OrbitTransform;
pub use trajectory::{sample_path, sample_path_with};
