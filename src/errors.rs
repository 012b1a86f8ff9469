use thiserror::Error;

/// Errors raised while validating orbital elements or propagating a body.
///
/// Every variant describes a condition that is resolved locally by the
/// caller declining to draw the offending body; nothing here is fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrbitError {
    #[error("orbital element `{0}` is not finite")]
    NonFiniteElement(&'static str),

    #[error("eccentricity must be non-negative, got {0}")]
    NegativeEccentricity(f64),

    #[error("semi-major axis must be positive for an elliptic orbit, got {0}")]
    NonPositiveSemiMajorAxis(f64),

    #[error("semi-major axis must be negative for a hyperbolic orbit, got {0}")]
    HyperbolicSemiMajorAxisSign(f64),

    #[error("parabolic trajectory (e = 1) has no finite-element representation")]
    ParabolicOrbit,

    #[error("absolute-epoch propagation requires elements with a reference epoch")]
    MissingReferenceEpoch,
}
