//! Physics error types.

use lander_math::MathError;

/// Errors raised when constructing bodies from invalid parameters.
///
/// Gameplay events such as crashes and bad landings are never errors; they
/// are reported through [`crate::DamageCause`] and [`crate::LandingVerdict`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhysicsError {
    /// A constructor argument violates its documented precondition.
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    /// A direction could not be derived from a degenerate vector.
    #[error(transparent)]
    Math(#[from] MathError),
}
