//! Math error types.

/// Errors produced by guarded vector operations.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum MathError {
    /// The vector has zero or non-finite length and has no direction.
    #[error("cannot normalize degenerate vector (length {length})")]
    DegenerateVector {
        /// Length of the rejected vector.
        length: f64,
    },
}
