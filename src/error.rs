//! Error types for the u-anova crate.

/// Error type for all fallible operations in the u-anova crate.
///
/// Construction failures (`InvalidDesign`, `ZeroReplications`,
/// `NonFiniteObservation`) mean the observations cannot form a balanced
/// 2×2 design. `InsufficientReplication` and `Domain` mean the layout is
/// fine but the requested statistic is undefined.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnovaError {
    /// Returned when the observation count is not exactly `4 × replications`.
    #[error(
        "invalid design: expected {expected} observations (2 x 2 x {replications}), got {actual}"
    )]
    InvalidDesign {
        /// Replications per cell requested by the caller.
        replications: usize,
        /// Number of observations a 2×2 design needs.
        expected: usize,
        /// Number of observations provided.
        actual: usize,
    },

    /// Returned when `replications == 0`.
    #[error("invalid design: replications must be at least 1")]
    ZeroReplications,

    /// Returned when an observation is NaN or infinite.
    #[error("invalid design: observation {index} is not finite ({value})")]
    NonFiniteObservation {
        /// Position of the offending value in the input sequence.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Returned when a single replication leaves no residual degrees of freedom.
    #[error("insufficient replication: {replications} per cell leaves no residual degrees of freedom")]
    InsufficientReplication {
        /// Replications per cell.
        replications: usize,
    },

    /// Returned when the F tail probability is evaluated outside its domain.
    #[error("domain error: {0}")]
    Domain(String),

    /// Returned when an [`AnovaConfig`](crate::AnovaConfig) fails validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AnovaError {
    /// Returns `true` for errors raised because the observations cannot be
    /// partitioned into 2 rows × 2 columns × `replications`.
    pub fn is_invalid_design(&self) -> bool {
        matches!(
            self,
            AnovaError::InvalidDesign { .. }
                | AnovaError::ZeroReplications
                | AnovaError::NonFiniteObservation { .. }
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AnovaError>;
