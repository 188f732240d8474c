//! Configuration for a two-way ANOVA run.

use crate::error::{AnovaError, Result};

/// Replications per cell used when none is given.
pub const DEFAULT_REPLICATIONS: usize = 3;

/// Significance level used when none is given.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Configuration for a [`TwoWayAnova`](crate::TwoWayAnova).
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use u_anova::AnovaConfig;
///
/// let config = AnovaConfig::new()
///     .with_replications(4)
///     .with_alpha(0.01);
///
/// assert_eq!(config.replications(), 4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AnovaConfig {
    /// Observations per cell.
    replications: usize,
    /// Significance level for [`is_significant`](crate::TwoWayAnova::is_significant).
    alpha: f64,
}

impl AnovaConfig {
    /// Creates a configuration with the defaults: `replications = 3`,
    /// `alpha = 0.05`.
    pub fn new() -> Self {
        Self {
            replications: DEFAULT_REPLICATIONS,
            alpha: DEFAULT_ALPHA,
        }
    }

    /// Sets the number of observations per cell.
    pub fn with_replications(mut self, replications: usize) -> Self {
        self.replications = replications;
        self
    }

    /// Sets the significance level.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Returns the number of observations per cell.
    pub fn replications(&self) -> usize {
        self.replications
    }

    /// Returns the significance level.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Validates this configuration.
    ///
    /// Replications are checked against the observations at construction
    /// time, so only `alpha` is validated here: it must lie in `(0, 1)`.
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(AnovaError::InvalidConfig(format!(
                "alpha must be in (0, 1), got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}

impl Default for AnovaConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AnovaConfig::default();
        assert_eq!(config.replications(), 3);
        assert_eq!(config.alpha(), 0.05);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_overrides() {
        let config = AnovaConfig::new().with_replications(5).with_alpha(0.1);
        assert_eq!(config.replications(), 5);
        assert_eq!(config.alpha(), 0.1);
    }

    #[test]
    fn alpha_out_of_range() {
        for alpha in [0.0, 1.0, -0.2, 1.5, f64::NAN] {
            let err = AnovaConfig::new().with_alpha(alpha).validate().unwrap_err();
            assert!(
                matches!(err, AnovaError::InvalidConfig(_)),
                "alpha={alpha} should be rejected"
            );
        }
    }
}
