//! # u-anova
//!
//! Two-way (2×2) fixed-effects analysis of variance with replication.
//!
//! Given `4 × r` ordered observations, the crate lays them out as a
//! balanced 2×2 design, decomposes the variation into row, column,
//! interaction and residual mean squares, and refers each F-ratio to
//! F(1, 4(r − 1)) using the exact finite-series tail of the F-distribution.
//!
//! ## Modules
//!
//! - [`design`] — 2×2×r layout, totals and means
//! - [`anova`] — mean squares, F-ratios and p-values, memoized
//! - [`fdist`] — F upper-tail probability and critical values for integer df
//! - [`summary`] — plain-data ANOVA table
//! - [`config`] — replications and significance level
//!
//! ## Example
//!
//! ```
//! use u_anova::{AnovaConfig, TwoWayAnova};
//!
//! let data = [
//!     32.0, 45.0, 67.0, 67.0, 56.0, 89.0, 56.0, 23.0, 57.0, 67.0, 56.0, 79.0, 45.0, 78.0,
//!     56.0, 89.0,
//! ];
//! let config = AnovaConfig::new().with_replications(4);
//! let anova = TwoWayAnova::with_config(&data, &config).unwrap();
//!
//! assert!((anova.msr() - 529.0).abs() < 1e-9);
//! assert!((anova.pr().unwrap() - 0.2643).abs() < 1e-3);
//! assert!(anova.summary().unwrap().significant_effects().is_empty());
//! ```
//!
//! ## Design Notes
//!
//! - **No partial results**: construction either yields a valid balanced
//!   design or an [`AnovaError`].
//! - **Exact series**: p-values come from the finite Abramowitz & Stegun
//!   series, not an iterative incomplete-beta approximation.

pub mod anova;
pub mod config;
pub mod design;
pub mod error;
pub mod fdist;
pub mod summary;

pub use anova::{Effect, TwoWayAnova};
pub use config::AnovaConfig;
pub use design::{DesignTable, Grid, Level};
pub use error::{AnovaError, Result};
pub use summary::{AnovaTable, ErrorRow, SourceRow};
