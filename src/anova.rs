//! Two-way fixed-effects ANOVA for a balanced 2×2 design with replication.
//!
//! # Model
//! With `r` replications per cell, row means `R̄ᵢ`, column means `C̄ⱼ`,
//! cell means `X̄ᵢⱼ` and grand mean `X̄`:
//!
//! ```text
//! MSR  = 2r · Σᵢ (R̄ᵢ − X̄)²
//! MSC  = 2r · Σⱼ (C̄ⱼ − X̄)²
//! MSRC =  r · Σᵢⱼ (X̄ᵢⱼ − R̄ᵢ − C̄ⱼ + X̄)²
//! MSE  = Σᵢⱼₖ (xᵢⱼₖ − X̄ᵢⱼ)² / (4(r − 1))
//! ```
//!
//! Every effect has one degree of freedom (two levels), so each F-ratio is
//! referred to F(1, 4(r − 1)).
//!
//! # Caching
//! Mean squares, the total sum of squares and p-values are computed on
//! first access and stored in [`OnceLock`]s. An analysis can be shared
//! across threads; concurrent first reads initialize each value once.
//!
//! # Zero residual variance
//! F-ratios use IEEE division: a positive mean square over `MSE = 0` is
//! `+∞` (p-value 0) and `0 / 0` is NaN, for which [`TwoWayAnova::p_value`]
//! returns [`AnovaError::Domain`].

use std::sync::OnceLock;

use tracing::{trace, warn};

use crate::config::{AnovaConfig, DEFAULT_ALPHA};
use crate::design::{compensated_sum, DesignTable, Level};
use crate::error::{AnovaError, Result};
use crate::fdist::{f_critical_value, f_tail_probability};
use crate::summary::{AnovaTable, ErrorRow, SourceRow};

/// Source of variation tested against the residual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Main effect of the row factor.
    Row,
    /// Main effect of the column factor.
    Column,
    /// Row × column interaction.
    Interaction,
}

impl Effect {
    /// All effects, in table order.
    pub const ALL: [Effect; 3] = [Effect::Row, Effect::Column, Effect::Interaction];

    fn index(self) -> usize {
        match self {
            Effect::Row => 0,
            Effect::Column => 1,
            Effect::Interaction => 2,
        }
    }
}

/// Lazily evaluated two-way ANOVA over a [`DesignTable`].
///
/// # Examples
/// ```
/// use u_anova::{Effect, TwoWayAnova};
///
/// let data = [32.0, 45.0, 67.0, 67.0, 56.0, 89.0, 56.0, 23.0, 57.0, 67.0, 56.0, 79.0];
/// let anova = TwoWayAnova::new(&data, 3).unwrap();
///
/// assert!((anova.msr() - 27.0).abs() < 1e-9);
/// assert!((anova.pc().unwrap() - 0.0481).abs() < 1e-3);
/// assert!(anova.is_significant(Effect::Column).unwrap());
/// assert!(!anova.is_significant(Effect::Row).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct TwoWayAnova {
    table: DesignTable,
    df_error: u32,
    alpha: f64,
    mean_squares: [OnceLock<f64>; 3],
    mse: OnceLock<f64>,
    sst: OnceLock<f64>,
    p_values: [OnceLock<Result<f64>>; 3],
}

impl TwoWayAnova {
    /// Partitions `observations` into a 2×2×`replications` design and
    /// prepares the analysis with the default significance level.
    ///
    /// # Errors
    /// - Any [`DesignTable::new`] error when the observations do not form a
    ///   balanced 2×2 design.
    /// - [`AnovaError::InsufficientReplication`] if `replications == 1`.
    pub fn new(observations: &[f64], replications: usize) -> Result<Self> {
        Self::with_config(
            observations,
            &AnovaConfig::new().with_replications(replications),
        )
    }

    /// Builds the analysis from a validated [`AnovaConfig`].
    ///
    /// # Errors
    /// [`AnovaError::InvalidConfig`] if the config fails validation, plus
    /// everything [`TwoWayAnova::new`] can return.
    pub fn with_config(observations: &[f64], config: &AnovaConfig) -> Result<Self> {
        config.validate()?;
        let table = DesignTable::new(observations, config.replications())?;
        Self::build(table, config.alpha())
    }

    /// Wraps an existing table, using the default significance level.
    ///
    /// # Errors
    /// [`AnovaError::InsufficientReplication`] if the table has a single
    /// replication per cell.
    pub fn from_table(table: DesignTable) -> Result<Self> {
        Self::build(table, DEFAULT_ALPHA)
    }

    fn build(table: DesignTable, alpha: f64) -> Result<Self> {
        let replications = table.replications();
        if replications < 2 {
            return Err(AnovaError::InsufficientReplication { replications });
        }
        let df_error = u32::try_from(4 * (replications - 1)).map_err(|_| {
            AnovaError::Domain(format!(
                "{replications} replications exceed the supported degrees of freedom"
            ))
        })?;

        Ok(Self {
            table,
            df_error,
            alpha,
            mean_squares: Default::default(),
            mse: OnceLock::new(),
            sst: OnceLock::new(),
            p_values: Default::default(),
        })
    }

    /// The underlying design, for grid, totals and means.
    pub fn table(&self) -> &DesignTable {
        &self.table
    }

    /// Significance level used by [`is_significant`](Self::is_significant).
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    // --- degrees of freedom ---

    /// Degrees of freedom of each effect: levels − 1 = 1.
    pub fn df_effect(&self) -> u32 {
        1
    }

    /// Residual degrees of freedom, `4(r − 1)`.
    pub fn df_error(&self) -> u32 {
        self.df_error
    }

    /// Total degrees of freedom, `4r − 1`.
    pub fn df_total(&self) -> usize {
        self.table.len() - 1
    }

    // --- mean squares ---

    /// Mean square of `effect`.
    pub fn mean_square(&self, effect: Effect) -> f64 {
        *self.mean_squares[effect.index()].get_or_init(|| {
            let ms = match effect {
                Effect::Row => self.row_mean_square(),
                Effect::Column => self.column_mean_square(),
                Effect::Interaction => self.interaction_mean_square(),
            };
            trace!(?effect, mean_square = ms, "computed mean square");
            ms
        })
    }

    /// Row mean square.
    pub fn msr(&self) -> f64 {
        self.mean_square(Effect::Row)
    }

    /// Column mean square.
    pub fn msc(&self) -> f64 {
        self.mean_square(Effect::Column)
    }

    /// Interaction mean square.
    pub fn msrc(&self) -> f64 {
        self.mean_square(Effect::Interaction)
    }

    /// Residual mean square: within-cell squared deviations over `4(r − 1)`.
    pub fn mse(&self) -> f64 {
        *self.mse.get_or_init(|| {
            let squares: Vec<f64> = self
                .table
                .cells()
                .flat_map(|(row, column, xs)| {
                    let m = self.table.cell_mean(row, column);
                    xs.iter().map(move |&x| (x - m) * (x - m))
                })
                .collect();
            let sse = compensated_sum(&squares);
            let mse = sse / f64::from(self.df_error);
            if mse == 0.0 {
                warn!("zero within-cell variance; F-ratios are infinite or undefined");
            }
            trace!(mse, "computed residual mean square");
            mse
        })
    }

    // --- sums of squares ---

    /// Sum of squares of `effect` (its mean square times one degree of freedom).
    pub fn sum_of_squares(&self, effect: Effect) -> f64 {
        self.mean_square(effect) * f64::from(self.df_effect())
    }

    /// Residual sum of squares.
    pub fn sse(&self) -> f64 {
        self.mse() * f64::from(self.df_error)
    }

    /// Total sum of squares about the grand mean.
    ///
    /// In a balanced design `SSR + SSC + SSRC + SSE = SST`.
    pub fn sst(&self) -> f64 {
        *self.sst.get_or_init(|| {
            let gm = self.table.grand_mean();
            let squares: Vec<f64> = self
                .table
                .cells()
                .flat_map(|(_, _, xs)| xs.iter())
                .map(|&x| (x - gm) * (x - gm))
                .collect();
            compensated_sum(&squares)
        })
    }

    // --- F-ratios ---

    /// F-ratio of `effect`: its mean square over the residual mean square.
    pub fn f_ratio(&self, effect: Effect) -> f64 {
        self.mean_square(effect) / self.mse()
    }

    /// Row F-ratio.
    pub fn fr(&self) -> f64 {
        self.f_ratio(Effect::Row)
    }

    /// Column F-ratio.
    pub fn fc(&self) -> f64 {
        self.f_ratio(Effect::Column)
    }

    /// Interaction F-ratio.
    pub fn frc(&self) -> f64 {
        self.f_ratio(Effect::Interaction)
    }

    // --- p-values ---

    /// Upper-tail probability of the F-ratio of `effect` under F(1, df_error).
    ///
    /// # Errors
    /// [`AnovaError::Domain`] when the F-ratio is NaN (both the effect and
    /// residual mean squares are zero).
    pub fn p_value(&self, effect: Effect) -> Result<f64> {
        self.p_values[effect.index()]
            .get_or_init(|| {
                let f = self.f_ratio(effect);
                let p = f_tail_probability(f, self.df_effect(), self.df_error);
                trace!(?effect, f, p = ?p, "computed p-value");
                p
            })
            .clone()
    }

    /// Row p-value.
    pub fn pr(&self) -> Result<f64> {
        self.p_value(Effect::Row)
    }

    /// Column p-value.
    pub fn pc(&self) -> Result<f64> {
        self.p_value(Effect::Column)
    }

    /// Interaction p-value.
    pub fn prc(&self) -> Result<f64> {
        self.p_value(Effect::Interaction)
    }

    /// Whether the p-value of `effect` falls below the configured `alpha`.
    pub fn is_significant(&self, effect: Effect) -> Result<bool> {
        Ok(self.p_value(effect)? < self.alpha)
    }

    /// Critical F at the configured `alpha` for F(1, df_error).
    pub fn f_critical(&self) -> Result<f64> {
        f_critical_value(self.alpha, self.df_effect(), self.df_error)
    }

    /// Collects every source of variation into an [`AnovaTable`].
    ///
    /// # Errors
    /// Propagates the first failing [`p_value`](Self::p_value).
    pub fn summary(&self) -> Result<AnovaTable> {
        let f_critical = self.f_critical()?;
        let source = |effect: Effect| -> Result<SourceRow> {
            Ok(SourceRow {
                effect,
                sum_of_squares: self.sum_of_squares(effect),
                df: self.df_effect(),
                mean_square: self.mean_square(effect),
                f_ratio: self.f_ratio(effect),
                p_value: self.p_value(effect)?,
                f_critical,
            })
        };
        Ok(AnovaTable {
            sources: [
                source(Effect::Row)?,
                source(Effect::Column)?,
                source(Effect::Interaction)?,
            ],
            error: ErrorRow {
                sum_of_squares: self.sse(),
                df: self.df_error,
                mean_square: self.mse(),
            },
            total_sum_of_squares: self.sst(),
            total_df: self.df_total(),
            alpha: self.alpha,
        })
    }

    fn row_mean_square(&self) -> f64 {
        let gm = self.table.grand_mean();
        let r = self.table.replications() as f64;
        let ss: f64 = Level::ALL
            .iter()
            .map(|&row| (self.table.row_mean(row) - gm).powi(2))
            .sum();
        2.0 * r * ss
    }

    fn column_mean_square(&self) -> f64 {
        let gm = self.table.grand_mean();
        let r = self.table.replications() as f64;
        let ss: f64 = Level::ALL
            .iter()
            .map(|&column| (self.table.column_mean(column) - gm).powi(2))
            .sum();
        2.0 * r * ss
    }

    fn interaction_mean_square(&self) -> f64 {
        let t = &self.table;
        let gm = t.grand_mean();
        let ss: f64 = t
            .cells()
            .map(|(row, column, _)| {
                (t.cell_mean(row, column) - t.row_mean(row) - t.column_mean(column) + gm).powi(2)
            })
            .sum();
        t.replications() as f64 * ss
    }
}
