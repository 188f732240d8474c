//! Balanced 2×2 factorial layout with replication.
//!
//! A [`DesignTable`] partitions a flat, ordered observation sequence into
//! two levels of a row factor × two levels of a column factor, each cell
//! holding exactly `replications` values:
//!
//! ```text
//!                 Column 1          Column 2
//!   Row 1   x[0 .. r]          x[r .. 2r]
//!   Row 2   x[2r .. 3r]        x[3r .. 4r]
//! ```
//!
//! Totals are accumulated once at construction with Neumaier-compensated
//! summation; means are derived from them on demand.

use tracing::debug;

use crate::error::{AnovaError, Result};

/// One of the two levels of a factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    First,
    Second,
}

impl Level {
    /// Both levels, in table order.
    pub const ALL: [Level; 2] = [Level::First, Level::Second];

    /// Zero-based position of this level in the table.
    pub fn index(self) -> usize {
        match self {
            Level::First => 0,
            Level::Second => 1,
        }
    }
}

/// A value per cell of a 2×2 design, indexed `[row][column]`.
pub type Grid<T> = [[T; 2]; 2];

/// Immutable 2×2×replications layout of observations with cached totals.
///
/// # Examples
/// ```
/// use u_anova::{DesignTable, Level};
///
/// let data: Vec<f64> = (1..=12).map(f64::from).collect();
/// let table = DesignTable::new(&data, 3).unwrap();
/// assert_eq!(table.cell(Level::Second, Level::First), &[7.0, 8.0, 9.0]);
/// assert_eq!(table.row_totals(), [21.0, 57.0]);
/// assert_eq!(table.grand_mean(), 6.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DesignTable {
    replications: usize,
    cells: Grid<Vec<f64>>,
    cell_totals: Grid<f64>,
    row_totals: [f64; 2],
    column_totals: [f64; 2],
    grand_total: f64,
}

impl DesignTable {
    /// Partitions `observations` into a 2×2 grid of `replications`-sized cells.
    ///
    /// The first `replications` values fill (row 1, column 1), the next fill
    /// (row 1, column 2), then (row 2, column 1) and (row 2, column 2).
    ///
    /// # Errors
    /// - [`AnovaError::ZeroReplications`] if `replications == 0`.
    /// - [`AnovaError::InvalidDesign`] unless
    ///   `observations.len() == 4 × replications`.
    /// - [`AnovaError::NonFiniteObservation`] if any value is NaN or infinite.
    pub fn new(observations: &[f64], replications: usize) -> Result<Self> {
        if replications == 0 {
            return Err(AnovaError::ZeroReplications);
        }
        let expected = replications.saturating_mul(4);
        if observations.len() != expected {
            return Err(AnovaError::InvalidDesign {
                replications,
                expected,
                actual: observations.len(),
            });
        }
        if let Some((index, &value)) = observations
            .iter()
            .enumerate()
            .find(|(_, x)| !x.is_finite())
        {
            return Err(AnovaError::NonFiniteObservation { index, value });
        }

        let cell = |k: usize| observations[k * replications..(k + 1) * replications].to_vec();
        let cells = [[cell(0), cell(1)], [cell(2), cell(3)]];

        let cell_totals = [
            [compensated_sum(&cells[0][0]), compensated_sum(&cells[0][1])],
            [compensated_sum(&cells[1][0]), compensated_sum(&cells[1][1])],
        ];
        let row_totals = [
            cell_totals[0][0] + cell_totals[0][1],
            cell_totals[1][0] + cell_totals[1][1],
        ];
        let column_totals = [
            cell_totals[0][0] + cell_totals[1][0],
            cell_totals[0][1] + cell_totals[1][1],
        ];
        let grand_total = compensated_sum(observations);

        let table = Self {
            replications,
            cells,
            cell_totals,
            row_totals,
            column_totals,
            grand_total,
        };
        debug!(
            replications,
            n = observations.len(),
            grand_mean = table.grand_mean(),
            "built 2x2 design table"
        );
        Ok(table)
    }

    /// Observations per cell.
    pub fn replications(&self) -> usize {
        self.replications
    }

    /// Total number of observations, `4 × replications`.
    pub fn len(&self) -> usize {
        4 * self.replications
    }

    /// Always `false`: a valid design holds at least four observations.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The full grid, `[row][column]`, each cell in input order.
    pub fn grid(&self) -> &Grid<Vec<f64>> {
        &self.cells
    }

    /// Observations of a single cell.
    pub fn cell(&self, row: Level, column: Level) -> &[f64] {
        &self.cells[row.index()][column.index()]
    }

    /// Iterates over `(row, column, observations)` for all four cells in
    /// table order.
    pub fn cells(&self) -> impl Iterator<Item = (Level, Level, &[f64])> + '_ {
        Level::ALL.into_iter().flat_map(move |row| {
            Level::ALL
                .into_iter()
                .map(move |column| (row, column, self.cell(row, column)))
        })
    }

    /// Sum of each row, over both of its cells.
    pub fn row_totals(&self) -> [f64; 2] {
        self.row_totals
    }

    /// Sum of each column, over both rows.
    pub fn column_totals(&self) -> [f64; 2] {
        self.column_totals
    }

    /// Sum of each cell, `[row][column]`.
    pub fn cell_totals(&self) -> Grid<f64> {
        self.cell_totals
    }

    /// Sum of every observation.
    pub fn grand_total(&self) -> f64 {
        self.grand_total
    }

    /// Row total divided by `2 × replications`.
    pub fn row_mean(&self, row: Level) -> f64 {
        self.row_totals[row.index()] / (2 * self.replications) as f64
    }

    /// Column total divided by `2 × replications`.
    pub fn column_mean(&self, column: Level) -> f64 {
        self.column_totals[column.index()] / (2 * self.replications) as f64
    }

    /// Cell total divided by `replications`.
    pub fn cell_mean(&self, row: Level, column: Level) -> f64 {
        self.cell_totals[row.index()][column.index()] / self.replications as f64
    }

    /// Grand total divided by `4 × replications`.
    pub fn grand_mean(&self) -> f64 {
        self.grand_total / self.len() as f64
    }
}

/// Neumaier's improved Kahan summation.
///
/// Carries a compensation term so low-order bits lost when adding values
/// of very different magnitude are recovered at the end.
pub(crate) fn compensated_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}
