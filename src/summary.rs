//! Plain-data ANOVA table produced by [`TwoWayAnova::summary`](crate::TwoWayAnova::summary).

use crate::anova::Effect;

/// One tested source of variation.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    pub effect: Effect,
    pub sum_of_squares: f64,
    pub df: u32,
    pub mean_square: f64,
    pub f_ratio: f64,
    pub p_value: f64,
    /// F that would give a p-value of exactly `alpha`.
    pub f_critical: f64,
}

impl SourceRow {
    /// Whether this effect's p-value is below `alpha`.
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Residual (within-cell) variation.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRow {
    pub sum_of_squares: f64,
    pub df: u32,
    pub mean_square: f64,
}

/// Complete two-way ANOVA table.
#[derive(Debug, Clone, PartialEq)]
pub struct AnovaTable {
    /// Row, column and interaction, in that order.
    pub sources: [SourceRow; 3],
    pub error: ErrorRow,
    pub total_sum_of_squares: f64,
    pub total_df: usize,
    pub alpha: f64,
}

impl AnovaTable {
    /// The row for `effect`.
    pub fn source(&self, effect: Effect) -> &SourceRow {
        match effect {
            Effect::Row => &self.sources[0],
            Effect::Column => &self.sources[1],
            Effect::Interaction => &self.sources[2],
        }
    }

    /// Effects whose p-value is below the table's `alpha`, in table order.
    pub fn significant_effects(&self) -> Vec<Effect> {
        self.sources
            .iter()
            .filter(|row| row.is_significant(self.alpha))
            .map(|row| row.effect)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(effect: Effect, p_value: f64) -> SourceRow {
        SourceRow {
            effect,
            sum_of_squares: 1.0,
            df: 1,
            mean_square: 1.0,
            f_ratio: 1.0,
            p_value,
            f_critical: 5.0,
        }
    }

    #[test]
    fn test_source_lookup_and_significance() {
        let table = AnovaTable {
            sources: [
                row(Effect::Row, 0.30),
                row(Effect::Column, 0.01),
                row(Effect::Interaction, 0.049),
            ],
            error: ErrorRow {
                sum_of_squares: 8.0,
                df: 8,
                mean_square: 1.0,
            },
            total_sum_of_squares: 11.0,
            total_df: 11,
            alpha: 0.05,
        };
        assert_eq!(table.source(Effect::Column).p_value, 0.01);
        assert_eq!(
            table.significant_effects(),
            vec![Effect::Column, Effect::Interaction]
        );
        assert!(!table.source(Effect::Row).is_significant(table.alpha));
    }
}
