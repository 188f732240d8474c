//! Spreadsheet cross-checks for complete 2×2 analyses.

use u_anova::{AnovaConfig, AnovaError, Effect, Level, TwoWayAnova};

const DATA_R3: [f64; 12] = [
    32.0, 45.0, 67.0, 67.0, 56.0, 89.0, 56.0, 23.0, 57.0, 67.0, 56.0, 79.0,
];

const DATA_R4: [f64; 16] = [
    32.0, 45.0, 67.0, 67.0, 56.0, 89.0, 56.0, 23.0, 57.0, 67.0, 56.0, 79.0, 45.0, 78.0, 56.0,
    89.0,
];

fn assert_close(actual: f64, expected: f64, tol: f64, what: &str) {
    assert!(
        (actual - expected).abs() <= tol,
        "{what}: got {actual}, expected {expected} (tol {tol})"
    );
}

#[test]
fn default_replications_match_spreadsheet() {
    let anova = TwoWayAnova::with_config(&DATA_R3, &AnovaConfig::default()).unwrap();

    assert_close(anova.msc(), 1496.33, 0.1, "MSC");
    assert_close(anova.msr(), 27.0, 0.1, "MSR");
    assert_close(anova.msrc(), 0.33, 0.1, "MSRC");
    assert_close(anova.fc(), 5.43, 0.1, "Fc");
    assert_close(anova.fr(), 0.09, 0.1, "Fr");
    assert_close(anova.frc(), 0.0021, 0.1, "Frc");
    assert_close(anova.pc().unwrap(), 0.048, 0.1, "Pc");
    assert_close(anova.pr().unwrap(), 0.7622, 0.1, "Pr");
    assert_close(anova.prc().unwrap(), 0.9731, 0.1, "Prc");

    // Tighter checks on the p-values the spreadsheet reports to four places.
    assert_close(anova.pr().unwrap(), 0.7622, 1e-4, "Pr");
    assert_close(anova.prc().unwrap(), 0.9731, 1e-4, "Prc");
}

#[test]
fn four_replications_match_spreadsheet() {
    let anova = TwoWayAnova::new(&DATA_R4, 4).unwrap();

    assert_close(anova.msc(), 30.25, 0.1, "MSC");
    assert_close(anova.msr(), 529.0, 0.1, "MSR");
    assert_close(anova.msrc(), 1.0, 0.1, "MSRC");
    assert_close(anova.fc(), 0.0784, 0.1, "Fc");
    assert_close(anova.fr(), 1.371, 0.1, "Fr");
    assert_close(anova.frc(), 0.0025, 0.1, "Frc");
    assert_close(anova.pc().unwrap(), 0.7842, 0.1, "Pc");
    assert_close(anova.pr().unwrap(), 0.2643, 0.1, "Pr");
    assert_close(anova.prc().unwrap(), 0.9602, 0.1, "Prc");

    assert_close(anova.pc().unwrap(), 0.7842, 1e-4, "Pc");
    assert_close(anova.pr().unwrap(), 0.2643, 1e-4, "Pr");
    assert_close(anova.prc().unwrap(), 0.9602, 1e-4, "Prc");
}

#[test]
fn partition_of_one_to_twelve() {
    let data: Vec<f64> = (1..=12).map(f64::from).collect();
    let anova = TwoWayAnova::new(&data, 3).unwrap();
    let grid = anova.table().grid();

    assert_eq!(grid[0][0], vec![1.0, 2.0, 3.0]);
    assert_eq!(grid[0][1], vec![4.0, 5.0, 6.0]);
    assert_eq!(grid[1][0], vec![7.0, 8.0, 9.0]);
    assert_eq!(grid[1][1], vec![10.0, 11.0, 12.0]);
    assert_eq!(anova.table().cell_mean(Level::Second, Level::Second), 11.0);
}

#[test]
fn invalid_inputs_fail_construction() {
    let err = TwoWayAnova::new(&[], 1).unwrap_err();
    assert!(err.is_invalid_design(), "{err}");

    let err = TwoWayAnova::new(&[1.0, 2.0, 3.0], 3).unwrap_err();
    assert!(err.is_invalid_design(), "{err}");

    let err = TwoWayAnova::new(&[1.0, 2.0, 3.0, 4.0], 1).unwrap_err();
    assert_eq!(err, AnovaError::InsufficientReplication { replications: 1 });
}

#[test]
fn summary_matches_accessors() {
    let anova = TwoWayAnova::new(&DATA_R4, 4).unwrap();
    let table = anova.summary().unwrap();

    for effect in Effect::ALL {
        let row = table.source(effect);
        assert_eq!(row.f_ratio, anova.f_ratio(effect));
        assert_eq!(row.p_value, anova.p_value(effect).unwrap());
    }
    assert_eq!(table.error.df, 12);
    assert_eq!(table.total_df, 15);
    assert_close(table.source(Effect::Row).f_critical, 4.747_225, 1e-5, "F crit");
    assert!(table.significant_effects().is_empty());
}
