//! 차트 데이터 가공 테스트.
use float_cmp::assert_approx_eq;
use power_plant_economics::{
    charts::{daily_stats, expense_shares, Histogram, DEFAULT_HISTOGRAM_BINS},
    expenses::{ExpenseCategory, ExpenseMap},
    price_table::PriceTable,
};

#[test]
fn histogram_counts_every_value() {
    let values: Vec<f64> = (0..240).map(|v| f64::from(v % 97) * 1.3).collect();
    let h = Histogram::from_values(values.iter().copied(), DEFAULT_HISTOGRAM_BINS);
    assert_eq!(h.counts.len(), DEFAULT_HISTOGRAM_BINS);
    assert_eq!(h.total(), values.len());
    assert_eq!(h.start, 0.0);
    assert_approx_eq!(f64, h.bin_width, 96.0 * 1.3 / 50.0, epsilon = 1e-12);
}

#[test]
fn histogram_maximum_lands_in_last_bin() {
    let h = Histogram::from_values([0.0, 5.0, 10.0], 2);
    assert_eq!(h.counts, vec![1, 2]);
    let bins: Vec<_> = h.bins().collect();
    assert_eq!(bins[1], (5.0, 10.0, 2));
}

#[test]
fn histogram_of_identical_values_is_one_bin() {
    let h = Histogram::from_values(vec![42.0; 24], 50);
    assert_eq!(h.counts, vec![24]);
    assert_eq!(h.start, 41.5);
    assert_eq!(h.bin_width, 1.0);
}

#[test]
fn histogram_of_nothing_is_empty() {
    let h = Histogram::from_values(Vec::new(), 50);
    assert!(h.counts.is_empty());
    assert_eq!(h.max_count(), 0);
}

#[test]
fn daily_stats_per_row() {
    let mut day = vec![10.0; 24];
    day[3] = 4.0;
    day[20] = 34.0;
    let table = PriceTable::from_rows(vec![day, vec![7.0; 24]]).unwrap();
    let stats = daily_stats(&table);
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].min, 4.0);
    assert_eq!(stats[0].max, 34.0);
    assert_approx_eq!(f64, stats[0].mean, (22.0 * 10.0 + 4.0 + 34.0) / 24.0, epsilon = 1e-12);
    assert_eq!(stats[1].mean, 7.0);
}

#[test]
fn default_expenses_total_and_shares() {
    let expenses = ExpenseMap::default();
    assert_eq!(expenses.total(), 195_324.0);
    let shares = expense_shares(&expenses);
    assert_eq!(shares.len(), 5);
    assert_eq!(shares[0].0, ExpenseCategory::Oil);
    let sum: f64 = shares.iter().map(|(_, s)| s).sum();
    assert_approx_eq!(f64, sum, 1.0, epsilon = 1e-12);
    assert_approx_eq!(f64, shares[4].1, 61_500.0 / 195_324.0, epsilon = 1e-12);
}

#[test]
fn zero_expenses_have_zero_shares() {
    let shares = expense_shares(&ExpenseMap::zeroed());
    assert!(shares.iter().all(|(_, s)| *s == 0.0));
}
