/// Aggregations over a cleaned table.
///
/// * `summary`      – per-column descriptive statistics
/// * `grouped`      – per-category column means
/// * `distribution` – histogram bins and a kernel density curve for charts
pub mod distribution;
pub mod grouped;
pub mod summary;

#[cfg(test)]
pub(crate) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
