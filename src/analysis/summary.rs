use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Scalar helpers
// ---------------------------------------------------------------------------

/// Arithmetic mean; NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (divides by n − 1); NaN below two values.
pub fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (n - 1) as f64).sqrt()
}

/// The `p`-th quantile of sorted data, interpolating linearly between the
/// two nearest order statistics. NaN for empty input.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
    let j = h.floor() as usize;
    let g = h - h.floor();
    if j + 1 >= n {
        sorted[n - 1]
    } else {
        (1.0 - g) * sorted[j] + g * sorted[j + 1]
    }
}

// ---------------------------------------------------------------------------
// SummaryStats
// ---------------------------------------------------------------------------

/// Descriptive statistics of one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSummary {
    pub name: String,
    /// Number of non-missing values the other statistics are computed over.
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl FieldSummary {
    fn from_values(name: &str, mut values: Vec<f64>) -> Self {
        values.sort_by(f64::total_cmp);
        FieldSummary {
            name: name.to_string(),
            count: values.len(),
            mean: mean(&values),
            std: sample_std(&values),
            min: values.first().copied().unwrap_or(f64::NAN),
            p25: quantile_sorted(&values, 0.25),
            p50: quantile_sorted(&values, 0.50),
            p75: quantile_sorted(&values, 0.75),
            max: values.last().copied().unwrap_or(f64::NAN),
        }
    }

    /// Statistic labels paired with their values, in report order.
    pub fn rows(&self) -> [(&'static str, f64); 8] {
        [
            ("count", self.count as f64),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.p25),
            ("50%", self.p50),
            ("75%", self.p75),
            ("max", self.max),
        ]
    }
}

/// One [`FieldSummary`] per numeric column, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub fields: Vec<FieldSummary>,
}

/// Describe every numeric column of `table`, skipping missing cells.
pub fn summarize(table: &Table) -> SummaryStats {
    let fields = table
        .measurement_names
        .iter()
        .enumerate()
        .map(|(idx, name)| FieldSummary::from_values(name, table.column(idx).flatten().collect()))
        .collect();
    SummaryStats { fields }
}
