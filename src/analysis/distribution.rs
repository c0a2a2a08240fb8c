use std::f64::consts::PI;

use super::summary::sample_std;

/// Number of points the density curve is evaluated at.
pub const KDE_GRID_SIZE: usize = 200;

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Equal-width bins over `[start, start + counts.len() * width]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub start: f64,
    pub width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Centre of bin `i`.
    pub fn center(&self, i: usize) -> f64 {
        self.start + (i as f64 + 0.5) * self.width
    }

    /// Number of values counted.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Count `values` into `bins` equal-width bins spanning their range.
///
/// Every bin is half-open except the last, which also takes the maximum.
/// A zero-width range is widened to one unit centred on the value.
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let bins = bins.max(1);
    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if values.is_empty() {
        lo = 0.0;
        hi = 1.0;
    } else if hi - lo == 0.0 {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    Histogram {
        start: lo,
        width,
        counts,
    }
}

// ---------------------------------------------------------------------------
// Gaussian kernel density
// ---------------------------------------------------------------------------

/// Scott's rule bandwidth: sample standard deviation times n^(-1/5).
pub fn scott_bandwidth(values: &[f64]) -> f64 {
    sample_std(values) * (values.len() as f64).powf(-0.2)
}

/// Gaussian kernel density of `values` evaluated over their range,
/// multiplied by `scale` (pass `n * bin_width` to overlay a histogram).
///
/// Returns an empty curve when the bandwidth is undefined or zero.
pub fn kde_curve(values: &[f64], scale: f64) -> Vec<[f64; 2]> {
    let bw = scott_bandwidth(values);
    if !bw.is_finite() || bw <= 0.0 {
        return Vec::new();
    }
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let norm = 1.0 / (values.len() as f64 * bw * (2.0 * PI).sqrt());
    let step = (hi - lo) / (KDE_GRID_SIZE - 1) as f64;

    (0..KDE_GRID_SIZE)
        .map(|i| {
            let x = lo + i as f64 * step;
            let density: f64 = values
                .iter()
                .map(|&v| (-0.5 * ((x - v) / bw).powi(2)).exp())
                .sum::<f64>()
                * norm;
            [x, density * scale]
        })
        .collect()
}
