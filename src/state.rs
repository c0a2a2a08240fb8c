use std::collections::BTreeMap;

use crate::analysis::distribution::{histogram, kde_curve, Histogram};
use crate::analysis::grouped::GroupedStats;
use crate::analysis::summary::SummaryStats;
use crate::color::CategoryColors;
use crate::data::model::Table;
use crate::pipeline::Analysis;

pub const PETAL_LENGTH: &str = "petal length (cm)";
pub const SEPAL_LENGTH: &str = "sepal length (cm)";

/// Bins in the sepal length histogram.
pub const HISTOGRAM_BINS: usize = 15;

// ---------------------------------------------------------------------------
// Chart series
// ---------------------------------------------------------------------------

/// Numeric series for the four charts, computed once from the cleaned table.
#[derive(Debug, Clone)]
pub struct ChartData {
    /// Row index vs petal length.
    pub trend: Vec<[f64; 2]>,
    /// Average petal length per category, in category order.
    pub bars: Vec<(String, f64)>,
    /// Sepal length distribution.
    pub histogram: Histogram,
    /// Density of sepal length scaled to histogram counts.
    pub density: Vec<[f64; 2]>,
    /// Sepal length vs petal length, split by category.
    pub scatter: BTreeMap<String, Vec<[f64; 2]>>,
}

impl ChartData {
    pub fn build(table: &Table, grouped: &GroupedStats) -> Self {
        let petal = table.measurement_index(PETAL_LENGTH);
        let sepal = table.measurement_index(SEPAL_LENGTH);

        let trend = petal
            .map(|p| {
                table
                    .column(p)
                    .enumerate()
                    .filter_map(|(i, v)| v.map(|v| [i as f64, v]))
                    .collect()
            })
            .unwrap_or_default();

        let sepal_values: Vec<f64> = sepal
            .map(|s| table.column(s).flatten().collect())
            .unwrap_or_default();
        let histogram = histogram(&sepal_values, HISTOGRAM_BINS);
        let density = kde_curve(&sepal_values, sepal_values.len() as f64 * histogram.width);

        let mut scatter: BTreeMap<String, Vec<[f64; 2]>> = BTreeMap::new();
        if let (Some(s), Some(p)) = (sepal, petal) {
            for rec in table.records.iter().filter(|r| !r.category.is_missing()) {
                if let (Some(x), Some(y)) = (rec.measurements[s], rec.measurements[p]) {
                    scatter.entry(rec.category.to_string()).or_default().push([x, y]);
                }
            }
        }

        ChartData {
            trend,
            bars: grouped.column(PETAL_LENGTH),
            histogram,
            density,
            scatter,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Everything the chart window shows. Built once; the window never mutates it.
pub struct AppState {
    pub charts: ChartData,
    pub summary: SummaryStats,
    pub grouped: GroupedStats,
    pub colors: CategoryColors,
}

impl AppState {
    pub fn new(table: &Table, analysis: Analysis) -> Self {
        let Analysis { summary, grouped } = analysis;
        let charts = ChartData::build(table, &grouped);
        let colors = CategoryColors::new(grouped.groups.keys());
        log::debug!(
            "chart data: {} trend points, {} bars, {} binned values, {} scatter groups",
            charts.trend.len(),
            charts.bars.len(),
            charts.histogram.total(),
            charts.scatter.len()
        );
        AppState {
            charts,
            summary,
            grouped,
            colors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::grouped::group_means;
    use crate::data::model::{CategoryCell, Record};
    use crate::data::source::BundledIris;
    use crate::pipeline::prepare;

    #[test]
    fn iris_chart_series_have_full_length() {
        let mut sink = Vec::new();
        let table = prepare(&BundledIris, &mut sink).into_table().unwrap();
        let charts = ChartData::build(&table, &group_means(&table));

        assert_eq!(charts.trend.len(), 150);
        assert_eq!(charts.trend[0], [0.0, 1.4]);
        assert_eq!(charts.bars.len(), 3);
        assert_eq!(charts.histogram.counts.len(), HISTOGRAM_BINS);
        assert_eq!(charts.histogram.total(), 150);
        assert!(!charts.density.is_empty());
        assert!(charts.scatter.values().all(|pts| pts.len() == 50));
    }

    #[test]
    fn tables_without_chart_columns_give_empty_series() {
        let table = Table::new(
            vec!["x".into()],
            "species",
            vec![
                Record::complete(&[1.0], CategoryCell::Name("a".into())),
                Record::complete(&[2.0], CategoryCell::Name("b".into())),
            ],
        )
        .unwrap();
        let charts = ChartData::build(&table, &group_means(&table));
        assert!(charts.trend.is_empty());
        assert!(charts.bars.is_empty());
        assert!(charts.scatter.is_empty());
        assert_eq!(charts.histogram.total(), 0);
    }
}
