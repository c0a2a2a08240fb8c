use std::io::Write;

use thiserror::Error;

use crate::analysis::grouped::{group_means, GroupedStats};
use crate::analysis::summary::{summarize, SummaryStats};
use crate::data::model::Table;
use crate::data::source::DatasetSource;
use crate::data::{clean, loader, LoadError};
use crate::report;

/// Rows shown in the opening preview.
pub const PREVIEW_ROWS: usize = 5;

pub const MISSING_DATASET_MESSAGE: &str = "❌ Error: Dataset file not found.";

pub const INSIGHT: &str =
    "🌱 Setosa flowers generally have smaller petal sizes compared to Versicolor and Virginica.";

// ---------------------------------------------------------------------------
// Preparation stage: load → relabel → report → clean, behind one boundary
// ---------------------------------------------------------------------------

/// Result of the guarded preparation stage.
#[derive(Debug)]
pub enum Prepared {
    /// Cleaned table, ready for analysis.
    Ready(Table),
    /// The stage faulted; the boundary message has already been printed.
    Failed(LoadError),
}

/// Raised when analysis is asked for a table that preparation never produced.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no table to analyse: {reason}")]
    TableUnavailable { reason: String },
}

impl Prepared {
    /// Hand the cleaned table to the analysis stage.
    ///
    /// A failed preparation is not recovered from: the caller gets an error
    /// and analysis does not run.
    pub fn into_table(self) -> Result<Table, AnalysisError> {
        match self {
            Prepared::Ready(table) => Ok(table),
            Prepared::Failed(err) => Err(AnalysisError::TableUnavailable {
                reason: err.to_string(),
            }),
        }
    }
}

/// The message printed when the preparation boundary catches `err`.
pub fn boundary_message(err: &LoadError) -> String {
    match err {
        LoadError::DatasetNotFound(_) => MISSING_DATASET_MESSAGE.to_string(),
        other => format!("❌ Unexpected error: {other}"),
    }
}

fn prepare_inner(source: &dyn DatasetSource, out: &mut dyn Write) -> Result<Table, LoadError> {
    let raw = loader::load(source)?;
    let table = loader::relabel(raw.table, &raw.target_names)?;

    writeln!(out, "\nFirst {PREVIEW_ROWS} rows of dataset:")?;
    writeln!(out, "{}", report::render(&report::table_batch(&table.head(PREVIEW_ROWS))?)?)?;

    let schema = loader::describe_schema(&table);
    writeln!(out, "\nDataset Info:")?;
    writeln!(
        out,
        "{} entries, {} columns",
        schema.entries,
        schema.columns.len()
    )?;
    writeln!(out, "{}", report::render(&report::schema_batch(&schema)?)?)?;

    writeln!(out, "\nMissing Values:")?;
    let missing = loader::count_missing(&table);
    writeln!(out, "{}", report::render(&report::missing_batch(&missing)?)?)?;

    Ok(clean::drop_missing(table))
}

/// Run the preparation stage. Every fault inside it is caught here, printed
/// to `out` and logged; none propagates.
pub fn prepare(source: &dyn DatasetSource, out: &mut dyn Write) -> Prepared {
    match prepare_inner(source, out) {
        Ok(table) => {
            if table.is_empty() {
                log::warn!("every record was dropped during cleaning");
            }
            log::info!(
                "prepared table with {} records across {} categories",
                table.len(),
                table.categories().len()
            );
            Prepared::Ready(table)
        }
        Err(err) => {
            log::error!("preparation failed: {err}");
            // Nothing sensible remains to do if the report itself is unwritable.
            let _ = writeln!(out, "{}", boundary_message(&err));
            Prepared::Failed(err)
        }
    }
}

// ---------------------------------------------------------------------------
// Analysis stage: unguarded
// ---------------------------------------------------------------------------

/// Derived outputs of the analysis stage, reused by the charts.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub summary: SummaryStats,
    pub grouped: GroupedStats,
}

/// Compute and print the describe table, grouped means and the insight line.
pub fn analyse(table: &Table, out: &mut dyn Write) -> anyhow::Result<Analysis> {
    let summary = summarize(table);
    writeln!(out, "\nBasic Statistics:")?;
    writeln!(out, "{}", report::render(&report::summary_batch(&summary)?)?)?;

    let grouped = group_means(table);
    writeln!(out, "\nAverage measurements by {}:", grouped.category_name)?;
    writeln!(out, "{}", report::render(&report::grouped_batch(&grouped)?)?)?;

    writeln!(out, "\nPattern Insight:")?;
    writeln!(out, "{INSIGHT}")?;

    Ok(Analysis { summary, grouped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CategoryCell, Record};
    use crate::data::source::{BundledIris, RawDataset};

    struct MissingSource;

    impl DatasetSource for MissingSource {
        fn fetch(&self) -> Result<RawDataset, LoadError> {
            Err(LoadError::DatasetNotFound("bundle unavailable".into()))
        }
    }

    struct UnmappedSource;

    impl DatasetSource for UnmappedSource {
        fn fetch(&self) -> Result<RawDataset, LoadError> {
            let table = Table::new(
                vec!["x".into()],
                "target",
                vec![Record::complete(&[1.0], CategoryCell::Code(9))],
            )?;
            Ok(RawDataset {
                table,
                target_names: Default::default(),
            })
        }
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn bundled_dataset_prepares_cleanly() {
        let mut buf = Vec::new();
        let table = prepare(&BundledIris, &mut buf).into_table().unwrap();
        assert_eq!(table.len(), 150);
        assert_eq!(table.category_name, "species");

        let text = output(buf);
        assert!(text.contains("First 5 rows of dataset:"));
        assert!(text.contains("Dataset Info:"));
        assert!(text.contains("150 entries, 5 columns"));
        assert!(text.contains("Missing Values:"));
        assert!(!text.contains("❌"));
    }

    #[test]
    fn missing_dataset_is_contained() {
        let mut buf = Vec::new();
        let prepared = prepare(&MissingSource, &mut buf);
        assert!(matches!(prepared, Prepared::Failed(LoadError::DatasetNotFound(_))));
        assert_eq!(output(buf).trim(), MISSING_DATASET_MESSAGE);

        // Analysis after the boundary faults visibly instead of running.
        let err = prepared.into_table().unwrap_err();
        assert!(err.to_string().contains("bundle unavailable"));
    }

    #[test]
    fn other_faults_report_their_description() {
        let mut buf = Vec::new();
        let prepared = prepare(&UnmappedSource, &mut buf);
        assert!(matches!(prepared, Prepared::Failed(_)));
        let text = output(buf);
        assert!(text.starts_with("❌ Unexpected error: "));
        assert!(text.contains("no category name for code 9"));
    }

    #[test]
    fn analysis_prints_every_section() {
        let mut sink = Vec::new();
        let table = prepare(&BundledIris, &mut sink).into_table().unwrap();

        let mut buf = Vec::new();
        let analysis = analyse(&table, &mut buf).unwrap();
        assert_eq!(analysis.summary.fields.len(), 4);
        assert_eq!(analysis.grouped.groups.len(), 3);

        let text = output(buf);
        assert!(text.contains("Basic Statistics:"));
        assert!(text.contains("Average measurements by species:"));
        assert!(text.contains("versicolor"));
        assert!(text.trim_end().ends_with(INSIGHT));
    }
}
