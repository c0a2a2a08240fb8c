use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::analysis::grouped::GroupedStats;
use crate::analysis::summary::SummaryStats;
use crate::data::loader::SchemaReport;
use crate::data::model::{CategoryCell, Table};

/// Decimal places kept when printing statistics.
const DISPLAY_DECIMALS: i32 = 6;

// ---------------------------------------------------------------------------
// Console tables built as Arrow record batches
// ---------------------------------------------------------------------------

fn round(v: f64) -> f64 {
    let scale = 10f64.powi(DISPLAY_DECIMALS);
    (v * scale).round() / scale
}

fn batch(columns: Vec<(Field, ArrayRef)>) -> Result<RecordBatch, ArrowError> {
    let (fields, arrays): (Vec<Field>, Vec<ArrayRef>) = columns.into_iter().unzip();
    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)
}

fn float_column(name: &str, values: Vec<Option<f64>>) -> (Field, ArrayRef) {
    (
        Field::new(name, DataType::Float64, true),
        Arc::new(Float64Array::from(values)) as ArrayRef,
    )
}

fn string_column(name: &str, values: Vec<Option<String>>) -> (Field, ArrayRef) {
    (
        Field::new(name, DataType::Utf8, true),
        Arc::new(StringArray::from(values)) as ArrayRef,
    )
}

/// Pretty-print a single batch as a boxed text table.
pub fn render(batch: &RecordBatch) -> Result<String, ArrowError> {
    Ok(pretty_format_batches(std::slice::from_ref(batch))?.to_string())
}

/// Rows of `table` with a leading row-number column.
pub fn table_batch(table: &Table) -> Result<RecordBatch, ArrowError> {
    let index: Vec<u64> = (0..table.len() as u64).collect();
    let mut columns: Vec<(Field, ArrayRef)> = vec![(
        Field::new("", DataType::UInt64, false),
        Arc::new(UInt64Array::from(index)) as ArrayRef,
    )];

    for (idx, name) in table.measurement_names.iter().enumerate() {
        columns.push(float_column(name, table.column(idx).collect()));
    }

    let cells = || table.records.iter().map(|r| &r.category);
    let all_codes = cells().all(|c| !matches!(c, CategoryCell::Name(_)));
    if all_codes {
        let codes: Vec<Option<i64>> = cells()
            .map(|c| match c {
                CategoryCell::Code(code) => Some(*code),
                _ => None,
            })
            .collect();
        columns.push((
            Field::new(&table.category_name, DataType::Int64, true),
            Arc::new(Int64Array::from(codes)) as ArrayRef,
        ));
    } else {
        let names = cells()
            .map(|c| (!c.is_missing()).then(|| c.to_string()))
            .collect();
        columns.push(string_column(&table.category_name, names));
    }
    batch(columns)
}

/// Column / non-null count / dtype listing.
pub fn schema_batch(report: &SchemaReport) -> Result<RecordBatch, ArrowError> {
    let names = report.columns.iter().map(|c| Some(c.name.clone())).collect();
    let non_null: Vec<u64> = report.columns.iter().map(|c| c.non_null as u64).collect();
    let dtypes = report
        .columns
        .iter()
        .map(|c| Some(c.dtype.as_str().to_string()))
        .collect();
    batch(vec![
        string_column("Column", names),
        (
            Field::new("Non-Null Count", DataType::UInt64, false),
            Arc::new(UInt64Array::from(non_null)) as ArrayRef,
        ),
        string_column("Dtype", dtypes),
    ])
}

/// Missing-cell count per column.
pub fn missing_batch(counts: &[(String, usize)]) -> Result<RecordBatch, ArrowError> {
    let names = counts.iter().map(|(n, _)| Some(n.clone())).collect();
    let missing: Vec<u64> = counts.iter().map(|(_, c)| *c as u64).collect();
    batch(vec![
        string_column("Column", names),
        (
            Field::new("Missing", DataType::UInt64, false),
            Arc::new(UInt64Array::from(missing)) as ArrayRef,
        ),
    ])
}

/// Statistic rows by numeric columns, NaN shown as null.
pub fn summary_batch(stats: &SummaryStats) -> Result<RecordBatch, ArrowError> {
    let labels: Vec<Option<String>> = stats
        .fields
        .first()
        .map(|f| f.rows().iter().map(|(l, _)| Some(l.to_string())).collect())
        .unwrap_or_default();
    let mut columns = vec![string_column("", labels)];
    for field in &stats.fields {
        let values = field
            .rows()
            .iter()
            .map(|(_, v)| (!v.is_nan()).then(|| round(*v)))
            .collect();
        columns.push(float_column(&field.name, values));
    }
    batch(columns)
}

/// One row per category, one column per numeric field.
pub fn grouped_batch(grouped: &GroupedStats) -> Result<RecordBatch, ArrowError> {
    let labels = grouped.groups.keys().map(|k| Some(k.clone())).collect();
    let mut columns = vec![string_column(&grouped.category_name, labels)];
    for (idx, name) in grouped.field_names.iter().enumerate() {
        let values = grouped
            .groups
            .values()
            .map(|g| Some(g.means[idx]).filter(|v| !v.is_nan()).map(round))
            .collect();
        columns.push(float_column(name, values));
    }
    batch(columns)
}
