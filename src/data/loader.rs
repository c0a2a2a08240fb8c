use std::collections::BTreeMap;

use super::model::{CategoryCell, Record, Table};
use super::source::{DatasetSource, RawDataset};
use super::LoadError;

/// Name given to the categorical column once codes are replaced by names.
pub const CATEGORY_COLUMN: &str = "species";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Fetch the dataset from `source`; category cells are still integer codes.
pub fn load(source: &dyn DatasetSource) -> Result<RawDataset, LoadError> {
    let raw = source.fetch()?;
    log::info!(
        "loaded {} records with {} columns",
        raw.table.len(),
        raw.table.width()
    );
    Ok(raw)
}

// ---------------------------------------------------------------------------
// Relabelling
// ---------------------------------------------------------------------------

/// Rename the category column to [`CATEGORY_COLUMN`] and replace every code
/// with its name from `code_to_name`.
///
/// Missing cells stay missing. A code without a mapping entry fails the
/// whole call; cells already holding a name pass through.
pub fn relabel(table: Table, code_to_name: &BTreeMap<i64, String>) -> Result<Table, LoadError> {
    let records = table
        .records
        .into_iter()
        .enumerate()
        .map(|(row, rec)| {
            let category = match rec.category {
                CategoryCell::Code(code) => code_to_name
                    .get(&code)
                    .map(|name| CategoryCell::Name(name.clone()))
                    .ok_or(LoadError::UnknownCategoryCode { code, row })?,
                other => other,
            };
            Ok(Record {
                measurements: rec.measurements,
                category,
            })
        })
        .collect::<Result<Vec<_>, LoadError>>()?;

    log::debug!("relabelled {} records", records.len());
    Ok(Table {
        measurement_names: table.measurement_names,
        category_name: CATEGORY_COLUMN.to_string(),
        records,
    })
}

// ---------------------------------------------------------------------------
// Schema report
// ---------------------------------------------------------------------------

/// Inferred storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Float64,
    Int64,
    Object,
}

impl ColumnType {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Float64 => "float64",
            ColumnType::Int64 => "int64",
            ColumnType::Object => "object",
        }
    }
}

/// One line of the schema report.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: ColumnType,
    pub non_null: usize,
}

/// Column names, inferred types and non-null counts of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaReport {
    pub entries: usize,
    pub columns: Vec<ColumnInfo>,
}

/// Describe every column of `table`, measurements first.
pub fn describe_schema(table: &Table) -> SchemaReport {
    let mut columns: Vec<ColumnInfo> = table
        .measurement_names
        .iter()
        .enumerate()
        .map(|(idx, name)| ColumnInfo {
            name: name.clone(),
            dtype: ColumnType::Float64,
            non_null: table.column(idx).flatten().count(),
        })
        .collect();

    let present = || table.records.iter().filter(|r| !r.category.is_missing());
    let all_codes = present().all(|r| matches!(r.category, CategoryCell::Code(_)));
    columns.push(ColumnInfo {
        name: table.category_name.clone(),
        dtype: if all_codes {
            ColumnType::Int64
        } else {
            ColumnType::Object
        },
        non_null: present().count(),
    });

    SchemaReport {
        entries: table.len(),
        columns,
    }
}

// ---------------------------------------------------------------------------
// Missing-value counts
// ---------------------------------------------------------------------------

/// Number of missing cells per column, in column order.
pub fn count_missing(table: &Table) -> Vec<(String, usize)> {
    let schema = describe_schema(table);
    schema
        .columns
        .into_iter()
        .map(|col| (col.name, schema.entries - col.non_null))
        .collect()
}
