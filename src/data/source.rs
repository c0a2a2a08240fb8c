use std::collections::BTreeMap;

use serde::Deserialize;

use super::model::{CategoryCell, Record, Table};
use super::LoadError;

/// The embedded copy of the Iris measurements (150 rows, codes 0..=2).
const IRIS_CSV: &str = include_str!("../../data/iris.csv");

/// Category names indexed by integer code.
const IRIS_TARGET_NAMES: [&str; 3] = ["setosa", "versicolor", "virginica"];

/// Column headers `IrisRow` deserializes from, in file order.
const IRIS_HEADERS: [&str; 5] = [
    "sepal length (cm)",
    "sepal width (cm)",
    "petal length (cm)",
    "petal width (cm)",
    "target",
];

// ---------------------------------------------------------------------------
// RawDataset – what a source hands to the loader
// ---------------------------------------------------------------------------

/// A freshly fetched table (integer category codes) plus the names those
/// codes stand for.
#[derive(Debug, Clone)]
pub struct RawDataset {
    pub table: Table,
    pub target_names: BTreeMap<i64, String>,
}

/// Somewhere a dataset can be fetched from.
pub trait DatasetSource {
    fn fetch(&self) -> Result<RawDataset, LoadError>;
}

// ---------------------------------------------------------------------------
// Bundled Iris source
// ---------------------------------------------------------------------------

/// The Iris dataset compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledIris;

/// One CSV row; empty cells deserialize to `None`, `NaN` cells are mapped to it.
#[derive(Debug, Deserialize)]
struct IrisRow {
    #[serde(rename = "sepal length (cm)")]
    sepal_length: Option<f64>,
    #[serde(rename = "sepal width (cm)")]
    sepal_width: Option<f64>,
    #[serde(rename = "petal length (cm)")]
    petal_length: Option<f64>,
    #[serde(rename = "petal width (cm)")]
    petal_width: Option<f64>,
    target: Option<i64>,
}

impl IrisRow {
    fn into_record(self) -> Record {
        Record {
            measurements: [
                self.sepal_length,
                self.sepal_width,
                self.petal_length,
                self.petal_width,
            ]
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect(),
            category: self
                .target
                .map(CategoryCell::Code)
                .unwrap_or(CategoryCell::Missing),
        }
    }
}

impl DatasetSource for BundledIris {
    fn fetch(&self) -> Result<RawDataset, LoadError> {
        parse_csv(IRIS_CSV, &IRIS_TARGET_NAMES)
    }
}

/// Parse Iris-shaped CSV text: four measurement columns, then `target`.
pub fn parse_csv(text: &str, target_names: &[&str]) -> Result<RawDataset, LoadError> {
    if text.trim().is_empty() {
        return Err(LoadError::DatasetNotFound("empty dataset text".into()));
    }

    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers()?;
    if !headers.iter().eq(IRIS_HEADERS) {
        let found: Vec<&str> = headers.iter().collect();
        return Err(LoadError::UnexpectedHeader(found.join(",")));
    }

    let records = reader
        .deserialize::<IrisRow>()
        .map(|row| row.map(IrisRow::into_record))
        .collect::<Result<Vec<_>, _>>()?;

    let (category, measurements) = (IRIS_HEADERS[4], &IRIS_HEADERS[..4]);
    let table = Table::new(
        measurements.iter().map(|m| m.to_string()).collect(),
        category,
        records,
    )?;
    let target_names = target_names
        .iter()
        .enumerate()
        .map(|(code, name)| (code as i64, name.to_string()))
        .collect();

    log::debug!("parsed {} rows from bundled CSV", table.len());
    Ok(RawDataset {
        table,
        target_names,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "sepal length (cm),sepal width (cm),petal length (cm),petal width (cm),target\n";

    #[test]
    fn bundled_iris_has_expected_shape() {
        let raw = BundledIris.fetch().unwrap();
        assert_eq!(raw.table.len(), 150);
        assert_eq!(raw.table.width(), 5);
        assert_eq!(raw.table.category_name, "target");
        assert_eq!(
            raw.table.measurement_names,
            vec![
                "sepal length (cm)",
                "sepal width (cm)",
                "petal length (cm)",
                "petal width (cm)",
            ]
        );
        assert_eq!(raw.target_names.len(), 3);
        assert_eq!(raw.target_names[&0], "setosa");
        assert_eq!(raw.target_names[&2], "virginica");
    }

    #[test]
    fn bundled_codes_are_all_mapped() {
        let raw = BundledIris.fetch().unwrap();
        for rec in &raw.table.records {
            match &rec.category {
                CategoryCell::Code(c) => assert!(raw.target_names.contains_key(c)),
                other => panic!("unexpected category cell {other:?}"),
            }
        }
    }

    #[test]
    fn empty_cells_become_missing() {
        let text = format!("{HEADER}1.0,,3.0,4.0,0\n1.0,2.0,3.0,4.0,\n");
        let raw = parse_csv(&text, &["x"]).unwrap();
        assert_eq!(raw.table.records[0].measurements[1], None);
        assert_eq!(raw.table.records[1].category, CategoryCell::Missing);
    }

    #[test]
    fn empty_text_is_a_missing_dataset() {
        let err = parse_csv("  \n", &["x"]).unwrap_err();
        assert!(matches!(err, LoadError::DatasetNotFound(_)));
    }

    #[test]
    fn non_numeric_cell_is_malformed() {
        let text = format!("{HEADER}1.0,oops,3.0,4.0,0\n");
        let err = parse_csv(&text, &["x"]).unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
    }

    #[test]
    fn nan_cells_become_missing() {
        let text = format!("{HEADER}1.0,NaN,3.0,4.0,0\n5.0,6.0,7.0,8.0,1\n");
        let raw = parse_csv(&text, &["x", "y"]).unwrap();
        assert_eq!(raw.table.records[0].measurements[1], None);
        assert!(!raw.table.records[0].is_complete());
        assert!(raw.table.records[1].is_complete());
    }

    #[test]
    fn renamed_header_is_rejected() {
        let text = "sepal_length,sepal width (cm),petal length (cm),petal width (cm),target\n\
                    1.0,2.0,3.0,4.0,0\n";
        let err = parse_csv(text, &["x"]).unwrap_err();
        match err {
            LoadError::UnexpectedHeader(found) => assert!(found.starts_with("sepal_length,")),
            other => panic!("expected a header error, got {other:?}"),
        }
    }

    #[test]
    fn reordered_header_is_rejected() {
        let text = "sepal width (cm),sepal length (cm),petal length (cm),petal width (cm),target\n\
                    1.0,2.0,3.0,4.0,0\n";
        let err = parse_csv(text, &["x"]).unwrap_err();
        assert!(matches!(err, LoadError::UnexpectedHeader(_)));
    }
}
