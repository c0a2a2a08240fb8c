use std::collections::BTreeSet;
use std::fmt;

use super::LoadError;

// ---------------------------------------------------------------------------
// CategoryCell – the value held in the categorical column
// ---------------------------------------------------------------------------

/// The categorical cell of a record.
///
/// Freshly loaded tables carry integer codes; `relabel` swaps every code for
/// its category name. Ordering is derived so cells can key `BTreeMap`s and
/// `BTreeSet`s; names sort lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryCell {
    Missing,
    Code(i64),
    Name(String),
}

impl fmt::Display for CategoryCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryCell::Code(c) => write!(f, "{c}"),
            CategoryCell::Name(n) => write!(f, "{n}"),
            CategoryCell::Missing => write!(f, "<null>"),
        }
    }
}

impl CategoryCell {
    pub fn is_missing(&self) -> bool {
        matches!(self, CategoryCell::Missing)
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// One observation: numeric measurements plus a category.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Measurement values in schema order; `None` is a missing value.
    pub measurements: Vec<Option<f64>>,
    pub category: CategoryCell,
}

impl Record {
    /// Whether every field (measurements and category) is present.
    pub fn is_complete(&self) -> bool {
        !self.category.is_missing() && self.measurements.iter().all(Option::is_some)
    }
}

// ---------------------------------------------------------------------------
// Table – ordered records sharing one schema
// ---------------------------------------------------------------------------

/// An ordered sequence of records with named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Names of the numeric columns, in record order.
    pub measurement_names: Vec<String>,
    /// Name of the categorical column.
    pub category_name: String,
    pub records: Vec<Record>,
}

impl Table {
    /// Build a table, checking every record against the schema width.
    pub fn new(
        measurement_names: Vec<String>,
        category_name: impl Into<String>,
        records: Vec<Record>,
    ) -> Result<Self, LoadError> {
        let expected = measurement_names.len();
        if let Some((row, rec)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| r.measurements.len() != expected)
        {
            return Err(LoadError::RecordWidth {
                row,
                found: rec.measurements.len(),
                expected,
            });
        }
        Ok(Table {
            measurement_names,
            category_name: category_name.into(),
            records,
        })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of columns, the category column included.
    pub fn width(&self) -> usize {
        self.measurement_names.len() + 1
    }

    /// Position of a numeric column by name.
    pub fn measurement_index(&self, name: &str) -> Option<usize> {
        self.measurement_names.iter().position(|n| n == name)
    }

    /// One numeric column, missing cells kept as `None`.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        self.records.iter().map(move |r| r.measurements[idx])
    }

    /// Sorted set of category values actually present (missing excluded).
    pub fn categories(&self) -> BTreeSet<CategoryCell> {
        self.records
            .iter()
            .filter(|r| !r.category.is_missing())
            .map(|r| r.category.clone())
            .collect()
    }

    /// The first `n` records as a new table.
    pub fn head(&self, n: usize) -> Table {
        Table {
            measurement_names: self.measurement_names.clone(),
            category_name: self.category_name.clone(),
            records: self.records.iter().take(n).cloned().collect(),
        }
    }
}

#[cfg(test)]
impl Record {
    /// A record with no missing field.
    pub fn complete(measurements: &[f64], category: CategoryCell) -> Self {
        Record {
            measurements: measurements.iter().copied().map(Some).collect(),
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rejects_records_of_wrong_width() {
        let records = vec![
            Record::complete(&[1.0, 2.0], CategoryCell::Code(0)),
            Record::complete(&[1.0], CategoryCell::Code(1)),
        ];
        let err = Table::new(names(&["a", "b"]), "target", records).unwrap_err();
        assert!(matches!(
            err,
            LoadError::RecordWidth { row: 1, found: 1, expected: 2 }
        ));
    }

    #[test]
    fn categories_skip_missing_and_sort() {
        let records = vec![
            Record::complete(&[1.0], CategoryCell::Name("b".into())),
            Record::complete(&[2.0], CategoryCell::Missing),
            Record::complete(&[3.0], CategoryCell::Name("a".into())),
            Record::complete(&[4.0], CategoryCell::Name("b".into())),
        ];
        let table = Table::new(names(&["x"]), "cat", records).unwrap();
        let cats: Vec<String> = table.categories().iter().map(|c| c.to_string()).collect();
        assert_eq!(cats, vec!["a", "b"]);
    }

    #[test]
    fn record_completeness_covers_every_field() {
        assert!(Record::complete(&[1.0], CategoryCell::Code(0)).is_complete());
        assert!(!Record::complete(&[1.0], CategoryCell::Missing).is_complete());
        let partial = Record {
            measurements: vec![Some(1.0), None],
            category: CategoryCell::Code(0),
        };
        assert!(!partial.is_complete());
    }

    #[test]
    fn head_keeps_schema_and_order() {
        let records = (0..10)
            .map(|i| Record::complete(&[i as f64], CategoryCell::Code(0)))
            .collect();
        let table = Table::new(names(&["x"]), "target", records).unwrap();
        let head = table.head(5);
        assert_eq!(head.len(), 5);
        assert_eq!(head.measurement_names, table.measurement_names);
        assert_eq!(head.records[4].measurements, vec![Some(4.0)]);
        assert_eq!(table.head(50).len(), 10);
    }
}
