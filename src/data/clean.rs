use super::model::Table;

// ---------------------------------------------------------------------------
// Row removal: keep only records with every field present
// ---------------------------------------------------------------------------

/// Drop every record with at least one missing field.
///
/// Records are removed whole, never imputed, and the survivors keep their
/// original order. Applying this to its own output changes nothing.
pub fn drop_missing(table: Table) -> Table {
    let before = table.len();
    let Table {
        measurement_names,
        category_name,
        records,
    } = table;
    let records: Vec<_> = records.into_iter().filter(|r| r.is_complete()).collect();

    let dropped = before - records.len();
    if dropped > 0 {
        log::warn!("dropped {dropped} of {before} records with missing values");
    } else {
        log::debug!("no records with missing values");
    }

    Table {
        measurement_names,
        category_name,
        records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CategoryCell, Record};

    fn messy_table() -> Table {
        let records = vec![
            Record::complete(&[1.0, 2.0], CategoryCell::Name("a".into())),
            Record {
                measurements: vec![None, Some(2.0)],
                category: CategoryCell::Name("a".into()),
            },
            Record::complete(&[3.0, 4.0], CategoryCell::Missing),
            Record::complete(&[5.0, 6.0], CategoryCell::Name("b".into())),
            Record {
                measurements: vec![None, None],
                category: CategoryCell::Missing,
            },
        ];
        Table::new(vec!["x".into(), "y".into()], "cat", records).unwrap()
    }

    #[test]
    fn keeps_only_complete_records_in_order() {
        let cleaned = drop_missing(messy_table());
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned.records[0].measurements, vec![Some(1.0), Some(2.0)]);
        assert_eq!(cleaned.records[1].measurements, vec![Some(5.0), Some(6.0)]);
        assert!(cleaned.records.iter().all(Record::is_complete));
    }

    #[test]
    fn is_idempotent() {
        let once = drop_missing(messy_table());
        let twice = drop_missing(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn complete_table_is_unchanged() {
        let table = drop_missing(messy_table());
        assert_eq!(table.len(), 2);
        assert_eq!(drop_missing(table.clone()), table);
    }

    #[test]
    fn all_missing_yields_empty_table_with_schema() {
        let table = Table::new(
            vec!["x".into()],
            "cat",
            vec![Record {
                measurements: vec![None],
                category: CategoryCell::Name("a".into()),
            }],
        )
        .unwrap();
        let cleaned = drop_missing(table);
        assert!(cleaned.is_empty());
        assert_eq!(cleaned.measurement_names, vec!["x"]);
    }

    #[test]
    fn nan_measurement_row_is_dropped() {
        let text = "sepal length (cm),sepal width (cm),petal length (cm),petal width (cm),target\n\
                    1.0,NaN,3.0,4.0,0\n\
                    5.0,6.0,7.0,8.0,1\n";
        let raw = crate::data::source::parse_csv(text, &["a", "b"]).unwrap();
        let cleaned = drop_missing(raw.table);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(
            cleaned.records[0].measurements,
            vec![Some(5.0), Some(6.0), Some(7.0), Some(8.0)]
        );
    }
}
