use std::collections::BTreeMap;

use super::summary::mean;
use crate::data::model::Table;

// ---------------------------------------------------------------------------
// GroupedStats
// ---------------------------------------------------------------------------

/// Column means of the records sharing one category.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMeans {
    /// Records in the group.
    pub count: usize,
    /// One mean per numeric column, in column order.
    pub means: Vec<f64>,
}

/// Per-category column means, keyed by category label in sorted order.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedStats {
    pub category_name: String,
    pub field_names: Vec<String>,
    pub groups: BTreeMap<String, GroupMeans>,
}

impl GroupedStats {
    /// `(category, mean)` pairs for one column, in category order.
    pub fn column(&self, field: &str) -> Vec<(String, f64)> {
        let Some(idx) = self.field_names.iter().position(|n| n == field) else {
            return Vec::new();
        };
        self.groups
            .iter()
            .map(|(cat, g)| (cat.clone(), g.means[idx]))
            .collect()
    }
}

/// Partition `table` by category and average each numeric column per part.
///
/// Only categories present in the table become keys; records whose
/// category is missing are left out. Missing measurements are skipped, so a
/// column with no values in a group averages to NaN.
pub fn group_means(table: &Table) -> GroupedStats {
    let width = table.measurement_names.len();
    let mut buckets: BTreeMap<String, (usize, Vec<Vec<f64>>)> = BTreeMap::new();

    for rec in table.records.iter().filter(|r| !r.category.is_missing()) {
        let (count, columns) = buckets
            .entry(rec.category.to_string())
            .or_insert_with(|| (0, vec![Vec::new(); width]));
        *count += 1;
        for (col, value) in columns.iter_mut().zip(&rec.measurements) {
            if let Some(v) = value {
                col.push(*v);
            }
        }
    }

    let groups: BTreeMap<String, GroupMeans> = buckets
        .into_iter()
        .map(|(cat, (count, columns))| {
            let means = columns.iter().map(|c| mean(c)).collect();
            (cat, GroupMeans { count, means })
        })
        .collect();

    log::debug!("grouped {} records into {} categories", table.len(), groups.len());
    GroupedStats {
        category_name: table.category_name.clone(),
        field_names: table.measurement_names.clone(),
        groups,
    }
}
