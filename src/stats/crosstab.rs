//! Cross-tabulation Module
//! Joint counts of two categorical columns and their row-normalized proportions.

use crate::data::Category;
use std::collections::{BTreeMap, BTreeSet};

/// Frequency table: rows are source categories, columns are target categories,
/// both in natural category order.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossTab {
    pub rows: Vec<Category>,
    pub columns: Vec<Category>,
    /// `counts[row][column]`
    pub counts: Vec<Vec<usize>>,
}

impl CrossTab {
    /// Count joint occurrences over rows where both values are present.
    pub fn from_pairs(source: &[Option<Category>], target: &[Option<Category>]) -> Self {
        let mut joint: BTreeMap<(&Category, &Category), usize> = BTreeMap::new();
        let mut rows: BTreeSet<&Category> = BTreeSet::new();
        let mut columns: BTreeSet<&Category> = BTreeSet::new();

        for (s, t) in source.iter().zip(target.iter()) {
            if let (Some(s), Some(t)) = (s, t) {
                *joint.entry((s, t)).or_insert(0) += 1;
                rows.insert(s);
                columns.insert(t);
            }
        }

        let counts = rows
            .iter()
            .map(|r| {
                columns
                    .iter()
                    .map(|c| joint.get(&(*r, *c)).copied().unwrap_or(0))
                    .collect()
            })
            .collect();

        Self {
            rows: rows.into_iter().cloned().collect(),
            columns: columns.into_iter().cloned().collect(),
            counts,
        }
    }

    /// Divide each row by its sum. Every row of a cross-tab has at least one
    /// observation, so each result row sums to 1.0.
    pub fn normalize_rows(&self) -> Vec<Vec<f64>> {
        self.counts
            .iter()
            .map(|row| {
                let total: usize = row.iter().sum();
                row.iter()
                    .map(|&c| if total == 0 { 0.0 } else { c as f64 / total as f64 })
                    .collect()
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
