//! Value Counts Module
//! Frequency of each distinct category in a column.

use crate::data::Category;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Order of the bars produced by [`value_counts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountOrder {
    /// Descending by count; ties keep first-appearance order.
    #[default]
    Frequency,
    /// Order in which values first appear in the column.
    FirstSeen,
    /// Natural category order.
    Category,
}

/// Count each distinct non-missing value.
pub fn value_counts(values: &[Option<Category>], order: CountOrder) -> Vec<(Category, usize)> {
    let mut index: HashMap<&Category, usize> = HashMap::new();
    let mut counts: Vec<(Category, usize)> = Vec::new();

    for value in values.iter().flatten() {
        match index.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value.clone(), 1));
            }
        }
    }

    match order {
        // sort_by is stable, so equal counts stay in first-seen order
        CountOrder::Frequency => counts.sort_by(|a, b| b.1.cmp(&a.1)),
        CountOrder::FirstSeen => {}
        CountOrder::Category => counts.sort_by(|a, b| a.0.cmp(&b.0)),
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(values: &[&str]) -> Vec<Option<Category>> {
        values.iter().map(|v| Some(Category::from(*v))).collect()
    }

    #[test]
    fn test_frequency_order() {
        let values = column(&["active", "active", "inactive", "active"]);
        let counts = value_counts(&values, CountOrder::Frequency);
        assert_eq!(
            counts,
            vec![(Category::from("active"), 3), (Category::from("inactive"), 1)]
        );
    }

    #[test]
    fn test_ties_keep_first_seen() {
        let values = column(&["b", "a", "c", "a", "b", "c"]);
        let labels: Vec<String> = value_counts(&values, CountOrder::Frequency)
            .into_iter()
            .map(|(c, _)| c.to_string())
            .collect();
        assert_eq!(labels, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_category_order() {
        let values = column(&["b", "a", "b"]);
        let counts = value_counts(&values, CountOrder::Category);
        assert_eq!(counts[0], (Category::from("a"), 1));
        assert_eq!(counts[1], (Category::from("b"), 2));
    }

    #[test]
    fn test_missing_not_counted() {
        let values = vec![Some(Category::Int(1)), None, Some(Category::Int(1)), None];
        let counts = value_counts(&values, CountOrder::FirstSeen);
        assert_eq!(counts, vec![(Category::Int(1), 2)]);
    }
}
