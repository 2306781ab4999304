//! Column Access Module
//! Column lookup and categorical extraction from a DataFrame.

use crate::data::Category;
use crate::error::{ChartError, Result};
use polars::prelude::*;

/// Check that `columns` is non-empty and every name exists in `df`.
pub fn validate_selection<S: AsRef<str>>(df: &DataFrame, columns: &[S]) -> Result<()> {
    if columns.is_empty() {
        return Err(ChartError::EmptySelection);
    }
    for name in columns {
        lookup_column(df, name.as_ref())?;
    }
    Ok(())
}

/// Get a column by name, mapping absence to `ColumnNotFound`.
pub fn lookup_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| ChartError::ColumnNotFound(name.to_string()))
}

/// Read a column as one optional category per row (None = missing).
pub fn categorical_values(df: &DataFrame, name: &str) -> Result<Vec<Option<Category>>> {
    let column = lookup_column(df, name)?;

    // Categorical and enum columns are read through their string labels
    let column = match column.dtype() {
        DataType::Categorical(..) | DataType::Enum(..) => column.cast(&DataType::String)?,
        _ => column.clone(),
    };

    // Row iteration walks a single chunk
    let series = column.as_materialized_series().rechunk();
    Ok(series
        .iter()
        .map(|value| Category::from_any_value(&value))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        df![
            "status" => ["active", "active", "inactive", "active"],
            "score" => [Some(1.5), None, Some(f64::NAN), Some(1.5)],
        ]
        .unwrap()
    }

    #[test]
    fn test_empty_selection() {
        let df = sample();
        let none: [&str; 0] = [];
        assert!(matches!(
            validate_selection(&df, &none),
            Err(ChartError::EmptySelection)
        ));
    }

    #[test]
    fn test_missing_column_named() {
        let df = sample();
        match validate_selection(&df, &["status", "region"]) {
            Err(ChartError::ColumnNotFound(name)) => assert_eq!(name, "region"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_categorical_values_skip_missing() {
        let df = sample();
        let values = categorical_values(&df, "score").unwrap();
        assert_eq!(
            values,
            vec![Some(Category::Float(1.5)), None, None, Some(Category::Float(1.5))]
        );
    }

    #[test]
    fn test_categorical_dtype_reads_labels() {
        let df = sample();
        let cat = df
            .column("status")
            .unwrap()
            .cast(&DataType::Categorical(None, CategoricalOrdering::Physical))
            .unwrap();
        let df = DataFrame::new(vec![cat]).unwrap();
        let values = categorical_values(&df, "status").unwrap();
        assert_eq!(values[2], Some(Category::from("inactive")));
    }
}
