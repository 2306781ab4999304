//! CSV Data Loader Module
//! Loads datasets from CSV with Polars and lists the columns worth charting.

use polars::prelude::*;
use std::path::PathBuf;
use thiserror::Error;

/// Columns with at most this many distinct values count as categorical
/// even when their dtype is numeric.
pub const MAX_NUMERIC_CATEGORIES: usize = 20;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("No data loaded")]
    NoData,
}

/// Holds the currently loaded dataset.
pub struct DataLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
        }
    }

    /// Read a CSV file into a DataFrame without keeping it.
    pub fn read_csv(file_path: &str) -> Result<DataFrame, LoaderError> {
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;
        log::info!(
            "Read {} rows x {} columns from {}",
            df.height(),
            df.width(),
            file_path
        );
        Ok(df)
    }

    /// Load a CSV file and keep it as the current dataset.
    pub fn load_csv(&mut self, file_path: &str) -> Result<&DataFrame, LoaderError> {
        self.file_path = Some(PathBuf::from(file_path));
        self.df = Some(Self::read_csv(file_path)?);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Get list of column names from loaded DataFrame.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get columns that look categorical: strings, booleans, categoricals,
    /// and integer columns with few distinct values.
    pub fn get_categorical_columns(&self) -> Vec<String> {
        let Some(df) = &self.df else {
            return Vec::new();
        };

        df.get_columns()
            .iter()
            .filter(|col| is_categorical(col))
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get a reference to the loaded DataFrame.
    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    /// Get file path.
    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Set DataFrame directly (used for async loading)
    pub fn set_dataframe(&mut self, df: DataFrame, file_path: Option<PathBuf>) {
        self.df = Some(df);
        self.file_path = file_path;
    }
}

fn is_categorical(col: &Column) -> bool {
    match col.dtype() {
        DataType::String | DataType::Boolean | DataType::Categorical(..) | DataType::Enum(..) => {
            true
        }
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => col
            .n_unique()
            .map(|n| n <= MAX_NUMERIC_CATEGORIES)
            .unwrap_or(false),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorical_detection() {
        let ids: Vec<i64> = (0..50).collect();
        let df = df![
            "status" => vec!["a"; 50],
            "churned" => (0..50).map(|i| (i % 2) as i64).collect::<Vec<_>>(),
            "id" => ids,
            "amount" => vec![1.5f64; 50],
            "flag" => vec![true; 50],
        ]
        .unwrap();

        let mut loader = DataLoader::new();
        loader.set_dataframe(df, None);

        assert_eq!(
            loader.get_categorical_columns(),
            vec!["status", "churned", "flag"]
        );
        assert_eq!(loader.get_row_count(), 50);
        assert_eq!(loader.get_columns().len(), 5);
    }

    #[test]
    fn test_load_csv() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        std::io::Write::write_all(&mut file, b"status,churned\nactive,0\ninactive,1\nactive,0\n")
            .unwrap();

        let mut loader = DataLoader::new();
        let path = file.path().to_string_lossy().to_string();
        let df = loader.load_csv(&path).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(loader.get_categorical_columns(), vec!["status", "churned"]);
    }

    #[test]
    fn test_empty_loader() {
        let loader = DataLoader::default();
        assert!(loader.get_columns().is_empty());
        assert!(loader.get_categorical_columns().is_empty());
        assert_eq!(loader.get_row_count(), 0);
    }
}
