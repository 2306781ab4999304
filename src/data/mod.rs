//! Data module - CSV loading and categorical column access

mod category;
mod columns;
mod loader;

pub use category::Category;
pub use columns::{categorical_values, lookup_column, validate_selection};
pub use loader::{DataLoader, LoaderError, MAX_NUMERIC_CATEGORIES};
