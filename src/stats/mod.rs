//! Stats module - value counts and cross-tabulation

mod counts;
mod crosstab;

pub use counts::{value_counts, CountOrder};
pub use crosstab::CrossTab;
