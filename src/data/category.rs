//! Category Module
//! A single categorical label read from a DataFrame cell.

use polars::prelude::AnyValue;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Discrete value of a categorical column.
///
/// Ordering is total: booleans first, then numbers by value, then text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Category {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Category {
    /// Convert a polars cell into a category. Nulls and NaN are missing.
    pub fn from_any_value(value: &AnyValue<'_>) -> Option<Self> {
        match value {
            AnyValue::Null => None,
            AnyValue::Boolean(b) => Some(Category::Bool(*b)),
            AnyValue::String(s) => Some(Category::Text(s.to_string())),
            AnyValue::StringOwned(s) => Some(Category::Text(s.to_string())),
            AnyValue::Int8(v) => Some(Category::Int(*v as i64)),
            AnyValue::Int16(v) => Some(Category::Int(*v as i64)),
            AnyValue::Int32(v) => Some(Category::Int(*v as i64)),
            AnyValue::Int64(v) => Some(Category::Int(*v)),
            AnyValue::UInt8(v) => Some(Category::Int(*v as i64)),
            AnyValue::UInt16(v) => Some(Category::Int(*v as i64)),
            AnyValue::UInt32(v) => Some(Category::Int(*v as i64)),
            AnyValue::UInt64(v) => Some(match i64::try_from(*v) {
                Ok(v) => Category::Int(v),
                Err(_) => Category::Text(v.to_string()),
            }),
            AnyValue::Float32(v) => Self::float(*v as f64),
            AnyValue::Float64(v) => Self::float(*v),
            other => Some(Category::Text(
                other.to_string().trim_matches('"').to_string(),
            )),
        }
    }

    /// NaN is missing; -0.0 folds into 0.0.
    fn float(v: f64) -> Option<Self> {
        if v.is_nan() {
            None
        } else if v == 0.0 {
            Some(Category::Float(0.0))
        } else {
            Some(Category::Float(v))
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Category::Bool(_) => 0,
            Category::Int(_) | Category::Float(_) => 1,
            Category::Text(_) => 2,
        }
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Category::Bool(a), Category::Bool(b)) => a.cmp(b),
            (Category::Int(a), Category::Int(b)) => a.cmp(b),
            (Category::Float(a), Category::Float(b)) => a.total_cmp(b),
            // Mixed numeric kinds compare by value, Int before Float on ties
            (Category::Int(a), Category::Float(b)) => {
                (*a as f64).total_cmp(b).then(Ordering::Less)
            }
            (Category::Float(a), Category::Int(b)) => {
                a.total_cmp(&(*b as f64)).then(Ordering::Greater)
            }
            (Category::Text(a), Category::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Category::Bool(b) => b.hash(state),
            Category::Int(v) => v.hash(state),
            Category::Float(v) => v.to_bits().hash(state),
            Category::Text(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Bool(true) => write!(f, "True"),
            Category::Bool(false) => write!(f, "False"),
            Category::Int(v) => write!(f, "{}", v),
            Category::Float(v) if v.fract() == 0.0 && v.is_finite() => write!(f, "{:.1}", v),
            Category::Float(v) => write!(f, "{}", v),
            Category::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category::Text(s.to_string())
    }
}

impl From<i64> for Category {
    fn from(v: i64) -> Self {
        Category::Int(v)
    }
}

impl From<bool> for Category {
    fn from(b: bool) -> Self {
        Category::Bool(b)
    }
}
