//! Runtime value types for field comparison.
//!
//! The [`Value`] enum represents the value of a record field at a given
//! path, borrowed from the record. Clauses compare against it.

use std::cmp::Ordering;

/// Runtime value for comparison, borrowed from the source record.
///
/// # Example
///
/// ```
/// use jamdex_seeker::{Value, Number};
///
/// struct Entry {
///     title: String,
///     votes: u32,
///     labels: Option<Vec<String>>,
/// }
///
/// fn accessor<'a>(entry: &'a Entry, path: &[String]) -> Value<'a> {
///     match path {
///         [field] => match field.as_str() {
///             "title" => Value::Text(&entry.title),
///             "votes" => Value::Number(Number::from(entry.votes)),
///             "labels" => entry.labels.as_deref().map_or(Value::None, Value::Labels),
///             _ => Value::None,
///         },
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// Free text (borrowed).
    Text(&'a str),
    /// Numeric value.
    Number(Number),
    /// A present list of labels.
    Labels(&'a [String]),
    /// A single derived label (e.g. a classification of the field).
    Label(&'a str),
    /// Field not present, null, or not reachable on this record.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Extracts a string view of text or label values.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::Text(s) | Value::Label(s) => Some(*s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns `true` when the value carries at least one label.
    ///
    /// Text and single labels count as present unless empty; numbers count
    /// as present; `None` and empty lists do not.
    pub fn has_labels(&self) -> bool {
        match self {
            Value::Labels(list) => !list.is_empty(),
            Value::Label(s) | Value::Text(s) => !s.is_empty(),
            Value::Number(_) => true,
            Value::None => false,
        }
    }

    /// Returns `true` if the value holds exactly `label` (list membership
    /// for `Labels`, equality otherwise).
    pub fn has_label(&self, label: &str) -> bool {
        match self {
            Value::Labels(list) => list.iter().any(|l| l == label),
            Value::Label(s) | Value::Text(s) => *s == label,
            _ => false,
        }
    }
}

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
///
/// Comparisons between different numeric types are handled by converting
/// to `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),

            // Mixed type comparisons - convert to f64
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::I64(n as i64)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::I64(n)
    }
}

impl From<u32> for Number {
    fn from(n: u32) -> Self {
        Number::U64(n as u64)
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::U64(n)
    }
}

impl From<usize> for Number {
    fn from(n: usize) -> Self {
        Number::U64(n as u64)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::F64(n)
    }
}
