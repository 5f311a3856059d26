//! Filter selection state and its shareable token form.
//!
//! A [`SelectionEntry`] is one user-configured filter row: a path into the
//! schema, an operator and a value, each possibly unset while the row is
//! being edited. The whole list travels through links as a JSON array
//! (see [`to_token`] and [`parse_token`]).
//!
//! Parsing never fails: an absent, malformed, or non-array token is read
//! as "no filters", so a broken shared link resets filtering instead of
//! erroring.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One user-chosen filter row.
///
/// # Example
///
/// ```
/// use jamdex_seeker::{FilterValue, SelectionEntry};
///
/// let entry = SelectionEntry::new(["ranks", "Overall", "place"])
///     .with_operator("<=")
///     .with_value("10");
///
/// assert_eq!(entry.property_name(), Some("ranks"));
/// assert_eq!(entry.segment(1), Some("Overall"));
/// assert_eq!(entry.value, Some(FilterValue::Text("10".into())));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawEntry")]
pub struct SelectionEntry {
    /// Property name, then nested property names, outermost first.
    pub path: Vec<String>,
    /// Operator display string; kept verbatim so unknown operators survive
    /// a round trip.
    pub operator: Option<String>,
    /// Comparison value.
    pub value: Option<FilterValue>,
}

/// A selection value as typed or picked by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl SelectionEntry {
    /// Creates an entry with the given path and no operator or value.
    pub fn new<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SelectionEntry {
            path: path.into_iter().map(Into::into).collect(),
            operator: None,
            value: None,
        }
    }

    /// Sets the operator.
    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    /// Sets the value.
    pub fn with_value(mut self, value: impl Into<FilterValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// The top-level property name, unless unset or empty.
    pub fn property_name(&self) -> Option<&str> {
        self.segment(0)
    }

    /// The path segment at `depth`, unless unset or empty.
    pub fn segment(&self, depth: usize) -> Option<&str> {
        self.path
            .get(depth)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}

impl fmt::Display for SelectionEntry {
    /// Renders the entry as `path op value`, e.g. `ranks.Overall.place <= 10`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(unset)")?;
        } else {
            write!(f, "{}", self.path.join("."))?;
        }
        if let Some(op) = &self.operator {
            write!(f, " {op}")?;
        }
        if let Some(value) = &self.value {
            write!(f, " {value}")?;
        }
        Ok(())
    }
}

impl FilterValue {
    /// Reads the value as a finite number.
    ///
    /// Strings are trimmed before parsing; an empty string is not a
    /// number. Lists never are.
    pub fn as_finite_number(&self) -> Option<f64> {
        let n = match self {
            FilterValue::Number(n) => *n,
            FilterValue::Text(s) => s.trim().parse::<f64>().ok()?,
            FilterValue::List(_) => return None,
        };
        n.is_finite().then_some(n)
    }

    /// Reads the value as text; numbers are formatted, lists are not text.
    pub fn as_text(&self) -> Option<String> {
        match self {
            FilterValue::Text(s) => Some(s.clone()),
            FilterValue::Number(n) => Some(n.to_string()),
            FilterValue::List(_) => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Number(n) => write!(f, "{n}"),
            FilterValue::Text(s) => write!(f, "{s:?}"),
            FilterValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        FilterValue::Number(n)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::Number(n as f64)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(items: Vec<String>) -> Self {
        FilterValue::List(items)
    }
}

/// Wire shape accepted when reading an entry.
///
/// Accepts the canonical `path` array as well as the flat
/// `propertyName`/`propertyName2`/`propertyName3` form older links carry.
/// A `null` segment ends the path.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    #[serde(default)]
    path: Option<Vec<Option<String>>>,
    #[serde(default)]
    property_name: Option<String>,
    #[serde(default)]
    property_name2: Option<String>,
    #[serde(default)]
    property_name3: Option<String>,
    #[serde(default)]
    operator: Option<String>,
    #[serde(default)]
    value: Option<serde_json::Value>,
}

impl From<RawEntry> for SelectionEntry {
    fn from(raw: RawEntry) -> Self {
        let segments = match raw.path {
            Some(path) => path,
            None => vec![raw.property_name, raw.property_name2, raw.property_name3],
        };
        let path = segments.into_iter().map_while(|s| s).collect();
        SelectionEntry {
            path,
            operator: raw.operator,
            value: raw.value.and_then(lenient_value),
        }
    }
}

fn lenient_value(value: serde_json::Value) -> Option<FilterValue> {
    use serde_json::Value;

    match value {
        Value::String(s) => Some(FilterValue::Text(s)),
        Value::Number(n) => n.as_f64().map(FilterValue::Number),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(FilterValue::List),
        _ => None,
    }
}

/// Serializes a selection list to its shareable token.
pub fn to_token(entries: &[SelectionEntry]) -> Result<String> {
    Ok(serde_json::to_string(entries)?)
}

/// Parses a shareable token into a selection list.
///
/// Absent, empty, unparseable, or non-array tokens all yield an empty list.
pub fn parse_token(token: Option<&str>) -> Vec<SelectionEntry> {
    let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
        return Vec::new();
    };

    let parsed = match serde_json::from_str::<serde_json::Value>(token) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring malformed filter token");
            return Vec::new();
        }
    };

    if !parsed.is_array() {
        tracing::warn!("ignoring filter token that is not an array");
        return Vec::new();
    }

    match serde_json::from_value::<Vec<SelectionEntry>>(parsed) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring filter token with malformed entries");
            Vec::new()
        }
    }
}
