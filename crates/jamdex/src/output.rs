//! Output modes and structured serialization.
//!
//! [`OutputMode`] selects between styled terminal text, plain text, and the
//! structured formats. Structured modes serialize a command's view directly
//! and bypass the text renderer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Controls how command output is rendered.
///
/// This is the user-facing enum for the `--output` flag and the `output`
/// configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Auto-detect: TTY gets Term, pipe gets Text
    #[default]
    Auto,
    /// Always use terminal styling
    Term,
    /// Never use styling
    Text,
    /// Serialize the view as JSON
    Json,
    /// Serialize the view as YAML
    Yaml,
    /// Serialize the rows as CSV
    Csv,
}

impl OutputMode {
    /// Returns true for JSON, YAML and CSV.
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputMode::Json | OutputMode::Yaml | OutputMode::Csv)
    }

    /// Resolves Auto to Term or Text based on TTY detection.
    ///
    /// Other modes are returned unchanged.
    pub fn resolve_auto(&self) -> OutputMode {
        match self {
            OutputMode::Auto => {
                if atty::is(atty::Stream::Stdout) {
                    OutputMode::Term
                } else {
                    OutputMode::Text
                }
            }
            other => *other,
        }
    }

    /// The text mode for the renderer, or `None` for structured modes.
    pub fn to_text_mode(&self) -> Option<TextMode> {
        match self.resolve_auto() {
            OutputMode::Term => Some(TextMode::Styled),
            OutputMode::Text => Some(TextMode::Plain),
            _ => None,
        }
    }
}

/// Whether the text renderer emits ANSI styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    Styled,
    Plain,
}

/// Errors that can occur during serialization.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(String),

    #[error("Not a structured output mode")]
    NotStructured,
}

/// Serializes data to the given structured format.
pub fn serialize_structured<T: Serialize>(
    data: &T,
    mode: OutputMode,
) -> Result<String, SerializeError> {
    match mode {
        OutputMode::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputMode::Yaml => Ok(serde_yaml::to_string(data)?),
        OutputMode::Csv => serialize_csv(data),
        _ => Err(SerializeError::NotStructured),
    }
}

/// Serializes data to CSV.
///
/// The data goes through JSON first: an array of objects becomes one row
/// per object with the first object's keys as header; a single object
/// becomes `key,value` pairs. Nested values are written as JSON text.
pub fn serialize_csv<T: Serialize>(data: &T) -> Result<String, SerializeError> {
    let json_value = serde_json::to_value(data)?;
    flatten_json_to_csv(&json_value)
}

fn flatten_json_to_csv(value: &serde_json::Value) -> Result<String, SerializeError> {
    use serde_json::Value;

    let csv_err = |e: csv::Error| SerializeError::Csv(e.to_string());
    let mut wtr = csv::Writer::from_writer(vec![]);

    match value {
        Value::Array(arr) => match arr.first() {
            Some(Value::Object(first)) => {
                let headers: Vec<&str> = first.keys().map(|s| s.as_str()).collect();
                wtr.write_record(&headers).map_err(csv_err)?;
                for item in arr {
                    if let Value::Object(obj) = item {
                        let row: Vec<String> = headers
                            .iter()
                            .map(|h| obj.get(*h).map(value_to_string).unwrap_or_default())
                            .collect();
                        wtr.write_record(&row).map_err(csv_err)?;
                    }
                }
            }
            Some(_) => {
                wtr.write_record(["value"]).map_err(csv_err)?;
                for item in arr {
                    wtr.write_record([value_to_string(item)]).map_err(csv_err)?;
                }
            }
            None => {}
        },
        Value::Object(obj) => {
            wtr.write_record(["key", "value"]).map_err(csv_err)?;
            for (k, v) in obj {
                wtr.write_record([k.as_str(), &value_to_string(v)])
                    .map_err(csv_err)?;
            }
        }
        _ => {
            wtr.write_record(["value"]).map_err(csv_err)?;
            wtr.write_record([value_to_string(value)]).map_err(csv_err)?;
        }
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| SerializeError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| SerializeError::Csv(e.to_string()))
}

fn value_to_string(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        serde_json::Value::Array(items) if items.iter().all(|i| i.is_string()) => items
            .iter()
            .filter_map(|i| i.as_str())
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_is_auto() {
        assert_eq!(OutputMode::default(), OutputMode::Auto);
    }

    #[test]
    fn structured_modes() {
        assert!(OutputMode::Json.is_structured());
        assert!(OutputMode::Yaml.is_structured());
        assert!(OutputMode::Csv.is_structured());
        assert!(!OutputMode::Auto.is_structured());
        assert!(!OutputMode::Term.is_structured());
        assert!(!OutputMode::Text.is_structured());
    }

    #[test]
    fn text_modes() {
        assert_eq!(OutputMode::Term.to_text_mode(), Some(TextMode::Styled));
        assert_eq!(OutputMode::Text.to_text_mode(), Some(TextMode::Plain));
        assert_eq!(OutputMode::Json.to_text_mode(), None);
        assert_eq!(OutputMode::Text.resolve_auto(), OutputMode::Text);
    }

    #[test]
    fn reads_config_spelling() {
        let mode: OutputMode = serde_yaml::from_str("yaml").unwrap();
        assert_eq!(mode, OutputMode::Yaml);
    }

    #[test]
    fn not_structured_is_an_error() {
        let result = serialize_structured(&json!({"a": 1}), OutputMode::Text);
        assert!(matches!(result, Err(SerializeError::NotStructured)));
    }

    #[test]
    fn csv_rows_use_first_object_keys() {
        let data = json!([
            {"name": "Drift", "votes": 20, "genres": ["Puzzle", "Action"]},
            {"name": "Seed", "votes": 7, "genres": []}
        ]);
        let csv = serialize_csv(&data).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "genres,name,votes");
        assert_eq!(lines[1], "Puzzle; Action,Drift,20");
        assert_eq!(lines[2], ",Seed,7");
    }

    #[test]
    fn csv_single_object() {
        let csv = serialize_csv(&json!({"page": 2})).unwrap();
        assert!(csv.contains("key,value"));
        assert!(csv.contains("page,2"));
    }

    #[test]
    fn csv_empty_array_is_empty() {
        assert_eq!(serialize_csv(&json!([])).unwrap(), "");
    }
}
