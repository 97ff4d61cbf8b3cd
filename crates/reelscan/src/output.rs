//! Output modes and structured serialization.
//!
//! Text modes go through the [`Renderer`](crate::render::Renderer); the
//! structured modes serialize view data directly and never touch templates.

use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during serialization.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(String),

    #[error("not a structured output mode")]
    NotStructured,
}

/// Value of the `--output` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    /// Cards for discover, tables for insights.
    #[default]
    Text,
    /// One line per title.
    Table,
    Json,
    Yaml,
    Csv,
}

impl OutputMode {
    /// Returns true for JSON, YAML and CSV.
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputMode::Json | OutputMode::Yaml | OutputMode::Csv)
    }
}

/// Serializes `data` in a structured mode.
///
/// CSV expects a list of flat objects. `headers` fixes the column order;
/// without it the keys of the first row are used.
pub fn serialize_structured<T: Serialize>(
    data: &T,
    mode: OutputMode,
    headers: Option<&[&str]>,
) -> Result<String, SerializeError> {
    match mode {
        OutputMode::Json => Ok(serde_json::to_string_pretty(data)? + "\n"),
        OutputMode::Yaml => Ok(serde_yaml::to_string(data)?),
        OutputMode::Csv => to_csv(data, headers),
        OutputMode::Text | OutputMode::Table => Err(SerializeError::NotStructured),
    }
}

/// Serializes data to CSV.
///
/// The data is converted to JSON first, then flattened.
pub fn to_csv<T: Serialize>(data: &T, headers: Option<&[&str]>) -> Result<String, SerializeError> {
    let value = serde_json::to_value(data)?;
    flatten_json_to_csv(&value, headers)
}

fn flatten_json_to_csv(
    value: &serde_json::Value,
    headers: Option<&[&str]>,
) -> Result<String, SerializeError> {
    use serde_json::Value;

    let mut wtr = csv::Writer::from_writer(vec![]);

    match value {
        Value::Array(arr) => {
            let first_keys: Vec<&str> = match arr.first() {
                Some(Value::Object(first)) => first.keys().map(String::as_str).collect(),
                _ => Vec::new(),
            };
            let headers: Vec<&str> = match headers {
                Some(headers) => headers.to_vec(),
                None if !first_keys.is_empty() => first_keys,
                None => vec!["value"],
            };
            wtr.write_record(&headers).map_err(csv_error)?;

            for item in arr {
                let row: Vec<String> = match item {
                    Value::Object(obj) => headers
                        .iter()
                        .map(|h| obj.get(*h).map(value_to_string).unwrap_or_default())
                        .collect(),
                    other => vec![value_to_string(other)],
                };
                wtr.write_record(&row).map_err(csv_error)?;
            }
        }
        Value::Object(obj) => {
            wtr.write_record(["key", "value"]).map_err(csv_error)?;
            for (k, v) in obj {
                wtr.write_record([k.as_str(), &value_to_string(v)])
                    .map_err(csv_error)?;
            }
        }
        scalar => {
            wtr.write_record(["value"]).map_err(csv_error)?;
            wtr.write_record([value_to_string(scalar)])
                .map_err(csv_error)?;
        }
    }

    let bytes = wtr.into_inner().map_err(|e| SerializeError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| SerializeError::Csv(e.to_string()))
}

fn csv_error(err: csv::Error) -> SerializeError {
    SerializeError::Csv(err.to_string())
}

fn value_to_string(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
