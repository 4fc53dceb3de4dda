//! Common utility functions for lens modules
//!
//! This module provides the output formats shared by all commands and the
//! rendering of `(field, value)` records in each of them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::lens::fields::FieldRow;

/// Unified output format for all lens commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Pretty table with borders (default)
    #[default]
    Table,
    /// Markdown table format
    Markdown,
    /// Compact JSON (single line per object)
    Json,
    /// Pretty-printed JSON with indentation
    JsonPretty,
    /// JSON Lines format (one JSON object per line, for streaming)
    JsonLine,
    /// Pipe-separated values with header
    Psv,
}

impl OutputFormat {
    /// Check if this is a JSON variant
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json | Self::JsonPretty | Self::JsonLine)
    }

    /// Check if this is a table variant
    pub fn is_table(&self) -> bool {
        matches!(self, Self::Table | Self::Markdown)
    }

    /// Get a list of all format names for help text
    pub fn all_names() -> &'static [&'static str] {
        &[
            "table",
            "markdown",
            "json",
            "json-pretty",
            "json-line",
            "psv",
        ]
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Markdown => write!(f, "markdown"),
            Self::Json => write!(f, "json"),
            Self::JsonPretty => write!(f, "json-pretty"),
            Self::JsonLine => write!(f, "json-line"),
            Self::Psv => write!(f, "psv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "pretty" => Ok(Self::Table),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            "json-pretty" | "jsonpretty" => Ok(Self::JsonPretty),
            "json-line" | "jsonline" | "jsonl" | "ndjson" => Ok(Self::JsonLine),
            "psv" | "pipe" => Ok(Self::Psv),
            _ => Err(format!(
                "Unknown output format '{}'. Valid formats: {}",
                s,
                Self::all_names().join(", ")
            )),
        }
    }
}

// =============================================================================
// Record rendering
// =============================================================================

/// One displayed `field | value` line of a record table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "display", derive(tabled::Tabled))]
pub struct FieldRowDisplay {
    pub field: String,
    pub value: String,
}

impl From<&FieldRow> for FieldRowDisplay {
    fn from((field, value): &FieldRow) -> Self {
        Self {
            field: field.clone(),
            value: value.clone(),
        }
    }
}

/// A record as a JSON object, keys in record order
pub fn rows_to_json(rows: &[FieldRow]) -> Value {
    let map: Map<String, Value> = rows
        .iter()
        .map(|(field, value)| (field.clone(), Value::String(value.clone())))
        .collect();
    Value::Object(map)
}

/// Render several records in `format`.
///
/// Tables and PSV blocks are separated by a blank line; JSON becomes an array
/// (or one object per line for `json-line`).
#[cfg(feature = "display")]
pub fn format_records(
    records: &[Vec<FieldRow>],
    format: OutputFormat,
) -> crate::Result<String> {
    use tabled::settings::Style;
    use tabled::Table;

    let output = match format {
        OutputFormat::Table | OutputFormat::Markdown => records
            .iter()
            .map(|rows| {
                let display: Vec<FieldRowDisplay> = rows.iter().map(Into::into).collect();
                let mut table = Table::new(display);
                if format == OutputFormat::Table {
                    table.with(Style::rounded());
                } else {
                    table.with(Style::markdown());
                }
                table.to_string()
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
        OutputFormat::Json => {
            Value::Array(records.iter().map(|r| rows_to_json(r)).collect()).to_string()
        }
        OutputFormat::JsonPretty => {
            let value = Value::Array(records.iter().map(|r| rows_to_json(r)).collect());
            serde_json::to_string_pretty(&value)?
        }
        OutputFormat::JsonLine => records
            .iter()
            .map(|r| rows_to_json(r).to_string())
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Psv => records
            .iter()
            .map(|rows| {
                let mut lines = vec!["field|value".to_string()];
                lines.extend(rows.iter().map(|(f, v)| format!("{f}|{v}")));
                lines.join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
    };
    Ok(output)
}

/// Render a single record in `format`; JSON output is a bare object
#[cfg(feature = "display")]
pub fn format_record(rows: &[FieldRow], format: OutputFormat) -> crate::Result<String> {
    match format {
        OutputFormat::Json | OutputFormat::JsonLine => Ok(rows_to_json(rows).to_string()),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(&rows_to_json(rows))?),
        _ => format_records(&[rows.to_vec()], format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<FieldRow> {
        vec![
            ("handle".to_string(), "E1".to_string()),
            ("roles".to_string(), "technical, abuse".to_string()),
        ]
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(
            OutputFormat::from_str("table").unwrap(),
            OutputFormat::Table
        );
        assert_eq!(
            OutputFormat::from_str("pretty").unwrap(),
            OutputFormat::Table
        );
        assert_eq!(
            OutputFormat::from_str("md").unwrap(),
            OutputFormat::Markdown
        );
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(
            OutputFormat::from_str("json-pretty").unwrap(),
            OutputFormat::JsonPretty
        );
        assert_eq!(
            OutputFormat::from_str("jsonl").unwrap(),
            OutputFormat::JsonLine
        );
        assert_eq!(OutputFormat::from_str("psv").unwrap(), OutputFormat::Psv);
        assert!(OutputFormat::from_str("invalid").is_err());
    }

    #[test]
    fn test_output_format_display() {
        for name in OutputFormat::all_names() {
            assert_eq!(OutputFormat::from_str(name).unwrap().to_string(), *name);
        }
    }

    #[test]
    fn test_output_format_kinds() {
        assert!(OutputFormat::Json.is_json());
        assert!(OutputFormat::JsonLine.is_json());
        assert!(!OutputFormat::Psv.is_json());
        assert!(OutputFormat::Markdown.is_table());
        assert!(!OutputFormat::JsonPretty.is_table());
    }

    #[test]
    fn test_rows_to_json_keeps_order() {
        let json = rows_to_json(&rows());
        assert_eq!(json.to_string(), r#"{"handle":"E1","roles":"technical, abuse"}"#);
    }

    #[cfg(feature = "display")]
    #[test]
    fn test_format_record() {
        assert_eq!(
            format_record(&rows(), OutputFormat::Psv).unwrap(),
            "field|value\nhandle|E1\nroles|technical, abuse"
        );
        assert_eq!(
            format_record(&rows(), OutputFormat::Json).unwrap(),
            r#"{"handle":"E1","roles":"technical, abuse"}"#
        );

        let table = format_record(&rows(), OutputFormat::Markdown).unwrap();
        assert!(table.contains("| field"));
        assert!(table.contains("technical, abuse"));
    }

    #[cfg(feature = "display")]
    #[test]
    fn test_format_records() {
        let records = vec![rows(), vec![("handle".to_string(), "E2".to_string())]];
        assert_eq!(
            format_records(&records, OutputFormat::JsonLine).unwrap(),
            "{\"handle\":\"E1\",\"roles\":\"technical, abuse\"}\n{\"handle\":\"E2\"}"
        );
        assert_eq!(
            format_records(&records, OutputFormat::Json).unwrap(),
            r#"[{"handle":"E1","roles":"technical, abuse"},{"handle":"E2"}]"#
        );
        assert_eq!(
            format_records(&records, OutputFormat::Psv).unwrap(),
            "field|value\nhandle|E1\nroles|technical, abuse\n\nfield|value\nhandle|E2"
        );
        assert_eq!(format_records(&[], OutputFormat::Table).unwrap(), "");
    }

    #[cfg(feature = "display")]
    #[test]
    fn test_format_json_pretty() {
        let single = format_record(&rows(), OutputFormat::JsonPretty).unwrap();
        assert_eq!(
            single,
            "{\n  \"handle\": \"E1\",\n  \"roles\": \"technical, abuse\"\n}"
        );

        let many = format_records(&[rows()], OutputFormat::JsonPretty).unwrap();
        assert!(many.starts_with("[\n  {\n"));
        assert!(many.contains("\"handle\": \"E1\""));
        assert_eq!(format_records(&[], OutputFormat::JsonPretty).unwrap(), "[]");
    }
}
