//! Configurable columns over JSON rows
//!
//! Hosts that receive rows as JSON describe their columns declaratively with a
//! [`ColumnSpec`]: a dotted path into the row and a named [`ValueFormat`].
//! [`descriptors_from_specs`] turns those specs into column descriptors.

use crate::domain::{CellValue, ColumnDescriptor};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Write;

const DEFAULT_DATE_PATTERN: &str = "%Y-%m-%d";
const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Named display formats for JSON columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    /// Keep the raw value and its type
    #[default]
    Raw,
    /// Always render as text
    Text,
    /// Fixed number of decimals
    Number,
    /// Currency symbol and two decimals by default
    Currency,
    /// Ratio rendered as a percentage
    Percent,
    /// Date rendered with a strftime pattern
    Date,
    /// Boolean rendered as Yes/No
    YesNo,
}

/// Declarative description of one JSON column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Stable column key
    pub key: String,

    /// Header label; the key is used when absent
    #[serde(default)]
    pub label: Option<String>,

    /// Dotted path into the row; defaults to the key
    #[serde(default)]
    pub path: Option<String>,

    /// Display format
    #[serde(default)]
    pub format: ValueFormat,

    /// Decimals for number, currency and percent formats
    #[serde(default)]
    pub decimals: Option<usize>,

    /// Symbol for the currency format
    #[serde(default)]
    pub currency_symbol: Option<String>,

    /// strftime pattern for the date format
    #[serde(default)]
    pub date_pattern: Option<String>,
}

impl ColumnSpec {
    /// Create a raw column reading the field named like the key
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: None,
            path: None,
            format: ValueFormat::Raw,
            decimals: None,
            currency_symbol: None,
            date_pattern: None,
        }
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the format
    pub fn with_format(mut self, format: ValueFormat) -> Self {
        self.format = format;
        self
    }

    /// Path actually used to read the value
    pub fn effective_path(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.key)
    }

    /// Validates the column definition
    pub fn validate(&self) -> Result<(), String> {
        if self.key.trim().is_empty() {
            return Err("columns.key cannot be empty".to_string());
        }
        if self.effective_path().split('.').any(str::is_empty) {
            return Err(format!(
                "Invalid path '{}' for column '{}'",
                self.effective_path(),
                self.key
            ));
        }
        if let Some(pattern) = &self.date_pattern {
            if StrftimeItems::new(pattern).any(|item| item == Item::Error) {
                return Err(format!(
                    "Invalid date_pattern '{}' for column '{}'",
                    pattern, self.key
                ));
            }
        }
        if let Some(decimals) = self.decimals {
            if decimals > 10 {
                return Err(format!(
                    "columns.decimals must be <= 10 (column '{}')",
                    self.key
                ));
            }
        }
        Ok(())
    }
}

/// Reads a value by dotted path; numeric segments index into arrays
pub fn lookup_path<'a>(row: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(row, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Turns a JSON document into rows; anything but an array yields no rows
pub fn rows_from_json(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => {
            tracing::warn!(
                kind = json_kind(&other),
                "Row data is not an array, exporting no rows"
            );
            Vec::new()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Builds column descriptors for JSON rows
pub fn descriptors_from_specs(specs: &[ColumnSpec]) -> Vec<ColumnDescriptor<Value>> {
    specs.iter().map(descriptor_from_spec).collect()
}

fn descriptor_from_spec(spec: &ColumnSpec) -> ColumnDescriptor<Value> {
    let path = spec.effective_path().to_string();
    let mut descriptor = ColumnDescriptor::new(spec.key.clone(), move |row: &Value| {
        lookup_path(row, &path)
            .map(CellValue::from_json)
            .unwrap_or_default()
    });

    if let Some(label) = &spec.label {
        descriptor = descriptor.with_label(label.clone());
    }

    if spec.format != ValueFormat::Raw {
        let formatter = spec.clone();
        descriptor = descriptor.with_formatter(move |raw, _row| format_value(&formatter, raw));
    }

    descriptor
}

/// Applies the display format of a column to a raw value
///
/// Values that do not fit the format pass through unchanged; empty values
/// stay empty.
pub fn format_value(spec: &ColumnSpec, raw: &CellValue) -> CellValue {
    if raw.is_empty() {
        return CellValue::Empty;
    }

    match spec.format {
        ValueFormat::Raw => raw.clone(),
        ValueFormat::Text => CellValue::Text(raw.to_display_string()),
        ValueFormat::Number => match (numeric(raw), spec.decimals) {
            (Some(n), Some(decimals)) => CellValue::Text(format!("{n:.decimals$}")),
            (Some(n), None) => CellValue::Number(n),
            (None, _) => raw.clone(),
        },
        ValueFormat::Currency => match numeric(raw) {
            Some(n) => {
                let decimals = spec.decimals.unwrap_or(2);
                let symbol = spec
                    .currency_symbol
                    .as_deref()
                    .unwrap_or(DEFAULT_CURRENCY_SYMBOL);
                let sign = if n < 0.0 { "-" } else { "" };
                CellValue::Text(format!("{sign}{symbol}{:.decimals$}", n.abs()))
            }
            None => raw.clone(),
        },
        ValueFormat::Percent => match numeric(raw) {
            Some(n) => {
                let decimals = spec.decimals.unwrap_or(0);
                CellValue::Text(format!("{:.decimals$}%", n * 100.0))
            }
            None => raw.clone(),
        },
        ValueFormat::Date => {
            let pattern = spec.date_pattern.as_deref().unwrap_or(DEFAULT_DATE_PATTERN);
            let datetime = match temporal(raw) {
                Some(Temporal::Date(date)) => date.and_hms_opt(0, 0, 0),
                Some(Temporal::DateTime(datetime)) => Some(datetime),
                None => None,
            };
            match datetime {
                Some(datetime) => render_datetime(&datetime, pattern)
                    .map(CellValue::Text)
                    .unwrap_or_else(|| raw.clone()),
                None => raw.clone(),
            }
        }
        ValueFormat::YesNo => match raw {
            CellValue::Bool(b) => yes_no(*b),
            CellValue::Number(n) => yes_no(*n != 0.0),
            CellValue::Text(text) => match text.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" => yes_no(true),
                "false" | "0" | "no" => yes_no(false),
                _ => raw.clone(),
            },
            other => other.clone(),
        },
    }
}

/// Dates are promoted to midnight, so time fields render as zero. Fields the
/// value cannot provide (offsets on naive values) yield `None`.
fn render_datetime(datetime: &NaiveDateTime, pattern: &str) -> Option<String> {
    let mut rendered = String::new();
    write!(rendered, "{}", datetime.format(pattern)).ok()?;
    Some(rendered)
}

fn yes_no(value: bool) -> CellValue {
    CellValue::Text(if value { "Yes" } else { "No" }.to_string())
}

fn numeric(raw: &CellValue) -> Option<f64> {
    match raw {
        CellValue::Number(n) => Some(*n),
        CellValue::Text(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

enum Temporal {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

fn temporal(raw: &CellValue) -> Option<Temporal> {
    match raw {
        CellValue::Date(date) => Some(Temporal::Date(*date)),
        CellValue::DateTime(datetime) => Some(Temporal::DateTime(*datetime)),
        CellValue::Text(text) => {
            let text = text.trim();
            if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
                return Some(Temporal::DateTime(datetime.naive_local()));
            }
            if let Ok(datetime) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
                return Some(Temporal::DateTime(datetime));
            }
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .map(Temporal::Date)
        }
        _ => None,
    }
}
