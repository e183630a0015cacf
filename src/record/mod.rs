//! Flat-file record format.
//!
//! One entity per line, fields separated by `,`. List fields are wrapped in
//! `[...]` with `|`-separated tokens, optionally `key=value` pairs. There is
//! no escaping, so values containing a delimiter are rejected before they
//! reach the file.

mod parser;

use std::fmt;

use chrono::{DateTime, Utc};

use crate::id;

pub use parser::RecordParser;

pub const FIELD_SEPARATOR: char = ',';
pub const LIST_SEPARATOR: char = '|';
pub const LIST_OPEN: char = '[';
pub const LIST_CLOSE: char = ']';
pub const PAIR_SEPARATOR: char = '=';

/// Typed value of one record field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Decimal(f64),
    /// Rendered with exactly two decimal places.
    Currency(f64),
    Bool(bool),
    List(Vec<String>),
    Pairs(Vec<(String, String)>),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    pub fn render(&self) -> String {
        match self {
            FieldValue::Text(value) => value.clone(),
            FieldValue::Int(value) => value.to_string(),
            FieldValue::Decimal(value) => value.to_string(),
            FieldValue::Currency(value) => format!("{:.2}", value),
            FieldValue::Bool(value) => value.to_string(),
            FieldValue::List(items) => render_list(items.iter().map(String::as_str)),
            FieldValue::Pairs(pairs) => {
                let tokens: Vec<String> = pairs
                    .iter()
                    .map(|(k, v)| format!("{}{}{}", k, PAIR_SEPARATOR, v))
                    .collect();
                render_list(tokens.iter().map(String::as_str))
            }
            FieldValue::Timestamp(value) => value.to_rfc3339(),
        }
    }

    /// False if the value is blank or rendering it would break the row apart.
    pub fn is_storable(&self) -> bool {
        match self {
            FieldValue::Text(value) => !is_blank(value) && !breaks_row(value),
            FieldValue::List(items) => items.iter().all(|item| storable_token(item)),
            FieldValue::Pairs(pairs) => pairs
                .iter()
                .all(|(k, v)| storable_token(k) && storable_token(v) && !k.contains(PAIR_SEPARATOR)),
            _ => true,
        }
    }
}

fn render_list<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
    let joined = tokens.collect::<Vec<_>>().join(&LIST_SEPARATOR.to_string());
    format!("{}{}{}", LIST_OPEN, joined, LIST_CLOSE)
}

fn breaks_row(value: &str) -> bool {
    value.contains(FIELD_SEPARATOR) || value.contains('\n') || value.contains('\r')
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn storable_token(value: &str) -> bool {
    !is_blank(value) && !breaks_token(value)
}

fn breaks_token(value: &str) -> bool {
    breaks_row(value)
        || value.contains(LIST_SEPARATOR)
        || value.contains(LIST_OPEN)
        || value.contains(LIST_CLOSE)
}

/// A named field in an entity's record schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub value: FieldValue,
}

impl Field {
    pub fn text(name: &'static str, value: impl Into<String>) -> Self {
        Field {
            name,
            value: FieldValue::Text(value.into()),
        }
    }

    pub fn int(name: &'static str, value: impl Into<i64>) -> Self {
        Field {
            name,
            value: FieldValue::Int(value.into()),
        }
    }

    pub fn decimal(name: &'static str, value: f64) -> Self {
        Field {
            name,
            value: FieldValue::Decimal(value),
        }
    }

    pub fn currency(name: &'static str, value: f64) -> Self {
        Field {
            name,
            value: FieldValue::Currency(value),
        }
    }

    pub fn bool(name: &'static str, value: bool) -> Self {
        Field {
            name,
            value: FieldValue::Bool(value),
        }
    }

    pub fn list(name: &'static str, items: Vec<String>) -> Self {
        Field {
            name,
            value: FieldValue::List(items),
        }
    }

    pub fn pairs(name: &'static str, pairs: Vec<(String, String)>) -> Self {
        Field {
            name,
            value: FieldValue::Pairs(pairs),
        }
    }

    pub fn timestamp(name: &'static str, value: DateTime<Utc>) -> Self {
        Field {
            name,
            value: FieldValue::Timestamp(value),
        }
    }
}

/// Join a record schema into one stored line.
pub fn join(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| field.value.render())
        .collect::<Vec<_>>()
        .join(&FIELD_SEPARATOR.to_string())
}

pub fn split(line: &str) -> Vec<&str> {
    line.split(FIELD_SEPARATOR).collect()
}

/// First field of a stored line, i.e. the entity identifier.
pub fn leading_id(line: &str) -> &str {
    line.split(FIELD_SEPARATOR).next().unwrap_or("")
}

/// Round half away from zero to two decimal places.
pub fn round_currency(value: f64) -> f64 {
    let scaled = value * 100.0;
    // Values like 1.005 are stored just below the midpoint in binary.
    let nudged = scaled + scaled.signum() * scaled.abs().max(1.0) * 1e-9;
    nudged.round() / 100.0
}

/// Why a stored line was rejected before deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineDefect {
    FieldCount { expected: usize, actual: usize },
    BlankField(usize),
    MalformedId(String),
}

impl fmt::Display for LineDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineDefect::FieldCount { expected, actual } => {
                write!(f, "expected {} fields, found {}", expected, actual)
            }
            LineDefect::BlankField(index) => write!(f, "field {} is blank", index),
            LineDefect::MalformedId(value) => write!(f, "'{}' is not a valid identifier", value),
        }
    }
}

/// Structural check applied to every line before it is deserialized.
pub fn check_line(line: &str, expected_fields: usize) -> Result<(), LineDefect> {
    let fields = split(line);
    if fields.len() != expected_fields {
        return Err(LineDefect::FieldCount {
            expected: expected_fields,
            actual: fields.len(),
        });
    }
    if let Some(index) = fields.iter().position(|f| f.trim().is_empty()) {
        return Err(LineDefect::BlankField(index));
    }
    if !id::is_valid(fields[0]) {
        return Err(LineDefect::MalformedId(fields[0].to_string()));
    }
    Ok(())
}
