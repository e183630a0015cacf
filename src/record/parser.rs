use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::{round_currency, split, LIST_CLOSE, LIST_OPEN, LIST_SEPARATOR, PAIR_SEPARATOR};
use crate::id;
use crate::logging::Logger;

/// Typed, fail-soft access to the fields of one stored line.
///
/// Accessors never fail: a missing index or a conversion error is logged as
/// a warning naming the entity and field index, counted in `failures()`, and
/// replaced by the accessor's default.
pub struct RecordParser<'a> {
    fields: Vec<&'a str>,
    entity_id: String,
    logger: Logger,
    failures: usize,
}

impl<'a> RecordParser<'a> {
    pub fn new(line: &'a str, logger: Logger) -> Self {
        let fields = split(line);
        let entity_id = fields
            .first()
            .filter(|f| id::is_valid(f))
            .map(|f| f.to_string())
            .unwrap_or_default();

        RecordParser {
            fields,
            entity_id,
            logger,
            failures: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Identifier in field 0, or empty if it is malformed.
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    /// Number of accessor calls that fell back to a default.
    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn string(&mut self, index: usize) -> String {
        self.raw(index).map(str::to_string).unwrap_or_default()
    }

    pub fn string_or(&mut self, index: usize, default: &str) -> String {
        match self.fields.get(index) {
            Some(field) => field.to_string(),
            None => {
                self.logger.verbose(format!(
                    "Failed to parse index {} in record {}; defaulting to {}.",
                    index, self.entity_id, default
                ));
                default.to_string()
            }
        }
    }

    pub fn bool(&mut self, index: usize) -> bool {
        self.raw(index).map(|f| f == "true").unwrap_or(false)
    }

    pub fn double(&mut self, index: usize) -> f64 {
        self.parse_or(index, 0.0)
    }

    pub fn currency(&mut self, index: usize) -> f64 {
        round_currency(self.double(index))
    }

    pub fn int(&mut self, index: usize) -> i64 {
        self.parse_or(index, 0)
    }

    pub fn unsigned(&mut self, index: usize) -> u32 {
        self.parse_or(index, 0)
    }

    /// Parse any `FromStr` value, falling back to `default`.
    pub fn parse_or<T>(&mut self, index: usize, default: T) -> T
    where
        T: FromStr,
        T::Err: Display,
    {
        let Some(raw) = self.raw(index) else {
            return default;
        };
        match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(err) => {
                self.reject(index, &format!("'{}': {}", raw, err));
                default
            }
        }
    }

    /// `[a|b]` into its non-blank tokens.
    pub fn list(&mut self, index: usize) -> Vec<String> {
        let Some(raw) = self.raw(index) else {
            return Vec::new();
        };
        let inner = raw
            .strip_prefix(LIST_OPEN)
            .and_then(|rest| rest.strip_suffix(LIST_CLOSE));
        match inner {
            Some(inner) => inner
                .split(LIST_SEPARATOR)
                .filter(|token| !token.trim().is_empty())
                .map(str::to_string)
                .collect(),
            None => {
                self.reject(index, &format!("'{}' is not a bracketed list", raw));
                Vec::new()
            }
        }
    }

    /// `[k=v|...]` into ordered pairs; malformed tokens are dropped.
    pub fn pairs(&mut self, index: usize) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for token in self.list(index) {
            match token.split_once(PAIR_SEPARATOR) {
                Some((key, value)) => pairs.push((key.trim().to_string(), value.trim().to_string())),
                None => self.reject(index, &format!("'{}' is not a key=value pair", token)),
            }
        }
        pairs
    }

    /// The field if it has the shape of an identifier, otherwise empty.
    pub fn guid(&mut self, index: usize) -> String {
        match self.raw(index) {
            Some(raw) if id::is_valid(raw) => raw.to_string(),
            _ => String::new(),
        }
    }

    pub fn timestamp(&mut self, index: usize) -> DateTime<Utc> {
        let Some(raw) = self.raw(index) else {
            return DateTime::<Utc>::default();
        };
        match DateTime::parse_from_rfc3339(raw.trim()) {
            Ok(value) => value.with_timezone(&Utc),
            Err(err) => {
                self.reject(index, &format!("'{}': {}", raw, err));
                DateTime::<Utc>::default()
            }
        }
    }

    fn raw(&mut self, index: usize) -> Option<&'a str> {
        match self.fields.get(index) {
            Some(field) => Some(*field),
            None => {
                self.reject(index, "index out of range");
                None
            }
        }
    }

    /// Count a field as failed and warn with the entity id and index.
    pub fn reject(&mut self, index: usize, reason: &str) {
        self.failures += 1;
        self.logger.warning(format!(
            "Failed to parse #{} field with index {}; {}.",
            self.entity_id, index, reason
        ));
    }
}
