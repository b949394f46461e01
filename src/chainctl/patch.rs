//! # Merge-Patch Engine
//!
//! Turns `key=value` tokens into overrides and folds them onto an existing
//! configuration document.
//!
//! ## Value Parsing
//!
//! Each raw value is tried as JSON first (`42`, `true`, `null`, `{"a":1}`,
//! `"quoted"`). Anything that does not parse is kept verbatim as a string, so
//! `url=http://b` needs no quoting. The decision is made once, at parse time, and
//! recorded in [`OverrideValue`].
//!
//! `key=` stores an empty string and `key=null` stores JSON `null`. Neither
//! removes the key from the document.
//!
//! ## Merge Semantics
//!
//! The merge is shallow: each override replaces the whole top-level field of the
//! same name. An object passed as a value replaces the nested object, it is not
//! merged into it. Later duplicates of a key win.

use crate::error::{ChainError, Result};
use crate::model::ConfigDocument;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

const SEPARATOR: char = '=';

/// The value half of an override, resolved once at parse time.
#[derive(Debug, Clone, PartialEq)]
pub enum OverrideValue {
    Structured(Value),
    Literal(String),
}

impl OverrideValue {
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => OverrideValue::Structured(value),
            Err(_) => OverrideValue::Literal(raw.to_string()),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, OverrideValue::Literal(_))
    }

    pub fn to_value(&self) -> Value {
        match self {
            OverrideValue::Structured(value) => value.clone(),
            OverrideValue::Literal(text) => Value::String(text.clone()),
        }
    }
}

/// A single `key=value` override.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigOverride {
    pub key: String,
    pub value: OverrideValue,
}

impl ConfigOverride {
    pub fn new(key: impl Into<String>, value: OverrideValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

impl FromStr for ConfigOverride {
    type Err = ChainError;

    fn from_str(token: &str) -> Result<Self> {
        match token.split_once(SEPARATOR) {
            Some((key, raw)) if !key.is_empty() => {
                Ok(ConfigOverride::new(key, OverrideValue::parse(raw)))
            }
            _ => Err(ChainError::validation(format!(
                "invalid parameter: {}",
                token
            ))),
        }
    }
}

impl fmt::Display for ConfigOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            OverrideValue::Structured(value) => write!(f, "{}={}", self.key, value),
            OverrideValue::Literal(text) => write!(f, "{}={}", self.key, text),
        }
    }
}

/// Parses every token, failing on the first malformed one.
pub fn parse_overrides<I: AsRef<str>>(tokens: &[I]) -> Result<Vec<ConfigOverride>> {
    tokens.iter().map(|t| t.as_ref().parse()).collect()
}

/// Collapses overrides into a flat key/value map. Later keys win.
pub fn overrides_to_map(overrides: &[ConfigOverride]) -> ConfigDocument {
    let mut updates = ConfigDocument::new();
    for o in overrides {
        updates.insert(o.key.clone(), o.value.to_value());
    }
    updates
}

/// Returns a copy of `current` with every overridden top-level field replaced.
pub fn merge(current: &ConfigDocument, overrides: &[ConfigOverride]) -> ConfigDocument {
    let mut merged = current.clone();
    for (key, value) in overrides_to_map(overrides) {
        merged.insert(key, value);
    }
    merged
}
