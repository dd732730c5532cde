// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration value tree types.
//!
//! This module provides the `ConfigValue` type, the untyped recursive value
//! all configuration sources decode into, and the `ConfigTree` alias for the
//! string-keyed mapping that forms the root of every configuration (sub)tree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A configuration tree: a string-keyed mapping of configuration values.
///
/// The root of any configuration document is always a `ConfigTree`. Key
/// iteration order carries no meaning; a `BTreeMap` is used so dumps are
/// deterministic.
pub type ConfigTree = BTreeMap<String, ConfigValue>;

/// An untyped configuration value.
///
/// `ConfigValue` is the recursive sum type every backing store decodes into:
/// scalars, ordered sequences, and string-keyed mappings. It (de)serializes
/// untagged, so plain JSON and YAML documents convert directly to and from it.
///
/// # Examples
///
/// ```
/// use fwissr::domain::ConfigValue;
///
/// let value: ConfigValue = serde_json::from_str(r#"{"host": "db1", "port": 5432}"#).unwrap();
/// assert_eq!(value.as_mapping().unwrap()["port"], ConfigValue::Integer(5432));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer. Numbers outside the `i64` range decode as `Float`.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    String(String),
    /// An ordered sequence of values.
    Sequence(Vec<ConfigValue>),
    /// A string-keyed mapping of values.
    Mapping(ConfigTree),
}

impl ConfigValue {
    /// Returns `true` for `ConfigValue::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// Returns the boolean value, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer value, if this is an `Integer`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the float value. Integers convert too.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Float(value) => Some(*value),
            ConfigValue::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the sequence, if this is a `Sequence`.
    pub fn as_sequence(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the mapping, if this is a `Mapping`.
    pub fn as_mapping(&self) -> Option<&ConfigTree> {
        match self {
            ConfigValue::Mapping(tree) => Some(tree),
            _ => None,
        }
    }

    /// Returns `true` if this is a `Mapping`.
    pub fn is_mapping(&self) -> bool {
        matches!(self, ConfigValue::Mapping(_))
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Integer(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Float(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(items: Vec<ConfigValue>) -> Self {
        ConfigValue::Sequence(items)
    }
}

impl From<ConfigTree> for ConfigValue {
    fn from(tree: ConfigTree) -> Self {
        ConfigValue::Mapping(tree)
    }
}

impl fmt::Display for ConfigValue {
    /// Renders the value as compact JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "{}", json),
            Err(_) => write!(f, "{:?}", self),
        }
    }
}
