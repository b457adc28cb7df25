//! Typed parameter sets read by components at construction time.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single parameter value as written in a manifest.
///
/// Deserialization tries each variant in order, so `true` is a boolean, `8` is
/// an integer, `[1, 2, 3]` is a byte sequence and `"..."` is text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A boolean flag.
    Bool(bool),
    /// An unsigned integer (widths, counts).
    Int(u32),
    /// A raw byte sequence (initial memory contents).
    Bytes(Vec<u8>),
    /// Free-form text.
    Text(String),
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        ParamValue::Int(v)
    }
}

impl From<Vec<u8>> for ParamValue {
    fn from(v: Vec<u8>) -> Self {
        ParamValue::Bytes(v)
    }
}

impl From<&[u8]> for ParamValue {
    fn from(v: &[u8]) -> Self {
        ParamValue::Bytes(v.to_vec())
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

/// The parameters of one component instance, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params {
    values: BTreeMap<String, ParamValue>,
}

impl Params {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this set with `name` bound to `value`.
    pub fn with(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Binds `name` to `value`, replacing any earlier binding.
    pub fn insert(&mut self, name: &str, value: impl Into<ParamValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Returns the raw value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Returns true if no parameters are bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Looks up a required integer parameter.
    pub fn u32(&self, name: &str) -> Result<u32, ConfigError> {
        match self.get(name) {
            Some(ParamValue::Int(v)) => Ok(*v),
            Some(_) => Err(type_error(name, "an unsigned integer")),
            None => Err(ConfigError::MissingParameter(name.to_string())),
        }
    }

    /// Looks up an integer parameter, falling back to `default` when absent.
    pub fn u32_or(&self, name: &str, default: u32) -> Result<u32, ConfigError> {
        match self.get(name) {
            None => Ok(default),
            Some(_) => self.u32(name),
        }
    }

    /// Looks up an optional byte-sequence parameter.
    ///
    /// Text values are accepted as hexadecimal digit pairs, with whitespace
    /// and an optional `0x` prefix ignored.
    pub fn bytes(&self, name: &str) -> Result<Option<Vec<u8>>, ConfigError> {
        match self.get(name) {
            None => Ok(None),
            Some(ParamValue::Bytes(b)) => Ok(Some(b.clone())),
            Some(ParamValue::Text(s)) => parse_hex(s)
                .map(Some)
                .ok_or_else(|| type_error(name, "a byte sequence")),
            Some(_) => Err(type_error(name, "a byte sequence")),
        }
    }
}

fn type_error(name: &str, expected: &'static str) -> ConfigError {
    ConfigError::ParameterType {
        name: name.to_string(),
        expected,
    }
}

fn parse_hex(s: &str) -> Option<Vec<u8>> {
    let trimmed = s.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: Vec<u8> = body
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<_>>()?;
    if digits.len() % 2 != 0 {
        return None;
    }
    Some(digits.chunks(2).map(|p| (p[0] << 4) | p[1]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_lookups() {
        let p = Params::new()
            .with("bit_width", 8u32)
            .with("initial_data", vec![1u8, 2, 3]);
        assert_eq!(p.u32("bit_width").unwrap(), 8);
        assert_eq!(p.bytes("initial_data").unwrap(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn missing_required() {
        let err = Params::new().u32("bit_width").unwrap_err();
        assert!(matches!(err, ConfigError::MissingParameter(ref n) if n == "bit_width"));
    }

    #[test]
    fn defaults_when_absent() {
        let p = Params::new();
        assert_eq!(p.u32_or("bit_width", 1).unwrap(), 1);
        assert_eq!(p.bytes("initial_data").unwrap(), None);
    }

    #[test]
    fn wrong_type_rejected() {
        let p = Params::new().with("bit_width", "eight");
        assert!(matches!(
            p.u32("bit_width"),
            Err(ConfigError::ParameterType { .. })
        ));
        assert!(matches!(
            p.u32_or("bit_width", 1),
            Err(ConfigError::ParameterType { .. })
        ));
    }

    #[test]
    fn hex_text_bytes() {
        let p = Params::new().with("initial_data", "0x01 02 fF");
        assert_eq!(p.bytes("initial_data").unwrap(), Some(vec![0x01, 0x02, 0xFF]));
    }

    #[test]
    fn bad_hex_text_rejected() {
        let odd = Params::new().with("initial_data", "abc");
        assert!(odd.bytes("initial_data").is_err());
        let junk = Params::new().with("initial_data", "zz");
        assert!(junk.bytes("initial_data").is_err());
    }

    #[test]
    fn insert_replaces() {
        let mut p = Params::new();
        p.insert("count", 1u32);
        p.insert("count", 2u32);
        assert_eq!(p.u32("count").unwrap(), 2);
        assert_eq!(p, Params::new().with("count", 2u32));
    }

    #[test]
    fn untagged_deserialize() {
        let p: Params =
            serde_json::from_str(r#"{"a": 4, "b": true, "c": [0, 255], "d": "x"}"#).unwrap();
        assert_eq!(p.get("a"), Some(&ParamValue::Int(4)));
        assert_eq!(p.get("b"), Some(&ParamValue::Bool(true)));
        assert_eq!(p.get("c"), Some(&ParamValue::Bytes(vec![0, 255])));
        assert_eq!(p.get("d"), Some(&ParamValue::Text("x".to_string())));
    }

    #[test]
    fn serde_roundtrip() {
        let p = Params::new().with("bit_width", 16u32).with("initial_data", vec![7u8]);
        let json = serde_json::to_string(&p).unwrap();
        let back: Params = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
