//! Tagged configuration values.
//!
//! Theme documents are trees of mappings, sequences and scalars. [`ConfigValue`]
//! is the closed set of shapes a node can take, with lenient conversions that
//! never fail: a read that does not fit returns `None` and the caller applies
//! its own default.

use std::collections::BTreeMap;
use std::fmt;

/// A mapping from string keys to configuration values.
///
/// Ordered so that anything derived from iterating it is reproducible.
pub type ConfigMap = BTreeMap<String, ConfigValue>;

/// A single node in a parsed theme document.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConfigValue {
    /// A string scalar.
    String(String),
    /// An integer scalar.
    Integer(i64),
    /// A floating point scalar.
    Float(f64),
    /// A boolean scalar.
    Bool(bool),
    /// A sequence of values.
    Sequence(Vec<ConfigValue>),
    /// A nested mapping.
    Mapping(ConfigMap),
    /// An explicit null or an absent value.
    #[default]
    Null,
}

impl ConfigValue {
    /// Returns the string slice, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the nested mapping, if this is a mapping.
    pub fn as_mapping(&self) -> Option<&ConfigMap> {
        match self {
            ConfigValue::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the sequence, if this is a sequence.
    pub fn as_sequence(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `true` for [`ConfigValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// Renders scalars as text. Collections and null have no text form.
    pub fn to_text(&self) -> Option<String> {
        match self {
            ConfigValue::String(s) => Some(s.clone()),
            ConfigValue::Integer(i) => Some(i.to_string()),
            ConfigValue::Float(f) => Some(f.to_string()),
            ConfigValue::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Reads the value as an integer.
    ///
    /// Floats truncate toward zero, numeric strings are parsed, booleans map
    /// to 0 and 1.
    pub fn to_int(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(i) => Some(*i),
            ConfigValue::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            ConfigValue::String(s) => {
                let s = s.trim();
                s.parse::<i64>().ok().or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f.trunc() as i64)
                })
            }
            ConfigValue::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Reads the value as a float. Integers widen and numeric strings parse.
    pub fn to_float(&self) -> Option<f64> {
        match self {
            ConfigValue::Float(f) => Some(*f),
            ConfigValue::Integer(i) => Some(*i as f64),
            ConfigValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Reads the value as a boolean.
    ///
    /// Accepts `true`/`false` strings in any case and treats non-zero
    /// integers as `true`.
    pub fn to_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            ConfigValue::Integer(i) => Some(*i != 0),
            ConfigValue::String(s) => {
                let s = s.trim();
                if s.eq_ignore_ascii_case("true") {
                    Some(true)
                } else if s.eq_ignore_ascii_case("false") {
                    Some(false)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Walks a dotted or slash-separated path through nested mappings.
    ///
    /// `"speller/alphabet"` and `"speller.alphabet"` address the same node.
    pub fn lookup(&self, path: &str) -> Option<&ConfigValue> {
        let mut current = self;
        for segment in path.split(['/', '.']).filter(|s| !s.is_empty()) {
            current = current.as_mapping()?.get(segment)?;
        }
        Some(current)
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::String(s) => write!(f, "{}", s),
            ConfigValue::Integer(i) => write!(f, "{}", i),
            ConfigValue::Float(x) => write!(f, "{}", x),
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Sequence(items) => write!(f, "[{} items]", items.len()),
            ConfigValue::Mapping(map) => write!(f, "{{{} entries}}", map.len()),
            ConfigValue::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Integer(i)
    }
}

impl From<f64> for ConfigValue {
    fn from(f: f64) -> Self {
        ConfigValue::Float(f)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(map: ConfigMap) -> Self {
        ConfigValue::Mapping(map)
    }
}

impl From<serde_yaml::Value> for ConfigValue {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => ConfigValue::Null,
            Value::Bool(b) => ConfigValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ConfigValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    // Keep the bit pattern; colors only look at the low 32 bits.
                    ConfigValue::Integer(u as i64)
                } else {
                    ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => ConfigValue::String(s),
            Value::Sequence(seq) => {
                ConfigValue::Sequence(seq.into_iter().map(ConfigValue::from).collect())
            }
            Value::Mapping(mapping) => ConfigValue::Mapping(
                mapping
                    .into_iter()
                    .filter_map(|(k, v)| yaml_key(k).map(|k| (k, ConfigValue::from(v))))
                    .collect(),
            ),
            Value::Tagged(tagged) => ConfigValue::from(tagged.value),
        }
    }
}

/// Stringifies a YAML mapping key. Collection keys are dropped.
pub(crate) fn yaml_key(key: serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Null => Some("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => None,
    }
}
