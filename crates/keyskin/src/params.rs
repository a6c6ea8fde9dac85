//! Typed readers over flat style and liquid-keyboard parameter maps.
//!
//! Every read has a documented default, so callers never deal with missing
//! or mistyped parameters: strings default to `""`, numbers to zero and
//! booleans to `false`.

use crate::value::{ConfigMap, ConfigValue};

/// Reader over the theme's `style` section.
#[derive(Debug, Clone, Copy)]
pub struct StyleParams<'a> {
    map: &'a ConfigMap,
}

impl<'a> StyleParams<'a> {
    pub fn new(map: &'a ConfigMap) -> Self {
        Self { map }
    }

    /// Returns the raw value for `key`.
    pub fn get_value(&self, key: &str) -> Option<&'a ConfigValue> {
        self.map.get(key)
    }

    /// Returns `true` if `key` is set, whatever its type.
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Scalar as text, or `""`.
    pub fn get_string(&self, key: &str) -> String {
        self.map
            .get(key)
            .and_then(ConfigValue::to_text)
            .unwrap_or_default()
    }

    /// Integer value, or `0`.
    pub fn get_int(&self, key: &str) -> i32 {
        self.map
            .get(key)
            .and_then(ConfigValue::to_int)
            .map(saturate_i32)
            .unwrap_or(0)
    }

    /// Float value, or `0.0`.
    pub fn get_float(&self, key: &str) -> f32 {
        self.map
            .get(key)
            .and_then(ConfigValue::to_float)
            .map(|f| f as f32)
            .unwrap_or(0.0)
    }

    /// Boolean value, or `false`.
    pub fn get_bool(&self, key: &str) -> bool {
        self.map
            .get(key)
            .and_then(ConfigValue::to_bool)
            .unwrap_or(false)
    }
}

/// Reader over the theme's `liquid_keyboard` section.
///
/// Float reads fall back to the style parameter of the same name.
#[derive(Debug, Clone, Copy)]
pub struct LiquidParams<'a> {
    map: &'a ConfigMap,
    style: StyleParams<'a>,
}

impl<'a> LiquidParams<'a> {
    pub fn new(map: &'a ConfigMap, style: StyleParams<'a>) -> Self {
        Self { map, style }
    }

    pub fn get_value(&self, key: &str) -> Option<&'a ConfigValue> {
        self.map.get(key)
    }

    /// Integer value, or `0`.
    pub fn get_int(&self, key: &str) -> i32 {
        self.map
            .get(key)
            .and_then(ConfigValue::to_int)
            .map(saturate_i32)
            .unwrap_or(0)
    }

    /// Float value, or the style float of the same key.
    pub fn get_float(&self, key: &str) -> f32 {
        self.map
            .get(key)
            .and_then(ConfigValue::to_float)
            .map(|f| f as f32)
            .unwrap_or_else(|| self.style.get_float(key))
    }
}

fn saturate_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
