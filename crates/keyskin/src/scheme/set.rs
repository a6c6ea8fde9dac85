//! Color schemes and the set they live in.

use std::collections::BTreeMap;

use crate::value::{ConfigMap, ConfigValue};

/// Id every scheme set must contain.
pub const DEFAULT_SCHEME_ID: &str = "default";

/// Keys that describe a scheme rather than color it.
pub const METADATA_KEYS: &[&str] = &["name", "author"];

/// One named color scheme: color keys mapped to raw literals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorScheme {
    entries: ConfigMap,
}

impl ColorScheme {
    pub fn new(entries: ConfigMap) -> Self {
        Self { entries }
    }

    /// Returns the raw literal for `key`, metadata included.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Display name from the `name` key.
    pub fn name(&self) -> Option<String> {
        self.entries.get("name").and_then(ConfigValue::to_text)
    }

    pub fn author(&self) -> Option<String> {
        self.entries.get("author").and_then(ConfigValue::to_text)
    }

    /// Id of the scheme to use in dark mode, if declared.
    pub fn dark_scheme(&self) -> Option<String> {
        self.entries.get("dark_scheme").and_then(ConfigValue::to_text)
    }

    /// Id of the scheme to use in light mode, if declared.
    pub fn light_scheme(&self) -> Option<String> {
        self.entries.get("light_scheme").and_then(ConfigValue::to_text)
    }

    /// Returns `true` if either variant key is present.
    pub fn has_variants(&self) -> bool {
        self.entries.contains_key("dark_scheme") || self.entries.contains_key("light_scheme")
    }

    /// Iterates over color entries, skipping `name` and `author`.
    pub fn colors(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries
            .iter()
            .filter(|(key, _)| !METADATA_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ConfigValue)> for ColorScheme {
    fn from_iter<I: IntoIterator<Item = (String, ConfigValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// All color schemes of a theme, keyed by id.
///
/// Remembers insertion order so schemes can be listed the way the theme
/// author wrote them.
#[derive(Debug, Clone, Default)]
pub struct ColorSchemeSet {
    schemes: BTreeMap<String, ColorScheme>,
    order: Vec<String>,
}

impl ColorSchemeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a scheme, returning `self` for chaining.
    pub fn with(mut self, id: impl Into<String>, scheme: ColorScheme) -> Self {
        self.insert(id, scheme);
        self
    }

    /// Adds or replaces a scheme. A replaced scheme keeps its position.
    pub fn insert(&mut self, id: impl Into<String>, scheme: ColorScheme) {
        let id = id.into();
        if self.schemes.insert(id.clone(), scheme).is_none() {
            self.order.push(id);
        }
    }

    /// Builds the set from `(id, value)` pairs of a `preset_color_schemes`
    /// section, keeping their order.
    ///
    /// Entries that are not mappings are skipped with a warning.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, ConfigValue)>,
    {
        let mut set = Self::new();
        for (id, value) in entries {
            match value {
                ConfigValue::Mapping(map) => set.insert(id, ColorScheme::new(map)),
                _ => tracing::warn!(scheme = %id, "color scheme is not a mapping, skipping"),
            }
        }
        set
    }

    pub fn get(&self, id: &str) -> Option<&ColorScheme> {
        self.schemes.get(id)
    }

    /// Returns the stored id alongside the scheme.
    pub fn get_key_value(&self, id: &str) -> Option<(&str, &ColorScheme)> {
        self.schemes
            .get_key_value(id)
            .map(|(id, scheme)| (id.as_str(), scheme))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.schemes.contains_key(id)
    }

    /// Iterates over `(id, scheme)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColorScheme)> {
        self.order
            .iter()
            .filter_map(|id| self.schemes.get(id).map(|scheme| (id.as_str(), scheme)))
    }

    /// Lists `(id, display name)` pairs in insertion order.
    ///
    /// Schemes without a `name` are listed under their id.
    pub fn list(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(id, scheme)| {
                let name = scheme.name().unwrap_or_else(|| id.to_string());
                (id.to_string(), name)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}
