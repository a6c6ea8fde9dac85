//! Interfaces to the collaborators a theme reads from and writes to.
//!
//! The engine does not persist preferences or know about input schemas
//! itself. The host supplies both through these traits. In-memory
//! implementations are provided for hosts that have nothing better, and for
//! tests.

use std::sync::Mutex;

use crate::padding::OneHandMode;
use crate::value::{ConfigMap, ConfigValue};

/// Persistent user preferences the theme consults.
pub trait PreferenceStore: Send + Sync {
    /// Id of the color scheme the user last selected.
    fn selected_color_scheme(&self) -> Option<String>;

    /// Records the color scheme that is now active.
    fn set_selected_color_scheme(&self, id: &str);

    /// Current one-hand keyboard mode.
    fn one_hand_mode(&self) -> OneHandMode;
}

/// Access to the active input schema and its configuration.
pub trait SchemaProvider: Send + Sync {
    /// Id of the input schema currently in use, e.g. `luna_pinyin`.
    fn current_schema_id(&self) -> String;

    /// Reads a value from a schema's configuration by slash- or
    /// dot-separated path, e.g. `speller/alphabet`.
    fn schema_value(&self, schema_id: &str, path: &str) -> Option<ConfigValue>;
}

/// Preferences held in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    inner: Mutex<PreferenceState>,
}

#[derive(Debug, Default, Clone)]
struct PreferenceState {
    color_scheme: Option<String>,
    one_hand_mode: OneHandMode,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a selected color scheme.
    pub fn with_color_scheme(self, id: impl Into<String>) -> Self {
        self.state().color_scheme = Some(id.into());
        self
    }

    /// Starts with a one-hand mode.
    pub fn with_one_hand_mode(self, mode: OneHandMode) -> Self {
        self.state().one_hand_mode = mode;
        self
    }

    pub fn set_one_hand_mode(&self, mode: OneHandMode) {
        self.state().one_hand_mode = mode;
    }

    fn state(&self) -> std::sync::MutexGuard<'_, PreferenceState> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PreferenceStore for MemoryPreferences {
    fn selected_color_scheme(&self) -> Option<String> {
        self.state().color_scheme.clone()
    }

    fn set_selected_color_scheme(&self, id: &str) {
        self.state().color_scheme = Some(id.to_string());
    }

    fn one_hand_mode(&self) -> OneHandMode {
        self.state().one_hand_mode
    }
}

/// A single, fixed input schema.
#[derive(Debug, Clone, Default)]
pub struct StaticSchema {
    id: String,
    config: ConfigMap,
}

impl StaticSchema {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            config: ConfigMap::new(),
        }
    }

    /// Sets the schema's full configuration tree.
    pub fn with_config(mut self, config: ConfigMap) -> Self {
        self.config = config;
        self
    }

    /// Sets `speller/alphabet`, the only value layout resolution reads.
    pub fn with_alphabet(mut self, alphabet: impl Into<String>) -> Self {
        let speller = self
            .config
            .entry("speller".to_string())
            .or_insert_with(|| ConfigValue::Mapping(ConfigMap::new()));
        if !matches!(speller, ConfigValue::Mapping(_)) {
            *speller = ConfigValue::Mapping(ConfigMap::new());
        }
        if let ConfigValue::Mapping(map) = speller {
            map.insert("alphabet".to_string(), ConfigValue::String(alphabet.into()));
        }
        self
    }
}

impl SchemaProvider for StaticSchema {
    fn current_schema_id(&self) -> String {
        self.id.clone()
    }

    fn schema_value(&self, schema_id: &str, path: &str) -> Option<ConfigValue> {
        if schema_id != self.id {
            return None;
        }
        let path = path.trim_start_matches(['/', '.']);
        let (first, rest) = path.split_once(['/', '.']).unwrap_or((path, ""));
        self.config.get(first)?.lookup(rest).cloned()
    }
}
