//! Mapping requested layout ids to presets the theme defines.

use super::presets::{PresetKeyboards, DEFAULT_KEYBOARD_ID};
use crate::collab::SchemaProvider;
use crate::error::{Result, ThemeError};

/// Layout id that asks the theme to pick a layout for the current schema.
pub const DEFAULT_LAYOUT_SENTINEL: &str = ".default";

/// Schema setting holding the characters the schema types with.
const ALPHABET_PATH: &str = "speller/alphabet";

/// Resolves requested layout ids against a theme's presets.
pub struct KeyboardLayoutResolver<'a> {
    keyboards: PresetKeyboards<'a>,
    schema: &'a dyn SchemaProvider,
}

impl<'a> KeyboardLayoutResolver<'a> {
    pub fn new(keyboards: PresetKeyboards<'a>, schema: &'a dyn SchemaProvider) -> Self {
        Self { keyboards, schema }
    }

    /// Resolves `requested` to a layout id present in the presets.
    ///
    /// `.default` is expanded from the current schema first. An id the theme
    /// does not define is replaced by the `default` preset's `import_preset`.
    pub fn resolve(&self, requested: &str) -> Result<String> {
        let candidate = if requested == DEFAULT_LAYOUT_SENTINEL {
            self.layout_for_schema()
        } else {
            requested.to_string()
        };

        if self.keyboards.contains(&candidate) {
            return Ok(candidate);
        }

        tracing::warn!(layout = %candidate, "keyboard layout not found, using default");
        if !self.keyboards.contains(DEFAULT_KEYBOARD_ID) {
            return Err(ThemeError::MissingDefaultKeyboard);
        }
        Ok(self
            .keyboards
            .import_preset(DEFAULT_KEYBOARD_ID)
            .unwrap_or(DEFAULT_KEYBOARD_ID)
            .to_string())
    }

    fn layout_for_schema(&self) -> String {
        let schema_id = self.schema.current_schema_id();
        let short_id = schema_id.split('_').next().unwrap_or_default();
        if self.keyboards.contains(short_id) {
            return short_id.to_string();
        }

        let alphabet = self
            .schema
            .schema_value(&schema_id, ALPHABET_PATH)
            .and_then(|value| value.to_text())
            .unwrap_or_default();
        if self.keyboards.contains(&alphabet) {
            return alphabet;
        }

        guess_from_alphabet(&alphabet).to_string()
    }
}

/// Picks a generic layout by the characters a schema types with.
fn guess_from_alphabet(alphabet: &str) -> &'static str {
    if alphabet.contains([',', ';']) {
        "qwerty_"
    } else if alphabet.contains(['0', '1']) {
        "qwerty0"
    } else {
        "qwerty"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::StaticSchema;
    use crate::value::{ConfigMap, ConfigValue};

    fn presets(ids: &[&str], import: Option<&str>) -> ConfigMap {
        let mut map: ConfigMap = ids
            .iter()
            .map(|id| (id.to_string(), ConfigValue::Mapping(ConfigMap::new())))
            .collect();
        if let Some(import) = import {
            let mut default = ConfigMap::new();
            default.insert("import_preset".into(), ConfigValue::from(import));
            map.insert("default".into(), ConfigValue::Mapping(default));
        }
        map
    }

    fn resolve(map: &ConfigMap, schema: &StaticSchema, requested: &str) -> Result<String> {
        KeyboardLayoutResolver::new(PresetKeyboards::new(map), schema).resolve(requested)
    }

    // ============================================================================
    // Sentinel expansion
    // ============================================================================

    #[test]
    fn test_short_schema_id_wins() {
        let map = presets(&["luna", "qwerty"], Some("qwerty"));
        let schema = StaticSchema::new("luna_pinyin").with_alphabet("zyxwvutsrqponmlkjihgfedcba");
        assert_eq!(resolve(&map, &schema, ".default").unwrap(), "luna");
    }

    #[test]
    fn test_schema_without_underscore_uses_whole_id() {
        let map = presets(&["cangjie5", "qwerty"], Some("qwerty"));
        let schema = StaticSchema::new("cangjie5");
        assert_eq!(resolve(&map, &schema, ".default").unwrap(), "cangjie5");
    }

    #[test]
    fn test_alphabet_matching_preset() {
        let map = presets(&["abc", "qwerty"], Some("qwerty"));
        let schema = StaticSchema::new("wubi_86").with_alphabet("abc");
        assert_eq!(resolve(&map, &schema, ".default").unwrap(), "abc");
    }

    #[test]
    fn test_alphabet_with_punctuation_guesses_qwerty_underscore() {
        let map = presets(&["qwerty", "qwerty_", "qwerty0"], Some("qwerty"));
        let schema = StaticSchema::new("bopomofo").with_alphabet("abc,;");
        assert_eq!(resolve(&map, &schema, ".default").unwrap(), "qwerty_");
    }

    #[test]
    fn test_alphabet_with_digits_guesses_qwerty0() {
        let map = presets(&["qwerty", "qwerty_", "qwerty0"], Some("qwerty"));
        let schema = StaticSchema::new("bopomofo").with_alphabet("abc01");
        assert_eq!(resolve(&map, &schema, ".default").unwrap(), "qwerty0");
    }

    #[test]
    fn test_plain_alphabet_guesses_qwerty() {
        let map = presets(&["qwerty", "qwerty_", "qwerty0"], Some("qwerty"));
        let schema = StaticSchema::new("bopomofo").with_alphabet("abc");
        assert_eq!(resolve(&map, &schema, ".default").unwrap(), "qwerty");
    }

    #[test]
    fn test_guess_missing_from_presets_falls_back() {
        let map = presets(&["t9"], Some("t9"));
        let schema = StaticSchema::new("bopomofo").with_alphabet("abc,");
        assert_eq!(resolve(&map, &schema, ".default").unwrap(), "t9");
    }

    // ============================================================================
    // Validation
    // ============================================================================

    #[test]
    fn test_existing_id_returned_as_is() {
        let map = presets(&["qwerty", "dvorak"], Some("qwerty"));
        let schema = StaticSchema::new("x");
        assert_eq!(resolve(&map, &schema, "dvorak").unwrap(), "dvorak");
    }

    #[test]
    fn test_missing_id_uses_import_preset() {
        let map = presets(&["qwerty"], Some("qwerty"));
        let schema = StaticSchema::new("x");
        assert_eq!(resolve(&map, &schema, "colemak").unwrap(), "qwerty");
    }

    #[test]
    fn test_missing_id_without_import_preset_is_default() {
        let mut map = presets(&["qwerty"], None);
        map.insert("default".into(), ConfigValue::Mapping(ConfigMap::new()));
        let schema = StaticSchema::new("x");
        assert_eq!(resolve(&map, &schema, "colemak").unwrap(), "default");
    }

    #[test]
    fn test_missing_default_keyboard() {
        let map = presets(&["qwerty"], None);
        let schema = StaticSchema::new("x");
        assert!(matches!(
            resolve(&map, &schema, "colemak"),
            Err(ThemeError::MissingDefaultKeyboard)
        ));
    }

    #[test]
    fn test_guess_from_alphabet() {
        assert_eq!(guess_from_alphabet(""), "qwerty");
        assert_eq!(guess_from_alphabet(";"), "qwerty_");
        assert_eq!(guess_from_alphabet("1"), "qwerty0");
        assert_eq!(guess_from_alphabet("0,"), "qwerty_");
    }
}
