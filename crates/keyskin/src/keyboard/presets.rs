//! Read access to the `preset_keyboards` section.

use crate::value::{ConfigMap, ConfigValue};

/// Id of the preset every theme is expected to define.
pub const DEFAULT_KEYBOARD_ID: &str = "default";

/// Layout id to layout definition.
#[derive(Debug, Clone, Copy)]
pub struct PresetKeyboards<'a> {
    map: &'a ConfigMap,
}

impl<'a> PresetKeyboards<'a> {
    pub fn new(map: &'a ConfigMap) -> Self {
        Self { map }
    }

    /// Returns the raw definition of layout `id`.
    pub fn get(&self, id: &str) -> Option<&'a ConfigValue> {
        self.map.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.map.contains_key(id)
    }

    /// The `import_preset` of layout `id`, when it is a string.
    pub fn import_preset(&self, id: &str) -> Option<&'a str> {
        self.map
            .get(id)?
            .as_mapping()?
            .get("import_preset")?
            .as_str()
    }

    /// Layout ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &'a str> {
        self.map.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presets() -> ConfigMap {
        let mut default = ConfigMap::new();
        default.insert("import_preset".into(), ConfigValue::from("qwerty"));
        let mut numeric = ConfigMap::new();
        numeric.insert("import_preset".into(), ConfigValue::Integer(9));

        let mut map = ConfigMap::new();
        map.insert("default".into(), ConfigValue::Mapping(default));
        map.insert("qwerty".into(), ConfigValue::Mapping(ConfigMap::new()));
        map.insert("odd".into(), ConfigValue::Mapping(numeric));
        map
    }

    #[test]
    fn test_lookup() {
        let map = presets();
        let keyboards = PresetKeyboards::new(&map);
        assert!(keyboards.contains("qwerty"));
        assert!(!keyboards.contains("dvorak"));
        assert!(keyboards.get("default").is_some());
        assert_eq!(keyboards.len(), 3);
        assert_eq!(keyboards.ids().collect::<Vec<_>>(), vec!["default", "odd", "qwerty"]);
    }

    #[test]
    fn test_import_preset() {
        let map = presets();
        let keyboards = PresetKeyboards::new(&map);
        assert_eq!(keyboards.import_preset("default"), Some("qwerty"));
        assert_eq!(keyboards.import_preset("qwerty"), None);
        assert_eq!(keyboards.import_preset("odd"), None);
        assert_eq!(keyboards.import_preset("missing"), None);
    }
}
