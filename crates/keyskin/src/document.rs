//! Theme documents and the loader that finds them on disk.
//!
//! A theme document is a YAML file with up to five top-level sections:
//!
//! ```yaml
//! style:
//!   color_scheme: aqua
//!   keyboard_padding: 4
//! fallback_colors:
//!   key_text_color: text_color
//! preset_color_schemes:
//!   default: { name: Paper, text_color: 0xFF000000 }
//!   aqua: { name: Aqua, text_color: "#003355" }
//! preset_keyboards:
//!   default: { import_preset: qwerty }
//!   qwerty: { keys: [] }
//! liquid_keyboard:
//!   single_width: 60
//! ```
//!
//! Missing sections are empty. Color schemes keep the order they are written
//! in, which is the order they are listed to the user.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use std::fmt;

use serde::de::{DeserializeSeed, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde_yaml::{Mapping, Value};

use crate::error::{Result, ThemeError};
use crate::fallback::FallbackChain;
use crate::scheme::ColorSchemeSet;
use crate::value::{yaml_key, ConfigMap, ConfigValue};

/// Theme loaded when the requested one cannot be.
pub const DEFAULT_THEME_NAME: &str = "default";

/// Top-level section holding the color schemes.
const SCHEMES_SECTION: &str = "preset_color_schemes";

/// Recognized theme file extensions, in priority order.
pub const THEME_EXTENSIONS: &[&str] = &[".yaml", ".yml"];

/// The parsed contents of one theme file.
#[derive(Debug, Clone, Default)]
pub struct ThemeDocument {
    /// File stem, when loaded from disk.
    pub name: Option<String>,
    pub source_path: Option<PathBuf>,
    pub style: ConfigMap,
    pub fallback_colors: FallbackChain,
    pub color_schemes: ColorSchemeSet,
    pub preset_keyboards: ConfigMap,
    pub liquid_keyboard: ConfigMap,
}

impl ThemeDocument {
    /// Parses a theme document from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let root: Value =
            serde_yaml::from_str(yaml).map_err(|e| ThemeError::parse(e.to_string()))?;
        let root = match root {
            Value::Mapping(map) => map,
            Value::Null => Mapping::new(),
            _ => return Err(ThemeError::parse("top level must be a mapping")),
        };

        let style = section(&root, "style")?.map(config_map).unwrap_or_default();
        let fallback_colors = section(&root, "fallback_colors")?
            .map(|m| FallbackChain::from_config(&config_map(m)))
            .unwrap_or_default();
        let color_schemes = match section(&root, SCHEMES_SECTION)? {
            Some(parsed) => scheme_set(yaml, parsed)?,
            None => ColorSchemeSet::default(),
        };
        let preset_keyboards = section(&root, "preset_keyboards")?
            .map(config_map)
            .unwrap_or_default();
        let liquid_keyboard = section(&root, "liquid_keyboard")?
            .map(config_map)
            .unwrap_or_default();

        Ok(Self {
            name: None,
            source_path: None,
            style,
            fallback_colors,
            color_schemes,
            preset_keyboards,
            liquid_keyboard,
        })
    }

    /// Reads and parses a theme file. The name is taken from the file stem.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ThemeError::Load {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;

        let mut document = Self::from_yaml(&content).map_err(|e| e.with_path(path))?;
        document.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string());
        document.source_path = Some(path.to_path_buf());
        Ok(document)
    }
}

fn section<'a>(root: &'a Mapping, name: &str) -> Result<Option<&'a Mapping>> {
    match root.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Mapping(map)) => Ok(Some(map)),
        Some(_) => Err(ThemeError::parse(format!(
            "section '{}' must be a mapping",
            name
        ))),
    }
}

fn config_map(mapping: &Mapping) -> ConfigMap {
    match ConfigValue::from(Value::Mapping(mapping.clone())) {
        ConfigValue::Mapping(map) => map,
        _ => ConfigMap::new(),
    }
}

/// Builds the scheme set in document order.
///
/// YAML resolves plain scalars such as `0xeeeeee` to integers, which would
/// then be read as raw ARGB with a zero alpha. Scheme values are color
/// literals, so the section is read a second time and numbers that were not
/// written in decimal keep their source text.
fn scheme_set(yaml: &str, parsed: &Mapping) -> Result<ColorSchemeSet> {
    let entries = RootSeed { schemes: parsed }
        .deserialize(serde_yaml::Deserializer::from_str(yaml))
        .map_err(|e| ThemeError::parse(e.to_string()))?;
    Ok(ColorSchemeSet::from_entries(entries))
}

/// Skips to the scheme section of the document.
struct RootSeed<'a> {
    schemes: &'a Mapping,
}

impl<'de> DeserializeSeed<'de> for RootSeed<'_> {
    type Value = Vec<(String, ConfigValue)>;

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for RootSeed<'_> {
    type Value = Vec<(String, ConfigValue)>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a theme document")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::new();
        while let Some(key) = map.next_key::<Value>()? {
            if key.as_str() == Some(SCHEMES_SECTION) {
                entries = map.next_value_seed(SchemesSeed {
                    parsed: self.schemes,
                })?;
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(entries)
    }
}

/// Reads `id: scheme` pairs in the order they are written.
struct SchemesSeed<'a> {
    parsed: &'a Mapping,
}

impl<'de> DeserializeSeed<'de> for SchemesSeed<'_> {
    type Value = Vec<(String, ConfigValue)>;

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for SchemesSeed<'_> {
    type Value = Vec<(String, ConfigValue)>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping of color schemes")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut schemes = Vec::new();
        while let Some(key) = map.next_key::<Value>()? {
            let parsed = self.parsed.get(&key);
            let Some(id) = yaml_key(key) else {
                map.next_value::<IgnoredAny>()?;
                continue;
            };
            let value = match parsed {
                Some(Value::Mapping(entries)) => {
                    ConfigValue::Mapping(map.next_value_seed(LiteralsSeed { parsed: entries })?)
                }
                other => {
                    map.next_value::<IgnoredAny>()?;
                    other.cloned().map(ConfigValue::from).unwrap_or(ConfigValue::Null)
                }
            };
            schemes.push((id, value));
        }
        Ok(schemes)
    }
}

/// Reads one scheme's entries, recovering the text of non-decimal numbers.
struct LiteralsSeed<'a> {
    parsed: &'a Mapping,
}

impl<'de> DeserializeSeed<'de> for LiteralsSeed<'_> {
    type Value = ConfigMap;

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for LiteralsSeed<'_> {
    type Value = ConfigMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a color scheme")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = ConfigMap::new();
        while let Some(key) = map.next_key::<Value>()? {
            let parsed = self.parsed.get(&key).cloned();
            let Some(name) = yaml_key(key) else {
                map.next_value::<IgnoredAny>()?;
                continue;
            };
            let value = match parsed {
                Some(Value::Number(number)) => {
                    let text: String = map.next_value()?;
                    number_literal(text, number)
                }
                Some(other) => {
                    map.next_value::<IgnoredAny>()?;
                    ConfigValue::from(other)
                }
                None => {
                    map.next_value::<IgnoredAny>()?;
                    continue;
                }
            };
            entries.insert(name, value);
        }
        Ok(entries)
    }
}

/// Decimal integers stay integers. Anything else YAML read as a number,
/// such as `0xeeeeee`, is kept as written.
fn number_literal(text: String, number: serde_yaml::Number) -> ConfigValue {
    if text.parse::<i64>().is_ok() || text.parse::<u64>().is_ok() {
        ConfigValue::from(Value::Number(number))
    } else {
        ConfigValue::String(text)
    }
}

/// Finds theme files by name across a list of directories.
///
/// Directories are searched in the order they were added, and within each
/// directory extensions are tried in [`THEME_EXTENSIONS`] order.
#[derive(Debug, Clone, Default)]
pub struct ThemeLoader {
    dirs: Vec<PathBuf>,
}

impl ThemeLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory to search.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Load`] if `path` is not a directory.
    pub fn add_dir<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(ThemeError::Load {
                message: format!("theme directory not found: {}", path.display()),
            });
        }
        self.dirs.push(path.to_path_buf());
        Ok(())
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Returns the file that `name` refers to, if any.
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        self.dirs.iter().find_map(|dir| {
            THEME_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!("{}{}", name, ext)))
                .find(|path| path.is_file())
        })
    }

    /// Loads the theme called `name`.
    pub fn load(&self, name: &str) -> Result<ThemeDocument> {
        let path = self.find(name).ok_or_else(|| ThemeError::NotFound {
            name: name.to_string(),
        })?;
        tracing::debug!(theme = name, path = %path.display(), "loading theme");
        ThemeDocument::from_file(path)
    }

    /// Loads `name`, retrying once with [`DEFAULT_THEME_NAME`] on failure.
    pub fn load_or_default(&self, name: &str) -> Result<ThemeDocument> {
        match self.load(name) {
            Ok(document) => Ok(document),
            Err(err) if name != DEFAULT_THEME_NAME => {
                tracing::error!(theme = name, error = %err, "failed to load theme, using default");
                self.load(DEFAULT_THEME_NAME)
            }
            Err(err) => Err(err),
        }
    }

    /// Names of every theme file in the registered directories, sorted.
    pub fn list_themes(&self) -> Result<Vec<String>> {
        let mut names = BTreeSet::new();
        for dir in &self.dirs {
            for entry in std::fs::read_dir(dir)? {
                let path = entry?.path();
                if !path.is_file() {
                    continue;
                }
                let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                if let Some(stem) = THEME_EXTENSIONS
                    .iter()
                    .find_map(|ext| file_name.strip_suffix(ext))
                {
                    names.insert(stem.to_string());
                }
            }
        }
        Ok(names.into_iter().collect())
    }
}
