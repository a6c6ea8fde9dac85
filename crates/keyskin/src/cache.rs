//! The resolved-value cache.
//!
//! Rebuilding turns one color scheme plus the theme's fallback chain into a
//! flat map of render-ready values. The new map is built off to the side and
//! swapped in whole, so concurrent readers see either the previous contents
//! or the new ones, never a mix.
//!
//! | Literal | Cached as |
//! |---------|-----------|
//! | integer | [`ResolvedValue::Color`] |
//! | string containing `.`, `/` or `\` | [`ResolvedValue::ImagePath`], if the file exists |
//! | any other string | [`ResolvedValue::Color`], if it parses |
//!
//! Everything else is skipped.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard};
use std::time::Instant;

use serde::Serialize;

use crate::collab::PreferenceStore;
use crate::color::{try_parse_color, Argb};
use crate::error::{Result, ThemeError};
use crate::fallback::{self, FallbackChain};
use crate::image::{is_image_reference, ImageLocator};
use crate::scheme::{ColorScheme, ColorSchemeSet, DEFAULT_SCHEME_ID};
use crate::value::ConfigValue;

/// Scheme keys that name other schemes rather than colors.
const VARIANT_KEYS: &[&str] = &["dark_scheme", "light_scheme"];

/// A render-ready value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum ResolvedValue {
    Color(Argb),
    ImagePath(PathBuf),
}

impl ResolvedValue {
    pub fn as_color(&self) -> Option<Argb> {
        match self {
            ResolvedValue::Color(color) => Some(*color),
            ResolvedValue::ImagePath(_) => None,
        }
    }

    pub fn as_image_path(&self) -> Option<&Path> {
        match self {
            ResolvedValue::ImagePath(path) => Some(path),
            ResolvedValue::Color(_) => None,
        }
    }
}

type Entries = HashMap<String, ResolvedValue>;

/// Key to resolved value map, replaced atomically on rebuild.
#[derive(Debug, Default)]
pub struct ColorCache {
    entries: RwLock<Arc<Entries>>,
}

impl ColorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the cache from the scheme `scheme_id`.
    ///
    /// An unknown id falls back to `default`. The id actually used is
    /// persisted through `preferences` and returned.
    pub fn rebuild(
        &self,
        schemes: &ColorSchemeSet,
        chain: &FallbackChain,
        scheme_id: &str,
        locator: &ImageLocator,
        preferences: &dyn PreferenceStore,
    ) -> Result<String> {
        let started = Instant::now();

        let (id, scheme) = match schemes.get_key_value(scheme_id) {
            Some(found) => found,
            None => {
                tracing::warn!(scheme = scheme_id, "unknown color scheme, using default");
                schemes
                    .get_key_value(DEFAULT_SCHEME_ID)
                    .ok_or(ThemeError::MissingDefaultScheme)?
            }
        };

        preferences.set_selected_color_scheme(id);

        let entries = build_entries(scheme, chain, locator);
        let count = entries.len();
        *self.write() = Arc::new(entries);

        tracing::info!(scheme = id, entries = count, "color cache rebuilt");
        tracing::debug!(elapsed_us = started.elapsed().as_micros() as u64, "cache rebuild timing");
        Ok(id.to_string())
    }

    /// Returns the resolved value for `key`.
    pub fn get(&self, key: &str) -> Option<ResolvedValue> {
        self.read().get(key).cloned()
    }

    /// Returns `key` as a color, or `None` if it is missing or an image.
    pub fn color(&self, key: &str) -> Option<Argb> {
        self.read().get(key).and_then(ResolvedValue::as_color)
    }

    /// Returns `key` as an image path, or `None` if it is missing or a color.
    pub fn image_path(&self, key: &str) -> Option<PathBuf> {
        self.read()
            .get(key)
            .and_then(ResolvedValue::as_image_path)
            .map(Path::to_path_buf)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        *self.write() = Arc::new(Entries::new());
    }

    /// Shares the current contents. Later rebuilds do not affect the snapshot.
    pub fn snapshot(&self) -> Arc<HashMap<String, ResolvedValue>> {
        Arc::clone(&self.read())
    }

    fn read(&self) -> RwLockReadGuard<'_, Arc<Entries>> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Arc<Entries>> {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn build_entries(scheme: &ColorScheme, chain: &FallbackChain, locator: &ImageLocator) -> Entries {
    let mut entries = Entries::new();

    for (key, value) in scheme.colors() {
        if VARIANT_KEYS.contains(&key) {
            continue;
        }
        if let Some(resolved) = classify(key, value, locator) {
            entries.insert(key.to_string(), resolved);
        }
    }

    for key in chain.keys() {
        if entries.contains_key(key) {
            continue;
        }
        if let Some(value) = fallback::resolve(scheme, chain, key) {
            if let Some(resolved) = classify(key, value, locator) {
                entries.insert(key.to_string(), resolved);
            }
        }
    }

    entries
}

/// Turns one scheme literal into a cached value.
pub(crate) fn classify(
    key: &str,
    value: &ConfigValue,
    locator: &ImageLocator,
) -> Option<ResolvedValue> {
    match value {
        ConfigValue::String(s) if is_image_reference(s) => {
            let found = locator.locate(s);
            if found.is_none() {
                tracing::debug!(key, value = %s, "image for key not found");
            }
            found.map(ResolvedValue::ImagePath)
        }
        ConfigValue::Integer(_) | ConfigValue::String(_) => match try_parse_color(value) {
            Ok(color) => Some(ResolvedValue::Color(color)),
            Err(err) => {
                tracing::warn!(key, value = %value, "malformed color literal: {}", err);
                None
            }
        },
        other => {
            tracing::warn!(key, value = %other, "unsupported color value");
            None
        }
    }
}
