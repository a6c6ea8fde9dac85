//! The theme context: one loaded document, its active scheme and its cache.
//!
//! A [`Theme`] is built from a [`ThemeDocument`] and the host's collaborators,
//! then activated. Activation selects a color scheme and fills the color
//! cache. Afterwards every read is a cache or parameter lookup.
//!
//! # Example
//!
//! ```rust
//! use keyskin::{Theme, ThemeDocument};
//!
//! let document = ThemeDocument::from_yaml(r##"
//! fallback_colors:
//!   key_text_color: text_color
//! preset_color_schemes:
//!   default:
//!     name: Paper
//!     text_color: "#202020"
//! "##).unwrap();
//!
//! let theme = Theme::builder(document).activate().unwrap();
//! assert_eq!(theme.current_scheme_id(), "default");
//! assert_eq!(theme.get_color("key_text_color"), theme.get_color("text_color"));
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::background::{self, Background, BackgroundRequest};
use crate::cache::{ColorCache, ResolvedValue};
use crate::collab::{MemoryPreferences, PreferenceStore, SchemaProvider, StaticSchema};
use crate::color::{try_parse_color, Argb};
use crate::document::ThemeDocument;
use crate::error::Result;
use crate::image::{is_image_reference, ImageLocator};
use crate::keyboard::{KeyboardLayoutResolver, PresetKeyboards};
use crate::padding::{self, KeyboardPadding};
use crate::params::{LiquidParams, StyleParams};
use crate::scheme::{detect_color_mode, ColorMode, SchemeSelector};
use crate::value::ConfigValue;

/// Builder for [`Theme`].
pub struct ThemeBuilder {
    document: ThemeDocument,
    user_data_dir: PathBuf,
    preferences: Option<Arc<dyn PreferenceStore>>,
    schema: Option<Arc<dyn SchemaProvider>>,
}

impl ThemeBuilder {
    /// Directory holding `backgrounds/`.
    pub fn user_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.user_data_dir = dir.into();
        self
    }

    pub fn preferences(mut self, preferences: Arc<dyn PreferenceStore>) -> Self {
        self.preferences = Some(preferences);
        self
    }

    pub fn schema_provider(mut self, schema: Arc<dyn SchemaProvider>) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Selects the initial scheme and fills the cache.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::MissingDefaultScheme`](crate::ThemeError::MissingDefaultScheme)
    /// if neither the preferred, the styled nor the `default` scheme exists.
    pub fn activate(self) -> Result<Theme> {
        let background_folder =
            StyleParams::new(&self.document.style).get_string("background_folder");
        let theme = Theme {
            locator: ImageLocator::new(&self.user_data_dir, &background_folder),
            preferences: self
                .preferences
                .unwrap_or_else(|| Arc::new(MemoryPreferences::new())),
            schema: self
                .schema
                .unwrap_or_else(|| Arc::new(StaticSchema::default())),
            document: self.document,
            cache: ColorCache::new(),
            active: RwLock::new(ActiveScheme::default()),
            has_dark_light: AtomicBool::new(false),
        };

        let preferred = theme.preferences.selected_color_scheme();
        let id = theme.select_and_rebuild(preferred.as_deref(), None)?;
        tracing::info!(
            theme = theme.document.name.as_deref().unwrap_or("<inline>"),
            scheme = %id,
            "theme activated"
        );
        Ok(theme)
    }
}

#[derive(Debug, Clone, Default)]
struct ActiveScheme {
    /// Scheme chosen before any light/dark substitution.
    base: String,
    /// Scheme the cache was built from.
    current: String,
    mode: Option<ColorMode>,
}

/// An activated theme.
pub struct Theme {
    document: ThemeDocument,
    preferences: Arc<dyn PreferenceStore>,
    schema: Arc<dyn SchemaProvider>,
    locator: ImageLocator,
    cache: ColorCache,
    active: RwLock<ActiveScheme>,
    has_dark_light: AtomicBool,
}

impl Theme {
    pub fn builder(document: ThemeDocument) -> ThemeBuilder {
        ThemeBuilder {
            document,
            user_data_dir: PathBuf::new(),
            preferences: None,
            schema: None,
        }
    }

    pub fn document(&self) -> &ThemeDocument {
        &self.document
    }

    // --- cached values ---

    pub fn get(&self, key: &str) -> Option<ResolvedValue> {
        self.cache.get(key)
    }

    pub fn get_color(&self, key: &str) -> Option<Argb> {
        self.cache.color(key)
    }

    pub fn get_image_path(&self, key: &str) -> Option<PathBuf> {
        self.cache.image_path(key)
    }

    pub fn has_value(&self, key: &str) -> bool {
        self.cache.contains(key)
    }

    /// Every cached value, as of now.
    pub fn resolved_values(&self) -> Arc<HashMap<String, ResolvedValue>> {
        self.cache.snapshot()
    }

    // --- parameters ---

    pub fn style(&self) -> StyleParams<'_> {
        StyleParams::new(&self.document.style)
    }

    pub fn liquid(&self) -> LiquidParams<'_> {
        LiquidParams::new(&self.document.liquid_keyboard, self.style())
    }

    pub fn keyboards(&self) -> PresetKeyboards<'_> {
        PresetKeyboards::new(&self.document.preset_keyboards)
    }

    /// Resolves a requested layout id, `.default` included, to a preset id.
    pub fn resolve_layout_id(&self, requested: &str) -> Result<String> {
        KeyboardLayoutResolver::new(self.keyboards(), self.schema.as_ref()).resolve(requested)
    }

    // --- schemes ---

    /// `(id, display name)` pairs in document order.
    pub fn list_schemes(&self) -> Vec<(String, String)> {
        self.document.color_schemes.list()
    }

    pub fn current_scheme_id(&self) -> String {
        self.active().current.clone()
    }

    /// The display mode last applied, if any.
    pub fn color_mode(&self) -> Option<ColorMode> {
        self.active().mode
    }

    /// Whether any scheme selected so far declared light/dark variants.
    pub fn has_dark_light(&self) -> bool {
        self.has_dark_light.load(Ordering::Relaxed)
    }

    /// Makes `id` the active scheme, keeping the current display mode.
    ///
    /// Returns the id the cache was built from.
    pub fn switch_scheme(&self, id: &str) -> Result<String> {
        let mode = self.color_mode();
        self.select_and_rebuild(Some(id), mode)
    }

    /// Applies a display mode. `None` returns to the plain scheme.
    pub fn apply_color_mode(&self, mode: Option<ColorMode>) -> Result<String> {
        let base = self.active().base.clone();
        self.select_and_rebuild(Some(&base), mode)
    }

    /// Applies the display mode reported by the OS.
    pub fn follow_system_mode(&self) -> Result<String> {
        self.apply_color_mode(Some(detect_color_mode()))
    }

    fn select_and_rebuild(
        &self,
        preferred: Option<&str>,
        mode: Option<ColorMode>,
    ) -> Result<String> {
        let style_scheme = self.style().get_string("color_scheme");
        let selector = SchemeSelector::new(&self.document.color_schemes);
        let base = selector.base_id(preferred, &style_scheme)?.to_string();
        let selection = selector.select(Some(&base), &style_scheme, mode)?;
        if selection.has_variants {
            self.has_dark_light.store(true, Ordering::Relaxed);
        }

        let current = self.cache.rebuild(
            &self.document.color_schemes,
            &self.document.fallback_colors,
            &selection.id,
            &self.locator,
            self.preferences.as_ref(),
        )?;

        let mut active = self.active.write().unwrap_or_else(|p| p.into_inner());
        *active = ActiveScheme {
            base,
            current: current.clone(),
            mode,
        };
        Ok(current)
    }

    fn active(&self) -> std::sync::RwLockReadGuard<'_, ActiveScheme> {
        self.active.read().unwrap_or_else(|p| p.into_inner())
    }

    // --- layout helpers ---

    /// Keyboard padding for the preference store's one-hand mode.
    pub fn keyboard_padding(&self, landscape: bool) -> KeyboardPadding {
        padding::keyboard_padding(&self.style(), self.preferences.one_hand_mode(), landscape)
    }

    pub fn background(&self, request: &BackgroundRequest) -> Option<Background> {
        background::describe(request, &self.cache, &self.style())
    }

    /// Resolves an inline literal from a key definition.
    ///
    /// Tried in order: a color literal, a cached key of that name, an image
    /// file under the backgrounds directory.
    pub fn resolve_reference(&self, value: &ConfigValue) -> Option<ResolvedValue> {
        if let Ok(color) = try_parse_color(value) {
            return Some(ResolvedValue::Color(color));
        }
        let name = value.as_str()?;
        if let Some(cached) = self.cache.get(name) {
            return Some(cached);
        }
        if is_image_reference(name) {
            return self.locator.locate(name).map(ResolvedValue::ImagePath);
        }
        None
    }

    /// Drops every cached value. Parameter reads keep working.
    pub fn deactivate(&self) {
        self.cache.clear();
        tracing::debug!("theme deactivated");
    }
}
