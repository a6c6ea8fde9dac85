//! Keyskin - theme resolution for on-screen keyboards.
//!
//! Keyskin turns a declarative theme document into render-ready values: it
//! parses color literals, follows fallback chains between color keys, picks
//! the active color scheme (including light/dark variants), caches the
//! result, and maps requested keyboard layouts to presets the theme defines.
//!
//! It draws nothing. Renderers read colors, image paths and parameters from
//! an activated [`Theme`].
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use keyskin::{Argb, ColorMode, MemoryPreferences, Theme, ThemeDocument};
//!
//! let document = ThemeDocument::from_yaml(r##"
//! style:
//!   color_scheme: paper
//! fallback_colors:
//!   key_text_color: text_color
//! preset_color_schemes:
//!   default:
//!     name: Default
//!     text_color: black
//!   paper:
//!     name: Paper
//!     text_color: 0xFF202020
//!     dark_scheme: ink
//!   ink:
//!     name: Ink
//!     text_color: "#e0e0e0"
//! "##).unwrap();
//!
//! let theme = Theme::builder(document)
//!     .preferences(Arc::new(MemoryPreferences::new()))
//!     .activate()
//!     .unwrap();
//!
//! assert_eq!(theme.current_scheme_id(), "paper");
//! assert_eq!(theme.get_color("key_text_color"), Some(Argb::from_u32(0xFF20_2020)));
//!
//! theme.apply_color_mode(Some(ColorMode::Dark)).unwrap();
//! assert_eq!(theme.current_scheme_id(), "ink");
//! ```
//!
//! # Resolution rules
//!
//! | Step | Module |
//! |------|--------|
//! | Color literals (`#RGB`, `0xAARRGGBB`, names, integers) | [`color`] |
//! | Missing keys via `fallback_colors` | [`fallback`] |
//! | Active scheme: user choice, then `style/color_scheme`, then `default` | [`scheme`] |
//! | Flattened key to color or image map | [`cache`] |
//! | `.default` and unknown layout ids | [`keyboard`] |
//!
//! Malformed literals and missing keys never fail: they are logged through
//! `tracing` and resolve to `None`. Only structural problems, such as a theme
//! without a `default` scheme, surface as [`ThemeError`].

pub mod background;
pub mod cache;
pub mod collab;
pub mod color;
pub mod document;
mod error;
pub mod fallback;
pub mod image;
pub mod keyboard;
pub mod padding;
pub mod params;
pub mod scheme;
mod theme;
pub mod value;

// Re-export public API
pub use background::{Background, BackgroundRequest, Border};
pub use cache::{ColorCache, ResolvedValue};
pub use collab::{MemoryPreferences, PreferenceStore, SchemaProvider, StaticSchema};
pub use color::{parse_color, parse_color_str, Argb, ColorError};
pub use document::{ThemeDocument, ThemeLoader, DEFAULT_THEME_NAME};
pub use error::{Result, ThemeError};
pub use fallback::FallbackChain;
pub use image::ImageLocator;
pub use keyboard::{KeyboardLayoutResolver, PresetKeyboards};
pub use padding::{KeyboardPadding, OneHandMode};
pub use params::{LiquidParams, StyleParams};
pub use scheme::{
    detect_color_mode, reset_theme_detector, set_theme_detector, ColorMode, ColorScheme,
    ColorSchemeSet, SchemeSelection, SchemeSelector,
};
pub use theme::{Theme, ThemeBuilder};
pub use value::{ConfigMap, ConfigValue};
