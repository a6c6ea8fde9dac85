//! Color schemes, their light/dark variants, and active scheme selection.
//!
//! A theme carries any number of named color schemes under
//! `preset_color_schemes`. One of them is active at a time:
//!
//! 1. The scheme the user last selected, if it still exists
//! 2. Otherwise the theme's own `style/color_scheme`, if it exists
//! 3. Otherwise `default`, which every theme must define
//!
//! A scheme may point at other schemes for dark and light display modes:
//!
//! ```yaml
//! preset_color_schemes:
//!   default:
//!     name: Paper
//!     back_color: 0xFFFFFFFF
//!     dark_scheme: ink
//!   ink:
//!     name: Ink
//!     back_color: 0xFF000000
//! ```
//!
//! When a mode is applied, the variant replaces the base scheme if it exists.
//! A variant that names a missing scheme is ignored with a warning.

mod adaptive;
mod selector;
mod set;

pub use adaptive::{detect_color_mode, reset_theme_detector, set_theme_detector, ColorMode};
pub use selector::{SchemeSelection, SchemeSelector};
pub use set::{ColorScheme, ColorSchemeSet, DEFAULT_SCHEME_ID, METADATA_KEYS};
