//! Keyboard layout presets and layout id resolution.
//!
//! Themes define their layouts under `preset_keyboards`. Input schemas ask
//! for a layout by id, or for `.default` to let the theme pick one that fits
//! the schema:
//!
//! ```yaml
//! preset_keyboards:
//!   default:
//!     import_preset: qwerty
//!   qwerty:
//!     keys: [...]
//!   luna:
//!     import_preset: qwerty
//! ```
//!
//! Resolution always ends on an id the theme defines, or fails with
//! [`ThemeError::MissingDefaultKeyboard`](crate::ThemeError::MissingDefaultKeyboard).

mod presets;
mod resolve;

pub use presets::{PresetKeyboards, DEFAULT_KEYBOARD_ID};
pub use resolve::{KeyboardLayoutResolver, DEFAULT_LAYOUT_SENTINEL};
