//! Color mode detection for light/dark scheme variants.
//!
//! A color scheme may name a `dark_scheme` and a `light_scheme` to use in
//! place of itself. Which one applies depends on the display mode, normally
//! queried from the OS. Use [`set_theme_detector`] to override detection for
//! testing.
//!
//! ```rust
//! use keyskin::{detect_color_mode, set_theme_detector, ColorMode};
//!
//! set_theme_detector(|| ColorMode::Dark);
//! assert_eq!(detect_color_mode(), ColorMode::Dark);
//! ```

use std::str::FromStr;
use std::sync::Mutex;

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;
use serde::Serialize;

/// The display mode a scheme variant is chosen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Light mode (light background, dark text).
    Light,
    /// Dark mode (dark background, light text).
    Dark,
}

impl ColorMode {
    /// The scheme key naming the variant for this mode.
    pub fn variant_key(self) -> &'static str {
        match self {
            ColorMode::Light => "light_scheme",
            ColorMode::Dark => "dark_scheme",
        }
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ColorMode::Light),
            "dark" => Ok(ColorMode::Dark),
            other => Err(format!("unknown color mode '{}'", other)),
        }
    }
}

type ThemeDetector = fn() -> ColorMode;

static THEME_DETECTOR: Lazy<Mutex<ThemeDetector>> = Lazy::new(|| Mutex::new(os_theme_detector));

/// Overrides the detector used to determine whether the user prefers a light
/// or dark display.
pub fn set_theme_detector(detector: ThemeDetector) {
    let mut guard = THEME_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = detector;
}

/// Restores OS-backed detection after [`set_theme_detector`].
pub fn reset_theme_detector() {
    set_theme_detector(os_theme_detector);
}

/// Detects the preferred color mode.
///
/// Uses the `dark-light` crate unless a detector has been installed with
/// [`set_theme_detector`]. Undetectable or unspecified modes count as light.
pub fn detect_color_mode() -> ColorMode {
    let detector = THEME_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    (*detector)()
}

fn os_theme_detector() -> ColorMode {
    match detect_os_theme() {
        Ok(OsThemeMode::Dark) => ColorMode::Dark,
        Ok(_) => ColorMode::Light,
        Err(err) => {
            tracing::debug!("color mode detection failed: {}", err);
            ColorMode::Light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_detect_color_mode_uses_override() {
        set_theme_detector(|| ColorMode::Dark);
        assert_eq!(detect_color_mode(), ColorMode::Dark);

        set_theme_detector(|| ColorMode::Light);
        assert_eq!(detect_color_mode(), ColorMode::Light);

        reset_theme_detector();
    }

    #[test]
    fn test_variant_keys() {
        assert_eq!(ColorMode::Dark.variant_key(), "dark_scheme");
        assert_eq!(ColorMode::Light.variant_key(), "light_scheme");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Dark".parse::<ColorMode>(), Ok(ColorMode::Dark));
        assert_eq!(" light ".parse::<ColorMode>(), Ok(ColorMode::Light));
        assert!("dim".parse::<ColorMode>().is_err());
    }
}
