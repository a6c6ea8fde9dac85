//! Choosing the active color scheme.

use super::adaptive::ColorMode;
use super::set::{ColorScheme, ColorSchemeSet, DEFAULT_SCHEME_ID};
use crate::error::{Result, ThemeError};

/// Outcome of a scheme selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeSelection {
    /// Id of the scheme to cache.
    pub id: String,
    /// Whether the base scheme declares light/dark variants.
    pub has_variants: bool,
}

/// Picks the active scheme id from the user preference, the theme's
/// `color_scheme` style value and the display mode.
#[derive(Debug, Clone, Copy)]
pub struct SchemeSelector<'a> {
    schemes: &'a ColorSchemeSet,
}

impl<'a> SchemeSelector<'a> {
    pub fn new(schemes: &'a ColorSchemeSet) -> Self {
        Self { schemes }
    }

    /// Determines the base scheme id, before any mode substitution.
    ///
    /// Priority: `preferred` if it exists, then `style_scheme` if it exists,
    /// then `default`.
    pub fn base_id(&self, preferred: Option<&str>, style_scheme: &str) -> Result<&'a str> {
        if let Some((id, _)) = preferred.and_then(|id| self.lookup(id)) {
            return Ok(id);
        }
        if let Some((id, _)) = self.lookup(style_scheme) {
            return Ok(id);
        }
        self.lookup(DEFAULT_SCHEME_ID)
            .map(|(id, _)| id)
            .ok_or(ThemeError::MissingDefaultScheme)
    }

    /// Selects the scheme to activate.
    ///
    /// With a `mode`, the base scheme's `dark_scheme` or `light_scheme` is
    /// used instead when declared and present in the set.
    pub fn select(
        &self,
        preferred: Option<&str>,
        style_scheme: &str,
        mode: Option<ColorMode>,
    ) -> Result<SchemeSelection> {
        let base_id = self.base_id(preferred, style_scheme)?;
        let base = self.schemes.get(base_id).ok_or(ThemeError::MissingDefaultScheme)?;
        let has_variants = base.has_variants();

        let id = match mode.and_then(|mode| variant_of(base, mode)) {
            Some(variant) if self.schemes.contains(&variant) => variant,
            Some(variant) => {
                tracing::warn!(
                    scheme = %base_id,
                    variant = %variant,
                    "scheme variant not found, keeping base scheme"
                );
                base_id.to_string()
            }
            None => base_id.to_string(),
        };

        Ok(SchemeSelection { id, has_variants })
    }

    fn lookup(&self, id: &str) -> Option<(&'a str, &'a ColorScheme)> {
        self.schemes.get_key_value(id)
    }
}

fn variant_of(scheme: &ColorScheme, mode: ColorMode) -> Option<String> {
    match mode {
        ColorMode::Dark => scheme.dark_scheme(),
        ColorMode::Light => scheme.light_scheme(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ConfigValue;

    fn scheme(entries: &[(&str, &str)]) -> ColorScheme {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), ConfigValue::from(*v)))
            .collect()
    }

    fn schemes() -> ColorSchemeSet {
        ColorSchemeSet::new()
            .with("default", scheme(&[("back_color", "white")]))
            .with(
                "aqua",
                scheme(&[("dark_scheme", "aqua_night"), ("light_scheme", "aqua")]),
            )
            .with("aqua_night", scheme(&[("back_color", "black")]))
            .with("broken", scheme(&[("dark_scheme", "nowhere")]))
            .with("plain", scheme(&[("back_color", "red")]))
    }

    #[test]
    fn test_defaults_to_default() {
        let set = schemes();
        let selection = SchemeSelector::new(&set).select(None, "", None).unwrap();
        assert_eq!(selection.id, "default");
        assert!(!selection.has_variants);
    }

    #[test]
    fn test_preference_wins() {
        let set = schemes();
        let selection = SchemeSelector::new(&set)
            .select(Some("plain"), "aqua", None)
            .unwrap();
        assert_eq!(selection.id, "plain");
    }

    #[test]
    fn test_unknown_preference_falls_to_style() {
        let set = schemes();
        let selection = SchemeSelector::new(&set)
            .select(Some("gone"), "aqua", None)
            .unwrap();
        assert_eq!(selection.id, "aqua");
        assert!(selection.has_variants);
    }

    #[test]
    fn test_unknown_style_falls_to_default() {
        let set = schemes();
        let selection = SchemeSelector::new(&set)
            .select(None, "missing", None)
            .unwrap();
        assert_eq!(selection.id, "default");
    }

    #[test]
    fn test_dark_mode_substitutes_variant() {
        let set = schemes();
        let selection = SchemeSelector::new(&set)
            .select(Some("aqua"), "", Some(ColorMode::Dark))
            .unwrap();
        assert_eq!(selection.id, "aqua_night");
        assert!(selection.has_variants);
    }

    #[test]
    fn test_light_mode_substitutes_variant() {
        let set = schemes();
        let selection = SchemeSelector::new(&set)
            .select(Some("aqua"), "", Some(ColorMode::Light))
            .unwrap();
        assert_eq!(selection.id, "aqua");
    }

    #[test]
    fn test_mode_without_variant_keeps_base() {
        let set = schemes();
        let selection = SchemeSelector::new(&set)
            .select(Some("plain"), "", Some(ColorMode::Dark))
            .unwrap();
        assert_eq!(selection.id, "plain");
    }

    #[test]
    fn test_missing_variant_target_keeps_base() {
        let set = schemes();
        let selection = SchemeSelector::new(&set)
            .select(Some("broken"), "", Some(ColorMode::Dark))
            .unwrap();
        assert_eq!(selection.id, "broken");
    }

    #[test]
    fn test_missing_default_is_an_error() {
        let set = ColorSchemeSet::new().with("only", scheme(&[]));
        let result = SchemeSelector::new(&set).select(None, "", None);
        assert!(matches!(result, Err(ThemeError::MissingDefaultScheme)));

        // An existing preference still works without a default.
        let ok = SchemeSelector::new(&set).select(Some("only"), "", None);
        assert_eq!(ok.unwrap().id, "only");
    }
}
