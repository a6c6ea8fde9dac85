//! Keyboard padding for one-hand and landscape layouts.
//!
//! Paddings are read from style parameters in dp. Converting to pixels is up
//! to the renderer.

use serde::Serialize;

use crate::params::StyleParams;

/// Which side, if any, the keyboard is squeezed toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OneHandMode {
    /// Full-width keyboard.
    #[default]
    Normal,
    /// Keyboard shifted toward the left edge.
    LeftHand,
    /// Keyboard shifted toward the right edge.
    RightHand,
    /// An index the host stored that this version does not know.
    Unknown(i32),
}

impl OneHandMode {
    /// Maps a stored preference index: 0 normal, 1 left, 2 right.
    pub fn from_index(index: i32) -> Self {
        match index {
            0 => OneHandMode::Normal,
            1 => OneHandMode::LeftHand,
            2 => OneHandMode::RightHand,
            other => OneHandMode::Unknown(other),
        }
    }
}

/// Space around the keyboard, in dp.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct KeyboardPadding {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
}

/// Computes keyboard padding from style parameters.
///
/// Landscape ignores the one-hand mode. An unknown mode pads nothing.
pub fn keyboard_padding(
    style: &StyleParams<'_>,
    mode: OneHandMode,
    landscape: bool,
) -> KeyboardPadding {
    let padding = if landscape {
        let side = style.get_float("keyboard_padding_land");
        KeyboardPadding {
            left: side,
            right: side,
            bottom: style.get_float("keyboard_padding_land_bottom"),
        }
    } else {
        match mode {
            OneHandMode::Normal => {
                let side = style.get_float("keyboard_padding");
                KeyboardPadding {
                    left: side,
                    right: side,
                    bottom: style.get_float("keyboard_padding_bottom"),
                }
            }
            OneHandMode::LeftHand => KeyboardPadding {
                left: style.get_float("keyboard_padding_left"),
                right: style.get_float("keyboard_padding_right"),
                bottom: style.get_float("keyboard_padding_bottom"),
            },
            OneHandMode::RightHand => KeyboardPadding {
                left: style.get_float("keyboard_padding_right"),
                right: style.get_float("keyboard_padding_left"),
                bottom: style.get_float("keyboard_padding_bottom"),
            },
            OneHandMode::Unknown(_) => KeyboardPadding::default(),
        }
    };

    tracing::debug!(
        left = padding.left,
        right = padding.right,
        bottom = padding.bottom,
        ?mode,
        landscape,
        "keyboard padding updated"
    );
    padding
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{ConfigMap, ConfigValue};

    fn style_map() -> ConfigMap {
        [
            ("keyboard_padding", 4.0),
            ("keyboard_padding_bottom", 2.0),
            ("keyboard_padding_left", 1.0),
            ("keyboard_padding_right", 60.0),
            ("keyboard_padding_land", 40.0),
            ("keyboard_padding_land_bottom", 8.0),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), ConfigValue::Float(v)))
        .collect()
    }

    #[test]
    fn test_normal_mode() {
        let map = style_map();
        let style = StyleParams::new(&map);
        let p = keyboard_padding(&style, OneHandMode::Normal, false);
        assert_eq!(p, KeyboardPadding { left: 4.0, right: 4.0, bottom: 2.0 });
    }

    #[test]
    fn test_left_hand_mode() {
        let map = style_map();
        let style = StyleParams::new(&map);
        let p = keyboard_padding(&style, OneHandMode::LeftHand, false);
        assert_eq!(p, KeyboardPadding { left: 1.0, right: 60.0, bottom: 2.0 });
    }

    #[test]
    fn test_right_hand_mode_mirrors_left() {
        let map = style_map();
        let style = StyleParams::new(&map);
        let p = keyboard_padding(&style, OneHandMode::RightHand, false);
        assert_eq!(p, KeyboardPadding { left: 60.0, right: 1.0, bottom: 2.0 });
    }

    #[test]
    fn test_landscape_ignores_mode() {
        let map = style_map();
        let style = StyleParams::new(&map);
        let expected = KeyboardPadding { left: 40.0, right: 40.0, bottom: 8.0 };
        assert_eq!(keyboard_padding(&style, OneHandMode::LeftHand, true), expected);
        assert_eq!(keyboard_padding(&style, OneHandMode::Normal, true), expected);
    }

    #[test]
    fn test_unknown_mode_is_zero() {
        let map = style_map();
        let style = StyleParams::new(&map);
        assert_eq!(
            keyboard_padding(&style, OneHandMode::from_index(7), false),
            KeyboardPadding::default()
        );
    }

    #[test]
    fn test_missing_values_default_to_zero() {
        let map = ConfigMap::new();
        let style = StyleParams::new(&map);
        assert_eq!(
            keyboard_padding(&style, OneHandMode::Normal, false),
            KeyboardPadding::default()
        );
    }

    #[test]
    fn test_from_index() {
        assert_eq!(OneHandMode::from_index(0), OneHandMode::Normal);
        assert_eq!(OneHandMode::from_index(1), OneHandMode::LeftHand);
        assert_eq!(OneHandMode::from_index(2), OneHandMode::RightHand);
        assert_eq!(OneHandMode::from_index(-1), OneHandMode::Unknown(-1));
    }
}
