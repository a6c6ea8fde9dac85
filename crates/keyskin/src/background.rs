//! Background descriptors for keys, panels and the keyboard itself.
//!
//! A background is described, not drawn. The renderer receives either an
//! image to stretch or a fill color with optional rounded corners and
//! border, each with an optional opacity taken from a style parameter.

use std::path::PathBuf;

use serde::Serialize;

use crate::cache::{ColorCache, ResolvedValue};
use crate::color::Argb;
use crate::params::StyleParams;

/// Which cache and style keys make up one background.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackgroundRequest {
    /// Cache key of the color or image.
    pub key: String,
    /// Style key of the border width.
    pub border_key: Option<String>,
    /// Cache key of the border color.
    pub border_color_key: Option<String>,
    /// Style key of the corner radius.
    pub round_corner_key: Option<String>,
    /// Style key of the opacity, 0 to 255.
    pub alpha_key: Option<String>,
}

impl BackgroundRequest {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn border(mut self, width_key: impl Into<String>, color_key: impl Into<String>) -> Self {
        self.border_key = Some(width_key.into());
        self.border_color_key = Some(color_key.into());
        self
    }

    pub fn round_corner(mut self, key: impl Into<String>) -> Self {
        self.round_corner_key = Some(key.into());
        self
    }

    pub fn alpha(mut self, key: impl Into<String>) -> Self {
        self.alpha_key = Some(key.into());
        self
    }
}

/// A stroke around a filled background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Border {
    pub width: f32,
    pub color: Argb,
}

/// What to draw behind something.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Background {
    Image {
        path: PathBuf,
        alpha: Option<u8>,
    },
    Fill {
        color: Argb,
        corner_radius: Option<f32>,
        border: Option<Border>,
        alpha: Option<u8>,
    },
}

/// Builds the descriptor for `request`, or `None` if its key is not cached.
pub fn describe(
    request: &BackgroundRequest,
    cache: &ColorCache,
    style: &StyleParams<'_>,
) -> Option<Background> {
    let alpha = request
        .alpha_key
        .as_deref()
        .filter(|key| style.contains(key))
        .map(|key| style.get_int(key).clamp(0, 255) as u8);

    match cache.get(&request.key)? {
        ResolvedValue::ImagePath(path) => Some(Background::Image { path, alpha }),
        ResolvedValue::Color(color) => {
            let corner_radius = request
                .round_corner_key
                .as_deref()
                .map(|key| style.get_float(key));
            let border = match (&request.border_key, &request.border_color_key) {
                (Some(width_key), Some(color_key)) => {
                    let width = style.get_float(width_key);
                    cache
                        .color(color_key)
                        .filter(|_| width > 0.0)
                        .map(|color| Border { width, color })
                }
                _ => None,
            };
            Some(Background::Fill {
                color,
                corner_radius,
                border,
                alpha,
            })
        }
    }
}
