//! Locating background images referenced by color schemes.
//!
//! A scheme value such as `keyboard_back_color: bg/paper.png` names an image
//! rather than a color. It is looked up under the user data directory:
//!
//! 1. `<user_data>/backgrounds/<background_folder>/<value>`, when the theme
//!    sets a `background_folder` style
//! 2. `<user_data>/backgrounds/<value>`
//!
//! The first candidate that exists on disk wins.

use std::path::{Path, PathBuf};

/// Directory under the user data directory that holds backgrounds.
pub const BACKGROUNDS_DIR: &str = "backgrounds";

/// Returns `true` if a scheme literal names an image rather than a color.
///
/// Images are recognized by a `.`, `/` or `\` anywhere in the value.
pub fn is_image_reference(literal: &str) -> bool {
    literal.contains(['.', '/', '\\'])
}

/// Resolves image references to existing files.
#[derive(Debug, Clone)]
pub struct ImageLocator {
    backgrounds: PathBuf,
    folder: Option<String>,
}

impl ImageLocator {
    /// Creates a locator rooted at `<user_data_dir>/backgrounds`.
    ///
    /// An empty `background_folder` means there is no theme-specific folder.
    pub fn new(user_data_dir: impl AsRef<Path>, background_folder: &str) -> Self {
        let folder = background_folder.trim();
        Self {
            backgrounds: user_data_dir.as_ref().join(BACKGROUNDS_DIR),
            folder: (!folder.is_empty()).then(|| folder.to_string()),
        }
    }

    /// The candidate paths for `value`, in lookup order.
    pub fn candidates(&self, value: &str) -> Vec<PathBuf> {
        let mut candidates = Vec::with_capacity(2);
        if let Some(folder) = &self.folder {
            candidates.push(self.backgrounds.join(folder).join(value));
        }
        candidates.push(self.backgrounds.join(value));
        candidates
    }

    /// Returns the first candidate that exists on disk.
    pub fn locate(&self, value: &str) -> Option<PathBuf> {
        let found = self.candidates(value).into_iter().find(|path| path.exists());
        if found.is_none() {
            tracing::debug!(value, "background image not found");
        }
        found
    }
}
