//! One function per subcommand. Each returns its result for [`crate::output`].

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use keyskin::{
    ColorMode, KeyboardPadding, MemoryPreferences, OneHandMode, ResolvedValue, StaticSchema,
    Theme, ThemeLoader,
};
use serde::Serialize;

use crate::cli::ModeArg;
use crate::output::Render;

/// Where themes and backgrounds are read from.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub theme_dirs: Vec<PathBuf>,
    pub user_data_dir: Option<PathBuf>,
}

impl Environment {
    fn loader(&self) -> anyhow::Result<ThemeLoader> {
        let mut loader = ThemeLoader::new();
        if self.theme_dirs.is_empty() {
            tracing::debug!("no --theme-dir given, searching the working directory");
            loader.add_dir(".")?;
        }
        for dir in &self.theme_dirs {
            loader
                .add_dir(dir)
                .with_context(|| format!("cannot use theme directory {}", dir.display()))?;
        }
        Ok(loader)
    }

    fn activate(
        &self,
        theme: &str,
        preferences: MemoryPreferences,
        schema: StaticSchema,
    ) -> anyhow::Result<Theme> {
        let document = self
            .loader()?
            .load_or_default(theme)
            .with_context(|| format!("cannot load theme '{}'", theme))?;
        tracing::debug!(
            requested = %theme,
            loaded = %document.name.as_deref().unwrap_or_default(),
            "theme document loaded"
        );
        let theme = Theme::builder(document)
            .user_data_dir(self.user_data_dir.clone().unwrap_or_default())
            .preferences(Arc::new(preferences))
            .schema_provider(Arc::new(schema))
            .activate()?;
        Ok(theme)
    }
}

// ============================================================================
// schemes
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SchemeRow {
    pub id: String,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct SchemeList {
    pub schemes: Vec<SchemeRow>,
}

impl Render for SchemeList {
    fn render_text(&self) -> String {
        self.schemes
            .iter()
            .map(|row| {
                let marker = if row.active { "*" } else { " " };
                format!("{} {:<20} {}\n", marker, row.id, row.name)
            })
            .collect()
    }
}

pub fn schemes(env: &Environment, theme: &str) -> anyhow::Result<SchemeList> {
    let theme = env.activate(theme, MemoryPreferences::new(), StaticSchema::default())?;
    let active = theme.current_scheme_id();
    let schemes = theme
        .list_schemes()
        .into_iter()
        .map(|(id, name)| SchemeRow {
            active: id == active,
            id,
            name,
        })
        .collect();
    Ok(SchemeList { schemes })
}

// ============================================================================
// colors
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ColorTable {
    pub scheme: String,
    pub mode: Option<ColorMode>,
    pub values: BTreeMap<String, ResolvedValue>,
}

impl Render for ColorTable {
    fn render_text(&self) -> String {
        let mut out = format!("scheme: {}\n", self.scheme);
        if let Some(mode) = self.mode {
            let mode = match mode {
                ColorMode::Light => "light",
                ColorMode::Dark => "dark",
            };
            out.push_str(&format!("mode: {}\n", mode));
        }
        for (key, value) in &self.values {
            let shown = match value {
                ResolvedValue::Color(color) => color.to_string(),
                ResolvedValue::ImagePath(path) => path.display().to_string(),
            };
            out.push_str(&format!("{:<28} {}\n", key, shown));
        }
        out
    }
}

pub fn colors(
    env: &Environment,
    theme: &str,
    scheme: Option<&str>,
    mode: Option<ModeArg>,
) -> anyhow::Result<ColorTable> {
    let mut preferences = MemoryPreferences::new();
    if let Some(id) = scheme {
        preferences = preferences.with_color_scheme(id);
    }
    let theme = env.activate(theme, preferences, StaticSchema::default())?;

    let mode = mode.map(ModeArg::resolve);
    if mode.is_some() {
        theme.apply_color_mode(mode)?;
    }

    let values = theme
        .resolved_values()
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Ok(ColorTable {
        scheme: theme.current_scheme_id(),
        mode,
        values,
    })
}

// ============================================================================
// layout
// ============================================================================

#[derive(Debug, Serialize)]
pub struct LayoutResolution {
    pub requested: String,
    pub schema_id: String,
    pub layout: String,
}

impl Render for LayoutResolution {
    fn render_text(&self) -> String {
        format!("{} -> {}", self.requested, self.layout)
    }
}

pub fn layout(
    env: &Environment,
    theme: &str,
    requested: &str,
    schema_id: &str,
    alphabet: Option<&str>,
) -> anyhow::Result<LayoutResolution> {
    let mut schema = StaticSchema::new(schema_id);
    if let Some(alphabet) = alphabet {
        schema = schema.with_alphabet(alphabet);
    }
    let theme = env.activate(theme, MemoryPreferences::new(), schema)?;
    Ok(LayoutResolution {
        requested: requested.to_string(),
        schema_id: schema_id.to_string(),
        layout: theme.resolve_layout_id(requested)?,
    })
}

// ============================================================================
// padding
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PaddingReport {
    pub one_hand: OneHandMode,
    pub landscape: bool,
    #[serde(flatten)]
    pub padding: KeyboardPadding,
}

impl Render for PaddingReport {
    fn render_text(&self) -> String {
        format!(
            "left: {}\nright: {}\nbottom: {}",
            self.padding.left, self.padding.right, self.padding.bottom
        )
    }
}

pub fn padding(
    env: &Environment,
    theme: &str,
    one_hand: i32,
    landscape: bool,
) -> anyhow::Result<PaddingReport> {
    let mode = OneHandMode::from_index(one_hand);
    let preferences = MemoryPreferences::new().with_one_hand_mode(mode);
    let theme = env.activate(theme, preferences, StaticSchema::default())?;
    Ok(PaddingReport {
        one_hand: mode,
        landscape,
        padding: theme.keyboard_padding(landscape),
    })
}
