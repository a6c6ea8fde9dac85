//! Writing command results as text or JSON.

use std::io::Write;

use serde::Serialize;

use crate::cli::Format;

/// A command result that also has a human-readable form.
pub trait Render: Serialize {
    fn render_text(&self) -> String;
}

/// Formats `value` for `format`.
pub fn format_output<T: Render>(value: &T, format: Format) -> anyhow::Result<String> {
    Ok(match format {
        Format::Text => value.render_text(),
        Format::Json => serde_json::to_string_pretty(value)?,
    })
}

/// Writes `value` to stdout.
pub fn emit<T: Render>(value: &T, format: Format) -> anyhow::Result<()> {
    let text = format_output(value, format)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", text.trim_end())?;
    Ok(())
}
