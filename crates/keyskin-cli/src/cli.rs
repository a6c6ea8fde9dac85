//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use keyskin::ColorMode;

/// Inspect how keyboard themes resolve.
#[derive(Debug, Parser)]
#[command(name = "keyskin", version, about)]
pub struct Cli {
    /// Directory to search for theme files. Repeatable; earlier wins.
    ///
    /// Must come before the subcommand so every occurrence is kept.
    #[arg(long = "theme-dir", value_name = "DIR")]
    pub theme_dirs: Vec<PathBuf>,

    /// Directory holding `backgrounds/`.
    #[arg(long, value_name = "DIR", global = true)]
    pub user_data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    pub format: Format,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List a theme's color schemes.
    Schemes {
        /// Theme name, without extension.
        theme: String,
    },

    /// Print every resolved color and image of a scheme.
    Colors {
        theme: String,

        /// Scheme to activate instead of the theme's choice.
        #[arg(long)]
        scheme: Option<String>,

        /// Display mode to apply.
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },

    /// Resolve a keyboard layout id.
    Layout {
        theme: String,

        /// Requested layout id.
        #[arg(default_value = ".default")]
        requested: String,

        /// Id of the active input schema.
        #[arg(long)]
        schema_id: String,

        /// The schema's `speller/alphabet`.
        #[arg(long)]
        alphabet: Option<String>,
    },

    /// Print keyboard padding.
    Padding {
        theme: String,

        /// One-hand mode index: 0 normal, 1 left, 2 right.
        #[arg(long, default_value_t = 0)]
        one_hand: i32,

        #[arg(long)]
        landscape: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Light,
    Dark,
    /// Ask the OS.
    System,
}

impl ModeArg {
    /// The mode to apply, detecting it for [`ModeArg::System`].
    pub fn resolve(self) -> ColorMode {
        match self {
            ModeArg::Light => ColorMode::Light,
            ModeArg::Dark => ColorMode::Dark,
            ModeArg::System => keyskin::scheme::detect_color_mode(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colors_with_globals() {
        let cli = Cli::try_parse_from([
            "keyskin",
            "--theme-dir",
            "a",
            "--theme-dir",
            "b",
            "colors",
            "trime",
            "--mode",
            "dark",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.theme_dirs, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert_eq!(cli.format, Format::Json);
        match cli.command {
            Command::Colors { theme, scheme, mode } => {
                assert_eq!(theme, "trime");
                assert_eq!(scheme, None);
                assert_eq!(mode, Some(ModeArg::Dark));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_theme_dirs_keep_every_occurrence() {
        let cli = Cli::try_parse_from([
            "keyskin",
            "--theme-dir",
            "user",
            "--theme-dir",
            "shared",
            "--theme-dir",
            "builtin",
            "schemes",
            "trime",
        ])
        .unwrap();

        assert_eq!(
            cli.theme_dirs,
            vec![
                PathBuf::from("user"),
                PathBuf::from("shared"),
                PathBuf::from("builtin")
            ]
        );
    }

    #[test]
    fn test_theme_dir_after_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["keyskin", "schemes", "trime", "--theme-dir", "b"]).is_err());
    }

    #[test]
    fn test_layout_defaults_to_sentinel() {
        let cli = Cli::try_parse_from(["keyskin", "layout", "trime", "--schema-id", "luna_pinyin"])
            .unwrap();
        match cli.command {
            Command::Layout {
                requested,
                schema_id,
                alphabet,
                ..
            } => {
                assert_eq!(requested, ".default");
                assert_eq!(schema_id, "luna_pinyin");
                assert_eq!(alphabet, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_layout_requires_schema_id() {
        assert!(Cli::try_parse_from(["keyskin", "layout", "trime"]).is_err());
    }

    #[test]
    fn test_padding_flags() {
        let cli = Cli::try_parse_from(["keyskin", "padding", "trime", "--one-hand", "2", "--landscape"])
            .unwrap();
        assert_eq!(cli.format, Format::Text);
        assert!(matches!(
            cli.command,
            Command::Padding {
                one_hand: 2,
                landscape: true,
                ..
            }
        ));
    }

    #[test]
    fn test_fixed_modes() {
        assert_eq!(ModeArg::Light.resolve(), ColorMode::Light);
        assert_eq!(ModeArg::Dark.resolve(), ColorMode::Dark);
    }
}
