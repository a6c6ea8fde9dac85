//! `keyskin`: inspect how keyboard themes resolve.
//!
//! Logging goes to stderr and is filtered by `RUST_LOG` (default `warn`), so
//! stdout carries only results:
//!
//! ```text
//! RUST_LOG=keyskin=debug keyskin --theme-dir themes colors trime --mode dark
//! ```

mod cli;
mod handlers;
mod output;

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use cli::{Cli, Command};
use handlers::Environment;
use output::emit;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();
    tracing::debug!(command = ?cli.command, format = ?cli.format, "parsed arguments");

    let env = Environment {
        theme_dirs: cli.theme_dirs,
        user_data_dir: cli.user_data_dir,
    };

    match cli.command {
        Command::Schemes { theme } => emit(&handlers::schemes(&env, &theme)?, cli.format),
        Command::Colors {
            theme,
            scheme,
            mode,
        } => emit(
            &handlers::colors(&env, &theme, scheme.as_deref(), mode)?,
            cli.format,
        ),
        Command::Layout {
            theme,
            requested,
            schema_id,
            alphabet,
        } => emit(
            &handlers::layout(&env, &theme, &requested, &schema_id, alphabet.as_deref())?,
            cli.format,
        ),
        Command::Padding {
            theme,
            one_hand,
            landscape,
        } => emit(
            &handlers::padding(&env, &theme, one_hand, landscape)?,
            cli.format,
        ),
    }
}
