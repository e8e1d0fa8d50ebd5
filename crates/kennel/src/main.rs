// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! kennel - a small htmx app for keeping track of dogs.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// kennel - a small htmx app for keeping track of dogs.
#[derive(Parser, Debug)]
#[command(name = "kennel", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, short, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the web server (default).
    Serve,
    /// Print the effective configuration with secrets redacted.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match kennel_config::load_and_validate(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            kennel_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            if let Err(e) = serve::run_serve(config).await {
                tracing::error!(error = %e, "kennel failed");
                std::process::exit(1);
            }
        }
        Commands::Config => match toml::to_string_pretty(&config.redacted()) {
            Ok(rendered) => print!("{rendered}"),
            Err(e) => {
                eprintln!("error: failed to render config: {e}");
                std::process::exit(1);
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_defaults_to_serve() {
        let cli = Cli::parse_from(["kennel"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn cli_accepts_global_config_flag() {
        let cli = Cli::parse_from(["kennel", "config", "--config", "/tmp/k.toml"]);
        assert!(matches!(cli.command, Some(Commands::Config)));
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/k.toml")));
    }

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn redacted_config_renders_as_toml() {
        let config = kennel_config::load_and_validate_str(
            "[database]\nurl = \"dogs.db\"\nauth_token = \"hunter2\"\n",
        )
        .unwrap();
        let rendered = toml::to_string_pretty(&config.redacted()).unwrap();
        assert!(rendered.contains("dogs.db"));
        assert!(!rendered.contains("hunter2"));
    }
}
