//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use folio_theme::ColorMode;

/// Simulates theme sessions against a file-backed preference store.
#[derive(Debug, Parser)]
#[command(name = "folio-theme", version, about)]
pub struct Cli {
    /// JSON file standing in for the browser's durable storage.
    #[arg(long, global = true, default_value = ".folio-theme.json")]
    pub store: PathBuf,

    /// YAML theme config (storage key, class names, durations, fallback).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load a session and show the resolved theme.
    Status,
    /// Load a session and toggle the theme.
    Toggle {
        /// Number of toggles to apply.
        #[arg(long, default_value_t = 1)]
        times: usize,
        /// Simulated milliseconds between toggles (and after the last one).
        #[arg(long, default_value_t = 0)]
        interval_ms: u64,
    },
    /// Load a session and select a mode.
    Set {
        #[arg(value_enum)]
        mode: ModeArg,
    },
    /// Print the pre-paint boot script.
    BootScript {
        /// Wrap the script in a `<script>` element.
        #[arg(long)]
        tag: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Dark,
    Light,
}

impl From<ModeArg> for ColorMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Dark => ColorMode::Dark,
            ModeArg::Light => ColorMode::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["folio-theme", "status"]).unwrap();
        assert_eq!(cli.store, PathBuf::from(".folio-theme.json"));
        assert!(cli.config.is_none());
        assert_eq!(cli.output, OutputFormat::Text);
        assert!(matches!(cli.command, Command::Status));
    }

    #[test]
    fn test_toggle_options() {
        let cli = Cli::try_parse_from([
            "folio-theme",
            "toggle",
            "--times",
            "3",
            "--interval-ms",
            "200",
            "--output",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Command::Toggle {
                times: 3,
                interval_ms: 200
            }
        ));
    }

    #[test]
    fn test_set_mode() {
        let cli = Cli::try_parse_from(["folio-theme", "set", "light"]).unwrap();
        match cli.command {
            Command::Set { mode } => assert_eq!(ColorMode::from(mode), ColorMode::Light),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_set_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["folio-theme", "set", "sepia"]).is_err());
    }

    #[test]
    fn test_boot_script_tag_flag() {
        let cli = Cli::try_parse_from(["folio-theme", "boot-script", "--tag"]).unwrap();
        assert!(matches!(cli.command, Command::BootScript { tag: true }));
    }
}
