//! `folio-theme`: simulate theme sessions and print the boot script.

mod cli;
mod report;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use folio_theme::{
    boot_script, boot_script_tag, JsonFileStore, ManualClock, MemoryDocument, ThemeConfig,
    ThemeController,
};

use cli::{Cli, Command, OutputFormat};
use report::{Session, SessionReport};

fn main() -> ExitCode {
    env_logger::init();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", console::style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ThemeConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ThemeConfig::default(),
    };

    if let Command::BootScript { tag } = cli.command {
        let script = if tag {
            boot_script_tag(&config)?
        } else {
            boot_script(&config)?
        };
        println!("{script}");
        return Ok(());
    }

    let clock = ManualClock::new();
    let document = MemoryDocument::new().with_control(&config.toggle_marker);
    let mut session: Session =
        ThemeController::new(config, JsonFileStore::new(&cli.store), document, clock.clone());
    session.initialize();

    let toggles = match cli.command {
        Command::Status | Command::BootScript { .. } => 0,
        Command::Toggle { times, interval_ms } => {
            for _ in 0..times {
                session.toggle();
                clock.advance(Duration::from_millis(interval_ms));
                session.poll();
            }
            times
        }
        Command::Set { mode } => {
            let before = session.mode();
            session.set_mode(mode.into());
            usize::from(before != session.mode())
        }
    };

    let report = SessionReport::capture(&session, toggles)
        .context("theme session did not initialize")?;
    match cli.output {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}
