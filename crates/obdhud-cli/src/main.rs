//! obdhud - full-screen OBD-II heads-up display
//!
//! Entry point: parses flags, sets up logging and configuration, then runs
//! the polling engine and the exit-key watcher on one cooperative runtime.

mod cli;
mod input;
mod logging;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;

use obdhud_core::prelude::*;

use cli::Cli;
use terminal::TerminalSurface;

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.log_file.as_deref())?;

    let config_path = cli.config_path().context("failed to locate config file")?;
    let mut config = HudConfig::load_or_default(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;
    cli.apply(&mut config);
    config.validate().context("invalid settings")?;

    if cli.write_config {
        config
            .save(&config_path)
            .with_context(|| format!("failed to write config to {}", config_path.display()))?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }

    // One logical thread drives rendering, polling and input
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;
    let result = runtime.block_on(run(config));
    runtime.shutdown_background();
    result
}

async fn run(config: HudConfig) -> Result<()> {
    let gateway = DemoGateway::connect(&config.demo);
    let surface =
        TerminalSurface::open(config.surface_options()).context("failed to open terminal")?;
    let mut engine = PollingEngine::new(gateway, surface).with_interval(config.poll_interval());

    let exit = match engine.start() {
        EngineState::Running => {
            tokio::select! {
                state = engine.run() => {
                    tracing::info!(?state, "polling ended");
                    Ok(None)
                }
                reason = input::wait_for_exit() => reason.map(Some),
            }
        }
        // No vehicle: keep the static dashboard up until the user leaves
        _ => input::wait_for_exit().await.map(Some),
    };

    engine.shutdown();
    tracing::debug!(ticks = engine.ticks(), "engine shut down");

    match exit.context("failed to read terminal input")? {
        Some(reason) => tracing::info!(?reason, "exit requested"),
        None => eprintln!("Vehicle connection lost."),
    }
    Ok(())
}
