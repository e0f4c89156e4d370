//! Prints the settings bound from `DEMO_*` environment variables, flags and defaults.

mod logging;
mod settings;

use crate::settings::Settings;
use anyhow::{Context, Result};
use clap::Command;
use sconfig::{BindError, Binder, CommandLine};
use std::io::{self, Write};
use tracing::{debug, info};

const ENV_PREFIX: &str = "DEMO";

fn main() -> Result<()> {
    let mut settings = Settings::default();
    let mut cli = CommandLine::new(command());

    match Binder::new(&mut settings).enable_environment(ENV_PREFIX).bind_flags(&mut cli).parse() {
        Ok(()) => {},
        Err(BindError::Arguments { source }) => source.exit(),
        Err(err) => return Err(err).context("failed to bind settings"),
    }

    let _guard = logging::init(&settings).context("failed to initialize logging")?;
    info!(host = %settings.host, port = settings.port, workers = settings.workers, "settings bound");
    debug!(?settings);

    let mut stdout = io::stdout().lock();
    settings.render(&mut stdout)?;
    stdout.flush()?;
    Ok(())
}

fn command() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Prints the settings bound from DEMO_* variables, flags and defaults")
}
