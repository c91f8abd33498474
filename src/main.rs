//! src/main.rs
//!
//! Entrypoint: parse flags, load settings, delegate to `app::run()`.

use clap::Parser;
use netpeaks::config::{Cli, Settings};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Logging is best effort; the monitor still runs without a log file.
    if let Err(e) = netpeaks::logging::init() {
        eprintln!("netpeaks: logging disabled: {e}");
    }

    let settings = Settings::resolve(&cli)?;
    netpeaks::app::run(settings)?;
    Ok(())
}
