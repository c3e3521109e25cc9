//! Redraw the chart from the ledger.

use std::path::Path;

use crate::chart;
use crate::config::Config;
use crate::error::Error;
use crate::ledger;

/// Run the plot command.
pub fn run(config_path: Option<&Path>) -> Result<(), Error> {
    let config = Config::load(&Config::locate(config_path)?)?;
    let table = ledger::load_existing(&config.ledger_path)?;

    chart::render(&table.measurements(), &config.image_path)?;
    println!("Image written at:\n\t{}", config.image_path.display());

    Ok(())
}
