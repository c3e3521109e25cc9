//! The default command: one tracking run.

use std::path::Path;

use crate::collect::SystemRunner;
use crate::config::Config;
use crate::days;
use crate::error::Error;
use crate::tracker;

/// Run the tracker with the located config.
pub fn run(config_path: Option<&Path>) -> Result<(), Error> {
    let config = Config::load(&Config::locate(config_path)?)?;

    println!("################### ~~ LaTeX Report Tracker ~~ ###################");
    tracker::run(&config, &SystemRunner, days::today())?;
    println!("################### ~~~~ End of execution ~~~~ ###################");

    Ok(())
}
