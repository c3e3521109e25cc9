//! Print the ledger.

use std::path::Path;

use crate::config::Config;
use crate::error::Error;
use crate::ledger::{self, Measurement, HEADER};

/// Run the show command.
pub fn run(config_path: Option<&Path>, json: bool) -> Result<(), Error> {
    let config = Config::load(&Config::locate(config_path)?)?;
    let rows = ledger::load_existing(&config.ledger_path)?.measurements();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else if rows.is_empty() {
        println!("No measurements yet.");
    } else {
        print!("{}", format_table(&rows));
    }

    Ok(())
}

/// Right-aligned columns under the ledger header.
fn format_table(rows: &[Measurement]) -> String {
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|m| {
            [
                m.days_from_init.to_string(),
                m.pages.to_string(),
                m.words.to_string(),
                m.diffs.to_string(),
            ]
        })
        .collect();

    let widths: Vec<usize> = (0..HEADER.len())
        .map(|col| {
            cells
                .iter()
                .map(|row| row[col].len())
                .chain(std::iter::once(HEADER[col].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header = HEADER.map(str::to_string);
    std::iter::once(&header)
        .chain(cells.iter())
        .map(|row| {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:>width$}", cell, width = width))
                .collect();
            format!("{}\n", line.join("  "))
        })
        .collect()
}
