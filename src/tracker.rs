//! One tracking run: validate, measure, update the ledger, redraw the chart.

use chrono::NaiveDate;
use tracing::info;

use crate::chart;
use crate::collect::{self, CommandRunner};
use crate::config::Config;
use crate::days;
use crate::error::Error;
use crate::ledger::{self, Ledger, Measurement, Upsert};
use crate::validate;

/// What a run measured and how it landed in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub measurement: Measurement,
    pub upsert: Upsert,
}

/// Run every step once, in order. Any error aborts the run.
///
/// The day offset is computed before the ledger is created, so a start date
/// in the future leaves the filesystem untouched.
pub fn run(config: &Config, runner: &dyn CommandRunner, today: NaiveDate) -> Result<RunReport, Error> {
    validate::check_directory(&config.source_root)?;
    validate::check_directory(&config.repo_root)?;

    let days_from_init = days::days_between(config.tracking_start_date, today)?;
    println!(
        "Today it has been {} days since the start of the tracking.",
        days_from_init
    );

    ledger::init(&config.ledger_path)?;

    let words = collect::count_words(
        runner,
        &config.tools.texcount,
        &config.source_root,
        &config.source_filename,
    )?;
    println!("This commit has a total of {} words.", words);

    let pages = collect::count_pages(runner, &config.tools.pdfinfo, &config.compiled_doc_path)?;
    println!("This commit has a total of {} pages.", pages);

    let diffs = collect::count_diffs(runner, &config.tools.git, &config.repo_root)?;
    println!("This commit has a total of {} changes.", diffs);

    let measurement = Measurement {
        days_from_init,
        pages,
        words,
        diffs,
    };

    let mut table = Ledger::load(&config.ledger_path)?;
    let upsert = table.upsert(measurement);
    table.save(&config.ledger_path)?;
    info!(days_from_init, pages, words, diffs, ?upsert, "Updated ledger");

    chart::render(&table.measurements(), &config.image_path)?;

    println!("Table written at:\n\t{}", config.ledger_path.display());
    println!("Image written at:\n\t{}", config.image_path.display());

    Ok(RunReport { measurement, upsert })
}
