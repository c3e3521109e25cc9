//! CLI commands for texprogress.

pub mod hooks;
pub mod init;
pub mod plot;
pub mod run;
pub mod show;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// texprogress - track LaTeX writing progress from a pre-commit hook
#[derive(Parser)]
#[command(name = "texprogress")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ./texprogress.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Measure the document, update the ledger and redraw the chart (default)
    Run,

    /// Write a default config, create the ledger and install the hook
    Init {
        /// First day of tracking, YYYY-MM-DD (default: today)
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Overwrite an existing config file
        #[arg(long, short)]
        force: bool,

        /// Don't install the pre-commit hook
        #[arg(long)]
        no_hook: bool,

        /// Make a failed run abort the commit
        #[arg(long)]
        blocking: bool,
    },

    /// Redraw the chart from the ledger without measuring
    Plot,

    /// Print the ledger
    Show {
        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the git pre-commit hook
    Hook {
        #[command(subcommand)]
        action: HookAction,
    },
}

#[derive(Subcommand)]
pub enum HookAction {
    /// Install or refresh the hook
    Install {
        /// Make a failed run abort the commit
        #[arg(long)]
        blocking: bool,
    },

    /// Remove the hook
    Uninstall,
}
