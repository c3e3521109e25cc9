//! Initialize tracking for a document.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::cli::hooks;
use crate::config::{Config, CONFIG_FILE_NAME};
use crate::days;
use crate::error::Error;
use crate::ledger;

/// Options for `init`.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub start_date: Option<NaiveDate>,
    pub force: bool,
    pub no_hook: bool,
    pub blocking: bool,
}

/// What `init` did.
#[derive(Debug, PartialEq, Eq)]
pub enum InitOutcome {
    AlreadyInitialized(PathBuf),
    Initialized {
        config_path: PathBuf,
        hook: Option<PathBuf>,
    },
}

/// Run the init command.
pub fn run(config_path: Option<&Path>, options: &InitOptions) -> Result<(), Error> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?.join(CONFIG_FILE_NAME),
    };
    let program = std::env::current_exe()?;

    match initialize(&path, options, &program)? {
        InitOutcome::AlreadyInitialized(path) => {
            println!("Config already exists at {}", path.display());
            println!("Run 'texprogress init --force' to overwrite it.");
        }
        InitOutcome::Initialized { config_path, hook } => {
            println!("Config written to {}", config_path.display());
            if let Some(hook) = hook {
                println!("Pre-commit hook installed at {}", hook.display());
            }
            println!("texprogress initialized. Edit the config if your document is not main.tex.");
        }
    }

    Ok(())
}

/// Write the default config at `path`, create the ledger and install the hook.
pub fn initialize(
    path: &Path,
    options: &InitOptions,
    program: &Path,
) -> Result<InitOutcome, Error> {
    if path.exists() && !options.force {
        return Ok(InitOutcome::AlreadyInitialized(path.to_path_buf()));
    }

    let start = options.start_date.unwrap_or_else(days::today);
    Config::new(start).save(path)?;
    info!(path = %path.display(), %start, "Created config");

    let path = fs::canonicalize(path)?;
    let config = Config::load(&path)?;

    if let Some(dir) = config.ledger_path.parent() {
        fs::create_dir_all(dir)?;
    }
    if let Some(dir) = config.image_path.parent() {
        fs::create_dir_all(dir)?;
    }
    ledger::init(&config.ledger_path)?;

    let mut hook = None;
    if !options.no_hook && hooks::has_git(&config.repo_root) {
        match hooks::install_hook(&config.repo_root, program, &path, options.blocking) {
            Ok(installed) => hook = Some(installed),
            Err(e) => warn!(error = %e, "Failed to install pre-commit hook"),
        }
    }

    Ok(InitOutcome::Initialized {
        config_path: path,
        hook,
    })
}
