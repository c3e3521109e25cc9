//! texprogress - writing progress tracker for LaTeX documents.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use texprogress::cli::{self, Cli, Commands, HookAction};
use texprogress::Error;

fn main() -> Result<(), Error> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("texprogress=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => cli::run::run(config)?,
        Commands::Init {
            start_date,
            force,
            no_hook,
            blocking,
        } => {
            let options = cli::init::InitOptions {
                start_date,
                force,
                no_hook,
                blocking,
            };
            cli::init::run(config, &options)?;
        }
        Commands::Plot => cli::plot::run(config)?,
        Commands::Show { json } => cli::show::run(config, json)?,
        Commands::Hook { action } => match action {
            HookAction::Install { blocking } => cli::hooks::install(config, blocking)?,
            HookAction::Uninstall => cli::hooks::uninstall(config)?,
        },
    }

    Ok(())
}
