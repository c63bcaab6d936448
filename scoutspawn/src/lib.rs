//! scoutspawn CLI library.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

/// Parse args, dispatch, and return the process exit code.
pub fn run_cli() -> Result<i32> {
    // .env must be loaded before clap reads SCOUTSPAWN_* defaults
    scoutspawn_core::config::load_dotenv();
    let cli = Cli::parse();
    scoutspawn_core::observability::init_tracing();

    match cli.command {
        Commands::Launch {
            launch_arguments,
            defaults,
            args_file,
            show_args,
            dry_run,
        } => {
            let opts = commands::launch::LaunchOptions {
                launch_arguments,
                defaults,
                args_file,
                show_args,
                dry_run,
            };
            commands::launch::cmd_launch(&opts)
        }
        Commands::Describe { defaults, json } => {
            commands::describe::cmd_describe(&defaults, json)?;
            Ok(0)
        }
        Commands::Packages => {
            commands::describe::cmd_packages();
            Ok(0)
        }
    }
}
