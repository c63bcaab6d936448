//! `scoutspawn launch`: build the Scout launch description and execute it.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use scoutspawn_core::ament::AmentIndex;
use scoutspawn_core::launch::{arguments, generate_launch_description, LaunchDescription};
use scoutspawn_runner::LaunchRunner;

use crate::cli::DefaultArgs;

#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub launch_arguments: Vec<String>,
    pub defaults: DefaultArgs,
    pub args_file: Option<PathBuf>,
    pub show_args: bool,
    pub dry_run: bool,
}

/// Returns the spawner's exit code.
pub fn cmd_launch(opts: &LaunchOptions) -> Result<i32> {
    let index = AmentIndex::from_env();
    if index.prefixes().is_empty() {
        tracing::warn!("AMENT_PREFIX_PATH is empty; source your ROS 2 workspace first");
    }

    let ld = generate_launch_description(&index, &opts.defaults.to_defaults())
        .context("Failed to build launch description")?;

    if opts.show_args {
        print!("{}", format_declared_arguments(&ld));
        return Ok(0);
    }

    let launch_args = collect_arguments(opts)?;
    let report = LaunchRunner::new(&index)
        .dry_run(opts.dry_run)
        .execute(&ld, launch_args)
        .context("Launch failed")?;

    if opts.dry_run {
        for node in &report.nodes {
            println!("{}", node.planned.command_line());
        }
    }
    Ok(report.exit_code())
}

/// Arguments file first, then command-line tokens on top.
fn collect_arguments(opts: &LaunchOptions) -> Result<BTreeMap<String, String>> {
    let from_file = match &opts.args_file {
        Some(path) => arguments::load_arguments_file(path)
            .with_context(|| format!("Failed to load arguments file {}", path.display()))?,
        None => BTreeMap::new(),
    };
    let from_cli = arguments::parse_arguments(&opts.launch_arguments)
        .context("Invalid launch argument")?;
    Ok(arguments::merge(from_file, from_cli))
}

/// `ros2 launch --show-args` style listing.
pub fn format_declared_arguments(ld: &LaunchDescription) -> String {
    let mut out = String::from("Arguments (pass arguments as '<name>:=<value>'):\n");
    let mut any = false;
    for arg in ld.declared_arguments() {
        any = true;
        out.push_str(&format!(
            "\n    '{}':\n        {}\n        (default: '{}')\n",
            arg.name, arg.description, arg.default_value
        ));
    }
    if !any {
        out.push_str("\n  No arguments.\n");
    }
    out
}
