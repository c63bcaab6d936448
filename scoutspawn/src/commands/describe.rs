//! Inspection commands: `describe` and `packages`.

use anyhow::{Context, Result};
use scoutspawn_core::ament::AmentIndex;
use scoutspawn_core::launch::generate_launch_description;

use crate::cli::DefaultArgs;

pub fn cmd_describe(defaults: &DefaultArgs, json: bool) -> Result<()> {
    let index = AmentIndex::from_env();
    let ld = generate_launch_description(&index, &defaults.to_defaults())
        .context("Failed to build launch description")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&ld)?);
    } else {
        print!("{}", ld.render());
    }
    Ok(())
}

pub fn cmd_packages() {
    let index = AmentIndex::from_env();
    if index.prefixes().is_empty() {
        eprintln!("AMENT_PREFIX_PATH is not set; no packages to list.");
        return;
    }
    for name in index.packages() {
        println!("{}", name);
    }
}
