//! Config command handlers

use crate::cli::{CliError, ConfigInitArgs};
use crate::config::EXAMPLE_CONFIG;
use std::fs;

/// Handle `jasmine config init` command
pub fn handle_config_init(args: &ConfigInitArgs) -> Result<(), CliError> {
    if args.output.exists() && !args.force {
        return Err(CliError::FileExists(args.output.clone()));
    }

    fs::write(&args.output, EXAMPLE_CONFIG)?;

    println!("✓ Configuration file created: {}", args.output.display());
    println!("  Edit this file to customize message defaults and logging.");

    Ok(())
}
