//! Launch command handler.

use colored::Colorize;
use std::path::PathBuf;

use crate::commands::ConfigArgs;
use crate::error::{LaunchError, LaunchResult};
use crate::launch::launch;
use crate::resolver::resolve;
use crate::schema::ConfigSchema;

use super::common::{absolute_dir, load_config};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate config, resolve it and start the server.
///
/// Exits the process with the server's exit code when it fails.
pub async fn launch_server(
    args: ConfigArgs,
    dir: PathBuf,
    dry_run: bool,
    concise: bool,
) -> LaunchResult<()> {
    let config = load_config(&args)?;
    let spec = resolve(&config);
    let workdir = absolute_dir(&dir)?;

    if !workdir.is_dir() {
        return Err(LaunchError::Generic(format!(
            "Build context not found: {}",
            workdir.display()
        )));
    }

    // Launch output goes to stderr; stdout belongs to the server's stdio transport.
    if dry_run {
        if concise {
            eprintln!("{}", spec.command_line());
        } else {
            eprintln!(
                "  {} {}",
                "Would run:".bright_cyan(),
                spec.command_line().bright_white()
            );
            eprintln!("  {} {}", "In:".dimmed(), workdir.display());
            for (name, value) in spec.redacted_env(&ConfigSchema::default()) {
                eprintln!("  {} {}={}", "Env:".dimmed(), name, value);
            }
        }
        return Ok(());
    }

    if !concise {
        eprintln!(
            "  {} {}",
            "Running:".bright_cyan(),
            spec.command_line().bright_white()
        );
    }

    let status = launch(&spec, &workdir).await?;
    if !status.success() {
        std::process::exit(status.code().unwrap_or(1));
    }

    Ok(())
}
