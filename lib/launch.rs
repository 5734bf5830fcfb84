//! Process starter for a resolved [`LaunchSpec`].
//!
//! Standard streams are inherited so the orchestrator's stdio transport reaches
//! the server directly. The parent environment is kept; spec env vars override it.

use std::path::Path;
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;

use crate::error::{LaunchError, LaunchResult};
use crate::resolver::LaunchSpec;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Spawn the launch spec in `workdir` and wait for it to exit.
pub async fn launch(spec: &LaunchSpec, workdir: &Path) -> LaunchResult<ExitStatus> {
    tracing::info!(
        command = %spec.command_line(),
        workdir = %workdir.display(),
        "starting server"
    );

    let mut child = Command::new(&spec.command)
        .args(&spec.args)
        .envs(&spec.env)
        .current_dir(workdir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| LaunchError::ProcessStart {
            command: spec.command.clone(),
            source,
        })?;

    let status = child.wait().await?;
    tracing::info!(code = ?status.code(), "server exited");

    Ok(status)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
