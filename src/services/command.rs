//! Host commands run when a countdown finishes

use std::io;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("failed to execute `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
}

/// Run a command line through `sh -c`
pub async fn run_finish_command(command: &str) -> Result<(), CommandError> {
    debug!("Running finish command: {}", command);

    let output = Command::new("sh")
        .args(["-c", command])
        .output()
        .await
        .map_err(|source| CommandError::Spawn {
            command: command.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(CommandError::Failed {
            command: command.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    info!("Finish command completed: {}", command);
    Ok(())
}

/// Check that a shell is available to run finish commands
pub async fn check_shell_available() -> Result<(), CommandError> {
    Command::new("sh")
        .args(["-c", "true"])
        .output()
        .await
        .map_err(|source| CommandError::Spawn {
            command: "sh".to_string(),
            source,
        })?;

    info!("sh is available");
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn successful_command_is_ok() {
        assert!(run_finish_command("exit 0").await.is_ok());
    }

    #[tokio::test]
    async fn failing_command_reports_stderr() {
        let err = run_finish_command("echo boom >&2; exit 3").await.unwrap_err();
        match err {
            CommandError::Failed { stderr, .. } => assert_eq!(stderr, "boom"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
