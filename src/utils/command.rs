//! Command execution utilities

use crate::error::{FastfetchError, Result};
use std::process::{Command, Stdio};

/// Execute a command and return its trimmed stdout
pub fn run_command(program: &str, args: &[&str]) -> Result<String> {
    tracing::debug!(program, ?args, "running command");
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        Err(FastfetchError::Detection(format!(
            "command '{}' failed with exit code: {:?}",
            program,
            output.status.code()
        )))
    }
}

/// Check if a command exists in PATH
pub fn command_exists(program: &str) -> bool {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}
