// rcfg-core/src/process.rs
//! Thin wrappers over `std::process::Command` for the external tools rcfg drives.
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use rcfg_common::error::{RcfgError, Result};
use tracing::{debug, error};

/// Resolves a tool name (or explicit path) to an executable.
pub fn resolve_tool(bin: &str) -> Result<PathBuf> {
    which::which(bin).map_err(|e| RcfgError::ToolNotFound(bin.to_string(), e.to_string()))
}

fn describe(bin: &str, args: &[&str]) -> String {
    let mut line = bin.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

fn build(bin: &str, args: &[&str], cwd: &Path) -> Result<Command> {
    let exe = resolve_tool(bin)?;
    let mut cmd = Command::new(exe);
    cmd.args(args).current_dir(cwd);
    Ok(cmd)
}

/// Runs a tool with inherited stdio and fails on a non-zero exit.
pub fn run_checked(bin: &str, args: &[&str], cwd: &Path) -> Result<()> {
    let line = describe(bin, args);
    debug!("Running `{}` in {}", line, cwd.display());
    let status = build(bin, args, cwd)?
        .status()
        .map_err(|e| RcfgError::CommandExecError(format!("`{line}` in {}: {e}", cwd.display())))?;

    if !status.success() {
        error!("`{}` failed in {} ({})", line, cwd.display(), status);
        return Err(RcfgError::CommandFailed {
            command: line,
            status: status.to_string(),
            stderr: None,
        });
    }
    Ok(())
}

/// Runs a tool and returns its stdout, decoded lossily and trimmed.
pub fn output_checked(bin: &str, args: &[&str], cwd: &Path) -> Result<String> {
    let line = describe(bin, args);
    debug!("Capturing output of `{}` in {}", line, cwd.display());
    let output = build(bin, args, cwd)?
        .stdin(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| RcfgError::CommandExecError(format!("`{line}` in {}: {e}", cwd.display())))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        error!(
            "`{}` failed in {} ({}):\nStderr: {}",
            line,
            cwd.display(),
            output.status,
            stderr
        );
        return Err(RcfgError::CommandFailed {
            command: line,
            status: output.status.to_string(),
            stderr: Some(stderr),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
