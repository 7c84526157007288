//! External process invocation
//!
//! Non-zero exit is a normal (failure) result, not an error; the error case
//! is a process that could not be spawned at all (missing executable).

use crate::config::PackageManager;
use anyhow::{Context, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Result of a finished subprocess
#[derive(Debug)]
pub struct RunOutput {
    pub success: bool,
    pub stderr: String,
}

/// Spawn a subprocess in `cwd`, wait for exit, and capture stderr in full
pub async fn run_command(program: &str, args: &[&str], cwd: &Path) -> Result<RunOutput> {
    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .with_context(|| format!("Failed to run {program}"))?;

    Ok(RunOutput {
        success: output.status.success(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Run the package manager's install command in the project directory.
/// A non-zero exit is a fatal pipeline error carrying the captured stderr.
pub async fn install_dependencies(
    project_dir: &Path,
    package_manager: PackageManager,
) -> Result<()> {
    let (program, args) = package_manager.install_args();
    let output = run_command(program, args, project_dir).await?;

    if !output.success {
        anyhow::bail!(
            "{} install failed:\n{}",
            package_manager.id(),
            output.stderr.trim()
        );
    }

    Ok(())
}

/// Initialize a git repository with an initial commit.
///
/// None of the git stages fail the scaffold: `init` failure ends the
/// sequence, `add`/`commit` failures downgrade to warnings. A commit
/// rejected for missing identity configuration gets a targeted hint.
pub async fn init_git(project_dir: &Path) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    let init = run_command("git", &["init"], project_dir).await?;
    if !init.success {
        warnings.push("Failed to initialize git repository".to_string());
        return Ok(warnings);
    }

    let add = run_command("git", &["add", "."], project_dir).await?;
    if !add.success {
        warnings.push("Initialized git repository (could not stage files)".to_string());
        return Ok(warnings);
    }

    let commit = run_command(
        "git",
        &["commit", "-m", "Initial commit from create-veld-app"],
        project_dir,
    )
    .await?;
    if !commit.success {
        if commit.stderr.contains("user.email") || commit.stderr.contains("user.name") {
            warnings.push(
                "Initialized git repository (run `git config` to set user before committing)"
                    .to_string(),
            );
        } else {
            warnings.push("Initialized git repository (initial commit skipped)".to_string());
        }
    }

    Ok(warnings)
}
