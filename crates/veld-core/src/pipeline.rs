//! End-to-end scaffold orchestration
//!
//! Stages run strictly sequentially: Validate -> Materialize ->
//! RenameManifest -> [DatabaseSwap] -> [AuthInstall] -> [TrpcInstall] ->
//! GenerateEnv -> Install -> [GitInit]. Any failure before GitInit deletes
//! the target directory entirely and surfaces the error; there is no
//! step-level undo. GitInit failures only append warnings.

use crate::config::{Database, ProjectConfig};
use crate::envfile;
use crate::installers;
use crate::manifest::{self, DependencyConfig};
use crate::process;
use crate::templates::{copier, TemplateSource};
use crate::validate;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::fs;

/// Target directory of the in-flight scaffold, cleared on completion or
/// rollback. The binary's Ctrl+C handler consults this so an interrupted run
/// does not leave a half-populated project behind.
static IN_FLIGHT_TARGET: Mutex<Option<PathBuf>> = Mutex::new(None);

fn register_in_flight_target(dir: &Path) {
    if let Ok(mut guard) = IN_FLIGHT_TARGET.lock() {
        *guard = Some(dir.to_path_buf());
    }
}

/// Remove and return the registered in-flight target, if any
pub fn take_in_flight_target() -> Option<PathBuf> {
    IN_FLIGHT_TARGET.lock().ok().and_then(|mut guard| guard.take())
}

/// Outcome of a successful scaffold
#[derive(Debug)]
pub struct CreateReport {
    /// Absolute path of the created project
    pub project_dir: PathBuf,
    /// Non-fatal issues to surface after the success message
    pub warnings: Vec<String>,
}

fn step(message: &str) {
    println!("  {} {}", "->".blue(), message);
}

/// Whole-directory rollback: the target never survives a failed pipeline
async fn rollback(project_dir: &Path) {
    take_in_flight_target();
    if project_dir.exists() {
        if let Err(err) = fs::remove_dir_all(project_dir).await {
            eprintln!(
                "{} Failed to clean up {}: {}",
                "Warning:".yellow(),
                project_dir.display(),
                err
            );
        }
    }
}

async fn run_stages(
    config: &ProjectConfig,
    templates: &TemplateSource,
    project_dir: &Path,
) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    step("Copying template");
    copier::copy_tree(&templates.base_dir(), project_dir)
        .await
        .context("Failed to copy the base template")?;

    step("Updating package.json");
    manifest::set_project_name(project_dir, &config.name).await?;

    let deps = DependencyConfig::load(&templates.dependency_config_path()).await?;

    if config.database != Database::Postgres {
        step(&format!("Configuring {} adapter", config.database.id()));
        warnings.extend(
            installers::install_database(project_dir, templates, &deps, config.database).await?,
        );
    }

    if config.features.better_auth {
        step("Setting up Better Auth");
        installers::install_better_auth(project_dir, templates, &deps).await?;
    }

    if config.features.trpc {
        step("Setting up tRPC");
        installers::install_trpc(project_dir, templates, &deps).await?;
    }

    step("Generating .env");
    envfile::generate_env(project_dir, config.database, config.features).await?;

    Ok(warnings)
}

/// Run the file-system stages of the pipeline against an explicit target
/// directory: materialize the template, rename the manifest, apply database
/// and feature installs, and write `.env`. Any failure deletes the target
/// directory before returning.
///
/// This is the subprocess-free core of [`create_project`].
pub async fn scaffold(
    config: &ProjectConfig,
    templates: &TemplateSource,
    project_dir: &Path,
) -> Result<Vec<String>> {
    match run_stages(config, templates, project_dir).await {
        Ok(warnings) => Ok(warnings),
        Err(err) => {
            rollback(project_dir).await;
            Err(err)
        }
    }
}

/// Run the full pipeline for a resolved configuration: validate, scaffold,
/// install dependencies, and optionally initialize git.
pub async fn create_project(
    config: &ProjectConfig,
    templates: &TemplateSource,
) -> Result<CreateReport> {
    let project_dir = std::env::current_dir()
        .context("Failed to resolve the current directory")?
        .join(&config.name);

    validate::validate_project_name(&config.name, &project_dir)?;

    register_in_flight_target(&project_dir);

    let mut warnings = scaffold(config, templates, &project_dir).await?;

    step(&format!(
        "Installing dependencies with {}",
        config.package_manager.id()
    ));
    if let Err(err) = process::install_dependencies(&project_dir, config.package_manager).await {
        rollback(&project_dir).await;
        return Err(err);
    }

    if config.init_git {
        step("Initializing git repository");
        match process::init_git(&project_dir).await {
            Ok(git_warnings) => warnings.extend(git_warnings),
            Err(err) => warnings.push(format!("Skipped git initialization: {err:#}")),
        }
    }

    take_in_flight_target();

    Ok(CreateReport {
        project_dir,
        warnings,
    })
}
