//! Interactive configuration prompts
//!
//! Every value already pinned by a CLI flag is skipped; cancelling any
//! prompt abandons the whole run without touching the file system.

use crate::config::{detect_package_manager, Database, Features, PackageManager, ProjectConfig};
use crate::validate;
use anyhow::Result;

/// Flag values carried into the prompt flow; `None` means "ask"
#[derive(Debug, Clone, Default)]
pub struct PromptFlags {
    pub name: Option<String>,
    pub database: Option<Database>,
    pub better_auth: bool,
    pub trpc: bool,
    pub package_manager: Option<PackageManager>,
    pub git: Option<bool>,
}

/// Map a prompt result: `Ok(None)` on user cancellation, `Err` on real I/O
/// failure
fn prompt_value<T>(result: std::io::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn cancelled() -> Result<Option<ProjectConfig>> {
    cliclack::outro_cancel("Operation cancelled")?;
    Ok(None)
}

/// Run the interactive prompt sequence. Returns `None` when the user
/// cancelled; the caller exits cleanly without running the pipeline.
pub fn run_prompts(flags: PromptFlags) -> Result<Option<ProjectConfig>> {
    cliclack::intro("create-veld-app")?;

    let name = match flags.name {
        Some(name) if validate::validate_for_cwd(&name).is_ok() => name,
        _ => {
            let Some(name) = prompt_value(
                cliclack::input("Project name")
                    .placeholder("my-veld-app")
                    .default_input("my-veld-app")
                    .validate(|input: &String| {
                        validate::validate_for_cwd(input).map_err(|err| err.to_string())
                    })
                    .interact(),
            )?
            else {
                return cancelled();
            };
            name
        }
    };

    let database = match flags.database {
        Some(database) => database,
        None => {
            let Some(database) = prompt_value(
                cliclack::select("Database adapter")
                    .item(Database::Postgres, "PostgreSQL", "recommended")
                    .item(Database::Mongodb, "MongoDB", "")
                    .item(Database::Sqlite, "SQLite", "for development")
                    .initial_value(Database::Postgres)
                    .interact(),
            )?
            else {
                return cancelled();
            };
            database
        }
    };

    let mut features = Features {
        better_auth: flags.better_auth,
        trpc: flags.trpc,
    };
    if !flags.better_auth && !flags.trpc {
        let Some(selected) = prompt_value(
            cliclack::multiselect("Additional features")
                .item("better-auth", "Better Auth", "Authentication")
                .item("trpc", "tRPC", "Type-safe API layer")
                .required(false)
                .interact(),
        )?
        else {
            return cancelled();
        };
        features.better_auth = selected.contains(&"better-auth");
        features.trpc = selected.contains(&"trpc");
    }

    let package_manager = match flags.package_manager {
        Some(package_manager) => package_manager,
        None => {
            let detected = detect_package_manager();
            let hint = |pm: PackageManager, fallback: &'static str| {
                if detected == pm {
                    "detected"
                } else {
                    fallback
                }
            };
            let Some(package_manager) = prompt_value(
                cliclack::select("Package manager")
                    .item(PackageManager::Pnpm, "pnpm", hint(PackageManager::Pnpm, "recommended"))
                    .item(PackageManager::Npm, "npm", hint(PackageManager::Npm, ""))
                    .item(PackageManager::Yarn, "yarn", hint(PackageManager::Yarn, ""))
                    .item(PackageManager::Bun, "bun", hint(PackageManager::Bun, ""))
                    .initial_value(detected)
                    .interact(),
            )?
            else {
                return cancelled();
            };
            package_manager
        }
    };

    let init_git = match flags.git {
        Some(value) => value,
        None => {
            let Some(value) = prompt_value(
                cliclack::confirm("Initialize git repository?")
                    .initial_value(true)
                    .interact(),
            )?
            else {
                return cancelled();
            };
            value
        }
    };

    Ok(Some(ProjectConfig {
        name,
        database,
        features,
        package_manager,
        init_git,
    }))
}
