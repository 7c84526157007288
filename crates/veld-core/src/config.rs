//! Resolved project configuration
//!
//! Prompting and flag merging happen upstream in the binary; the pipeline
//! only ever sees a fully resolved [`ProjectConfig`].

use clap::ValueEnum;
use std::fmt;

/// Database adapter the generated application will use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Database {
    Postgres,
    Mongodb,
    Sqlite,
}

impl Database {
    /// Identifier used in flags, dependency-config keys, and compose file names
    pub fn id(&self) -> &'static str {
        match self {
            Database::Postgres => "postgres",
            Database::Mongodb => "mongodb",
            Database::Sqlite => "sqlite",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Database::Postgres => "PostgreSQL",
            Database::Mongodb => "MongoDB",
            Database::Sqlite => "SQLite",
        }
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Package manager used to install the generated project's dependencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum PackageManager {
    Pnpm,
    Npm,
    Yarn,
    Bun,
}

impl PackageManager {
    pub fn id(&self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm",
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Program and arguments of the install command
    pub fn install_args(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            PackageManager::Pnpm => ("pnpm", &["install"]),
            PackageManager::Npm => ("npm", &["install"]),
            PackageManager::Yarn => ("yarn", &[]),
            PackageManager::Bun => ("bun", &["install"]),
        }
    }

    /// How to run a package.json script with this package manager
    pub fn run_command(&self, script: &str) -> String {
        match self {
            PackageManager::Pnpm => format!("pnpm {script}"),
            PackageManager::Npm => format!("npm run {script}"),
            PackageManager::Yarn => format!("yarn {script}"),
            PackageManager::Bun => format!("bun run {script}"),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Optional add-ons the user may opt into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Features {
    pub better_auth: bool,
    pub trpc: bool,
}

/// Immutable configuration record driving one scaffold run
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// Validated project name; also the target directory name
    pub name: String,
    pub database: Database,
    pub features: Features,
    pub package_manager: PackageManager,
    pub init_git: bool,
}

/// Detect the package manager that invoked us via `npm_config_user_agent`.
/// Defaults to pnpm, the recommended package manager.
pub fn detect_package_manager() -> PackageManager {
    if let Ok(user_agent) = std::env::var("npm_config_user_agent") {
        if user_agent.starts_with("pnpm") {
            return PackageManager::Pnpm;
        }
        if user_agent.starts_with("yarn") {
            return PackageManager::Yarn;
        }
        if user_agent.starts_with("bun") {
            return PackageManager::Bun;
        }
        if user_agent.starts_with("npm") {
            return PackageManager::Npm;
        }
    }

    PackageManager::Pnpm
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_args_per_package_manager() {
        assert_eq!(PackageManager::Pnpm.install_args(), ("pnpm", &["install"][..]));
        assert_eq!(PackageManager::Npm.install_args(), ("npm", &["install"][..]));
        assert_eq!(PackageManager::Yarn.install_args(), ("yarn", &[][..]));
        assert_eq!(PackageManager::Bun.install_args(), ("bun", &["install"][..]));
    }

    #[test]
    fn test_run_command_per_package_manager() {
        assert_eq!(PackageManager::Pnpm.run_command("dev"), "pnpm dev");
        assert_eq!(PackageManager::Npm.run_command("dev"), "npm run dev");
        assert_eq!(PackageManager::Yarn.run_command("dev"), "yarn dev");
        assert_eq!(PackageManager::Bun.run_command("dev"), "bun run dev");
    }

    #[test]
    fn test_database_ids_match_flag_values() {
        assert_eq!(Database::Postgres.id(), "postgres");
        assert_eq!(Database::Mongodb.id(), "mongodb");
        assert_eq!(Database::Sqlite.id(), "sqlite");
    }
}
