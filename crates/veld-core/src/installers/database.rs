//! Database adapter installation
//!
//! Only runs for non-postgres choices: the base template already ships the
//! postgres adapter and its docker-compose service.

use crate::adapter;
use crate::config::Database;
use crate::manifest::{self, DependencyConfig};
use crate::templates::TemplateSource;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Swap the default postgres adapter for `database`: repoint the adapter
/// config, replace or drop the docker-compose file, and apply the adapter's
/// dependency set.
///
/// An adapter file that no longer contains the expected postgres anchors is
/// left untouched rather than failing the scaffold; the returned warnings
/// tell the caller to surface that.
pub async fn install_database(
    project_dir: &Path,
    source: &TemplateSource,
    deps: &DependencyConfig,
    database: Database,
) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    let outcome = adapter::swap_adapter(project_dir, database).await?;
    if !outcome.fully_matched() {
        warnings.push(format!(
            "{} did not contain the expected postgres adapter; review the database config by hand",
            adapter::DB_CONFIG_PATH
        ));
    }

    let compose_source = source
        .extras_dir()
        .join("docker")
        .join(format!("docker-compose.{}.yml", database.id()));
    let compose_dest = project_dir.join("docker-compose.yml");

    if compose_source.is_file() {
        fs::copy(&compose_source, &compose_dest)
            .await
            .with_context(|| format!("Failed to copy {}", compose_source.display()))?;
    } else if compose_dest.is_file() {
        // No container for this database; drop the stale postgres compose file
        fs::remove_file(&compose_dest)
            .await
            .with_context(|| format!("Failed to remove {}", compose_dest.display()))?;
    }

    manifest::apply_dependencies(project_dir, deps.change_for(database.id())?).await?;

    Ok(warnings)
}
