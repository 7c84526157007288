//! Better Auth add-on installation

use crate::manifest::{self, DependencyConfig};
use crate::templates::{copier, TemplateSource};
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Library files copied from the extras area into the target tree
const AUTH_FILES: &[&str] = &["src/lib/auth.ts", "src/lib/auth-client.ts"];

/// API route directory copied wholesale
const AUTH_ROUTE_DIR: &str = "src/app/api/auth";

/// Copy the Better Auth source files and apply its dependency set
pub async fn install_better_auth(
    project_dir: &Path,
    source: &TemplateSource,
    deps: &DependencyConfig,
) -> Result<()> {
    let extras = source.extras_dir();

    for file in AUTH_FILES {
        let from = extras.join(file);
        let to = project_dir.join(file);
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::copy(&from, &to)
            .await
            .with_context(|| format!("Failed to copy {}", from.display()))?;
    }

    copier::copy_tree(&extras.join(AUTH_ROUTE_DIR), &project_dir.join(AUTH_ROUTE_DIR)).await?;

    manifest::apply_dependencies(project_dir, deps.change_for("better-auth")?).await
}
