//! tRPC add-on installation

use crate::manifest::{self, DependencyConfig};
use crate::templates::{copier, TemplateSource};
use anyhow::Result;
use std::path::Path;

/// Directories copied from the extras area into the target tree
const TRPC_DIRS: &[&str] = &["src/trpc", "src/app/api/trpc"];

/// Copy the tRPC source tree and API route, and apply its dependency set
pub async fn install_trpc(
    project_dir: &Path,
    source: &TemplateSource,
    deps: &DependencyConfig,
) -> Result<()> {
    let extras = source.extras_dir();

    for dir in TRPC_DIRS {
        copier::copy_tree(&extras.join(dir), &project_dir.join(dir)).await?;
    }

    manifest::apply_dependencies(project_dir, deps.change_for("trpc")?).await
}
