//! Recursive template tree copying

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use walkdir::WalkDir;

/// Directory names never copied into a scaffolded project, at any depth
const SKIPPED_DIRS: &[&str] = &["node_modules", ".git", ".next", ".turbo"];

/// Copy `src` recursively into `dest`, preserving relative structure and
/// skipping build/VCS artifacts. Any I/O failure is fatal to the pipeline;
/// the orchestrator rolls the whole target directory back.
pub async fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)
        .await
        .with_context(|| format!("Failed to create directory: {}", dest.display()))?;

    let walker = WalkDir::new(src).min_depth(1).into_iter().filter_entry(|entry| {
        entry
            .file_name()
            .to_str()
            .map(|name| !SKIPPED_DIRS.contains(&name))
            .unwrap_or(true)
    });

    for entry in walker {
        let entry =
            entry.with_context(|| format!("Failed to read template tree at {}", src.display()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("Entry outside template root: {}", entry.path().display()))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .await
                .with_context(|| format!("Failed to create directory: {}", target.display()))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            fs::copy(entry.path(), &target)
                .await
                .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;

    fn write(path: &Path, content: &str) {
        std_fs::create_dir_all(path.parent().unwrap()).unwrap();
        std_fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn test_copies_tree_preserving_structure() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        let dest = dir.path().join("dest");

        write(&src.join("package.json"), "{}");
        write(&src.join("src/app/page.tsx"), "export default () => null");

        copy_tree(&src, &dest).await.unwrap();

        assert!(dest.join("package.json").is_file());
        assert!(dest.join("src/app/page.tsx").is_file());
    }

    #[tokio::test]
    async fn test_skips_artifact_directories_at_any_depth() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        let dest = dir.path().join("dest");

        write(&src.join("keep.txt"), "keep");
        write(&src.join("node_modules/pkg/index.js"), "skip");
        write(&src.join(".git/HEAD"), "skip");
        write(&src.join("apps/web/.next/cache"), "skip");
        write(&src.join("apps/web/index.ts"), "keep");

        copy_tree(&src, &dest).await.unwrap();

        assert!(dest.join("keep.txt").is_file());
        assert!(dest.join("apps/web/index.ts").is_file());
        assert!(!dest.join("node_modules").exists());
        assert!(!dest.join(".git").exists());
        assert!(!dest.join("apps/web/.next").exists());
    }

    #[tokio::test]
    async fn test_missing_source_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = copy_tree(&dir.path().join("absent"), &dir.path().join("dest")).await;
        assert!(result.is_err());
    }
}
