//! Template root resolution
//!
//! The template root holds two trees: `base/`, the application skeleton every
//! project starts from, and `extras/`, the per-add-on fragments plus the
//! shared dependency config consumed by the installers.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable overriding the template root location
pub const TEMPLATES_DIR_ENV: &str = "VELD_TEMPLATES_DIR";

/// Resolved location of the shipped template assets
#[derive(Debug, Clone)]
pub struct TemplateSource {
    root: PathBuf,
}

impl TemplateSource {
    /// Use an explicit template root. Fails when the root has no `base/` tree.
    pub fn from_path(root: PathBuf) -> Result<Self> {
        let source = Self { root };
        if !source.base_dir().is_dir() {
            anyhow::bail!(
                "Template directory {} has no base/ tree",
                source.root.display()
            );
        }
        Ok(source)
    }

    /// Resolve the template root from `VELD_TEMPLATES_DIR` or a `templates/`
    /// directory beside the executable.
    pub fn discover() -> Result<Self> {
        if let Ok(dir) = std::env::var(TEMPLATES_DIR_ENV) {
            return Self::from_path(PathBuf::from(&dir))
                .with_context(|| format!("Invalid {TEMPLATES_DIR_ENV} override: {dir}"));
        }

        let exe = std::env::current_exe().context("Failed to locate the current executable")?;
        if let Some(dir) = exe.parent() {
            let candidate = dir.join("templates");
            if candidate.is_dir() {
                return Self::from_path(candidate);
            }
        }

        anyhow::bail!(
            "No templates directory found. Set {} to a directory containing base/ and extras/.",
            TEMPLATES_DIR_ENV
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The base application skeleton copied into every project
    pub fn base_dir(&self) -> PathBuf {
        self.root.join("base")
    }

    /// Per-add-on file fragments and shared config
    pub fn extras_dir(&self) -> PathBuf {
        self.root.join("extras")
    }

    /// The declarative add-on -> dependency change mapping
    pub fn dependency_config_path(&self) -> PathBuf {
        self.extras_dir().join("config").join("dependencies.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_requires_base_tree() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TemplateSource::from_path(dir.path().to_path_buf()).is_err());

        std::fs::create_dir(dir.path().join("base")).unwrap();
        let source = TemplateSource::from_path(dir.path().to_path_buf()).unwrap();
        assert_eq!(source.base_dir(), dir.path().join("base"));
        assert_eq!(
            source.dependency_config_path(),
            dir.path().join("extras").join("config").join("dependencies.json")
        );
    }
}
