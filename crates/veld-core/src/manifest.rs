//! Package manifest (package.json) editing
//!
//! All edits load the manifest as structured JSON, apply a pure
//! transformation, and write it back with stable 2-space indentation.
//! Key order is preserved across the round-trip.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

/// Template-only metadata fields stripped when the project is renamed
const TEMPLATE_FIELDS: &[&str] = &["repository", "bugs", "homepage"];

/// Dependency edits for one add-on: keys to remove, then entries to add.
/// Additions win on key collision.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DependencyChange {
    #[serde(default)]
    pub add: Map<String, Value>,
    #[serde(default)]
    pub remove: Vec<String>,
}

/// Declarative add-on identifier -> dependency change mapping, loaded from
/// `extras/config/dependencies.json` and consumed by all installers
#[derive(Debug, Clone, Deserialize)]
pub struct DependencyConfig(HashMap<String, DependencyChange>);

impl DependencyConfig {
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid dependency config: {}", path.display()))
    }

    pub fn change_for(&self, addon: &str) -> Result<&DependencyChange> {
        self.0
            .get(addon)
            .ok_or_else(|| anyhow::anyhow!("No dependency set for add-on '{}'", addon))
    }
}

/// Load, transform, and write back the project's package.json
async fn edit_manifest<F>(pkg_path: &Path, transform: F) -> Result<()>
where
    F: FnOnce(&mut Map<String, Value>) -> Result<()>,
{
    let content = fs::read_to_string(pkg_path)
        .await
        .with_context(|| format!("Failed to read {}", pkg_path.display()))?;
    let mut manifest: Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", pkg_path.display()))?;
    let object = manifest
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("{} is not a JSON object", pkg_path.display()))?;

    transform(object)?;

    let mut output = serde_json::to_string_pretty(&manifest)
        .with_context(|| format!("Failed to serialize {}", pkg_path.display()))?;
    output.push('\n');
    fs::write(pkg_path, output)
        .await
        .with_context(|| format!("Failed to write {}", pkg_path.display()))
}

/// Set the manifest `name` field and strip template-only metadata
pub async fn set_project_name(project_dir: &Path, name: &str) -> Result<()> {
    let pkg_path = project_dir.join("package.json");
    edit_manifest(&pkg_path, |pkg| {
        pkg.insert("name".to_string(), Value::String(name.to_string()));
        for field in TEMPLATE_FIELDS {
            pkg.remove(*field);
        }
        Ok(())
    })
    .await
}

/// Apply a dependency change: delete the `remove` keys, then merge-assign the
/// `add` entries. Removing an absent key is a no-op, so applying the same
/// change twice yields the same manifest as applying it once.
pub async fn apply_dependencies(project_dir: &Path, change: &DependencyChange) -> Result<()> {
    let pkg_path = project_dir.join("package.json");
    edit_manifest(&pkg_path, |pkg| {
        let deps = pkg
            .entry("dependencies")
            .or_insert_with(|| Value::Object(Map::new()));
        let deps = deps
            .as_object_mut()
            .ok_or_else(|| anyhow::anyhow!("\"dependencies\" is not a JSON object"))?;

        for dep in &change.remove {
            deps.remove(dep);
        }
        for (dep, version) in &change.add {
            deps.insert(dep.clone(), version.clone());
        }
        Ok(())
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn project_with_manifest(manifest: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), manifest).unwrap();
        dir
    }

    async fn read_manifest(dir: &tempfile::TempDir) -> Value {
        let content = fs::read_to_string(dir.path().join("package.json"))
            .await
            .unwrap();
        serde_json::from_str(&content).unwrap()
    }

    #[tokio::test]
    async fn test_set_project_name_strips_template_fields() {
        let dir = project_with_manifest(
            r#"{
  "name": "veld-template",
  "repository": "https://example.com/repo",
  "bugs": "https://example.com/issues",
  "homepage": "https://example.com",
  "dependencies": {}
}"#,
        );

        set_project_name(dir.path(), "demo").await.unwrap();

        let pkg = read_manifest(&dir).await;
        assert_eq!(pkg["name"], json!("demo"));
        assert!(pkg.get("repository").is_none());
        assert!(pkg.get("bugs").is_none());
        assert!(pkg.get("homepage").is_none());
    }

    #[tokio::test]
    async fn test_apply_dependencies_removes_then_adds() {
        let dir = project_with_manifest(
            r#"{"name": "demo", "dependencies": {"@payloadcms/db-postgres": "^3.0.0", "next": "^15.0.0"}}"#,
        );

        let change: DependencyChange = serde_json::from_value(json!({
            "add": {"@payloadcms/db-mongodb": "^3.0.0"},
            "remove": ["@payloadcms/db-postgres"]
        }))
        .unwrap();

        apply_dependencies(dir.path(), &change).await.unwrap();

        let pkg = read_manifest(&dir).await;
        let deps = pkg["dependencies"].as_object().unwrap();
        assert!(deps.get("@payloadcms/db-postgres").is_none());
        assert_eq!(deps["@payloadcms/db-mongodb"], json!("^3.0.0"));
        assert_eq!(deps["next"], json!("^15.0.0"));
    }

    #[tokio::test]
    async fn test_apply_dependencies_is_idempotent() {
        let dir = project_with_manifest(
            r#"{"name": "demo", "dependencies": {"@payloadcms/db-postgres": "^3.0.0"}}"#,
        );

        let change: DependencyChange = serde_json::from_value(json!({
            "add": {"@payloadcms/db-sqlite": "^3.0.0"},
            "remove": ["@payloadcms/db-postgres"]
        }))
        .unwrap();

        apply_dependencies(dir.path(), &change).await.unwrap();
        let once = fs::read_to_string(dir.path().join("package.json"))
            .await
            .unwrap();

        apply_dependencies(dir.path(), &change).await.unwrap();
        let twice = fs::read_to_string(dir.path().join("package.json"))
            .await
            .unwrap();

        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn test_add_wins_on_key_collision() {
        let dir = project_with_manifest(r#"{"name": "demo", "dependencies": {"zod": "^3.0.0"}}"#);

        let change: DependencyChange = serde_json::from_value(json!({
            "add": {"zod": "^3.23.0"}
        }))
        .unwrap();

        apply_dependencies(dir.path(), &change).await.unwrap();

        let pkg = read_manifest(&dir).await;
        assert_eq!(pkg["dependencies"]["zod"], json!("^3.23.0"));
    }

    #[tokio::test]
    async fn test_malformed_manifest_is_an_error() {
        let dir = project_with_manifest("not json at all");
        let result = set_project_name(dir.path(), "demo").await;
        assert!(result.is_err());
        assert!(format!("{:#}", result.unwrap_err()).contains("Invalid JSON"));
    }

    #[tokio::test]
    async fn test_output_keeps_two_space_indentation() {
        let dir = project_with_manifest(r#"{"name": "demo", "dependencies": {"next": "^15.0.0"}}"#);

        set_project_name(dir.path(), "demo").await.unwrap();

        let content = fs::read_to_string(dir.path().join("package.json"))
            .await
            .unwrap();
        assert!(content.contains("\n  \"name\": \"demo\""));
        assert!(content.ends_with('\n'));
    }
}
