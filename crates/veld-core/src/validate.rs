//! Project name and target directory validation

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// Why a candidate project name was rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Project name cannot be empty")]
    Empty,

    #[error("Project name must be lowercase, alphanumeric, and may include hyphens, underscores, and dots")]
    InvalidCharacters,

    #[error("Directory \"{name}\" already exists and is not empty")]
    DirectoryNotEmpty { name: String },
}

/// npm package name grammar: optional @scope/ prefix, then lowercase
/// alphanumerics plus separators, not starting with a separator
fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:@[a-z0-9\-*~][a-z0-9\-*._~]*/)?[a-z0-9\-~][a-z0-9\-._~]*$")
            .expect("name grammar is a valid regex")
    })
}

/// Check a name against the package-name grammar only (no file-system access).
/// Used for live validation in the prompt layer.
pub fn validate_name(name: &str) -> Result<(), NameError> {
    if name.trim().is_empty() {
        return Err(NameError::Empty);
    }
    if !name_pattern().is_match(name) {
        return Err(NameError::InvalidCharacters);
    }
    Ok(())
}

/// Check a name against the grammar and check that `target_dir` is absent or
/// empty. Pure snapshot check: the directory can still change between
/// validation and materialization.
pub fn validate_project_name(name: &str, target_dir: &Path) -> Result<(), NameError> {
    validate_name(name)?;

    if target_dir.exists() {
        let occupied = std::fs::read_dir(target_dir)
            .map(|mut entries| entries.next().is_some())
            .unwrap_or(false);
        if occupied {
            return Err(NameError::DirectoryNotEmpty {
                name: name.to_string(),
            });
        }
    }

    Ok(())
}

/// Validate against the directory the project would be created in
pub fn validate_for_cwd(name: &str) -> Result<(), NameError> {
    let target = std::env::current_dir()
        .map(|cwd| cwd.join(name))
        .unwrap_or_else(|_| PathBuf::from(name));
    validate_project_name(name, &target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_names() {
        for name in ["demo", "my-app", "my_app", "app.v2", "a1", "@scope/pkg"] {
            assert_eq!(validate_name(name), Ok(()), "expected '{name}' to be valid");
        }
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        assert_eq!(validate_name(""), Err(NameError::Empty));
        assert_eq!(validate_name("   "), Err(NameError::Empty));
    }

    #[test]
    fn test_rejects_uppercase() {
        assert_eq!(validate_name("MyApp"), Err(NameError::InvalidCharacters));
    }

    #[test]
    fn test_rejects_leading_separators() {
        assert_eq!(validate_name(".hidden"), Err(NameError::InvalidCharacters));
        assert_eq!(validate_name("_private"), Err(NameError::InvalidCharacters));
    }

    #[test]
    fn test_rejects_spaces_inside_name() {
        assert_eq!(validate_name("my app"), Err(NameError::InvalidCharacters));
    }

    #[test]
    fn test_missing_directory_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("fresh");
        assert_eq!(validate_project_name("fresh", &target), Ok(()));
    }

    #[test]
    fn test_empty_directory_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("empty");
        std::fs::create_dir(&target).unwrap();
        assert_eq!(validate_project_name("empty", &target), Ok(()));
    }

    #[test]
    fn test_occupied_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("taken");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep.txt"), "x").unwrap();
        assert_eq!(
            validate_project_name("taken", &target),
            Err(NameError::DirectoryNotEmpty {
                name: "taken".to_string()
            })
        );
    }
}
