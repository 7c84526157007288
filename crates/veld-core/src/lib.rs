//! Veld Core - Scaffolding pipeline for Payload CMS + Next.js projects
//!
//! This library holds the full project-creation pipeline used by the
//! `create-veld-app` binary: template materialization, manifest and config
//! mutation, per-add-on installers, and the orchestrator that ties them
//! together with whole-directory rollback on failure.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Pure functions for name validation, secret
//!   generation, template copying, and manifest/env/adapter mutation
//! - **Layer 2: Installers & Orchestration** - Per-add-on installers composed
//!   by `pipeline::create_project`, which owns the rollback contract
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts
//!   (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use veld_core::{Database, Features, PackageManager, ProjectConfig, TemplateSource};
//!
//! let config = ProjectConfig {
//!     name: "my-app".to_string(),
//!     database: Database::Postgres,
//!     features: Features::default(),
//!     package_manager: PackageManager::Pnpm,
//!     init_git: true,
//! };
//!
//! let templates = TemplateSource::discover()?;
//! let report = veld_core::pipeline::create_project(&config, &templates).await?;
//! ```

pub mod adapter;
pub mod config;
pub mod envfile;
pub mod installers;
pub mod manifest;
pub mod pipeline;
pub mod process;
pub mod secret;
pub mod templates;
pub mod validate;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{detect_package_manager, Database, Features, PackageManager, ProjectConfig};
pub use pipeline::{create_project, scaffold, CreateReport};
pub use templates::TemplateSource;
