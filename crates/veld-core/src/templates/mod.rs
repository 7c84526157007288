//! Template assets shipped with the tool
//!
//! This module provides:
//! - Template root discovery (env override or a `templates/` directory
//!   beside the executable)
//! - Recursive tree copying with build/VCS artifact exclusion

pub mod copier;
pub mod source;

pub use copier::copy_tree;
pub use source::TemplateSource;
