//! Database adapter swapping inside the generated db config file
//!
//! The base template always ships the postgres adapter. Swapping to another
//! database is a single deterministic substitution anchored on the postgres
//! adapter's import line and call expression. When an anchor is missing the
//! file is left byte-for-byte unchanged; the returned outcome records which
//! anchors matched so the caller can surface a warning instead of failing.

use crate::config::Database;
use anyhow::{Context, Result};
use regex::{NoExpand, Regex};
use std::path::Path;
use std::sync::OnceLock;
use tokio::fs;

/// Relative path of the database config inside the scaffolded project
pub const DB_CONFIG_PATH: &str = "src/db/index.ts";

const POSTGRES_IMPORT: &str = "import { postgresAdapter } from '@payloadcms/db-postgres'";

const MONGODB_IMPORT: &str = "import { mongooseAdapter } from '@payloadcms/db-mongodb'";

const MONGODB_CALL: &str = "mongooseAdapter({
  url: process.env.DATABASE_URL || '',
})";

const SQLITE_IMPORT: &str = "import { sqliteAdapter } from '@payloadcms/db-sqlite'";

const SQLITE_CALL: &str = "sqliteAdapter({
  client: {
    url: process.env.DATABASE_URL || 'file:./payload.db',
  },
  push: true,
})";

/// Matches the postgres adapter call expression, from the opening brace to
/// the first line-initial closing brace, non-greedy across lines
fn call_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)postgresAdapter\(\{.*?\n\}\)").expect("call anchor is a valid regex")
    })
}

/// Which anchors of the postgres adapter were found and replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchOutcome {
    pub import_matched: bool,
    pub call_matched: bool,
}

impl PatchOutcome {
    pub fn fully_matched(&self) -> bool {
        self.import_matched && self.call_matched
    }
}

fn replacement_for(database: Database) -> Option<(&'static str, &'static str)> {
    match database {
        Database::Postgres => None,
        Database::Mongodb => Some((MONGODB_IMPORT, MONGODB_CALL)),
        Database::Sqlite => Some((SQLITE_IMPORT, SQLITE_CALL)),
    }
}

/// Pure text transformation, separated from the file I/O for testing.
/// Each substitution applies to the first match only.
fn patch_adapter_source(source: &str, import_line: &str, call_site: &str) -> (String, PatchOutcome) {
    let import_matched = source.contains(POSTGRES_IMPORT);
    let patched = if import_matched {
        source.replacen(POSTGRES_IMPORT, import_line, 1)
    } else {
        source.to_string()
    };

    let call_matched = call_pattern().is_match(&patched);
    let patched = if call_matched {
        call_pattern()
            .replace(&patched, NoExpand(call_site))
            .into_owned()
    } else {
        patched
    };

    (
        patched,
        PatchOutcome {
            import_matched,
            call_matched,
        },
    )
}

/// Repoint the adapter import and instantiation in `src/db/index.ts` from
/// the default postgres adapter to `database`
pub async fn swap_adapter(project_dir: &Path, database: Database) -> Result<PatchOutcome> {
    let Some((import_line, call_site)) = replacement_for(database) else {
        // postgres is the template default; nothing to patch
        return Ok(PatchOutcome {
            import_matched: true,
            call_matched: true,
        });
    };

    let db_config = project_dir.join(DB_CONFIG_PATH);
    let content = fs::read_to_string(&db_config)
        .await
        .with_context(|| format!("Failed to read {}", db_config.display()))?;

    let (patched, outcome) = patch_adapter_source(&content, import_line, call_site);

    if patched != content {
        fs::write(&db_config, patched)
            .await
            .with_context(|| format!("Failed to write {}", db_config.display()))?;
    }

    Ok(outcome)
}
