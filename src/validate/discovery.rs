//! Finding agent files under a directory.

use crate::error::{AgentError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Default pattern for agent documents.
pub const DEFAULT_AGENT_GLOB: &str = "**/*.agent.md";

pub(crate) fn build_globset(patterns: &[String]) -> std::result::Result<GlobSet, globset::Error> {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
        let normalized = pattern.trim().replace('\\', "/");
        if normalized.is_empty() {
            continue;
        }
        builder.add(Glob::new(&normalized)?);
    }

    builder.build()
}

/// Root-relative path with forward slashes.
pub fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Every file under `root` whose root-relative path matches one of
/// `patterns`, sorted. Symlinks are not followed.
pub fn discover_agent_files(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let globs = build_globset(patterns)
        .map_err(|e| AgentError::ConfigError(format!("invalid include glob: {}", e)))?;

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            AgentError::io(path, std::io::Error::from(e))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if globs.is_match(relative_path(root, entry.path())) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}
