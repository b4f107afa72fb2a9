use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

/// Absolute, canonical form of a project directory
pub fn resolve_project_path(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("Failed to get current directory")?
            .join(path)
    };

    let canonical = absolute
        .canonicalize()
        .with_context(|| format!("Project path not found: {}", absolute.display()))?;
    if !canonical.is_dir() {
        bail!("Project path is not a directory: {}", canonical.display());
    }
    Ok(canonical)
}

/// Resolve every path, or the current directory when none are given
pub fn resolve_project_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if paths.is_empty() {
        return Ok(vec![resolve_project_path(Path::new("."))?]);
    }

    let mut resolved = Vec::with_capacity(paths.len());
    for path in paths {
        let path = resolve_project_path(path)?;
        if !resolved.contains(&path) {
            resolved.push(path);
        }
    }
    Ok(resolved)
}
