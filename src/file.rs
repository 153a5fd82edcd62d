// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::ReportError;

/// Ensure a directory exists (mkdir -p).
pub fn ensure_directory(dir: &Path) -> Result<(), ReportError> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    if dir.exists() && !dir.is_dir() {
        return Err(ReportError::Usage(format!("Path exists but is not a directory: {}", dir.display())));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Ensure the directory that will hold `path` exists.
pub fn ensure_parent(path: &Path) -> Result<(), ReportError> {
    match path.parent() {
        Some(parent) => ensure_directory(parent),
        None => Ok(()),
    }
}

/// Copy a generated report to a user-chosen destination.
/// A destination that is (or looks like) a directory keeps the source file name.
pub fn copy_report(src: &Path, dest: &Path) -> Result<PathBuf, ReportError> {
    let target = if looks_like_dir_hint(dest) || dest.is_dir() {
        ensure_directory(dest)?;
        match src.file_name() {
            Some(name) => dest.join(name),
            None => return Err(ReportError::Usage(format!("Not a file: {}", src.display()))),
        }
    } else {
        ensure_parent(dest)?;
        dest.to_path_buf()
    };
    fs::copy(src, &target)?;
    logf!("Saved report → {}", target.display());
    Ok(target)
}

/// Accept either slash style from a typed path.
pub fn normalize_separators(p: &str) -> PathBuf {
    let sep = std::path::MAIN_SEPARATOR;
    PathBuf::from(p.trim().chars().map(|c| if c == '/' || c == '\\' { sep } else { c }).collect::<String>())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.as_os_str().to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_separator_means_directory() {
        assert!(looks_like_dir_hint(Path::new("out/")));
        assert!(looks_like_dir_hint(Path::new("out\\")));
        assert!(!looks_like_dir_hint(Path::new("out/report.pdf")));
    }
}
