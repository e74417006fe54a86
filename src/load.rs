//! Reading inputs from disk and writing the finished document.

use crate::error::{Error, Result};
use crate::input::{PackageInfo, SourceFile};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Read a JSON array of pre-parsed source files.
pub fn load_source_files(path: &Path) -> Result<Vec<SourceFile>> {
    read_json(path)
}

/// Read a package description (`{ "exports": ..., "describe": ... }`).
pub fn load_package(path: &Path) -> Result<PackageInfo> {
    read_json(path)
}

/// Parse source files from an in-memory JSON string, e.g. stdin.
pub fn parse_source_files(json: &str) -> std::result::Result<Vec<SourceFile>, serde_json::Error> {
    serde_json::from_str(json)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the document in one go.
pub fn write_document(path: &Path, text: &str) -> Result<()> {
    info!("Creating \"{}\"", path.display());
    fs::write(path, text).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Expand input arguments into file paths, keeping argument order.
/// Plain paths are used as-is; anything else is treated as a glob whose
/// matches are sorted for deterministic output.
pub fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }

        let mut matches: Vec<PathBuf> = glob::glob(pattern)
            .map_err(|source| Error::Pattern {
                pattern: pattern.clone(),
                source,
            })?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", pattern);
        }
        matches.sort();
        files.extend(matches);
    }
    Ok(files)
}
