//! The `manifest.json` document: rendering, parsing, and conditional writes.
//!
//! The document is committed to version control by CI, so it must be
//! byte-stable: the same tree always renders to the same bytes, and an
//! unchanged document is never rewritten (no mtime churn, no empty commits).
//!
//! Format: pretty-printed JSON with two-space indentation, non-ASCII kept as
//! UTF-8, and a single trailing newline.

use crate::types::Manifest;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Default output filename, written to the asset root.
pub const MANIFEST_FILENAME: &str = "manifest.json";

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("cannot write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render a manifest to document bytes.
pub fn serialize(manifest: &Manifest) -> Result<Vec<u8>, DocumentError> {
    let mut bytes = serde_json::to_vec_pretty(manifest)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Parse document bytes back into a manifest.
pub fn parse(bytes: &[u8]) -> Result<Manifest, DocumentError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Read the existing document, `None` if there isn't one.
pub fn read_existing(path: &Path) -> Result<Option<Vec<u8>>, DocumentError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(DocumentError::Read {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Whether `path` already holds exactly `document`.
pub fn is_up_to_date(path: &Path, document: &[u8]) -> Result<bool, DocumentError> {
    Ok(read_existing(path)?.as_deref() == Some(document))
}

/// Write `document` to `path` unless the file already holds the same bytes.
///
/// Returns `true` when the file was written. Missing parent directories are
/// created.
pub fn write_if_changed(path: &Path, document: &[u8]) -> Result<bool, DocumentError> {
    if is_up_to_date(path, document)? {
        info!("{} unchanged", path.display());
        return Ok(false);
    }

    let write_err = |source| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, document).map_err(write_err)?;
    info!("wrote {} ({} bytes)", path.display(), document.len());
    Ok(true)
}
