//! Read-only view of the asset tree.
//!
//! The [`AssetSource`] trait is the only way the scanner touches the
//! filesystem, so manifest building stays a pure function of a directory
//! snapshot. The production implementation is [`DiskSource`]; tests can use
//! the in-memory source from `test_helpers`.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;
use walkdir::WalkDir;

/// What a directory entry is, after following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Other,
}

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
}

impl Entry {
    pub fn file(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: EntryKind::File,
        }
    }

    pub fn dir(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: EntryKind::Dir,
        }
    }
}

/// Non-recursive directory listing.
pub trait AssetSource {
    /// List the immediate children of `dir`.
    ///
    /// Returns `Ok(None)` when `dir` does not exist or is not a directory;
    /// absence is not an error. Any other failure is returned as `Err`.
    /// Names are the exact on-disk names; an entry whose name is not valid
    /// UTF-8 cannot appear in the manifest and is left out.
    fn list(&self, dir: &Path) -> Result<Option<Vec<Entry>>, SourceError>;
}

/// Listing failure for a directory that exists but cannot be read.
#[derive(Error, Debug)]
#[error("cannot read {}: {source}", .path.display())]
pub struct SourceError {
    pub path: PathBuf,
    pub source: io::Error,
}

/// Reads the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskSource;

impl AssetSource for DiskSource {
    fn list(&self, dir: &Path) -> Result<Option<Vec<Entry>>, SourceError> {
        match std::fs::metadata(dir) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(SourceError {
                    path: dir.to_path_buf(),
                    source: e,
                });
            }
        }

        let mut entries = Vec::new();
        for item in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let item = item.map_err(|e| SourceError {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf()),
                source: e.into(),
            })?;
            let kind = if item.path_is_symlink() {
                // Dangling links count as neither file nor directory.
                std::fs::metadata(item.path())
                    .map(|m| kind_of(m.file_type()))
                    .unwrap_or(EntryKind::Other)
            } else {
                kind_of(item.file_type())
            };
            let name = match item.file_name().to_os_string().into_string() {
                Ok(name) => name,
                Err(_) => {
                    warn!("skipping {}: name is not valid UTF-8", item.path().display());
                    continue;
                }
            };
            entries.push(Entry { name, kind });
        }
        Ok(Some(entries))
    }
}

fn kind_of(file_type: std::fs::FileType) -> EntryKind {
    if file_type.is_dir() {
        EntryKind::Dir
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    }
}
