//! Shared test utilities for the asset-manifest test suite.
//!
//! Provides an in-memory [`AssetSource`], on-disk fixture builders, and
//! manifest lookups that panic with a readable message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let source = MemorySource::new()
//!     .with_files(&["root/projects/app/screenshots/1.png"])
//!     .with_dirs(&["root/projects/empty"]);
//! let manifest = build_manifest(&source, &config, Path::new("root")).unwrap();
//!
//! assert_eq!(slug_names(&manifest, "projects"), vec!["app"]);
//! ```

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use crate::source::{AssetSource, Entry, SourceError};
use crate::types::Manifest;

// =========================================================================
// In-memory source
// =========================================================================

/// A directory tree held in memory. Parent directories are implied by the
/// files and directories added.
#[derive(Debug, Default)]
pub struct MemorySource {
    files: BTreeSet<PathBuf>,
    dirs: BTreeSet<PathBuf>,
    unreadable: BTreeSet<PathBuf>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_files(mut self, paths: &[&str]) -> Self {
        for path in paths {
            let path = PathBuf::from(path);
            self.add_parents(&path);
            self.files.insert(path);
        }
        self
    }

    pub fn with_dirs(mut self, paths: &[&str]) -> Self {
        for path in paths {
            let path = PathBuf::from(path);
            self.add_parents(&path);
            self.dirs.insert(path);
        }
        self
    }

    /// Listing this directory fails with `PermissionDenied`.
    pub fn with_unreadable(mut self, path: &str) -> Self {
        self.unreadable.insert(PathBuf::from(path));
        self
    }

    fn add_parents(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }
}

fn child_name(parent: &Path, path: &Path) -> Option<String> {
    (path.parent() == Some(parent))
        .then(|| path.file_name().and_then(|n| n.to_str()).map(str::to_string))
        .flatten()
}

impl AssetSource for MemorySource {
    fn list(&self, dir: &Path) -> Result<Option<Vec<Entry>>, SourceError> {
        if self.unreadable.contains(dir) {
            return Err(SourceError {
                path: dir.to_path_buf(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
            });
        }
        if !self.dirs.contains(dir) {
            return Ok(None);
        }

        let mut entries: Vec<Entry> = self
            .dirs
            .iter()
            .filter_map(|d| child_name(dir, d))
            .map(|name| Entry::dir(&name))
            .collect();
        entries.extend(
            self.files
                .iter()
                .filter_map(|f| child_name(dir, f))
                .map(|name| Entry::file(&name)),
        );
        // Real directory listings come back in no particular order.
        entries.reverse();
        Ok(Some(entries))
    }
}

// =========================================================================
// On-disk fixtures
// =========================================================================

/// Create each relative path under `root` as a small file, with parents.
pub fn touch_all(root: &Path, paths: &[&str]) {
    for path in paths {
        let full = root.join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&full, b"fixture").unwrap();
    }
}

// =========================================================================
// Manifest lookups — panics with a clear message on miss
// =========================================================================

/// Category keys in manifest order.
pub fn category_names(manifest: &Manifest) -> Vec<&str> {
    manifest.categories.keys().map(String::as_str).collect()
}

/// Slug keys of a category in manifest order. Panics if the category is absent.
pub fn slug_names<'a>(manifest: &'a Manifest, category: &str) -> Vec<&'a str> {
    manifest
        .category(category)
        .unwrap_or_else(|| {
            panic!(
                "category '{category}' not found. Available: {:?}",
                category_names(manifest)
            )
        })
        .keys()
        .map(String::as_str)
        .collect()
}

/// Filenames listed under one category/slug/type. Panics on any miss.
pub fn asset_files<'a>(
    manifest: &'a Manifest,
    category: &str,
    slug: &str,
    asset_type: &str,
) -> Vec<&'a str> {
    let assets = manifest.slug(category, slug).unwrap_or_else(|| {
        panic!(
            "slug '{category}/{slug}' not found. Available: {:?}",
            slug_names(manifest, category)
        )
    });
    assets
        .assets
        .get(asset_type)
        .unwrap_or_else(|| {
            let types: Vec<&str> = assets.assets.keys().map(String::as_str).collect();
            panic!("asset type '{asset_type}' not found in '{category}/{slug}'. Available: {types:?}")
        })
        .iter()
        .map(String::as_str)
        .collect()
}
