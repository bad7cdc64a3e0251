//! Filesystem scanning and manifest generation.
//!
//! Walks exactly three directory levels below the asset root and lists the
//! files found at the bottom:
//!
//! ```text
//! portfolio-assets/                # Asset root
//! ├── projects/                    # Category (from config, never discovered)
//! │   ├── quick_care/              # Slug (directory name, used verbatim)
//! │   │   ├── logo.png             # Optional slug logo
//! │   │   ├── screenshots/         # Asset type (from config)
//! │   │   │   ├── 1.png
//! │   │   │   ├── 2.png
//! │   │   │   └── 10.jpg
//! │   │   └── videos/
//! │   │       └── demo.mp4
//! │   └── empty_proj/              # No assets → left out of the manifest
//! └── certifications/
//! ```
//!
//! ## Rules
//!
//! - Categories, slugs and asset types missing on disk contribute nothing.
//! - A file is listed under the asset-type directory it physically lives in,
//!   and only if that type accepts its extension. Classification is never
//!   used to move a file to another type.
//! - Hidden entries (leading `.`) are skipped at every level.
//! - Anything nested below an asset-type directory is ignored.
//! - Empty levels are omitted: no empty arrays, no empty objects.
//! - A directory that exists but cannot be read aborts the scan.

use crate::config::{AssetType, ManifestConfig};
use crate::naming;
use crate::source::{AssetSource, EntryKind, SourceError};
use crate::types::{CategoryAssets, Manifest, SlugAssets};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Unreadable(#[from] SourceError),
}

/// Global classification: the first asset type (in config order) whose
/// extension set contains this file's extension.
///
/// The scanner itself is directory-scoped and only uses this to describe
/// files it skips.
pub fn classify<'a>(config: &'a ManifestConfig, filename: &str) -> Option<&'a AssetType> {
    config.asset_types.iter().find(|t| t.accepts(filename))
}

/// Regular files directly inside `dir` that `asset_type` accepts, in natural
/// order. A missing directory yields an empty list.
pub fn list_assets(
    source: &dyn AssetSource,
    config: &ManifestConfig,
    dir: &Path,
    asset_type: &AssetType,
) -> Result<Vec<String>, ScanError> {
    let Some(entries) = source.list(dir)? else {
        return Ok(Vec::new());
    };

    let mut files = Vec::new();
    for entry in entries {
        if entry.kind != EntryKind::File || naming::is_hidden(&entry.name) {
            continue;
        }
        if asset_type.accepts(&entry.name) {
            files.push(entry.name);
            continue;
        }
        match classify(config, &entry.name) {
            Some(other) => debug!(
                "skipping {}: .{} belongs in {}/, not {}/",
                dir.join(&entry.name).display(),
                naming::extension_of(&entry.name).unwrap_or_default(),
                other.name,
                asset_type.name
            ),
            None => debug!(
                "skipping {}: unrecognized extension",
                dir.join(&entry.name).display()
            ),
        }
    }

    naming::natural_sort(&mut files);
    Ok(files)
}

/// Logo and per-type file lists for one slug directory.
pub fn scan_slug(
    source: &dyn AssetSource,
    config: &ManifestConfig,
    slug_dir: &Path,
) -> Result<SlugAssets, ScanError> {
    let mut slug = SlugAssets::default();

    if let Some(entries) = source.list(slug_dir)? {
        let mut logos: Vec<String> = entries
            .into_iter()
            .filter(|e| e.kind == EntryKind::File && config.logo.matches(&e.name))
            .map(|e| e.name)
            .collect();
        naming::natural_sort(&mut logos);
        slug.logo = logos.into_iter().next();
    }

    for asset_type in &config.asset_types {
        let files = list_assets(source, config, &slug_dir.join(&asset_type.name), asset_type)?;
        if !files.is_empty() {
            slug.assets.insert(asset_type.name.clone(), files);
        }
    }

    Ok(slug)
}

/// Slugs of one category, in natural order, empty slugs dropped.
fn scan_category(
    source: &dyn AssetSource,
    config: &ManifestConfig,
    category_dir: &Path,
) -> Result<CategoryAssets, ScanError> {
    let mut category = CategoryAssets::new();

    let Some(entries) = source.list(category_dir)? else {
        debug!("category {} not present", category_dir.display());
        return Ok(category);
    };

    let mut slugs: Vec<String> = entries
        .into_iter()
        .filter(|e| e.kind == EntryKind::Dir && !naming::is_hidden(&e.name))
        .map(|e| e.name)
        .collect();
    naming::natural_sort(&mut slugs);

    for name in slugs {
        let slug = scan_slug(source, config, &category_dir.join(&name))?;
        if slug.is_empty() {
            debug!("slug {}/{} has no assets", category_dir.display(), name);
            continue;
        }
        category.insert(name, slug);
    }

    Ok(category)
}

/// Build the manifest for the asset tree rooted at `root`.
pub fn build_manifest(
    source: &dyn AssetSource,
    config: &ManifestConfig,
    root: &Path,
) -> Result<Manifest, ScanError> {
    let mut manifest = Manifest::default();

    for name in &config.categories {
        let category = scan_category(source, config, &root.join(name))?;
        if !category.is_empty() {
            manifest.categories.insert(name.clone(), category);
        }
    }

    Ok(manifest)
}
