//! Manifest data model.
//!
//! The manifest is three levels of string-keyed maps ending in filename
//! lists. Key order is part of the output contract (the document must be
//! byte-stable across runs), so every level is an [`IndexMap`], which
//! serializes in insertion order. The scanner inserts categories and asset
//! types in config order and slugs in natural order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Everything listed for one slug.
///
/// Serializes as a single flat object: `"logo"` first when present, then one
/// key per non-empty asset type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugAssets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(flatten)]
    pub assets: IndexMap<String, Vec<String>>,
}

impl SlugAssets {
    pub fn is_empty(&self) -> bool {
        self.logo.is_none() && self.assets.is_empty()
    }

    /// Files listed for this slug, logo included.
    pub fn file_count(&self) -> usize {
        self.assets.values().map(Vec::len).sum::<usize>() + usize::from(self.logo.is_some())
    }
}

/// Slug name → assets, for one category.
pub type CategoryAssets = IndexMap<String, SlugAssets>;

/// The generated manifest: category → slug → asset type → filenames.
///
/// Only non-empty levels are ever inserted, so an absent key always means
/// "nothing there".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub categories: IndexMap<String, CategoryAssets>,
}

impl Manifest {
    pub fn category(&self, name: &str) -> Option<&CategoryAssets> {
        self.categories.get(name)
    }

    pub fn slug(&self, category: &str, slug: &str) -> Option<&SlugAssets> {
        self.category(category)?.get(slug)
    }

    /// Total number of slugs across all categories.
    pub fn slug_count(&self) -> usize {
        self.categories.values().map(IndexMap::len).sum()
    }

    /// Total number of files listed, logos included.
    pub fn file_count(&self) -> usize {
        self.categories
            .values()
            .flat_map(IndexMap::values)
            .map(SlugAssets::file_count)
            .sum()
    }
}
