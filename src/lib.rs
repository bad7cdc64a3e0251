//! # Asset Manifest
//!
//! Generates the `manifest.json` index for a static portfolio asset
//! repository. The repository is just folders on disk; the manifest tells a
//! remote client (the portfolio app) which files exist so it can build URLs
//! like `base/projects/quick_care/screenshots/1.png` without bundling the
//! assets or keeping a hand-written index.
//!
//! # Pipeline
//!
//! ```text
//! 1. Config    assets.toml (optional)  →  ManifestConfig
//! 2. Scan      asset root              →  Manifest       (pure read)
//! 3. Write     Manifest                →  manifest.json  (only if bytes differ)
//! ```
//!
//! The scan is a pure function of the directory tree and the config, and
//! reads through the [`source::AssetSource`] trait so tests can hand it an
//! in-memory tree. The only write is the final conditional one, which is what
//! lets CI run the generator on every push and commit only real changes.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Category list and asset-type extension table, `assets.toml` loading and validation |
//! | [`scan`] | Walks category → slug → asset type and builds the [`types::Manifest`] |
//! | [`source`] | Read-only directory listing seam (`DiskSource` in production) |
//! | [`naming`] | Extension helpers and the natural-sort comparator |
//! | [`types`] | Manifest model with insertion-ordered maps |
//! | [`document`] | JSON rendering, parsing, and write-if-changed |
//! | [`output`] | CLI summaries and `check` drift reports |
//!
//! # Design Decisions
//!
//! ## Directory-Scoped Classification
//!
//! A file is listed under the asset-type directory it lives in, and only if
//! that type accepts its extension. The extension alone never moves a file to
//! another type: `demo.mp4` dropped into `screenshots/` is skipped, not
//! reported as a video.
//!
//! ## Sparse Output
//!
//! Categories, slugs and asset types with nothing to list are absent from the
//! document rather than present and empty. Clients treat a missing key as "no
//! assets of this kind".
//!
//! ## Byte-Stable Output
//!
//! Keys follow config order (categories, asset types) or natural order
//! (slugs), filenames are natural-sorted, and the JSON is always rendered the
//! same way. Two runs over the same tree produce identical bytes, and the
//! second run does not touch the file.

pub mod config;
pub mod document;
pub mod naming;
pub mod output;
pub mod scan;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
