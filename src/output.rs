//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! ## Generate
//!
//! ```text
//! projects: 2 items
//!     quick_care (4 files)
//!     wallet (1 file)
//! education: 1 item
//!     uni (1 file)
//!
//! Found 6 assets across 3 items
//! Wrote manifest.json
//! ```
//!
//! ## Check
//!
//! ```text
//! projects/quick_care: changed
//! projects/wallet: added
//! education/old_course: removed
//!
//! manifest.json is out of date
//! ```

use crate::types::{Manifest, SlugAssets};
use std::path::Path;

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Per-category inventory followed by a totals line.
pub fn format_summary(manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();

    for (category, slugs) in manifest.categories.iter() {
        lines.push(format!("{category}: {}", plural(slugs.len(), "item", "items")));
        for (slug, assets) in slugs.iter() {
            lines.push(format!(
                "    {slug} ({})",
                plural(assets.file_count(), "file", "files")
            ));
        }
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Found {} across {}",
        plural(manifest.file_count(), "asset", "assets"),
        plural(manifest.slug_count(), "item", "items")
    ));
    lines
}

/// Summary plus the outcome of the conditional write.
pub fn format_generate_output(manifest: &Manifest, output: &Path, changed: bool) -> Vec<String> {
    let mut lines = format_summary(manifest);
    if changed {
        lines.push(format!("Wrote {}", output.display()));
    } else {
        lines.push(format!("{} unchanged", output.display()));
    }
    lines
}

/// How one slug differs between the manifest on disk and a fresh scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugChange {
    Added,
    Removed,
    Changed,
}

impl SlugChange {
    fn label(self) -> &'static str {
        match self {
            SlugChange::Added => "added",
            SlugChange::Removed => "removed",
            SlugChange::Changed => "changed",
        }
    }
}

fn slug_in<'a>(manifest: Option<&'a Manifest>, category: &str, slug: &str) -> Option<&'a SlugAssets> {
    manifest?.slug(category, slug)
}

/// Slug-level differences, fresh-scan order first, then removals in their
/// old order.
pub fn diff_manifests(old: Option<&Manifest>, new: &Manifest) -> Vec<(String, String, SlugChange)> {
    let mut changes = Vec::new();

    for (category, slugs) in new.categories.iter() {
        for (slug, assets) in slugs.iter() {
            match slug_in(old, category, slug) {
                None => changes.push((category.to_string(), slug.to_string(), SlugChange::Added)),
                Some(previous) if previous != assets => {
                    changes.push((category.to_string(), slug.to_string(), SlugChange::Changed))
                }
                Some(_) => {}
            }
        }
    }

    if let Some(old) = old {
        for (category, slugs) in old.categories.iter() {
            for slug in slugs.keys() {
                if new.slug(category, slug).is_none() {
                    changes.push((category.to_string(), slug.to_string(), SlugChange::Removed));
                }
            }
        }
    }

    changes
}

/// Result of `check`: the drift listing when stale, a single line otherwise.
///
/// `old` is `None` when there is no manifest on disk or it could not be parsed.
pub fn format_check_output(
    old: Option<&Manifest>,
    new: &Manifest,
    output: &Path,
    up_to_date: bool,
) -> Vec<String> {
    if up_to_date {
        return vec![format!("{} is up to date", output.display())];
    }

    let mut lines: Vec<String> = diff_manifests(old, new)
        .into_iter()
        .map(|(category, slug, change)| format!("{category}/{slug}: {}", change.label()))
        .collect();
    if old.is_none() {
        lines.insert(0, format!("{} missing or unreadable", output.display()));
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!("{} is out of date", output.display()));
    lines
}

pub fn print_generate_output(manifest: &Manifest, output: &Path, changed: bool) {
    for line in format_generate_output(manifest, output, changed) {
        println!("{}", line);
    }
}

pub fn print_check_output(old: Option<&Manifest>, new: &Manifest, output: &Path, up_to_date: bool) {
    for line in format_check_output(old, new, output, up_to_date) {
        println!("{}", line);
    }
}
