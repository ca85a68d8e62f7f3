//! Gallery manifest built from image filenames.
//!
//! Images follow the convention `craigslist_<category>_<number>.<ext>`, where
//! the category may itself contain underscores and digits. The trailing
//! number is always the last digit run before the extension.

use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::Path;

use crate::discovery::{is_hidden_name, is_image_path, list_file_names};
use crate::error::Result;
use crate::safety::write_atomic;
use crate::types::CatalogEntry;

/// Prefix every gallery image carries
pub const FILE_PREFIX: &str = "craigslist_";

/// Shown to the user when names are skipped
pub const EXPECTED_PATTERN: &str = "craigslist_[category]_[number].ext";
pub const EXAMPLE_NAME: &str = "craigslist_washer_dryer_1.png";

static FILENAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^craigslist_(.+)_(\d+)\.(png|jpg|jpeg|webp|gif)$")
        .expect("filename pattern is a valid regex")
});

/// How a single directory entry is treated by the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Follows the naming convention
    Entry(CatalogEntry),

    /// Carries the prefix but breaks the convention
    Skipped,

    /// Not a gallery candidate at all (hidden, not an image, other prefix)
    Ignored,
}

/// Classify one filename without touching the filesystem
pub fn classify(filename: &str) -> Classification {
    if is_hidden_name(filename) || !is_image_path(Path::new(filename)) {
        return Classification::Ignored;
    }

    if let Some(caps) = FILENAME_PATTERN.captures(filename) {
        let category = &caps[1];
        // A digit run too long for u64 cannot be represented in the manifest
        if let Ok(number) = caps[2].parse::<u64>() {
            return Classification::Entry(CatalogEntry {
                filename: filename.to_string(),
                category: category.to_string(),
                number,
                alt: format!("{} {}", display_name(category), number),
            });
        }
        return Classification::Skipped;
    }

    if filename.starts_with(FILE_PREFIX) {
        Classification::Skipped
    } else {
        Classification::Ignored
    }
}

/// `washer_dryer` -> `Washer Dryer`
pub fn display_name(category: &str) -> String {
    category
        .split('_')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Ordered gallery entries plus the names that broke the convention
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
    pub skipped: Vec<String>,
}

impl Catalog {
    /// Build a catalog from bare filenames
    pub fn from_filenames<I, S>(filenames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Catalog::default();

        for name in filenames {
            let name = name.as_ref();
            match classify(name) {
                Classification::Entry(entry) => catalog.entries.push(entry),
                Classification::Skipped => {
                    debug!("Skipping {}: does not match {}", name, EXPECTED_PATTERN);
                    catalog.skipped.push(name.to_string());
                }
                Classification::Ignored => {}
            }
        }

        // Directory order is arbitrary; filename breaks (category, number) ties
        catalog.entries.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then(a.number.cmp(&b.number))
                .then_with(|| a.filename.cmp(&b.filename))
        });
        catalog.entries.dedup_by(|a, b| a.filename == b.filename);
        catalog.skipped.sort();
        catalog.skipped.dedup();

        catalog
    }

    /// Build a catalog from names as read from disk.
    ///
    /// A name that is not valid UTF-8 can never be a catalog entry; if it
    /// otherwise looks like a gallery image with the prefix, it is reported
    /// as skipped under its lossy form.
    pub fn from_os_names<I>(names: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut valid = Vec::new();
        let mut undecodable = Vec::new();
        for name in names {
            match name.into_string() {
                Ok(name) => valid.push(name),
                Err(raw) => undecodable.push(raw.to_string_lossy().into_owned()),
            }
        }

        let mut catalog = Self::from_filenames(valid);
        for lossy in undecodable {
            if !is_hidden_name(&lossy)
                && is_image_path(Path::new(&lossy))
                && lossy.starts_with(FILE_PREFIX)
            {
                debug!("Skipping non UTF-8 name {}", lossy);
                catalog.skipped.push(lossy);
            } else {
                debug!("Ignoring non UTF-8 name {}", lossy);
            }
        }
        catalog.skipped.sort();
        catalog.skipped.dedup();

        catalog
    }

    /// Scan `images_dir` (non-recursively) and build its catalog
    pub fn scan(images_dir: &Path) -> Result<Self> {
        info!("Scanning {}", images_dir.display());
        let names = list_file_names(images_dir)?;
        let catalog = Self::from_os_names(names);

        info!(
            "Found {} gallery images, {} misnamed",
            catalog.entries.len(),
            catalog.skipped.len()
        );
        for name in &catalog.skipped {
            warn!("File does not match {}: {}", EXPECTED_PATTERN, name);
        }

        Ok(catalog)
    }

    /// Number of images per category, keyed by raw category name
    pub fn category_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.category.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// True when every prefixed file followed the naming convention
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Pretty-printed JSON array of the entries
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Write the manifest, replacing whatever was at `output` before
    pub fn write_json(&self, output: &Path) -> Result<()> {
        let json = self.to_json()?;
        write_atomic(output, json.as_bytes())?;
        info!(
            "Wrote {} entries to {}",
            self.entries.len(),
            output.display()
        );
        Ok(())
    }
}
