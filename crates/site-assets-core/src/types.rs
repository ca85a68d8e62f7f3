use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Image formats accepted in the gallery directory
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Webp,
    Gif,
    Other(String),
}

impl ImageFormat {
    /// Determine format from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "png" => Self::Png,
            "jpg" | "jpeg" => Self::Jpeg,
            "webp" => Self::Webp,
            "gif" => Self::Gif,
            other => Self::Other(other.to_string()),
        }
    }

    /// Check if format is supported
    pub fn is_supported(&self) -> bool {
        match self {
            Self::Png | Self::Jpeg | Self::Webp | Self::Gif => true,
            Self::Other(_) => false,
        }
    }
}

/// One gallery image, as written to the JSON manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// File name as found on disk
    pub filename: String,

    /// Text between the prefix and the trailing number, e.g. `washer_dryer`
    pub category: String,

    /// Trailing index, parsed as an integer
    pub number: u64,

    /// Human readable label, e.g. `Washer Dryer 3`
    pub alt: String,
}

/// An sRGB colour parsed from `#rrggbb` notation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn from_hex(value: &str) -> Result<Self> {
        let digits = value
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| {
                Error::Configuration(format!("Expected a #rrggbb colour, got {:?}", value))
            })?;

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
        match (channel(0), channel(2), channel(4)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self { r, g, b }),
            _ => Err(Error::Configuration(format!(
                "Expected a #rrggbb colour, got {:?}",
                value
            ))),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// What happened to the backup copy of an icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupOutcome {
    /// No file existed, so there was nothing to back up
    NothingToBackUp,

    /// A fresh backup was written
    Created,

    /// An earlier backup was kept untouched
    AlreadyPresent,

    /// An earlier backup was replaced with the current file
    Replaced,
}

/// Result of zooming a single icon
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoomOutcome {
    /// Icon rewritten in place
    Zoomed {
        path: PathBuf,
        width: u32,
        height: u32,
        backup: BackupOutcome,
    },

    /// Source file absent, nothing done
    Missing { path: PathBuf },
}

/// Summary of a zoom run
#[derive(Debug, Clone, Default)]
pub struct ZoomReport {
    pub outcomes: Vec<ZoomOutcome>,
}

impl ZoomReport {
    pub fn zoomed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ZoomOutcome::Zoomed { .. }))
            .count()
    }

    pub fn missing(&self) -> impl Iterator<Item = &PathBuf> {
        self.outcomes.iter().filter_map(|o| match o {
            ZoomOutcome::Missing { path } => Some(path),
            _ => None,
        })
    }
}

/// Result of rendering a single icon size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIcon {
    pub size: u32,
    pub path: PathBuf,
    pub backup: BackupOutcome,
}

/// Summary of a generation run; failures carry the error message
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    pub generated: Vec<GeneratedIcon>,
    pub failed: Vec<(u32, String)>,
}

impl GenerateReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Result of restoring icons from their first-run backups
#[derive(Debug, Clone, Default)]
pub struct RestoreReport {
    pub restored: Vec<PathBuf>,
    pub without_backup: Vec<PathBuf>,
}
