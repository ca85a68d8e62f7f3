use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::Rgb;

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Icon sizes the generator knows how to name, with their output filenames
pub const ICON_NAMES: [(u32, &str); 4] = [
    (180, "apple-touch-icon.png"),
    (192, "web-app-manifest-192x192.png"),
    (512, "web-app-manifest-512x512.png"),
    (96, "favicon-96x96.png"),
];

/// Look up the output filename for a generated icon size
pub fn icon_filename(size: u32) -> Option<&'static str> {
    ICON_NAMES
        .iter()
        .find(|(known, _)| *known == size)
        .map(|(_, name)| *name)
}

/// Settings for the gallery manifest builder
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    /// Directory scanned for gallery images
    pub images_dir: PathBuf,

    /// Where the JSON manifest is written
    pub output_file: PathBuf,
}

/// Settings for zooming existing icons
#[derive(Debug, Clone)]
pub struct ZoomConfig {
    /// Icons rewritten in place
    pub icon_files: Vec<PathBuf>,

    /// Upscale factor applied before the centre crop
    pub scale_factor: f64,
}

/// Settings for rendering new icons from the SVG template
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Directory the generated icons are written to
    pub output_dir: PathBuf,

    /// Pixel sizes to render, each must have an entry in `ICON_NAMES`
    pub sizes: Vec<u32>,

    /// Top-left gradient stop
    pub gradient_start: String,

    /// Bottom-right gradient stop
    pub gradient_end: String,

    /// Glyph drawn on top of the disc
    pub glyph: char,

    /// Glyph fill colour
    pub glyph_color: String,

    /// Padding on each side, as a fraction of the icon size
    pub padding_ratio: f64,

    /// Glyph font size, as a fraction of the disc diameter
    pub glyph_ratio: f64,
}

/// Configuration for the asset pipeline
#[derive(Debug, Clone)]
pub struct Config {
    pub gallery: GalleryConfig,
    pub zoom: ZoomConfig,
    pub generate: GenerateConfig,

    /// Log level
    pub log_level: LogLevel,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from("images"),
            output_file: PathBuf::from("gallery-data.json"),
        }
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            icon_files: vec![
                PathBuf::from("my-favicon/apple-touch-icon.png"),
                PathBuf::from("my-favicon/web-app-manifest-192x192.png"),
                PathBuf::from("my-favicon/web-app-manifest-512x512.png"),
            ],
            scale_factor: 2.5,
        }
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("my-favicon"),
            sizes: vec![180, 192, 512, 96],
            gradient_start: "#667eea".to_string(),
            gradient_end: "#764ba2".to_string(),
            glyph: 'F',
            glyph_color: "#ffffff".to_string(),
            padding_ratio: 0.15,
            glyph_ratio: 0.6,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gallery: GalleryConfig::default(),
            zoom: ZoomConfig::default(),
            generate: GenerateConfig::default(),
            log_level: LogLevel::Info,
        }
    }
}

impl Config {
    /// Default configuration with every relative path resolved against `root`
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let mut config = Self::default();

        config.gallery.images_dir = root.join(&config.gallery.images_dir);
        config.gallery.output_file = root.join(&config.gallery.output_file);
        config.zoom.icon_files = config
            .zoom
            .icon_files
            .iter()
            .map(|path| root.join(path))
            .collect();
        config.generate.output_dir = root.join(&config.generate.output_dir);

        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.zoom.validate()?;
        self.generate.validate()
    }
}

impl ZoomConfig {
    pub fn validate(&self) -> Result<()> {
        // Anything at or below 1.0 would shrink the content or do nothing
        if !self.scale_factor.is_finite() || self.scale_factor <= 1.0 {
            return Err(Error::Configuration(format!(
                "Zoom scale factor must be greater than 1, got {}",
                self.scale_factor
            )));
        }

        Ok(())
    }
}

impl GenerateConfig {
    pub fn validate(&self) -> Result<()> {
        let unmapped: Vec<String> = self
            .sizes
            .iter()
            .filter(|size| icon_filename(**size).is_none())
            .map(|size| size.to_string())
            .collect();
        if !unmapped.is_empty() {
            return Err(Error::Configuration(format!(
                "No icon filename is defined for size(s): {}",
                unmapped.join(", ")
            )));
        }

        if !(0.0..0.5).contains(&self.padding_ratio) {
            return Err(Error::Configuration(format!(
                "Padding ratio must be in [0, 0.5), got {}",
                self.padding_ratio
            )));
        }

        if !self.glyph_ratio.is_finite() || self.glyph_ratio <= 0.0 {
            return Err(Error::Configuration(format!(
                "Glyph ratio must be positive, got {}",
                self.glyph_ratio
            )));
        }

        for color in [&self.gradient_start, &self.gradient_end, &self.glyph_color] {
            Rgb::from_hex(color)?;
        }

        Ok(())
    }
}
