//! Core functionality for a static site's asset pipeline.
//!
//! This library provides the building blocks behind the `site-assets` tool:
//! - Gallery manifest generation from image filename conventions
//! - Zooming existing icons to reduce their padding
//! - Rendering new icons from a parametric SVG template
//! - Backup-then-replace file writes

// -- External Dependencies --
use log::info;

// -- Internal Modules --
mod error;

// -- Public Re-exports --
pub use catalog::{Catalog, Classification};
pub use config::*;
pub use error::{Error, Result};
pub use icons::preflight;
pub use types::*;

// -- Public Modules --
pub mod catalog;
pub mod config;
pub mod discovery;
pub mod icons;
pub mod logging;
pub mod safety;
pub mod types;

/// Main entry point for the asset pipeline
pub struct SiteAssets {
    config: Config,
}

impl SiteAssets {
    /// Create a new SiteAssets with the provided configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scan the images directory and write the gallery manifest.
    ///
    /// The manifest is written even when some files were skipped; callers
    /// decide what to do about `Catalog::skipped`.
    pub fn build_gallery(&self) -> Result<Catalog> {
        let gallery = &self.config.gallery;
        let catalog = Catalog::scan(&gallery.images_dir)?;
        catalog.write_json(&gallery.output_file)?;
        Ok(catalog)
    }

    /// Zoom the configured icons in place
    pub fn fix_icon_padding(&self) -> Result<ZoomReport> {
        preflight()?;
        info!(
            "Zooming {} icons at {}x",
            self.config.zoom.icon_files.len(),
            self.config.zoom.scale_factor
        );
        icons::fix_icon_padding(&self.config.zoom)
    }

    /// Render a new icon set from the template
    pub fn generate_icons(&self) -> Result<GenerateReport> {
        preflight()?;
        icons::generate_icons(&self.config.generate)
    }

    /// Restore zoomed icons from their first-run backups
    pub fn restore_icons(&self) -> Result<RestoreReport> {
        icons::restore_icons(&self.config.zoom)
    }
}
