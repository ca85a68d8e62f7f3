//! Zoom existing icons in place to reduce the padding around their artwork.
//!
//! The image is upscaled with Lanczos3 and the centre window at the original
//! size is cut back out, so consumers that expect a fixed pixel size keep
//! working.

use std::io::{BufWriter, Write};
use std::path::Path;

use image::imageops::FilterType;
use image::DynamicImage;
use log::{info, warn};

use crate::config::ZoomConfig;
use crate::error::Result;
use crate::logging::log_fs_modification;
use crate::safety::{copy_atomic, replace_with, BackupPolicy, PreserveFirst};
use crate::types::{RestoreReport, ZoomOutcome, ZoomReport};

/// Upscale size and crop window for one zoom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomGeometry {
    pub width: u32,
    pub height: u32,
    pub scaled_width: u32,
    pub scaled_height: u32,
    pub left: u32,
    pub top: u32,
}

impl ZoomGeometry {
    pub fn new(width: u32, height: u32, scale: f64) -> Self {
        // Never scale below the original, the crop window must fit
        let scale_dim = |dim: u32| ((dim as f64 * scale).round() as u32).max(dim);
        let scaled_width = scale_dim(width);
        let scaled_height = scale_dim(height);

        let offset = |scaled: u32, dim: u32| {
            let centred = ((scaled - dim) as f64 / 2.0).round() as u32;
            centred.min(scaled - dim)
        };

        Self {
            width,
            height,
            scaled_width,
            scaled_height,
            left: offset(scaled_width, width),
            top: offset(scaled_height, height),
        }
    }
}

/// Upscale by `scale` and cut out the centre at the original size
pub fn zoom_crop(img: &DynamicImage, scale: f64) -> DynamicImage {
    let geometry = ZoomGeometry::new(img.width(), img.height(), scale);

    img.resize_exact(
        geometry.scaled_width,
        geometry.scaled_height,
        FilterType::Lanczos3,
    )
    .crop_imm(geometry.left, geometry.top, geometry.width, geometry.height)
}

/// Zoom one icon file in place, keeping a first-run backup next to it
pub fn zoom_icon(path: &Path, scale: f64) -> Result<ZoomOutcome> {
    if !path.exists() {
        warn!("Skipping {} (not found)", path.display());
        return Ok(ZoomOutcome::Missing {
            path: path.to_path_buf(),
        });
    }

    info!("Processing {}", path.display());
    let original = image::open(path)?;

    let backup = PreserveFirst.back_up(path)?;
    let zoomed = zoom_crop(&original, scale);

    replace_with(path, |file| {
        let mut writer = BufWriter::new(file);
        zoomed.write_to(&mut writer, image::ImageFormat::Png)?;
        writer.flush()?;
        Ok(())
    })?;

    log_fs_modification(
        "zoom",
        path,
        Some(&format!(
            "{}x scale, output {}x{}",
            scale,
            zoomed.width(),
            zoomed.height()
        )),
    );

    Ok(ZoomOutcome::Zoomed {
        path: path.to_path_buf(),
        width: zoomed.width(),
        height: zoomed.height(),
        backup,
    })
}

/// Zoom every configured icon. The first hard failure aborts the run.
pub fn fix_icon_padding(config: &ZoomConfig) -> Result<ZoomReport> {
    config.validate()?;

    let mut report = ZoomReport::default();
    for path in &config.icon_files {
        let outcome = zoom_icon(path, config.scale_factor)?;
        report.outcomes.push(outcome);
    }

    info!(
        "Zoomed {} of {} icons",
        report.zoomed_count(),
        config.icon_files.len()
    );
    Ok(report)
}

/// Put every configured icon back to its first-run backup.
/// The backups stay in place so a later zoom still starts from them.
pub fn restore_icons(config: &ZoomConfig) -> Result<RestoreReport> {
    let mut report = RestoreReport::default();

    for path in &config.icon_files {
        let backup = PreserveFirst.backup_path(path);
        if !backup.exists() {
            warn!("No backup for {}", path.display());
            report.without_backup.push(path.clone());
            continue;
        }

        copy_atomic(&backup, path)?;
        log_fs_modification("restore", path, Some(&backup.display().to_string()));
        report.restored.push(path.clone());
    }

    Ok(report)
}
