//! Render a fresh set of icons from the SVG template.
//!
//! Meant to be re-run while iterating on the design: each run refreshes the
//! `.old` copy of whatever it replaces, and one failing size does not stop
//! the others.

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::config::{icon_filename, GenerateConfig};
use crate::error::{Error, Result};
use crate::icons::template::{IconRenderer, IconTemplate};
use crate::logging::log_fs_modification;
use crate::safety::{write_atomic, BackupPolicy, RefreshEachRun};
use crate::types::{GenerateReport, GeneratedIcon};

/// Output path for an icon size, or a configuration error for unknown sizes
pub fn icon_path(output_dir: &Path, size: u32) -> Result<PathBuf> {
    icon_filename(size)
        .map(|name| output_dir.join(name))
        .ok_or_else(|| Error::Configuration(format!("No icon filename is defined for size {}", size)))
}

/// Render and write a single icon
pub fn generate_icon(
    renderer: &IconRenderer,
    config: &GenerateConfig,
    size: u32,
) -> Result<GeneratedIcon> {
    let path = icon_path(&config.output_dir, size)?;
    let template = IconTemplate::new(size, config)?;
    let png = renderer.render_png(&template)?;

    let backup = RefreshEachRun.back_up(&path)?;
    write_atomic(&path, &png)?;
    log_fs_modification("generate", &path, Some(&format!("{}x{}", size, size)));

    Ok(GeneratedIcon { size, path, backup })
}

/// Render every configured size. Sizes without a known filename are rejected
/// up front; failures on individual icons are collected in the report.
pub fn generate_icons(config: &GenerateConfig) -> Result<GenerateReport> {
    config.validate()?;

    if !config.output_dir.exists() {
        fs::create_dir_all(&config.output_dir)?;
        log_fs_modification("create_dir", &config.output_dir, None);
    }

    let renderer = IconRenderer::new();
    let mut report = GenerateReport::default();

    for &size in &config.sizes {
        info!("Creating {}x{} icon", size, size);
        match generate_icon(&renderer, config, size) {
            Ok(icon) => report.generated.push(icon),
            Err(e) => {
                error!("Failed to create {}x{} icon: {}", size, size, e);
                report.failed.push((size, e.to_string()));
            }
        }
    }

    info!(
        "Generated {} icons, {} failed",
        report.generated.len(),
        report.failed.len()
    );
    Ok(report)
}
