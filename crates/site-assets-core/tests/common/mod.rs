#![allow(dead_code)]

use image::{Rgba, RgbaImage};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use site_assets_core::Config;

/// Create a file with dummy data; the catalog only looks at names
pub fn create_dummy_file(dir: &Path, name: &str) -> PathBuf {
    let file_path = dir.join(name);
    let mut file = File::create(&file_path).unwrap();
    // Write some dummy data to simulate an image
    file.write_all(b"DUMMY IMAGE DATA").unwrap();
    file_path
}

/// Write a real PNG with a diagonal pattern so zooming changes the pixels
pub fn create_icon(path: &Path, width: u32, height: u32) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let img = RgbaImage::from_fn(width, height, |x, y| {
        let v = ((x + y) * 255 / (width + height)) as u8;
        Rgba([v, 255 - v, 96, 255])
    });
    img.save(path).unwrap();
    path.to_path_buf()
}

/// Lay out a site tree with an images/ directory holding `names`
pub fn create_site(root: &Path, names: &[&str]) -> Config {
    let config = Config::with_root(root);
    fs::create_dir_all(&config.gallery.images_dir).unwrap();
    for name in names {
        create_dummy_file(&config.gallery.images_dir, name);
    }
    config
}
