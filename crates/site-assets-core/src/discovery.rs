use log::debug;
use std::ffi::OsString;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::types::ImageFormat;

/// List the names of regular files directly inside `directory`.
///
/// Subdirectories are not descended into. Names are returned as found on
/// disk, including ones that are not valid UTF-8.
pub fn list_file_names(directory: &Path) -> Result<Vec<OsString>> {
    // Check if directory exists
    if !directory.is_dir() {
        return Err(Error::FileNotFound(directory.to_path_buf()));
    }

    let mut names = Vec::new();

    for entry in WalkDir::new(directory).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| match e.into_io_error() {
            Some(io) => Error::Io(io),
            None => Error::FileNotFound(directory.to_path_buf()),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        names.push(entry.file_name().to_os_string());
    }

    debug!("Listed {} files in {}", names.len(), directory.display());
    Ok(names)
}

/// Get image format from file extension
fn get_image_format(path: &Path) -> Option<ImageFormat> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(ImageFormat::from_extension)
}

/// Returns if the given path has a supported image extension
pub fn is_image_path(path: &Path) -> bool {
    match get_image_format(path) {
        Some(format) => format.is_supported(),
        None => false,
    }
}

/// Returns if the name is a dotfile such as `.DS_Store`
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    fn create_file(dir: &Path, name: &str) {
        let mut file = File::create(dir.join(name)).unwrap();
        file.write_all(b"DUMMY IMAGE DATA").unwrap();
    }

    #[test]
    fn test_is_image_path() {
        assert!(is_image_path(Path::new("test.jpg")));
        assert!(is_image_path(Path::new("test.JPEG")));
        assert!(is_image_path(Path::new("test.png")));
        assert!(is_image_path(Path::new("test.webp")));
        assert!(is_image_path(Path::new("test.Gif")));
        assert!(!is_image_path(Path::new("test.tiff")));
        assert!(!is_image_path(Path::new("test.txt")));
        assert!(!is_image_path(Path::new("test")));
    }

    #[test]
    fn test_is_hidden_name() {
        assert!(is_hidden_name(".DS_Store"));
        assert!(is_hidden_name(".craigslist_couch_1.png"));
        assert!(!is_hidden_name("craigslist_couch_1.png"));
    }

    #[test]
    fn test_list_file_names_is_shallow() {
        let dir = tempdir().unwrap();
        create_file(dir.path(), "a.png");
        create_file(dir.path(), "b.txt");

        let subdir = dir.path().join("nested");
        fs::create_dir(&subdir).unwrap();
        create_file(&subdir, "c.png");

        let mut names = list_file_names(dir.path()).unwrap();
        names.sort();

        assert_eq!(names, vec![OsString::from("a.png"), OsString::from("b.txt")]);
    }

    #[test]
    fn test_list_file_names_nonexistent_directory() {
        let result = list_file_names(Path::new("/path/that/does/not/exist"));

        // Should return a FileNotFound error
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }
}
