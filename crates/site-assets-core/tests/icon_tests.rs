mod common;

use std::fs;

use common::create_icon;
use site_assets_core::safety::{BackupPolicy, PreserveFirst, RefreshEachRun};
use site_assets_core::{BackupOutcome, Config, Error, SiteAssets, ZoomOutcome};
use tempfile::tempdir;

#[test]
fn test_fix_icons_keeps_dimensions_and_skips_missing() {
    let dir = tempdir().unwrap();
    let config = Config::with_root(dir.path());
    let icons = config.zoom.icon_files.clone();
    create_icon(&icons[0], 180, 180);
    create_icon(&icons[1], 192, 192);
    // icons[2] is left out on purpose

    let report = SiteAssets::new(config).fix_icon_padding().unwrap();

    assert_eq!(report.zoomed_count(), 2);
    assert_eq!(report.missing().collect::<Vec<_>>(), vec![&icons[2]]);
    for (path, size) in [(&icons[0], 180), (&icons[1], 192)] {
        let img = image::open(path).unwrap();
        assert_eq!((img.width(), img.height()), (size, size));
    }
    assert!(!icons[2].exists());
}

#[test]
fn test_fix_icons_twice_keeps_first_backup() {
    let dir = tempdir().unwrap();
    let config = Config::with_root(dir.path());
    let icon = config.zoom.icon_files[0].clone();
    create_icon(&icon, 64, 64);
    let pristine = fs::read(&icon).unwrap();
    let assets = SiteAssets::new(config);

    let first = assets.fix_icon_padding().unwrap();
    let after_first = fs::read(&icon).unwrap();
    let second = assets.fix_icon_padding().unwrap();

    assert!(matches!(
        first.outcomes[0],
        ZoomOutcome::Zoomed {
            backup: BackupOutcome::Created,
            ..
        }
    ));
    assert!(matches!(
        second.outcomes[0],
        ZoomOutcome::Zoomed {
            backup: BackupOutcome::AlreadyPresent,
            ..
        }
    ));

    // The backup still holds the untouched original, not the first result
    let backup = PreserveFirst.backup_path(&icon);
    assert_eq!(fs::read(&backup).unwrap(), pristine);
    assert_ne!(fs::read(&backup).unwrap(), after_first);

    let backups: Vec<_> = fs::read_dir(icon.parent().unwrap())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".backup"))
        .collect();
    assert_eq!(backups.len(), 1);
}

#[test]
fn test_invalid_scale_rejected_before_any_write() {
    let dir = tempdir().unwrap();
    let mut config = Config::with_root(dir.path());
    config.zoom.scale_factor = 0.8;
    let icon = config.zoom.icon_files[0].clone();
    create_icon(&icon, 32, 32);
    let before = fs::read(&icon).unwrap();

    let result = SiteAssets::new(config).fix_icon_padding();

    assert!(matches!(result, Err(Error::Configuration(_))));
    assert_eq!(fs::read(&icon).unwrap(), before);
    assert!(!PreserveFirst.backup_path(&icon).exists());
}

#[test]
fn test_generated_192_icon_has_centred_disc() {
    let dir = tempdir().unwrap();
    let mut config = Config::with_root(dir.path());
    config.generate.sizes = vec![192];

    let report = SiteAssets::new(config).generate_icons().unwrap();
    assert!(report.is_success());

    let img = image::open(&report.generated[0].path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (192, 192));

    let alpha = |x: u32, y: u32| img.get_pixel(x, y)[3];

    // Disc spans 29..163 on both axes (diameter 134 centred at 96)
    assert_eq!(alpha(96, 96), 255);
    for (x, y) in [(32, 96), (160, 96), (96, 32), (96, 160)] {
        assert_eq!(alpha(x, y), 255, "expected opaque at ({}, {})", x, y);
    }
    for (x, y) in [(25, 96), (167, 96), (96, 25), (96, 167), (0, 0), (191, 191), (40, 40)] {
        assert_eq!(alpha(x, y), 0, "expected transparent at ({}, {})", x, y);
    }

    // Gradient runs from blue-ish top-left to purple bottom-right
    let top_left = img.get_pixel(55, 55);
    let bottom_right = img.get_pixel(137, 137);
    assert!(top_left[2] > bottom_right[2]);
    assert!(top_left[0] < bottom_right[0]);
}

#[test]
fn test_generate_refreshes_old_backup_each_run() {
    let dir = tempdir().unwrap();
    let mut config = Config::with_root(dir.path());
    config.generate.sizes = vec![96];
    let icon = config.generate.output_dir.join("favicon-96x96.png");
    create_icon(&icon, 96, 96);
    let hand_made = fs::read(&icon).unwrap();
    let assets = SiteAssets::new(config);

    let first = assets.generate_icons().unwrap();
    assert_eq!(first.generated[0].backup, BackupOutcome::Created);
    let old = RefreshEachRun.backup_path(&icon);
    assert_eq!(fs::read(&old).unwrap(), hand_made);

    let generated = fs::read(&icon).unwrap();
    let second = assets.generate_icons().unwrap();
    assert_eq!(second.generated[0].backup, BackupOutcome::Replaced);
    assert_eq!(fs::read(&old).unwrap(), generated);
}

#[test]
fn test_unmapped_size_is_configuration_error() {
    let dir = tempdir().unwrap();
    let mut config = Config::with_root(dir.path());
    config.generate.sizes = vec![180, 256];
    let output_dir = config.generate.output_dir.clone();

    let result = SiteAssets::new(config).generate_icons();

    assert!(matches!(result, Err(Error::Configuration(_))));
    assert!(!output_dir.exists());
}

#[test]
fn test_restore_after_fix() {
    let dir = tempdir().unwrap();
    let config = Config::with_root(dir.path());
    let icon = config.zoom.icon_files[1].clone();
    create_icon(&icon, 48, 48);
    let pristine = fs::read(&icon).unwrap();
    let assets = SiteAssets::new(config);

    assets.fix_icon_padding().unwrap();
    let report = assets.restore_icons().unwrap();

    assert_eq!(report.restored, vec![icon.clone()]);
    assert_eq!(report.without_backup.len(), 2);
    assert_eq!(fs::read(&icon).unwrap(), pristine);
}

#[cfg(unix)]
#[test]
fn test_rewritten_assets_keep_their_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let config = Config::with_root(dir.path());
    fs::create_dir_all(&config.gallery.images_dir).unwrap();
    fs::write(&config.gallery.output_file, "[]").unwrap();
    let icon = create_icon(&config.zoom.icon_files[0], 32, 32);
    let manifest = config.gallery.output_file.clone();
    for path in [&manifest, &icon] {
        fs::set_permissions(path, fs::Permissions::from_mode(0o644)).unwrap();
    }
    let assets = SiteAssets::new(config);

    assets.build_gallery().unwrap();
    assets.fix_icon_padding().unwrap();

    let mode = |path: &std::path::Path| fs::metadata(path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode(&manifest), 0o644);
    assert_eq!(mode(&icon), 0o644);
    assert_eq!(mode(&PreserveFirst.backup_path(&icon)), 0o644);
}
