use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{debug, warn};
use site_assets_core::catalog::{display_name, EXAMPLE_NAME, EXPECTED_PATTERN};
use site_assets_core::{BackupOutcome, Catalog, Config, LogLevel, SiteAssets, ZoomOutcome};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "site-assets")]
#[command(about = "Asset pipeline for the static site: gallery manifest and icons")]
#[command(version)]
struct Cli {
    /// Site directory the fixed asset paths are resolved against
    #[arg(short = 'C', long, global = true, default_value = ".")]
    root: PathBuf,

    /// Verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan images/ and write gallery-data.json
    Gallery,

    /// Zoom existing icons to reduce their padding
    FixIcons,

    /// Render a new icon set from the built-in template
    GenerateIcons,

    /// Put zoomed icons back from their .backup copies
    RestoreIcons,
}

fn main() -> anyhow::Result<ExitCode> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Set log level based on verbosity
    let mut config = Config::with_root(&cli.root);
    config.log_level = match cli.verbose {
        0 => LogLevel::Info,
        1 => LogLevel::Debug,
        _ => LogLevel::Trace,
    };

    // Initialize logger
    site_assets_core::logging::init_logger(config.log_level)
        .context("Failed to initialize logger")?;
    debug!("Resolved configuration: {:?}", config);

    let assets = SiteAssets::new(config);

    match cli.command {
        Commands::Gallery => gallery(&assets),
        Commands::FixIcons => fix_icons(&assets),
        Commands::GenerateIcons => generate_icons(&assets),
        Commands::RestoreIcons => restore_icons(&assets),
    }
}

fn gallery(assets: &SiteAssets) -> anyhow::Result<ExitCode> {
    let output = &assets.config().gallery.output_file;

    println!("Scanning images directory...");
    let catalog = assets
        .build_gallery()
        .context("Failed to build gallery manifest")?;

    println!("Found {} images", catalog.entries.len());
    println!("Generated {}", output.display());

    println!("\nSummary by category:");
    for (category, count) in catalog.category_counts() {
        println!("   {}: {} image(s)", display_name(category), count);
    }

    if !catalog.is_clean() {
        println!("\nWARNING: The following files do NOT match the expected pattern:");
        println!("   Expected pattern: {}", EXPECTED_PATTERN);
        println!("   Example: {}\n", EXAMPLE_NAME);
        for name in &catalog.skipped {
            println!("   x {}", name);
        }
        println!("\n   Please rename these files to match the pattern.");
    } else {
        println!("\nDone! Now commit and push.");
    }

    Ok(ExitCode::from(gallery_status(&catalog)))
}

/// Process status for a gallery run: misnamed files fail the run so they get
/// renamed, even though the manifest was written
fn gallery_status(catalog: &Catalog) -> u8 {
    if catalog.is_clean() {
        0
    } else {
        1
    }
}

fn fix_icons(assets: &SiteAssets) -> anyhow::Result<ExitCode> {
    let scale = assets.config().zoom.scale_factor;
    println!(
        "Zooming icon content {}x and cropping to centre to reduce padding.\n",
        scale
    );

    let report = assets
        .fix_icon_padding()
        .context("Icon padding fix aborted")?;

    for outcome in &report.outcomes {
        match outcome {
            ZoomOutcome::Zoomed {
                path,
                width,
                height,
                backup,
            } => {
                println!("{}", path.display());
                match backup {
                    BackupOutcome::Created => println!("   Backup created"),
                    BackupOutcome::AlreadyPresent => println!("   Backup already exists, kept"),
                    _ => {}
                }
                println!("   Zoomed in icon content ({}x scale)", scale);
                println!("   Output: {}x{}", width, height);
            }
            ZoomOutcome::Missing { path } => {
                println!("Skipping {} (not found)", path.display());
            }
        }
    }

    println!("\nDone! {} icon(s) updated.", report.zoomed_count());
    println!("\nNext steps:");
    println!("1. Review the updated icons");
    println!("2. If satisfied, delete the .backup files");
    println!("3. Commit and push the changes");
    println!("\nTo restore originals: site-assets restore-icons");
    Ok(ExitCode::SUCCESS)
}

fn generate_icons(assets: &SiteAssets) -> anyhow::Result<ExitCode> {
    println!("Generating new icons...\n");

    let report = assets
        .generate_icons()
        .context("Icon generation failed")?;

    for icon in &report.generated {
        if icon.backup != BackupOutcome::NothingToBackUp {
            println!("   Backed up existing file to {}.old", icon.path.display());
        }
        println!("   Created {}x{} {}", icon.size, icon.size, icon.path.display());
    }
    for (size, message) in &report.failed {
        println!("   Error creating {}x{} icon: {}", size, size, message);
    }

    println!(
        "\nDone! {} icon(s) generated, {} failed.",
        report.generated.len(),
        report.failed.len()
    );
    println!("\nNext steps:");
    println!("1. Review the new icons");
    println!("2. If satisfied, commit and push");
    println!("\nTo restore old icons: restore from the .old backup files");

    // Per-icon failures are reported above without failing the run
    Ok(ExitCode::SUCCESS)
}

fn restore_icons(assets: &SiteAssets) -> anyhow::Result<ExitCode> {
    let report = assets
        .restore_icons()
        .context("Failed to restore icons")?;

    for path in &report.restored {
        println!("Restored {}", path.display());
    }
    for path in &report.without_backup {
        warn!("No backup found for {}", path.display());
        println!("Skipping {} (no backup)", path.display());
    }

    println!("\nDone! {} icon(s) restored.", report.restored.len());
    Ok(ExitCode::SUCCESS)
}
