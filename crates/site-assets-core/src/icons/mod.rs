//! Icon transforms: zooming existing icons and rendering new ones.

use log::debug;

use crate::error::{Error, Result};

pub mod generate;
pub mod template;
pub mod zoom;

pub use generate::{generate_icon, generate_icons, icon_path};
pub use template::{IconRenderer, IconTemplate};
pub use zoom::{fix_icon_padding, restore_icons, zoom_crop, zoom_icon, ZoomGeometry};

/// Check that the image codecs the icon commands rely on are compiled in.
/// Run before touching any file.
pub fn preflight() -> Result<()> {
    let png = image::ImageFormat::Png;

    if !png.reading_enabled() || !png.writing_enabled() {
        return Err(Error::MissingDependency(
            "PNG support is not enabled in the `image` crate (enable its \"png\" feature)"
                .to_string(),
        ));
    }

    debug!("PNG codec available");
    Ok(())
}
