use std::sync::Arc;

use log::{debug, warn};
use resvg::{tiny_skia, usvg};

use crate::config::GenerateConfig;
use crate::error::{Error, Result};
use crate::types::Rgb;

/// Layout of the generated icon: a gradient disc with a glyph on top
#[derive(Debug, Clone, PartialEq)]
pub struct IconTemplate {
    pub size: u32,
    pub padding: u32,
    pub diameter: u32,
    pub gradient_start: Rgb,
    pub gradient_end: Rgb,
    pub glyph: char,
    pub glyph_color: Rgb,
    pub font_size: f64,
}

impl IconTemplate {
    pub fn new(size: u32, config: &GenerateConfig) -> Result<Self> {
        let padding = (size as f64 * config.padding_ratio).round() as u32;
        let diameter = size.saturating_sub(2 * padding);

        Ok(Self {
            size,
            padding,
            diameter,
            gradient_start: Rgb::from_hex(&config.gradient_start)?,
            gradient_end: Rgb::from_hex(&config.gradient_end)?,
            glyph: config.glyph,
            glyph_color: Rgb::from_hex(&config.glyph_color)?,
            font_size: diameter as f64 * config.glyph_ratio,
        })
    }

    pub fn to_svg(&self) -> String {
        let center = self.size as f64 / 2.0;
        let radius = self.diameter as f64 / 2.0;

        format!(
            r##"<svg width="{size}" height="{size}" viewBox="0 0 {size} {size}" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <linearGradient id="grad" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" stop-color="{start}" stop-opacity="1"/>
      <stop offset="100%" stop-color="{end}" stop-opacity="1"/>
    </linearGradient>
  </defs>
  <circle cx="{center}" cy="{center}" r="{radius}" fill="url(#grad)"/>
  <text x="{center}" y="{center}" font-family="Arial, Helvetica, sans-serif" font-size="{font_size}" font-weight="900" fill="{glyph_color}" text-anchor="middle" dominant-baseline="central">{glyph}</text>
</svg>
"##,
            size = self.size,
            start = self.gradient_start.to_hex(),
            end = self.gradient_end.to_hex(),
            center = center,
            radius = radius,
            font_size = self.font_size,
            glyph_color = self.glyph_color.to_hex(),
            glyph = escape_xml(self.glyph),
        )
    }
}

fn escape_xml(c: char) -> String {
    match c {
        '&' => "&amp;".to_string(),
        '<' => "&lt;".to_string(),
        '>' => "&gt;".to_string(),
        '"' => "&quot;".to_string(),
        '\'' => "&apos;".to_string(),
        other => other.to_string(),
    }
}

/// Rasterizes icon templates, loading system fonts once per run
pub struct IconRenderer {
    options: usvg::Options<'static>,
}

impl IconRenderer {
    pub fn new() -> Self {
        let mut options = usvg::Options::default();
        Arc::make_mut(&mut options.fontdb).load_system_fonts();

        if options.fontdb.faces().next().is_none() {
            warn!("No system fonts found, icons will be rendered without the glyph");
        } else {
            debug!("Loaded {} font faces", options.fontdb.len());
        }

        Self { options }
    }

    /// Render the template to PNG bytes at exactly `size`x`size`
    pub fn render_png(&self, template: &IconTemplate) -> Result<Vec<u8>> {
        let svg = template.to_svg();
        let tree = usvg::Tree::from_str(&svg, &self.options)
            .map_err(|e| Error::Render(format!("invalid icon template: {}", e)))?;

        let mut pixmap = tiny_skia::Pixmap::new(template.size, template.size).ok_or_else(|| {
            Error::Render(format!(
                "cannot allocate a {}x{} canvas",
                template.size, template.size
            ))
        })?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|e| Error::Render(format!("PNG encoding failed: {}", e)))
    }
}

impl Default for IconRenderer {
    fn default() -> Self {
        Self::new()
    }
}
