//! PNG export with embedded metadata (tEXt chunks).

use std::io::BufWriter;
use std::path::Path;

use tracing::debug;

use popcorn_core::{ColourMode, ViewRegion};

use crate::error::RenderError;
use crate::raster::Raster;
use crate::surface::RenderSurface;

/// Plot settings to embed in an exported PNG.
#[derive(Debug, Clone)]
pub struct ExportMetadata {
    pub plot: String,
    pub levels: u32,
    pub colour: ColourMode,
    /// Visible model region, when the view is invertible.
    pub view: Option<ViewRegion>,
}

/// Write the raster as an RGBA PNG with the plot settings as tEXt chunks.
///
/// Uses the `png` crate directly (rather than `image`) so custom chunks can
/// be added; they are readable by exiftool and most image viewers.
pub fn export_png(raster: &Raster, path: &Path, metadata: &ExportMetadata) -> crate::Result<()> {
    let (width, height) = (raster.width(), raster.height());
    let file = std::fs::File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    for (key, value) in build_metadata_pairs(metadata, width, height) {
        encoder
            .add_text_chunk(key.clone(), value)
            .map_err(|e| RenderError::Export(format!("text chunk '{key}': {e}")))?;
    }

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| RenderError::Export(format!("header: {e}")))?;
    png_writer
        .write_image_data(raster.pixels())
        .map_err(|e| RenderError::Export(format!("image data: {e}")))?;

    debug!("Exported PNG {}x{} to {}", width, height, path.display());
    Ok(())
}

fn build_metadata_pairs(meta: &ExportMetadata, width: u32, height: u32) -> Vec<(String, String)> {
    let mut pairs = vec![
        ("Software".into(), "Popcorn".into()),
        (
            "Description".into(),
            format!("{} plot, {} levels, {} colouring", meta.plot, meta.levels, meta.colour),
        ),
        ("Popcorn.Plot".into(), meta.plot.clone()),
        ("Popcorn.Levels".into(), meta.levels.to_string()),
        ("Popcorn.Colour".into(), meta.colour.to_string()),
        ("Popcorn.Resolution".into(), format!("{width}x{height}")),
    ];
    if let Some(v) = meta.view {
        pairs.push((
            "Popcorn.View".into(),
            format!("{} {} {} {}", v.min_x, v.min_y, v.max_x, v.max_y),
        ));
    }
    pairs
}
