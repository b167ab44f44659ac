use std::io::Cursor;
use std::path::Path;

use anyhow::Context as _;
use image::RgbaImage;

use crate::error::ImprintResult;

/// Encode a rendered canvas as an in-memory PNG byte stream, the form
/// download and upload surfaces consume.
pub fn encode_png(image: &RgbaImage) -> ImprintResult<Vec<u8>> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Write a rendered canvas as a PNG file, creating parent directories as
/// needed.
pub fn write_png(path: impl AsRef<Path>, image: &RgbaImage) -> ImprintResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output directory '{}'", parent.display()))?;
        }
    }
    image::save_buffer_with_format(
        path,
        image.as_raw(),
        image.width(),
        image.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
