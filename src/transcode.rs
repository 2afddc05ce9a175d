//! Re-encode arbitrary raster images as baseline JPEG.
//!
//! Inputs in any format the `image` crate can decode (PNG, JPEG, TIFF) are
//! flattened onto an opaque white background, so transparent regions come
//! out white rather than black, then encoded as 8-bit RGB JPEG.

use crate::writer::{ImageError, RasterImage};
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage, Rgb, RgbImage};
use std::path::Path;

/// JPEG quality used for re-encoding.
pub const JPEG_QUALITY: u8 = 92;

/// Decode `data`, composite it onto white and re-encode as JPEG.
pub fn transcode_to_jpeg(data: &[u8]) -> Result<RasterImage, ImageError> {
    let img = image::load_from_memory(data).map_err(|e| ImageError::DecodeError(e.to_string()))?;
    encode_jpeg(&img)
}

/// Read an image file and transcode it.
pub fn transcode_file(path: impl AsRef<Path>) -> crate::error::Result<RasterImage> {
    let data = std::fs::read(path.as_ref())?;
    log::debug!("Transcoding {} ({} bytes)", path.as_ref().display(), data.len());
    Ok(transcode_to_jpeg(&data)?)
}

/// Flatten alpha onto white and encode at [`JPEG_QUALITY`].
pub fn encode_jpeg(img: &DynamicImage) -> Result<RasterImage, ImageError> {
    let flattened = flatten_on_white(img);
    let (width, height) = flattened.dimensions();

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .encode(flattened.as_raw(), width, height, ColorType::Rgb8)
        .map_err(|e| ImageError::EncodeError(e.to_string()))?;

    log::trace!("Encoded {}x{} image to {} JPEG bytes", width, height, jpeg.len());
    Ok(RasterImage::new(width, height, jpeg))
}

/// Composite every pixel over opaque white.
fn flatten_on_white(img: &DynamicImage) -> RgbImage {
    let rgba = img.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as u32;
        let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        out.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }

    out
}
