//! Image handling for PDF generation.
//!
//! Per PDF spec Section 8.9, images are represented as XObjects. JPEG data
//! is embedded as-is behind the `DCTDecode` filter; pixels are never
//! decoded or re-encoded here.

use crate::config::ImageLayout;
use crate::object::{Object, ObjectRef};
use crate::writer::ObjectSerializer;
use bytes::Bytes;

/// A JPEG-encoded raster image and its pixel dimensions.
///
/// The dimensions are trusted as given; use [`RasterImage::from_jpeg`] to
/// read them from the JPEG frame header instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Baseline JPEG bytes
    pub jpeg_bytes: Bytes,
}

impl RasterImage {
    /// Wrap JPEG bytes with caller-declared dimensions.
    pub fn new(width: u32, height: u32, jpeg_bytes: impl Into<Bytes>) -> Self {
        Self {
            width,
            height,
            jpeg_bytes: jpeg_bytes.into(),
        }
    }

    /// Take the dimensions from the JPEG start-of-frame header.
    pub fn from_jpeg(jpeg_bytes: impl Into<Bytes>) -> Result<Self, ImageError> {
        let jpeg_bytes = jpeg_bytes.into();
        let header = parse_jpeg_header(&jpeg_bytes)?;
        if header.components != 3 {
            log::warn!(
                "JPEG has {} color components, embedding as DeviceRGB",
                header.components
            );
        }
        Ok(Self {
            width: header.width,
            height: header.height,
            jpeg_bytes,
        })
    }

    /// Check the SOI marker and that the frame header agrees with the
    /// declared dimensions.
    pub fn verify_jpeg(&self) -> Result<(), ImageError> {
        let header = parse_jpeg_header(&self.jpeg_bytes)?;
        if (header.width, header.height) != (self.width, self.height) {
            return Err(ImageError::DimensionMismatch {
                declared: (self.width, self.height),
                actual: (header.width, header.height),
            });
        }
        Ok(())
    }

    /// Build the Image XObject stream.
    ///
    /// `/Width` and `/Height` are the native pixel dimensions; the page
    /// content stream does the scaling.
    pub fn build_xobject(&self) -> Object {
        let dict = ObjectSerializer::dictionary(vec![
            ("Type", ObjectSerializer::name("XObject")),
            ("Subtype", ObjectSerializer::name("Image")),
            ("Width", ObjectSerializer::integer(self.width as i64)),
            ("Height", ObjectSerializer::integer(self.height as i64)),
            ("ColorSpace", ObjectSerializer::name("DeviceRGB")),
            ("BitsPerComponent", ObjectSerializer::integer(8)),
            ("Filter", ObjectSerializer::name("DCTDecode")),
            ("Length", ObjectSerializer::integer(self.jpeg_bytes.len() as i64)),
        ]);
        Object::Stream {
            dict,
            data: self.jpeg_bytes.clone(),
        }
    }

    /// Resources dictionary mapping `name` to the XObject at `xobject`.
    pub fn resources(name: &str, xobject: ObjectRef) -> Object {
        ObjectSerializer::dict(vec![(
            "XObject",
            ObjectSerializer::dict(vec![(name, ObjectSerializer::reference(xobject))]),
        )])
    }
}

/// Image embedding error.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// Failed to decode image
    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    /// Failed to encode image
    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    /// Invalid image data
    #[error("Invalid image data: {0}")]
    InvalidData(String),

    /// Frame header disagrees with the declared size
    #[error("JPEG is {actual:?} pixels but {declared:?} was declared")]
    DimensionMismatch {
        /// Caller-declared (width, height)
        declared: (u32, u32),
        /// (width, height) from the frame header
        actual: (u32, u32),
    },
}

/// Fields of a JPEG start-of-frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegHeader {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Number of color components (1 gray, 3 YCbCr/RGB, 4 CMYK)
    pub components: u8,
}

/// Parse JPEG header to extract dimensions and component count.
pub fn parse_jpeg_header(data: &[u8]) -> Result<JpegHeader, ImageError> {
    if data.len() < 2 || data[0] != 0xFF || data[1] != 0xD8 {
        return Err(ImageError::InvalidData("Not a valid JPEG".to_string()));
    }

    let mut pos = 2;
    while pos + 1 < data.len() {
        if data[pos] != 0xFF {
            pos += 1;
            continue;
        }

        let marker = data[pos + 1];
        pos += 2;

        // Skip padding
        if marker == 0xFF || marker == 0x00 {
            continue;
        }

        // SOF markers (Start of Frame)
        if matches!(
            marker,
            0xC0 | 0xC1
                | 0xC2
                | 0xC3
                | 0xC5
                | 0xC6
                | 0xC7
                | 0xC9
                | 0xCA
                | 0xCB
                | 0xCD
                | 0xCE
                | 0xCF
        ) {
            if pos + 8 > data.len() {
                return Err(ImageError::InvalidData("Truncated JPEG header".to_string()));
            }

            let height = u16::from_be_bytes([data[pos + 3], data[pos + 4]]) as u32;
            let width = u16::from_be_bytes([data[pos + 5], data[pos + 6]]) as u32;
            let components = data[pos + 7];

            return Ok(JpegHeader {
                width,
                height,
                components,
            });
        }

        // Skip other markers
        if pos + 2 > data.len() {
            break;
        }
        let length = u16::from_be_bytes([data[pos], data[pos + 1]]) as usize;
        pos += length;
    }

    Err(ImageError::InvalidData("Could not find JPEG dimensions".to_string()))
}

/// Image placement on a PDF page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    /// X position (left edge)
    pub x: f64,
    /// Y position (bottom edge)
    pub y: f64,
    /// Display width
    pub width: f64,
    /// Display height
    pub height: f64,
}

impl ImagePlacement {
    /// Create a new image placement.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Fit a `width` x `height` pixel image into the layout's content box
    /// and center it on the page.
    ///
    /// Images larger than the box in either dimension shrink uniformly by
    /// `min(max_width / width, max_height / height)`; smaller images keep
    /// their native size and are never enlarged. Sizes and positions are
    /// rounded to whole units.
    pub fn fit_centered(layout: &ImageLayout, width: u32, height: u32) -> Self {
        let mut w = width as f64;
        let mut h = height as f64;
        if w > layout.max_width || h > layout.max_height {
            let scale = (layout.max_width / w).min(layout.max_height / h);
            w = (w * scale).round();
            h = (h * scale).round();
        }
        let x = ((layout.page_width - w) / 2.0).round();
        let y = ((layout.page_height - h) / 2.0).round();
        Self::new(x, y, w, h)
    }

    /// Generate the transformation matrix for this placement.
    ///
    /// Returns the six values for the `cm` operator: a, b, c, d, e, f
    /// where the matrix is:
    /// ```text
    /// [ a  b  0 ]
    /// [ c  d  0 ]
    /// [ e  f  1 ]
    /// ```
    pub fn transform_matrix(&self) -> (f64, f64, f64, f64, f64, f64) {
        (self.width, 0.0, 0.0, self.height, self.x, self.y)
    }
}
