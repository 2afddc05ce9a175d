//! PDF writing module for generating PDF files.
//!
//! This module provides the two document serializers and the primitives
//! they share.
//!
//! ## Architecture
//!
//! ```text
//! RasterImage[] / &str
//!     ↓
//! [ImageToPdfSerializer] / [TextToPdfSerializer] (layout, object graph)
//!     ↓
//! [ContentStreamBuilder] (page drawing operators)
//!     ↓
//! [DocumentBuilder] (object numbers, offsets, xref, trailer)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! [PdfByteWriter] (offset-tracked output buffer)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use pdf_press::writer::{ImageToPdfSerializer, RasterImage, TextToPdfSerializer};
//!
//! let jpeg = std::fs::read("photo.jpg")?;
//! let bytes = ImageToPdfSerializer::new().serialize(&[RasterImage::from_jpeg(jpeg)?])?;
//!
//! let bytes = TextToPdfSerializer::new().serialize("Hello, World!")?;
//! ```

mod byte_writer;
mod content_stream;
mod document_builder;
mod image_document;
mod image_handler;
mod object_serializer;
mod text_document;

pub use byte_writer::PdfByteWriter;
pub use content_stream::{write_escaped_string, ContentStreamBuilder, ContentStreamOp};
pub use document_builder::{DocumentBuilder, PDF_HEADER};
pub use image_document::ImageToPdfSerializer;
pub use image_handler::{parse_jpeg_header, ImageError, ImagePlacement, JpegHeader, RasterImage};
pub use object_serializer::ObjectSerializer;
pub use text_document::{paginate, wrap_lines, TextToPdfSerializer};
