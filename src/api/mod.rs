//! High-level PDF API for simple document creation.
//!
//! This module wraps the two serializers behind one type:
//! - Creating PDFs from JPEG images, one image per page
//! - Creating PDFs from any decodable raster image (re-encoded as JPEG)
//! - Creating PDFs from plain text
//!
//! ## Quick Start
//!
//! ```ignore
//! use pdf_press::api::Pdf;
//!
//! // One page per photo
//! let pdf = Pdf::from_jpeg_files(["a.jpg", "b.jpg"])?;
//! pdf.save("photos.pdf")?;
//!
//! // PNG or TIFF input, flattened onto white
//! let pdf = Pdf::from_image_files(["scan.png"])?;
//! pdf.save("scan.pdf")?;
//!
//! // Create from plain text
//! let pdf = Pdf::from_text("Plain text content")?;
//! pdf.save("output.pdf")?;
//! ```

mod pdf;

pub use pdf::{Pdf, PDF_MIME_TYPE};
