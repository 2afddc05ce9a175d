// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::enum_variant_names)]

//! # PDF Press
//!
//! Minimal, deterministic PDF serializer in Rust.
//!
//! ## Core Features
//!
//! - **Images to PDF**: one JPEG per US Letter page, shrunk to fit a
//!   512×692 content box and centered; JPEG bytes are embedded unchanged
//!   behind `/DCTDecode`
//! - **Text to PDF**: fixed-width hard wrapping, 43 lines per page, one
//!   shared Helvetica font reference (no embedding)
//! - **Exact offsets**: every cross-reference entry is the byte position
//!   of its `N 0 obj` header
//! - **Deterministic**: identical input yields identical bytes; no
//!   timestamps, IDs or hash-ordered dictionaries
//! - **Transcoding**: PNG/TIFF/JPEG inputs re-encoded as JPEG on a white
//!   background
//!
//! ## Architecture
//!
//! - [`writer`]: byte writer, object serializer, document builder and the
//!   two serializers
//! - [`xref`]: reads back and verifies the cross-reference table
//! - [`api`]: the [`Pdf`](api::Pdf) façade used by the binaries
//!
//! ## Quick Start
//!
//! ```ignore
//! use pdf_press::api::Pdf;
//!
//! # fn main() -> pdf_press::Result<()> {
//! let pdf = Pdf::from_text("Hello, World!\n\nSecond paragraph.")?;
//! pdf.save("hello.pdf")?;
//!
//! let pdf = Pdf::from_jpeg_files(["page1.jpg", "page2.jpg"])?;
//! println!("{} pages, {} bytes", pdf.page_count(), pdf.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Object model
pub mod object;

// Configuration
pub mod config;

// PDF writing
pub mod writer;

// Raster image transcoding
pub mod transcode;

// Cross-reference reader
pub mod xref;

// High-level API
pub mod api;

// Re-exports
pub use api::Pdf;
pub use error::{Error, Result};
pub use writer::{ImageToPdfSerializer, RasterImage, TextToPdfSerializer};
