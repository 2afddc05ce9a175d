//! High-level PDF document type.

use crate::error::{Error, Result};
use crate::transcode::transcode_file;
use crate::writer::{ImageToPdfSerializer, RasterImage, TextToPdfSerializer};
use crate::xref::DocumentSummary;
use std::fs;
use std::path::Path;

/// MIME type of the generated bytes.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// A finished PDF document held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pdf {
    /// The underlying PDF bytes
    bytes: Vec<u8>,
    /// Number of pages written
    page_count: usize,
}

impl Pdf {
    /// Create a PDF with one page per image.
    pub fn from_images(images: &[RasterImage]) -> Result<Self> {
        let bytes = ImageToPdfSerializer::new().serialize(images)?;
        Ok(Self {
            bytes,
            page_count: images.len(),
        })
    }

    /// Read JPEG files and embed them unchanged, one per page.
    ///
    /// Dimensions come from each file's frame header.
    pub fn from_jpeg_files<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Result<Self> {
        let images = paths
            .into_iter()
            .map(|path| -> Result<RasterImage> {
                let data = fs::read(path.as_ref())?;
                log::debug!("Read {} ({} bytes)", path.as_ref().display(), data.len());
                Ok(RasterImage::from_jpeg(data)?)
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_images(&images)
    }

    /// Decode image files of any supported format, re-encode each as JPEG
    /// on a white background, and embed them one per page.
    pub fn from_image_files<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Result<Self> {
        let images = paths
            .into_iter()
            .map(transcode_file)
            .collect::<Result<Vec<_>>>()?;
        Self::from_images(&images)
    }

    /// Create a PDF from plain text.
    pub fn from_text(content: &str) -> Result<Self> {
        let serializer = TextToPdfSerializer::new();
        let pages = serializer.layout_pages(content);
        let bytes = serializer.serialize_pages(&pages)?;
        Ok(Self {
            bytes,
            page_count: pages.len(),
        })
    }

    /// Create a PDF from a UTF-8 text file.
    pub fn from_text_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        let content = String::from_utf8(data).map_err(|e| {
            Error::EncodingFailure(format!("{} is not valid UTF-8: {}", path.display(), e))
        })?;
        Self::from_text(&content)
    }

    /// Get the PDF as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Convert to PDF bytes, consuming the Pdf.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// File size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether no bytes were produced. Never true for a constructed `Pdf`.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Read the document back and verify its cross-reference table.
    pub fn summary(&self) -> Result<DocumentSummary> {
        DocumentSummary::from_bytes(&self.bytes)
    }

    /// Save the PDF to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), &self.bytes)?;
        log::debug!("Wrote {} bytes to {}", self.bytes.len(), path.as_ref().display());
        Ok(())
    }
}

impl AsRef<[u8]> for Pdf {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text() {
        let pdf = Pdf::from_text("Hello").unwrap();
        assert!(pdf.as_bytes().starts_with(b"%PDF-1.4\n"));
        assert_eq!(pdf.page_count(), 1);
        assert_eq!(pdf.len(), pdf.as_bytes().len());
        assert!(!pdf.is_empty());
    }

    #[test]
    fn test_from_text_page_count() {
        let text = "line\n".repeat(100);
        // 101 lines at 43 per page
        assert_eq!(Pdf::from_text(&text).unwrap().page_count(), 3);
    }

    #[test]
    fn test_from_images_empty() {
        assert!(matches!(Pdf::from_images(&[]), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_summary_matches_page_count() {
        let pdf = Pdf::from_text(&"x\n".repeat(50)).unwrap();
        let summary = pdf.summary().unwrap();
        assert_eq!(summary.page_count, pdf.page_count());
        assert_eq!(summary.byte_length, pdf.len());
    }

    #[test]
    fn test_summary_ignores_page_markers_in_text() {
        let pdf = Pdf::from_text("see /Type /Page here\n<< /Type /Page >>").unwrap();
        assert_eq!(pdf.page_count(), 1);
        assert_eq!(pdf.summary().unwrap().page_count, 1);
    }

    #[test]
    fn test_from_text_file_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, [0x66, 0x6F, 0xFF, 0x6F]).unwrap();

        let result = Pdf::from_text_file(&path);
        assert!(matches!(result, Err(Error::EncodingFailure(_))));
    }

    #[test]
    fn test_from_jpeg_files_missing() {
        let result = Pdf::from_jpeg_files(["/nonexistent/definitely/missing.jpg"]);
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        let pdf = Pdf::from_text("saved").unwrap();
        pdf.save(&path).unwrap();
        assert_eq!(fs::read(&path).unwrap(), pdf.into_bytes());
    }
}
