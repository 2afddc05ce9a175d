//! Append-only, offset-tracked byte accumulator.

use std::io::Write;

/// Growing output buffer for one PDF file.
///
/// `current_offset()` always equals the number of bytes appended so far, so
/// an offset read immediately before appending an object is that object's
/// position in the [`finish`](Self::finish) output.
#[derive(Debug, Default)]
pub struct PdfByteWriter {
    buf: Vec<u8>,
}

impl PdfByteWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty writer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Append the bytes of `s` verbatim. Structural syntax is 7-bit ASCII, so
    /// one character is one byte; user text passes through as UTF-8.
    pub fn append_text(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    /// Append raw bytes verbatim (embedded JPEG payloads).
    pub fn append_bytes(&mut self, b: &[u8]) {
        self.buf.extend_from_slice(b);
    }

    /// Bytes written so far.
    pub fn current_offset(&self) -> u64 {
        self.buf.len() as u64
    }

    /// The accumulated bytes, in append order.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

impl Write for PdfByteWriter {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.append_bytes(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_writer() {
        let writer = PdfByteWriter::new();
        assert_eq!(writer.current_offset(), 0);
        assert!(writer.finish().is_empty());
    }

    #[test]
    fn test_offset_tracks_mixed_fragments() {
        let mut writer = PdfByteWriter::new();
        writer.append_text("%PDF-1.4\n");
        assert_eq!(writer.current_offset(), 9);

        writer.append_bytes(&[0xFF, 0xD8, 0xFF, 0xD9]);
        assert_eq!(writer.current_offset(), 13);

        writer.append_text("\nendstream\n");
        assert_eq!(writer.current_offset(), 24);
    }

    #[test]
    fn test_finish_preserves_append_order() {
        let mut writer = PdfByteWriter::with_capacity(16);
        writer.append_text("ab");
        writer.append_bytes(b"\x00\x01");
        writer.append_text("cd");

        assert_eq!(writer.finish(), b"ab\x00\x01cd".to_vec());
    }

    #[test]
    fn test_snapshot_offset_points_at_fragment() {
        let mut writer = PdfByteWriter::new();
        writer.append_text("%PDF-1.4\n");
        let offset = writer.current_offset() as usize;
        writer.append_text("1 0 obj\n");

        let out = writer.finish();
        assert_eq!(&out[offset..offset + 7], b"1 0 obj");
    }

    #[test]
    fn test_io_write_advances_offset() {
        let mut writer = PdfByteWriter::new();
        writeln!(writer, "xref").unwrap();
        writeln!(writer, "0 {}", 3).unwrap();
        assert_eq!(writer.current_offset(), 9);
    }

    #[test]
    fn test_no_implicit_newlines() {
        let mut writer = PdfByteWriter::new();
        writer.append_text("a");
        writer.append_text("b");
        assert_eq!(writer.finish(), b"ab");
    }

    #[test]
    fn test_utf8_text_counts_bytes() {
        let mut writer = PdfByteWriter::new();
        writer.append_text("é");
        assert_eq!(writer.current_offset(), 2);
    }
}
