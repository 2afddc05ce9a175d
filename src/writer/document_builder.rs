//! Object-numbering document assembler.
//!
//! `DocumentBuilder` owns the output buffer for a single serialization
//! call. Object numbers are handed out sequentially by [`allocate`], and the
//! byte offset of each object is recorded at the instant its `N 0 obj`
//! header is appended, so the cross-reference table written by [`finish`]
//! always points at the real header positions.
//!
//! [`allocate`]: DocumentBuilder::allocate
//! [`finish`]: DocumentBuilder::finish

use super::byte_writer::PdfByteWriter;
use super::object_serializer::ObjectSerializer;
use crate::error::{Error, Result};
use crate::object::{Object, ObjectRef};
use std::collections::BTreeMap;
use std::io::Write;

/// File header line.
pub const PDF_HEADER: &str = "%PDF-1.4\n";

/// Assembles header, body objects, xref table and trailer.
#[derive(Debug)]
pub struct DocumentBuilder {
    writer: PdfByteWriter,
    serializer: ObjectSerializer,
    /// Object ID counter
    next_obj_id: u32,
    /// Recorded offsets (id -> byte offset of `id 0 obj`)
    offsets: BTreeMap<u32, u64>,
}

impl DocumentBuilder {
    /// Start a new document; the header is written immediately.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Start a new document, reserving room for roughly `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut writer = PdfByteWriter::with_capacity(capacity);
        writer.append_text(PDF_HEADER);
        Self {
            writer,
            serializer: ObjectSerializer::new(),
            next_obj_id: 1,
            offsets: BTreeMap::new(),
        }
    }

    /// Allocate the next object number.
    pub fn allocate(&mut self) -> ObjectRef {
        let id = self.next_obj_id;
        self.next_obj_id += 1;
        ObjectRef::new(id, 0)
    }

    /// Number of entries the xref table will have (highest number + 1).
    pub fn object_count(&self) -> u32 {
        self.next_obj_id
    }

    /// Bytes written so far.
    pub fn current_offset(&self) -> u64 {
        self.writer.current_offset()
    }

    /// Recorded offset of a written object.
    pub fn offset_of(&self, id: u32) -> Option<u64> {
        self.offsets.get(&id).copied()
    }

    /// Append an allocated object, recording its offset.
    pub fn write_object(&mut self, obj_ref: ObjectRef, obj: &Object) -> Result<()> {
        if obj_ref.id == 0 || obj_ref.id >= self.next_obj_id {
            return Err(Error::InvalidObjectNumber(obj_ref.id));
        }
        if self.offsets.contains_key(&obj_ref.id) {
            return Err(Error::InvalidObjectNumber(obj_ref.id));
        }

        let offset = self.writer.current_offset();
        self.offsets.insert(obj_ref.id, offset);
        log::trace!("Object {} at offset {}", obj_ref.id, offset);

        self.serializer
            .write_indirect(&mut self.writer, obj_ref.id, obj_ref.gen, obj)?;
        Ok(())
    }

    /// Write the xref table and trailer and return the finished file.
    ///
    /// Allocated numbers that were never written get offset 0.
    pub fn finish(mut self, root: ObjectRef) -> Result<Vec<u8>> {
        let size = self.next_obj_id;
        let xref_start = self.writer.current_offset();

        writeln!(self.writer, "xref")?;
        writeln!(self.writer, "0 {}", size)?;
        // Object 0 is always free
        writeln!(self.writer, "0000000000 65535 f ")?;

        for id in 1..size {
            let offset = match self.offsets.get(&id) {
                Some(offset) => *offset,
                None => {
                    log::warn!("Object {} allocated but never written", id);
                    0
                },
            };
            writeln!(self.writer, "{:010} 00000 n ", offset)?;
        }

        let trailer = ObjectSerializer::dict(vec![
            ("Size", ObjectSerializer::integer(size as i64)),
            ("Root", ObjectSerializer::reference(root)),
        ]);

        writeln!(self.writer, "trailer")?;
        self.serializer.write_object(&mut self.writer, &trailer)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "startxref")?;
        writeln!(self.writer, "{}", xref_start)?;
        writeln!(self.writer, "%%EOF")?;

        let bytes = self.writer.finish();
        log::debug!("Finished PDF: {} objects, {} bytes", size - 1, bytes.len());
        Ok(bytes)
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
