//! Cross-reference table reader.
//!
//! Reads back the classic (PDF 1.0-1.4) xref table and trailer of an
//! in-memory PDF and checks that every in-use entry points at the header of
//! the object it names. Only what this crate writes is supported: one
//! xref section, no `/Prev` chain, no xref streams.

use crate::error::{Error, Result};
use crate::object::ObjectRef;
use lazy_static::lazy_static;
use regex::bytes::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

lazy_static! {
    /// Regex for finding "N G obj" patterns at the start of a line
    static ref RE_OBJ_PATTERN: Regex = Regex::new(r"(?m)^(\d+)\s+(\d+)\s+obj\b").unwrap();

    /// Regex for the header version
    static ref RE_HEADER: Regex = Regex::new(r"^%PDF-(\d+\.\d+)").unwrap();

    /// Regex for a page object body (`/Type /Page`, but not `/Type /Pages`)
    /// directly after its `N G obj` header
    static ref RE_PAGE_OBJECT: Regex =
        Regex::new(r"(?-u)^\d+\s+\d+\s+obj\s*<<\s*/Type\s*/Page\b").unwrap();

    /// Regex for the `stream` keyword that opens stream data
    static ref RE_STREAM: Regex = Regex::new(r"(?-u)\bstream\r?\n").unwrap();

    /// Regex for the `endstream` keyword
    static ref RE_ENDSTREAM: Regex = Regex::new(r"(?-u)\bendstream\b").unwrap();

    /// Regex for the `endobj` keyword
    static ref RE_ENDOBJ: Regex = Regex::new(r"(?-u)\bendobj\b").unwrap();

    /// Regex for a stream dictionary `/Length N`
    static ref RE_LENGTH: Regex = Regex::new(r"/Length\s+(\d+)").unwrap();

    /// Regex for trailer `/Size N`
    static ref RE_SIZE: Regex = Regex::new(r"/Size\s+(\d+)").unwrap();

    /// Regex for trailer `/Root N G R`
    static ref RE_ROOT: Regex = Regex::new(r"/Root\s+(\d+)\s+(\d+)\s+R").unwrap();
}

/// Cross-reference table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct XRefEntry {
    /// Byte offset of the object header
    pub offset: u64,
    /// Generation number
    pub generation: u16,
    /// `n` (in use) or `f` (free)
    pub in_use: bool,
}

/// Parsed xref table plus the trailer fields this crate writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossRefTable {
    entries: BTreeMap<u32, XRefEntry>,
    /// Trailer `/Size`
    pub size: u32,
    /// Trailer `/Root`
    pub root: Option<ObjectRef>,
}

impl CrossRefTable {
    /// Entry for an object number.
    pub fn get(&self, object_number: u32) -> Option<&XRefEntry> {
        self.entries.get(&object_number)
    }

    /// Iterate entries in object-number order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &XRefEntry)> + '_ {
        self.entries.iter().map(|(n, e)| (*n, e))
    }

    /// Number of entries, including the free entry for object 0.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Locate the byte offset that follows the last `startxref` keyword.
pub fn find_xref_offset(data: &[u8]) -> Result<u64> {
    let tail_start = data.len().saturating_sub(2048);
    let tail = String::from_utf8_lossy(&data[tail_start..]);

    let pos = tail
        .rfind("startxref")
        .ok_or_else(|| Error::InvalidXref("startxref not found".to_string()))?;

    tail[pos + "startxref".len()..]
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<u64>().ok())
        .ok_or_else(|| Error::InvalidXref("startxref offset missing".to_string()))
}

/// Parse the xref table and trailer that begin at `offset`.
///
/// The table format is:
/// ```text
/// xref
/// 0 6
/// 0000000000 65535 f
/// 0000000009 00000 n
/// ...
/// trailer
/// << /Size 6 /Root 1 0 R >>
/// ```
pub fn parse_xref(data: &[u8], offset: u64) -> Result<CrossRefTable> {
    let start = usize::try_from(offset)
        .ok()
        .filter(|start| *start < data.len())
        .ok_or_else(|| Error::InvalidXref(format!("offset {} past end of file", offset)))?;

    let content = String::from_utf8_lossy(&data[start..]);
    let mut lines = content.split('\n');

    if lines.next().map(str::trim) != Some("xref") {
        return Err(Error::InvalidXref(format!("no xref keyword at offset {}", offset)));
    }

    let mut table = CrossRefTable::default();
    let mut trailer = None;

    while let Some(line) = lines.next() {
        let line = line.trim();
        if line.starts_with("trailer") {
            trailer = Some(lines.by_ref().collect::<Vec<_>>().join("\n"));
            break;
        }

        let (first, count) = parse_subsection_header(line)?;
        for number in first..first + count {
            let entry_line = lines
                .next()
                .ok_or_else(|| Error::InvalidXref(format!("missing entry for object {}", number)))?;
            table.entries.insert(number, parse_entry(entry_line)?);
        }
    }

    let trailer = trailer.ok_or_else(|| Error::InvalidXref("trailer not found".to_string()))?;
    let trailer = trailer.as_bytes();

    table.size = RE_SIZE
        .captures(trailer)
        .and_then(|caps| parse_capture(caps.get(1)?.as_bytes()))
        .ok_or_else(|| Error::InvalidXref("trailer has no /Size".to_string()))?;

    table.root = RE_ROOT.captures(trailer).and_then(|caps| {
        Some(ObjectRef::new(
            parse_capture(caps.get(1)?.as_bytes())?,
            parse_capture(caps.get(2)?.as_bytes())?,
        ))
    });

    log::debug!(
        "Parsed xref at offset {}: {} entries, /Size {}",
        offset,
        table.len(),
        table.size
    );
    Ok(table)
}

fn parse_subsection_header(line: &str) -> Result<(u32, u32)> {
    let mut parts = line.split_whitespace();
    let first = parts.next().and_then(|p| p.parse().ok());
    let count = parts.next().and_then(|p| p.parse().ok());
    match (first, count, parts.next()) {
        (Some(first), Some(count), None) => Ok((first, count)),
        _ => Err(Error::InvalidXref(format!("bad subsection header: {:?}", line))),
    }
}

fn parse_entry(line: &str) -> Result<XRefEntry> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let bad = || Error::InvalidXref(format!("bad xref entry: {:?}", line));

    if parts.len() != 3 {
        return Err(bad());
    }
    let offset = parts[0].parse::<u64>().map_err(|_| bad())?;
    let generation = parts[1].parse::<u16>().map_err(|_| bad())?;
    let in_use = match parts[2] {
        "n" => true,
        "f" => false,
        _ => return Err(bad()),
    };

    Ok(XRefEntry {
        offset,
        generation,
        in_use,
    })
}

fn parse_capture<T: std::str::FromStr>(bytes: &[u8]) -> Option<T> {
    std::str::from_utf8(bytes).ok()?.parse().ok()
}

/// Scan for `N G obj` headers at line starts, returning the first offset
/// seen for each object number.
///
/// Stream data is skipped using the stream's `/Length` (or the next
/// `endstream` when no length is given), so payload bytes that happen to
/// look like a header are never reported.
pub fn scan_object_headers(data: &[u8]) -> BTreeMap<u32, u64> {
    let mut found = BTreeMap::new();
    let mut pos = 0;
    while let Some(caps) = RE_OBJ_PATTERN.captures_at(data, pos) {
        let (Some(whole), Some(number)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        if let Some(number) = parse_capture::<u32>(number.as_bytes()) {
            found.entry(number).or_insert(whole.start() as u64);
        }
        pos = skip_stream_data(data, whole.end());
    }
    found
}

/// Position after the stream data of the object whose body starts at
/// `body_start`, or `body_start` itself if the object has no stream.
fn skip_stream_data(data: &[u8], body_start: usize) -> usize {
    let body_end = RE_ENDOBJ
        .find_at(data, body_start)
        .map_or(data.len(), |m| m.start());
    let Some(stream) = RE_STREAM.find_at(data, body_start).filter(|m| m.start() < body_end) else {
        return body_start;
    };

    let length = RE_LENGTH
        .captures(&data[body_start..stream.start()])
        .and_then(|caps| parse_capture::<usize>(caps.get(1)?.as_bytes()));
    match length {
        Some(length) => stream.end().saturating_add(length).min(data.len()),
        None => RE_ENDSTREAM
            .find_at(data, stream.end())
            .map_or(data.len(), |m| m.end()),
    }
}

/// Check that every in-use entry points exactly at `N G obj`.
pub fn verify_offsets(data: &[u8], table: &CrossRefTable) -> Result<()> {
    for (number, entry) in table.iter().filter(|(_, e)| e.in_use) {
        let header = format!("{} {} obj", number, entry.generation);
        let start = entry.offset as usize;
        let matches = data
            .get(start..start + header.len())
            .is_some_and(|found| found == header.as_bytes());
        if !matches {
            return Err(Error::InvalidXref(format!(
                "object {} not found at offset {}",
                number, entry.offset
            )));
        }
        log::trace!("Verified object {} at offset {}", number, entry.offset);
    }
    Ok(())
}

/// Count in-use objects in `table` whose body is a page dictionary.
///
/// Only the start of each object, at its xref offset, is examined, so
/// `/Type /Page` inside text or image data is never counted.
pub fn count_page_objects(data: &[u8], table: &CrossRefTable) -> usize {
    table
        .iter()
        .filter(|(_, e)| e.in_use)
        .filter_map(|(_, e)| data.get(usize::try_from(e.offset).ok()?..))
        .filter(|body| RE_PAGE_OBJECT.is_match(body))
        .count()
}

/// Count the page objects of a complete PDF, located through its xref table.
pub fn count_pages(data: &[u8]) -> Result<usize> {
    let table = parse_xref(data, find_xref_offset(data)?)?;
    Ok(count_page_objects(data, &table))
}

/// Location of one object in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ObjectLocation {
    /// Object number
    pub number: u32,
    /// Byte offset of its header
    pub offset: u64,
}

/// Structural summary of a generated PDF, serializable for `--summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    /// Header version, e.g. `1.4`
    pub version: String,
    /// Total file length
    pub byte_length: usize,
    /// Offset of the xref table
    pub startxref: u64,
    /// Trailer `/Size`
    pub size: u32,
    /// Catalog object number
    pub root: Option<u32>,
    /// Number of page objects
    pub page_count: usize,
    /// In-use objects and their offsets
    pub objects: Vec<ObjectLocation>,
}

impl DocumentSummary {
    /// Read back and verify a PDF produced by this crate.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let version = RE_HEADER
            .captures(data)
            .and_then(|caps| parse_capture::<String>(caps.get(1)?.as_bytes()))
            .ok_or_else(|| Error::InvalidXref("missing %PDF header".to_string()))?;

        let startxref = find_xref_offset(data)?;
        let table = parse_xref(data, startxref)?;
        verify_offsets(data, &table)?;

        let objects = table
            .iter()
            .filter(|(_, e)| e.in_use)
            .map(|(number, e)| ObjectLocation {
                number,
                offset: e.offset,
            })
            .collect();

        Ok(Self {
            version,
            byte_length: data.len(),
            startxref,
            size: table.size,
            root: table.root.map(|r| r.id),
            page_count: count_page_objects(data, &table),
            objects,
        })
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::EncodingFailure(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &[u8] = b"%PDF-1.4\n\
        1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n\
        2 0 obj\n<< /Type /Pages /Kids [] /Count 0 >>\nendobj\n\
        xref\n0 3\n\
        0000000000 65535 f \n\
        0000000009 00000 n \n\
        0000000058 00000 n \n\
        trailer\n<< /Size 3 /Root 1 0 R >>\n\
        startxref\n110\n%%EOF\n";

    #[test]
    fn test_find_xref_offset() {
        assert_eq!(find_xref_offset(MINIMAL).unwrap(), 110);
    }

    #[test]
    fn test_find_xref_offset_missing() {
        assert!(matches!(find_xref_offset(b"%PDF-1.4\n"), Err(Error::InvalidXref(_))));
    }

    #[test]
    fn test_parse_xref() {
        let table = parse_xref(MINIMAL, 110).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.size, 3);
        assert_eq!(table.root, Some(ObjectRef::new(1, 0)));
        assert_eq!(
            table.get(0),
            Some(&XRefEntry {
                offset: 0,
                generation: 65535,
                in_use: false
            })
        );
        assert_eq!(table.get(2).map(|e| e.offset), Some(58));
    }

    #[test]
    fn test_parse_xref_wrong_offset() {
        assert!(parse_xref(MINIMAL, 10).is_err());
        assert!(parse_xref(MINIMAL, 100_000).is_err());
    }

    #[test]
    fn test_verify_offsets() {
        let table = parse_xref(MINIMAL, 110).unwrap();
        assert!(verify_offsets(MINIMAL, &table).is_ok());
    }

    #[test]
    fn test_verify_offsets_detects_shift() {
        let shifted = String::from_utf8_lossy(MINIMAL).replace("0000000058", "0000000057");
        let table = parse_xref(shifted.as_bytes(), 110).unwrap();
        assert!(verify_offsets(shifted.as_bytes(), &table).is_err());
    }

    #[test]
    fn test_scan_object_headers() {
        let found = scan_object_headers(MINIMAL);
        assert_eq!(found.get(&1), Some(&9));
        assert_eq!(found.get(&2), Some(&58));
        assert_eq!(found.len(), 2);
    }

    /// One page whose content stream mentions `/Type /Page` and carries a
    /// fake `3 0 obj` header.
    const ONE_PAGE: &[u8] = b"%PDF-1.4\n\
        1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n\
        2 0 obj\n<< /Type /Pages /Kids [4 0 R] /Count 1 >>\nendobj\n\
        3 0 obj\n<< /Length 25 >>\nstream\n<< /Type /Page >>\n3 0 obj\nendstream\nendobj\n\
        4 0 obj\n<< /Type /Page /Parent 2 0 R /Contents 3 0 R >>\nendobj\n\
        xref\n0 5\n\
        0000000000 65535 f \n\
        0000000009 00000 n \n\
        0000000058 00000 n \n\
        0000000115 00000 n \n\
        0000000190 00000 n \n\
        trailer\n<< /Size 5 /Root 1 0 R >>\n\
        startxref\n253\n%%EOF\n";

    #[test]
    fn test_count_pages_excludes_pages_node() {
        assert_eq!(count_pages(MINIMAL).unwrap(), 0);
        assert_eq!(count_pages(ONE_PAGE).unwrap(), 1);
    }

    #[test]
    fn test_count_pages_ignores_stream_content() {
        let summary = DocumentSummary::from_bytes(ONE_PAGE).unwrap();
        assert_eq!(summary.page_count, 1);
        assert_eq!(summary.objects.len(), 4);
    }

    #[test]
    fn test_scan_skips_stream_data() {
        let found = scan_object_headers(ONE_PAGE);
        assert_eq!(found.get(&3), Some(&115));
        assert_eq!(found.get(&4), Some(&190));
        assert_eq!(found.len(), 4);
    }

    #[test]
    fn test_scan_without_length_stops_at_endstream() {
        let data = b"1 0 obj\n<< >>\nstream\n\n2 0 obj\nendstream\nendobj\n2 0 obj\nnull\nendobj\n";
        let found = scan_object_headers(data);
        assert_eq!(found.get(&2), Some(&47));
    }

    #[test]
    fn test_summary() {
        let summary = DocumentSummary::from_bytes(MINIMAL).unwrap();
        assert_eq!(summary.version, "1.4");
        assert_eq!(summary.root, Some(1));
        assert_eq!(summary.size, 3);
        assert_eq!(summary.objects.len(), 2);

        let json = summary.to_json().unwrap();
        assert!(json.contains("\"startxref\": 110"));
    }
}
