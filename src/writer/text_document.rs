//! Plain text to a paginated PDF.
//!
//! Layout is deliberately approximate: every character is assumed to be
//! `font_size * char_width_factor` wide, lines are hard-wrapped at a fixed
//! character count, and pages hold a fixed number of lines.

use super::content_stream::ContentStreamBuilder;
use super::document_builder::DocumentBuilder;
use super::object_serializer::ObjectSerializer;
use crate::config::TextLayout;
use crate::error::Result;
use crate::object::{Object, ObjectRef};

/// Split `text` on `\n` and hard-wrap each line into chunks of at most
/// `chars_per_line` characters.
///
/// An empty line yields exactly one empty output line, so blank lines keep
/// their vertical space. Wrapping counts `char`s and never splits a code
/// point.
pub fn wrap_lines(text: &str, chars_per_line: usize) -> Vec<String> {
    let width = chars_per_line.max(1);
    let mut lines = Vec::new();

    for raw in text.split('\n') {
        if raw.is_empty() {
            lines.push(String::new());
            continue;
        }
        let chars: Vec<char> = raw.chars().collect();
        lines.extend(chars.chunks(width).map(|chunk| chunk.iter().collect::<String>()));
    }

    lines
}

/// Group wrapped lines into pages of at most `lines_per_page` lines.
///
/// Never returns zero pages: no lines yields one page holding one empty line.
pub fn paginate(lines: Vec<String>, lines_per_page: usize) -> Vec<Vec<String>> {
    let per_page = lines_per_page.max(1);
    let mut pages: Vec<Vec<String>> = lines.chunks(per_page).map(<[String]>::to_vec).collect();

    if pages.is_empty() {
        pages.push(vec![String::new()]);
    }
    pages
}

/// Serializes a block of plain text into a multi-page PDF that references a
/// single standard Type1 font.
#[derive(Debug, Clone, Default)]
pub struct TextToPdfSerializer {
    layout: TextLayout,
}

impl TextToPdfSerializer {
    /// Create a serializer with the fixed text layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrapped and paginated lines for `text`.
    pub fn layout_pages(&self, text: &str) -> Vec<Vec<String>> {
        let lines = wrap_lines(text, self.layout.chars_per_line());
        paginate(lines, self.layout.lines_per_page())
    }

    /// Produce a complete PDF file.
    ///
    /// Text is written as its UTF-8 bytes with only `\`, `(` and `)`
    /// escaped.
    pub fn serialize(&self, text: &str) -> Result<Vec<u8>> {
        self.serialize_pages(&self.layout_pages(text))
    }

    /// Produce a complete PDF file from lines already laid out by
    /// [`layout_pages`](Self::layout_pages), one inner `Vec` per page.
    ///
    /// An empty `pages` slice is written as one page holding one empty line.
    pub fn serialize_pages(&self, pages: &[Vec<String>]) -> Result<Vec<u8>> {
        let blank = [vec![String::new()]];
        let pages = if pages.is_empty() { &blank[..] } else { pages };
        let text_len: usize = pages.iter().flatten().map(String::len).sum();
        let mut builder = DocumentBuilder::with_capacity(text_len * 2 + 256 * pages.len() + 512);

        let catalog = builder.allocate();
        let pages_ref = builder.allocate();
        let page_refs: Vec<(ObjectRef, ObjectRef)> = pages
            .iter()
            .map(|_| (builder.allocate(), builder.allocate()))
            .collect();
        let font = builder.allocate();

        log::debug!(
            "Serializing {} bytes of text into {} pages ({} objects)",
            text_len,
            pages.len(),
            builder.object_count() - 1
        );

        builder.write_object(
            catalog,
            &ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Catalog")),
                ("Pages", ObjectSerializer::reference(pages_ref)),
            ]),
        )?;

        let kids = page_refs
            .iter()
            .map(|(_, page)| ObjectSerializer::reference(*page))
            .collect();
        builder.write_object(
            pages_ref,
            &ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Pages")),
                ("Kids", ObjectSerializer::array(kids)),
                ("Count", ObjectSerializer::integer(pages.len() as i64)),
            ]),
        )?;

        for (lines, (content, page)) in pages.iter().zip(&page_refs) {
            builder.write_object(
                *content,
                &Object::Stream {
                    dict: ObjectSerializer::dictionary(vec![]),
                    data: self.page_content(lines)?.into(),
                },
            )?;

            builder.write_object(
                *page,
                &ObjectSerializer::dict(vec![
                    ("Type", ObjectSerializer::name("Page")),
                    ("Parent", ObjectSerializer::reference(pages_ref)),
                    (
                        "MediaBox",
                        ObjectSerializer::rect(
                            0.0,
                            0.0,
                            self.layout.page_width,
                            self.layout.page_height,
                        ),
                    ),
                    ("Contents", ObjectSerializer::reference(*content)),
                    ("Resources", self.font_resources(font)),
                ]),
            )?;
        }

        builder.write_object(
            font,
            &ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Font")),
                ("Subtype", ObjectSerializer::name("Type1")),
                ("BaseFont", ObjectSerializer::name(&self.layout.base_font)),
            ]),
        )?;

        builder.finish(catalog)
    }

    /// Content stream for one page of lines.
    fn page_content(&self, lines: &[String]) -> Result<Vec<u8>> {
        let mut content = ContentStreamBuilder::new();
        content
            .begin_text()
            .set_font(&self.layout.font_resource, self.layout.font_size);

        for (index, line) in lines.iter().enumerate() {
            content.text(line, self.layout.margin, self.layout.baseline(index));
        }

        content.end_text().build()
    }

    fn font_resources(&self, font: ObjectRef) -> Object {
        ObjectSerializer::dict(vec![(
            "Font",
            ObjectSerializer::dict(vec![(
                self.layout.font_resource.as_str(),
                ObjectSerializer::reference(font),
            )]),
        )])
    }
}
