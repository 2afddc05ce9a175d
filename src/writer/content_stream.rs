//! PDF content stream builder.
//!
//! Builds PDF content streams containing graphics and text operators
//! according to PDF specification ISO 32000-1:2008 Section 8-9. Each
//! operator is written on its own line.

use super::image_handler::ImagePlacement;
use crate::error::Result;
use std::io::Write;

/// Operations that can be added to a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Set transformation matrix (cm)
    Transform(f64, f64, f64, f64, f64, f64),
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font and size (Tf)
    SetFont(String, f64),
    /// Set text matrix (Tm)
    SetTextMatrix(f64, f64, f64, f64, f64, f64),
    /// Show text (Tj) - literal string
    ShowText(String),
    /// Paint XObject (Do)
    PaintXObject(String),
}

/// Builder for PDF content streams.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    /// Operations in the stream
    operations: Vec<ContentStreamOp>,
    /// Whether we're in a text object
    in_text_object: bool,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation to the stream.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Operations added so far.
    pub fn operations(&self) -> &[ContentStreamOp] {
        &self.operations
    }

    /// Begin a text object.
    pub fn begin_text(&mut self) -> &mut Self {
        if !self.in_text_object {
            self.op(ContentStreamOp::BeginText);
            self.in_text_object = true;
        }
        self
    }

    /// End a text object.
    pub fn end_text(&mut self) -> &mut Self {
        if self.in_text_object {
            self.op(ContentStreamOp::EndText);
            self.in_text_object = false;
        }
        self
    }

    /// Select a font resource and size.
    pub fn set_font(&mut self, font_resource: &str, size: f64) -> &mut Self {
        self.op(ContentStreamOp::SetFont(font_resource.to_string(), size))
    }

    /// Show text with its origin at the absolute position (`x`, `y`).
    pub fn text(&mut self, text: &str, x: f64, y: f64) -> &mut Self {
        self.begin_text();
        self.op(ContentStreamOp::SetTextMatrix(1.0, 0.0, 0.0, 1.0, x, y));
        self.op(ContentStreamOp::ShowText(text.to_string()))
    }

    /// Save graphics state.
    pub fn save_state(&mut self) -> &mut Self {
        self.op(ContentStreamOp::SaveState)
    }

    /// Restore graphics state.
    pub fn restore_state(&mut self) -> &mut Self {
        self.op(ContentStreamOp::RestoreState)
    }

    /// Concatenate a transformation matrix.
    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> &mut Self {
        self.op(ContentStreamOp::Transform(a, b, c, d, e, f))
    }

    /// Paint the image XObject `name` into the box given by `placement`.
    pub fn draw_image(&mut self, name: &str, placement: &ImagePlacement) -> &mut Self {
        let (a, b, c, d, e, f) = placement.transform_matrix();
        self.save_state()
            .transform(a, b, c, d, e, f)
            .op(ContentStreamOp::PaintXObject(name.to_string()))
            .restore_state()
    }

    /// Build the content stream to bytes.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();

        for op in &self.operations {
            self.write_op(&mut buf, op)?;
            writeln!(buf)?;
        }

        Ok(buf)
    }

    /// Write a single operation to the buffer.
    fn write_op<W: Write>(&self, w: &mut W, op: &ContentStreamOp) -> std::io::Result<()> {
        match op {
            ContentStreamOp::SaveState => write!(w, "q"),
            ContentStreamOp::RestoreState => write!(w, "Q"),
            ContentStreamOp::Transform(a, b, c, d, e, f) => {
                write!(w, "{} {} {} {} {} {} cm", a, b, c, d, e, f)
            },
            ContentStreamOp::BeginText => write!(w, "BT"),
            ContentStreamOp::EndText => write!(w, "ET"),
            ContentStreamOp::SetFont(name, size) => write!(w, "/{} {} Tf", name, size),
            ContentStreamOp::SetTextMatrix(a, b, c, d, e, f) => {
                write!(w, "{} {} {} {} {} {} Tm", a, b, c, d, e, f)
            },
            ContentStreamOp::ShowText(text) => {
                write!(w, "(")?;
                write_escaped_string(w, text)?;
                write!(w, ") Tj")
            },
            ContentStreamOp::PaintXObject(name) => write!(w, "/{} Do", name),
        }
    }
}

/// Write `text` for use inside a literal string.
///
/// Only `\`, `(` and `)` are escaped; every other byte, including non-ASCII
/// UTF-8 sequences and control characters, is written unchanged.
pub fn write_escaped_string<W: Write>(w: &mut W, text: &str) -> std::io::Result<()> {
    for byte in text.bytes() {
        match byte {
            b'(' => write!(w, "\\(")?,
            b')' => write!(w, "\\)")?,
            b'\\' => write!(w, "\\\\")?,
            _ => w.write_all(&[byte])?,
        }
    }
    Ok(())
}
