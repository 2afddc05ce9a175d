//! Fixed page geometry for the two serializers.
//!
//! Both layouts are constants of the output format: the serializers always
//! use `Default::default()`, so identical input yields identical bytes.

/// US Letter page size in PDF user units (1/72 inch).
pub const LETTER: (f64, f64) = (612.0, 792.0);

/// Geometry used when placing one JPEG image per page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageLayout {
    /// Page width
    pub page_width: f64,
    /// Page height
    pub page_height: f64,
    /// Largest width an image may occupy on the page
    pub max_width: f64,
    /// Largest height an image may occupy on the page
    pub max_height: f64,
}

impl Default for ImageLayout {
    fn default() -> Self {
        Self {
            page_width: LETTER.0,
            page_height: LETTER.1,
            max_width: 512.0,
            max_height: 692.0,
        }
    }
}

/// Geometry and font settings for plain-text pages.
///
/// Character width is approximated as `font_size * char_width_factor`; no
/// glyph metrics are consulted.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    /// Page width
    pub page_width: f64,
    /// Page height
    pub page_height: f64,
    /// Margin on every side
    pub margin: f64,
    /// Font size in points
    pub font_size: f64,
    /// Distance between consecutive baselines
    pub line_height: f64,
    /// Average glyph width as a fraction of the font size
    pub char_width_factor: f64,
    /// Standard Type1 font referenced by name (never embedded)
    pub base_font: String,
    /// Resource name the content streams select the font with
    pub font_resource: String,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            page_width: LETTER.0,
            page_height: LETTER.1,
            margin: 50.0,
            font_size: 12.0,
            line_height: 16.0,
            char_width_factor: 0.55,
            base_font: "Helvetica".to_string(),
            font_resource: "F1".to_string(),
        }
    }
}

impl TextLayout {
    /// Maximum characters on one output line.
    pub fn chars_per_line(&self) -> usize {
        let usable = self.page_width - 2.0 * self.margin;
        (usable / (self.font_size * self.char_width_factor)).floor() as usize
    }

    /// Maximum lines on one page.
    pub fn lines_per_page(&self) -> usize {
        let usable = self.page_height - 2.0 * self.margin;
        (usable / self.line_height).floor() as usize
    }

    /// Baseline of the first line on a page.
    pub fn first_baseline(&self) -> f64 {
        self.page_height - self.margin - self.font_size
    }

    /// Baseline of the line at `index` (0-based) on a page.
    pub fn baseline(&self, index: usize) -> f64 {
        self.first_baseline() - self.line_height * index as f64
    }
}
