//! Presentation settings for the DOCX sink.

/// Fonts, sizes and spacing applied to appended content.
///
/// Sizes are in points. The defaults set body text in 12 pt Times New Roman,
/// justified, with 1.5 line spacing and 6 pt after each paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct DocxStyle {
    /// Font used for every run (Latin, East Asian and complex script slots)
    pub font_name: String,

    /// Body text size
    pub body_size: f32,

    /// Heading sizes for levels 1 to 4
    pub heading_sizes: [f32; 4],

    /// Size of the header-row cell text
    pub header_cell_size: f32,

    /// Line spacing multiplier (1.0 = single)
    pub line_spacing: f32,

    /// Space after body paragraphs
    pub space_after: f32,

    /// Justify body paragraphs
    pub justify: bool,

    /// Table style names or IDs, first one defined by the document wins
    pub table_styles: Vec<String>,

    /// Usable text width in twips, split evenly across table columns
    pub text_width: u32,
}

impl DocxStyle {
    /// Create the default style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font name.
    pub fn with_font(mut self, name: impl Into<String>) -> Self {
        self.font_name = name.into();
        self
    }

    /// Set the body text size in points.
    pub fn with_body_size(mut self, size: f32) -> Self {
        self.body_size = size;
        self
    }

    /// Set the heading sizes for levels 1 to 4.
    pub fn with_heading_sizes(mut self, sizes: [f32; 4]) -> Self {
        self.heading_sizes = sizes;
        self
    }

    /// Set the line spacing multiplier.
    pub fn with_line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Enable or disable justified body text.
    pub fn with_justify(mut self, justify: bool) -> Self {
        self.justify = justify;
        self
    }

    /// Replace the table style preference list.
    pub fn with_table_styles<S: Into<String>>(mut self, styles: impl IntoIterator<Item = S>) -> Self {
        self.table_styles = styles.into_iter().map(Into::into).collect();
        self
    }

    /// Heading size for `level`. Levels past 4 use the level 4 size.
    pub fn heading_size(&self, level: u8) -> f32 {
        let idx = (level.clamp(1, 4) - 1) as usize;
        self.heading_sizes[idx]
    }

    /// Line spacing in 240ths of a line, as `w:line` expects.
    pub fn line_value(&self) -> u32 {
        (self.line_spacing * 240.0).round() as u32
    }

    /// Space after in twips.
    pub fn space_after_twips(&self) -> u32 {
        points_to_twips(self.space_after)
    }
}

impl Default for DocxStyle {
    fn default() -> Self {
        Self {
            font_name: "Times New Roman".to_string(),
            body_size: 12.0,
            heading_sizes: [14.0, 12.0, 11.0, 11.0],
            header_cell_size: 11.0,
            line_spacing: 1.5,
            space_after: 6.0,
            justify: true,
            table_styles: vec!["Light Grid Accent 1".to_string(), "Table Grid".to_string()],
            text_width: 9026,
        }
    }
}

/// Convert points to half-points (`w:sz`).
pub fn half_points(size: f32) -> u32 {
    (size * 2.0).round() as u32
}

/// Convert points to twips.
pub fn points_to_twips(size: f32) -> u32 {
    (size * 20.0).round() as u32
}
