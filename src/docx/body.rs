//! Body elements appended to a DOCX document and their XML form.

use std::fmt::{self, Write as FmtWrite};

use super::style::{half_points, DocxStyle};
use crate::error::{Error, Result};
use crate::sink::{ParagraphSink, TableSink};

/// Escape XML special characters and drop characters XML 1.0 forbids.
pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(ch),
            c if (c as u32) < 0x20 => {}
            c => out.push(c),
        }
    }
    out
}

/// Values shared by every element when writing XML.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RenderContext<'a> {
    pub(crate) style: &'a DocxStyle,
    pub(crate) table_style: Option<&'a str>,
    /// Paragraph style IDs for heading levels 1 to 9
    pub(crate) heading_styles: &'a [String],
}

impl RenderContext<'_> {
    fn heading_style(&self, level: u8) -> String {
        let level = level.clamp(1, 9);
        self.heading_styles
            .get(usize::from(level) - 1)
            .cloned()
            .unwrap_or_else(|| format!("Heading{}", level))
    }
}

/// A run inside an appended paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxRun {
    /// Run text
    pub text: String,
    /// Bold flag
    pub bold: bool,
    /// Italic flag
    pub italic: bool,
}

/// A body paragraph being appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocxParagraph {
    runs: Vec<DocxRun>,
}

impl DocxParagraph {
    /// Runs added so far.
    pub fn runs(&self) -> &[DocxRun] {
        &self.runs
    }

    fn write_xml(&self, xml: &mut String, ctx: RenderContext<'_>) -> fmt::Result {
        let style = ctx.style;
        xml.push_str("<w:p><w:pPr>");
        write!(
            xml,
            r#"<w:spacing w:after="{}" w:line="{}" w:lineRule="auto"/>"#,
            style.space_after_twips(),
            style.line_value()
        )?;
        if style.justify {
            xml.push_str(r#"<w:jc w:val="both"/>"#);
        }
        xml.push_str("</w:pPr>");
        for run in &self.runs {
            write_run(xml, style, &run.text, run.bold, run.italic, Some(style.body_size))?;
        }
        xml.push_str("</w:p>");
        Ok(())
    }
}

impl ParagraphSink for DocxParagraph {
    fn add_run(&mut self, text: &str, bold: bool, italic: bool) -> Result<()> {
        self.runs.push(DocxRun {
            text: text.to_string(),
            bold,
            italic,
        });
        Ok(())
    }
}

/// A single table cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocxCell {
    /// Cell text
    pub text: String,
    /// Whether the cell belongs to the header row
    pub header: bool,
}

/// A table being appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxTable {
    rows: Vec<Vec<DocxCell>>,
    cols: usize,
}

impl DocxTable {
    pub(crate) fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: vec![vec![DocxCell::default(); cols]; rows],
            cols,
        }
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.cols
    }

    /// Get a cell.
    pub fn cell(&self, row: usize, col: usize) -> Option<&DocxCell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    fn write_xml(&self, xml: &mut String, ctx: RenderContext<'_>) -> fmt::Result {
        let style = ctx.style;
        let col_width = style.text_width / self.cols.max(1) as u32;

        xml.push_str("<w:tbl><w:tblPr>");
        if let Some(id) = ctx.table_style {
            write!(xml, r#"<w:tblStyle w:val="{}"/>"#, escape_xml(id))?;
        }
        xml.push_str(r#"<w:tblW w:w="0" w:type="auto"/>"#);
        xml.push_str(
            r#"<w:tblLook w:val="04A0" w:firstRow="1" w:lastRow="0" w:firstColumn="1" w:lastColumn="0" w:noHBand="0" w:noVBand="1"/>"#,
        );
        xml.push_str("</w:tblPr><w:tblGrid>");
        for _ in 0..self.cols {
            write!(xml, r#"<w:gridCol w:w="{}"/>"#, col_width)?;
        }
        xml.push_str("</w:tblGrid>");

        for row in &self.rows {
            xml.push_str("<w:tr>");
            if row.iter().any(|c| c.header) {
                xml.push_str("<w:trPr><w:tblHeader/></w:trPr>");
            }
            for cell in row {
                write!(
                    xml,
                    r#"<w:tc><w:tcPr><w:tcW w:w="{}" w:type="dxa"/></w:tcPr><w:p>"#,
                    col_width
                )?;
                if !cell.text.is_empty() {
                    if cell.header {
                        write_run(xml, style, &cell.text, true, false, Some(style.header_cell_size))?;
                    } else {
                        write_run(xml, style, &cell.text, false, false, None)?;
                    }
                }
                xml.push_str("</w:p></w:tc>");
            }
            xml.push_str("</w:tr>");
        }
        xml.push_str("</w:tbl>");
        Ok(())
    }
}

impl TableSink for DocxTable {
    fn set_cell(&mut self, row: usize, col: usize, text: &str, is_header_row: bool) -> Result<()> {
        let (rows, cols) = (self.rows.len(), self.cols);
        let cell = self
            .rows
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or_else(|| {
                Error::Other(format!(
                    "cell ({}, {}) is outside a {}x{} table",
                    row, col, rows, cols
                ))
            })?;
        cell.text = text.to_string();
        cell.header = is_header_row;
        Ok(())
    }
}

/// Anything appended to the document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyElement {
    /// Heading paragraph
    Heading {
        /// Heading text
        text: String,
        /// Heading level (1-4)
        level: u8,
    },
    /// Body paragraph
    Paragraph(DocxParagraph),
    /// Table
    Table(DocxTable),
    /// Paragraph holding a page break
    PageBreak,
}

impl BodyElement {
    fn write_xml(&self, xml: &mut String, ctx: RenderContext<'_>) -> fmt::Result {
        match self {
            BodyElement::Heading { text, level } => {
                let style = ctx.style;
                write!(
                    xml,
                    r#"<w:p><w:pPr><w:pStyle w:val="{}"/></w:pPr>"#,
                    escape_xml(&ctx.heading_style(*level))
                )?;
                write_run(xml, style, text, true, false, Some(style.heading_size(*level)))?;
                xml.push_str("</w:p>");
                Ok(())
            }
            BodyElement::Paragraph(p) => p.write_xml(xml, ctx),
            BodyElement::Table(t) => t.write_xml(xml, ctx),
            BodyElement::PageBreak => {
                xml.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#);
                Ok(())
            }
        }
    }
}

/// Serialize a sequence of body elements.
pub(crate) fn elements_to_xml(elements: &[BodyElement], ctx: RenderContext<'_>) -> Result<String> {
    let mut xml = String::new();
    for element in elements {
        element
            .write_xml(&mut xml, ctx)
            .map_err(|e| Error::Xml(e.to_string()))?;
    }
    Ok(xml)
}

fn write_run(
    xml: &mut String,
    style: &DocxStyle,
    text: &str,
    bold: bool,
    italic: bool,
    size: Option<f32>,
) -> fmt::Result {
    let font = escape_xml(&style.font_name);
    xml.push_str("<w:r><w:rPr>");
    write!(
        xml,
        r#"<w:rFonts w:ascii="{0}" w:hAnsi="{0}" w:eastAsia="{0}" w:cs="{0}"/>"#,
        font
    )?;
    if bold {
        xml.push_str("<w:b/><w:bCs/>");
    }
    if italic {
        xml.push_str("<w:i/><w:iCs/>");
    }
    if let Some(size) = size {
        let hp = half_points(size);
        write!(xml, r#"<w:sz w:val="{0}"/><w:szCs w:val="{0}"/>"#, hp)?;
    }
    write!(
        xml,
        r#"</w:rPr><w:t xml:space="preserve">{}</w:t></w:r>"#,
        escape_xml(text)
    )
}
