//! DOCX document sink.
//!
//! [`DocxDocument`] opens an existing `.docx` package (or starts from a
//! minimal template), collects appended content as body elements, and on
//! save writes them into the main document part just before the final
//! section properties. Every other part of the package is copied as is.
//!
//! # Example
//!
//! ```no_run
//! use mdmerge::docx::DocxDocument;
//! use mdmerge::sink::{DocumentSink, ParagraphSink};
//! use std::path::Path;
//!
//! fn main() -> mdmerge::Result<()> {
//!     let mut doc = DocxDocument::open("thesis.docx")?;
//!     doc.add_heading("Conclusions", 1)?;
//!     doc.add_paragraph()?.add_run("Done.", false, false)?;
//!     doc.save(Path::new("thesis_full.docx"))?;
//!     Ok(())
//! }
//! ```

mod body;
mod package;
mod style;
mod styles;

pub use body::{BodyElement, DocxCell, DocxParagraph, DocxRun, DocxTable};
pub use style::{half_points, points_to_twips, DocxStyle};

use std::fs;
use std::io::Cursor;
use std::path::Path;

use body::{elements_to_xml, RenderContext};
use package::{insert_into_body, locate_body_slot, Package};
use styles::StyleSheet;

use crate::error::{Error, Result};
use crate::sink::DocumentSink;

/// A Word document that content can be appended to.
#[derive(Debug, Clone)]
pub struct DocxDocument {
    package: Package,
    main_part: String,
    styles: StyleSheet,
    elements: Vec<BodyElement>,
    style: DocxStyle,
}

impl DocxDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        let package = Package::template();
        let main_part = package.main_part_name();
        let styles = load_styles(&package, &main_part);
        Self {
            package,
            main_part,
            styles,
            elements: Vec::new(),
            style: DocxStyle::default(),
        }
    }

    /// Open an existing `.docx` file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path.as_ref())?;
        Self::from_bytes(&data)
    }

    /// Load a document from `.docx` bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let package = Package::read(Cursor::new(data))?;
        let main_part = package.main_part_name();
        // Fail early rather than at save time.
        locate_body_slot(package.part_text(&main_part)?)?;
        let styles = load_styles(&package, &main_part);
        log::debug!(
            "Opened package with {} parts, main part {}, {} styles",
            package.part_names().count(),
            main_part,
            styles.len()
        );
        Ok(Self {
            package,
            main_part,
            styles,
            elements: Vec::new(),
            style: DocxStyle::default(),
        })
    }

    /// Set presentation settings for appended content.
    pub fn with_style(mut self, style: DocxStyle) -> Self {
        self.style = style;
        self
    }

    /// Replace presentation settings for appended content.
    pub fn set_style(&mut self, style: DocxStyle) {
        self.style = style;
    }

    /// Get the presentation settings.
    pub fn style(&self) -> &DocxStyle {
        &self.style
    }

    /// Elements appended so far.
    pub fn elements(&self) -> &[BodyElement] {
        &self.elements
    }

    /// Name of the main document part.
    pub fn main_part(&self) -> &str {
        &self.main_part
    }

    /// ID of the first table style from the preference list that the
    /// package defines, matched by ID or by name.
    pub fn table_style(&self) -> Option<&str> {
        self.style
            .table_styles
            .iter()
            .find_map(|wanted| self.styles.resolve(wanted, "table"))
    }

    /// Paragraph style ID used for headings of `level`.
    pub fn heading_style(&self, level: u8) -> String {
        self.styles.heading_id(level)
    }

    /// Main document XML with the appended content in place.
    pub fn document_xml(&self) -> Result<String> {
        let heading_styles: Vec<String> = (1..=9).map(|level| self.heading_style(level)).collect();
        let ctx = RenderContext {
            style: &self.style,
            table_style: self.table_style(),
            heading_styles: &heading_styles,
        };
        let fragment = elements_to_xml(&self.elements, ctx)?;
        let original = self.package.part_text(&self.main_part)?;
        insert_into_body(original, &fragment)
    }

    /// Serialize the whole package with the appended content.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut package = self.package.clone();
        package.set_part(&self.main_part, self.document_xml()?.into_bytes());
        package.to_bytes()
    }

    fn push(&mut self, element: BodyElement) -> Option<&mut BodyElement> {
        self.elements.push(element);
        self.elements.last_mut()
    }
}

/// Read the style sheet, treating a missing or unreadable part as empty.
fn load_styles(package: &Package, main_part: &str) -> StyleSheet {
    let name = package.styles_part_name(main_part);
    let Some(data) = package.part(&name) else {
        log::debug!("No styles part {}", name);
        return StyleSheet::default();
    };
    StyleSheet::parse(data).unwrap_or_else(|e| {
        log::warn!("Ignoring unreadable styles part {}: {}", name, e);
        StyleSheet::default()
    })
}

impl Default for DocxDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSink for DocxDocument {
    type Paragraph = DocxParagraph;
    type Table = DocxTable;

    fn add_heading(&mut self, text: &str, level: u8) -> Result<()> {
        self.elements.push(BodyElement::Heading {
            text: text.to_string(),
            level,
        });
        Ok(())
    }

    fn add_paragraph(&mut self) -> Result<&mut DocxParagraph> {
        match self.push(BodyElement::Paragraph(DocxParagraph::default())) {
            Some(BodyElement::Paragraph(p)) => Ok(p),
            _ => Err(Error::Other("paragraph was not appended".to_string())),
        }
    }

    fn add_table(&mut self, rows: usize, cols: usize) -> Result<&mut DocxTable> {
        if rows == 0 || cols == 0 {
            return Err(Error::Other(format!(
                "cannot add a {}x{} table",
                rows, cols
            )));
        }
        match self.push(BodyElement::Table(DocxTable::new(rows, cols))) {
            Some(BodyElement::Table(t)) => Ok(t),
            _ => Err(Error::Other("table was not appended".to_string())),
        }
    }

    fn add_page_break(&mut self) -> Result<()> {
        self.elements.push(BodyElement::PageBreak);
        Ok(())
    }

    fn save(&mut self, path: &Path) -> Result<()> {
        let bytes = self.to_bytes().map_err(|e| Error::UnwritableOutput {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        fs::write(path, bytes).map_err(|e| Error::UnwritableOutput {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        log::debug!(
            "Saved {} appended elements to {}",
            self.elements.len(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{ParagraphSink, TableSink};

    #[test]
    fn test_new_document_xml() {
        let mut doc = DocxDocument::new();
        doc.add_heading("Title", 1).unwrap();
        doc.add_paragraph()
            .unwrap()
            .add_run("Body", false, true)
            .unwrap();
        doc.add_page_break().unwrap();

        let xml = doc.document_xml().unwrap();
        let heading = xml.find("Heading1").unwrap();
        let body = xml.find(">Body<").unwrap();
        let brk = xml.find(r#"<w:br w:type="page"/>"#).unwrap();
        let sect = xml.find("<w:sectPr>").unwrap();
        assert!(heading < body && body < brk && brk < sect);
        assert!(xml.contains("<w:i/>"));
    }

    #[test]
    fn test_table_style_fallback() {
        let doc = DocxDocument::new();
        assert_eq!(doc.table_style(), Some("TableGrid"));

        let doc = DocxDocument::new().with_style(DocxStyle::new().with_table_styles(["Missing"]));
        assert_eq!(doc.table_style(), None);
    }

    fn localized_document() -> DocxDocument {
        let mut package = Package::template();
        package.set_part(
            "word/styles.xml",
            br#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:styleId="1"><w:name w:val="heading 1"/></w:style><w:style w:type="paragraph" w:styleId="2"><w:name w:val="heading 2"/></w:style><w:style w:type="table" w:styleId="-11"><w:name w:val="Light Grid Accent 1"/></w:style></w:styles>"#.to_vec(),
        );
        DocxDocument::from_bytes(&package.to_bytes().unwrap()).unwrap()
    }

    #[test]
    fn test_localized_style_ids() {
        let mut doc = localized_document();
        assert_eq!(doc.main_part(), "word/document.xml");
        assert_eq!(doc.table_style(), Some("-11"));
        assert_eq!(doc.heading_style(1), "1");
        assert_eq!(doc.heading_style(3), "Heading3");

        doc.add_heading("Εισαγωγή", 1).unwrap();
        doc.add_heading("Μέθοδος", 2).unwrap();
        doc.add_table(1, 1).unwrap().set_cell(0, 0, "A", true).unwrap();

        let xml = doc.document_xml().unwrap();
        assert!(xml.contains(r#"<w:pStyle w:val="1"/>"#));
        assert!(xml.contains(r#"<w:pStyle w:val="2"/>"#));
        assert!(!xml.contains("Heading1"));
        assert!(xml.contains(r#"<w:tblStyle w:val="-11"/>"#));
    }

    #[test]
    fn test_table_style_by_id() {
        let doc = DocxDocument::new().with_style(DocxStyle::new().with_table_styles(["TableGrid"]));
        assert_eq!(doc.table_style(), Some("TableGrid"));
    }

    #[test]
    fn test_appended_elements_kept() {
        let mut doc = DocxDocument::new();
        doc.add_paragraph()
            .unwrap()
            .add_run("loud", true, false)
            .unwrap();
        let table = doc.add_table(2, 2).unwrap();
        table.set_cell(1, 1, "x", false).unwrap();

        match &doc.elements()[0] {
            BodyElement::Paragraph(p) => {
                assert_eq!(p.runs().len(), 1);
                assert!(p.runs()[0].bold);
            }
            other => panic!("expected a paragraph, got {:?}", other),
        }
        match &doc.elements()[1] {
            BodyElement::Table(t) => {
                assert_eq!(t.cell(1, 1).map(|c| c.text.as_str()), Some("x"));
                assert_eq!(t.cell(0, 0), Some(&DocxCell::default()));
                assert_eq!(t.cell(2, 0), None);
            }
            other => panic!("expected a table, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_sized_table_rejected() {
        let mut doc = DocxDocument::new();
        assert!(doc.add_table(0, 2).is_err());
        assert!(doc.add_table(2, 0).is_err());
        assert!(doc.elements().is_empty());
    }

    #[test]
    fn test_reopen_saved_bytes() {
        let mut doc = DocxDocument::new();
        let table = doc.add_table(1, 2).unwrap();
        table.set_cell(0, 0, "A", true).unwrap();
        table.set_cell(0, 1, "B", true).unwrap();
        let bytes = doc.to_bytes().unwrap();

        let reopened = DocxDocument::from_bytes(&bytes).unwrap();
        let xml = reopened.document_xml().unwrap();
        assert!(xml.contains("<w:tbl>"));
        assert!(reopened.elements().is_empty());
    }

    #[test]
    fn test_from_bytes_rejects_missing_body() {
        let mut package = Package::template();
        package.set_part("word/document.xml", b"<w:document/>".to_vec());
        assert!(matches!(
            DocxDocument::from_bytes(&package.to_bytes().unwrap()),
            Err(Error::InvalidPackage(_))
        ));
    }

    #[test]
    fn test_from_bytes_rejects_non_zip() {
        assert!(matches!(
            DocxDocument::from_bytes(b"not a zip"),
            Err(Error::Zip(_))
        ));
    }
}
