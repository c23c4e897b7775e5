//! OPC package access for `.docx` files.
//!
//! A package is a ZIP archive of named parts. Parts are kept in archive
//! order and written back unchanged except for the ones replaced through
//! [`Package::set_part`].

use std::io::{Cursor, Read, Seek, Write};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{Error, Result};

/// Fallback location of the main document part.
pub(crate) const DEFAULT_MAIN_PART: &str = "word/document.xml";

const OFFICE_DOCUMENT_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";

const STYLES_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// A named part inside the package.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Part {
    name: String,
    data: Vec<u8>,
    directory: bool,
}

/// In-memory copy of a ZIP-based Office package.
#[derive(Debug, Clone, Default)]
pub(crate) struct Package {
    parts: Vec<Part>,
}

impl Package {
    /// Read every part from a ZIP archive.
    pub(crate) fn read<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut parts = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let mut data = Vec::new();
            file.read_to_end(&mut data)?;
            parts.push(Part {
                name: file.name().to_string(),
                directory: file.is_dir(),
                data,
            });
        }
        Ok(Self { parts })
    }

    /// Build the smallest package Word opens: one empty body plus styles.
    pub(crate) fn template() -> Self {
        let mut package = Self::default();
        package.set_part("[Content_Types].xml", CONTENT_TYPES.as_bytes().to_vec());
        package.set_part("_rels/.rels", ROOT_RELS.as_bytes().to_vec());
        package.set_part(DEFAULT_MAIN_PART, template_document().into_bytes());
        package.set_part(
            "word/_rels/document.xml.rels",
            DOCUMENT_RELS.as_bytes().to_vec(),
        );
        package.set_part("word/styles.xml", template_styles().into_bytes());
        package
    }

    /// Get a part's bytes.
    pub(crate) fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.data.as_slice())
    }

    /// Get a part as UTF-8 text.
    pub(crate) fn part_text(&self, name: &str) -> Result<&str> {
        let data = self
            .part(name)
            .ok_or_else(|| Error::InvalidPackage(format!("missing part {}", name)))?;
        std::str::from_utf8(data)
            .map_err(|e| Error::InvalidPackage(format!("{} is not UTF-8: {}", name, e)))
    }

    /// Replace or add a part.
    pub(crate) fn set_part(&mut self, name: &str, data: Vec<u8>) {
        match self.parts.iter_mut().find(|p| p.name == name) {
            Some(part) => part.data = data,
            None => self.parts.push(Part {
                name: name.to_string(),
                data,
                directory: false,
            }),
        }
    }

    /// Names of all parts, in archive order.
    pub(crate) fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|p| p.name.as_str())
    }

    /// Locate the main document part through the package relationships.
    pub(crate) fn main_part_name(&self) -> String {
        match self.related_part("", OFFICE_DOCUMENT_REL) {
            Ok(Some(name)) => name,
            Ok(None) => DEFAULT_MAIN_PART.to_string(),
            Err(e) => {
                log::warn!("Ignoring package relationships: {}", e);
                DEFAULT_MAIN_PART.to_string()
            }
        }
    }

    /// Locate the styles part of `main_part`, next to it if not related.
    pub(crate) fn styles_part_name(&self, main_part: &str) -> String {
        match self.related_part(main_part, STYLES_REL) {
            Ok(Some(name)) => name,
            Ok(_) | Err(_) => format!("{}styles.xml", part_dir(main_part)),
        }
    }

    /// Resolve the first relationship of `rel_type` from `source` to a part name.
    ///
    /// An empty `source` means the package itself.
    fn related_part(&self, source: &str, rel_type: &str) -> Result<Option<String>> {
        let Some(rels) = self.part(&rels_part_name(source)) else {
            return Ok(None);
        };
        let target = relationships(rels)?
            .into_iter()
            .find(|rel| rel.rel_type == rel_type && !rel.external)
            .map(|rel| rel.target);
        Ok(target.map(|target| match target.strip_prefix('/') {
            Some(absolute) => absolute.to_string(),
            None => format!("{}{}", part_dir(source), target),
        }))
    }

    /// Write every part to a ZIP archive.
    pub(crate) fn write<W: Write + Seek>(&self, writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for part in &self.parts {
            if part.directory {
                zip.add_directory(part.name.as_str(), options)?;
            } else {
                zip.start_file(part.name.as_str(), options)?;
                zip.write_all(&part.data)?;
            }
        }
        Ok(zip.finish()?)
    }

    /// Serialize the package into bytes.
    pub(crate) fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.write(Cursor::new(Vec::new()))?.into_inner())
    }
}

/// A `<Relationship>` entry of a `.rels` part.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Relationship {
    rel_type: String,
    target: String,
    external: bool,
}

/// Read every relationship in a `.rels` part.
fn relationships(rels_xml: &[u8]) -> Result<Vec<Relationship>> {
    let mut reader = Reader::from_reader(rels_xml);
    reader.config_mut().trim_text(true);
    let mut rels = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(e)) | Ok(Event::Start(e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let mut rel_type = None;
                let mut target = None;
                let mut external = false;
                for attr in e.attributes().flatten() {
                    let Ok(value) = attr.decode_and_unescape_value(reader.decoder()) else {
                        continue;
                    };
                    match attr.key.as_ref() {
                        b"Type" => rel_type = Some(value.into_owned()),
                        b"Target" => target = Some(value.into_owned()),
                        b"TargetMode" => external = value == "External",
                        _ => {}
                    }
                }
                if let (Some(rel_type), Some(target)) = (rel_type, target) {
                    rels.push(Relationship {
                        rel_type,
                        target,
                        external,
                    });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("relationships part: {}", e))),
            _ => {}
        }
    }

    Ok(rels)
}

/// Name of the `.rels` part holding relationships from `source`.
fn rels_part_name(source: &str) -> String {
    let dir = part_dir(source);
    let file = &source[dir.len()..];
    format!("{}_rels/{}.rels", dir, file)
}

/// Directory part of a part name, with trailing slash (or empty).
pub(crate) fn part_dir(name: &str) -> &str {
    match name.rfind('/') {
        Some(idx) => &name[..=idx],
        None => "",
    }
}

/// Where appended content goes in the main document part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BodySlot {
    /// Byte range of a self-closing `<w:body/>`
    Empty { start: usize, end: usize },
    /// Byte offset of the body-level `<w:sectPr>`, or of `</w:body>` without one
    Before(usize),
}

/// Find the insertion point for appended content.
///
/// Only a `<w:sectPr>` that is the last child of `<w:body>` counts; one
/// inside a paragraph ends an earlier section.
pub(crate) fn locate_body_slot(document_xml: &str) -> Result<BodySlot> {
    let mut reader = Reader::from_str(document_xml);
    let mut depth = 0usize;
    let mut body_depth: Option<usize> = None;
    let mut sect_pr: Option<usize> = None;

    loop {
        let event = reader.read_event();
        let end = reader.buffer_position() as usize;
        let start = tag_start(document_xml, end);
        match event {
            Ok(Event::Start(e)) => {
                depth += 1;
                let is_sect_pr = e.local_name().as_ref() == b"sectPr";
                match body_depth {
                    None if e.local_name().as_ref() == b"body" => body_depth = Some(depth),
                    Some(body) if depth == body + 1 => sect_pr = is_sect_pr.then_some(start),
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) => {
                let is_sect_pr = e.local_name().as_ref() == b"sectPr";
                match body_depth {
                    None if e.local_name().as_ref() == b"body" => {
                        return Ok(BodySlot::Empty { start, end });
                    }
                    Some(body) if depth == body => sect_pr = is_sect_pr.then_some(start),
                    _ => {}
                }
            }
            Ok(Event::End(_)) => {
                if body_depth == Some(depth) {
                    return Ok(BodySlot::Before(sect_pr.unwrap_or(start)));
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("document part: {}", e))),
            _ => {}
        }
    }

    Err(Error::InvalidPackage(
        "document part has no <w:body>".to_string(),
    ))
}

/// Start of the markup ending at `end`. `<` cannot occur inside a tag.
fn tag_start(xml: &str, end: usize) -> usize {
    xml.get(..end)
        .and_then(|head| head.rfind('<'))
        .unwrap_or(end)
}

/// Insert `fragment` at the end of the document body, before the final
/// section properties.
pub(crate) fn insert_into_body(document_xml: &str, fragment: &str) -> Result<String> {
    let mut out = String::with_capacity(document_xml.len() + fragment.len() + 16);
    match locate_body_slot(document_xml)? {
        BodySlot::Empty { start, end } => {
            out.push_str(&document_xml[..start]);
            out.push_str("<w:body>");
            out.push_str(fragment);
            out.push_str("</w:body>");
            out.push_str(&document_xml[end..]);
        }
        BodySlot::Before(at) => {
            out.push_str(&document_xml[..at]);
            out.push_str(fragment);
            out.push_str(&document_xml[at..]);
        }
    }
    Ok(out)
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

fn template_document() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{}" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:body><w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr></w:body></w:document>"#,
        W_NS
    )
}

fn template_styles() -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{}"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Times New Roman" w:hAnsi="Times New Roman" w:eastAsia="Times New Roman" w:cs="Times New Roman"/><w:sz w:val="24"/><w:szCs w:val="24"/></w:rPr></w:rPrDefault><w:pPrDefault/></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#,
        W_NS
    );
    for level in 1..=4u8 {
        xml.push_str(&format!(
            r#"<w:style w:type="paragraph" w:styleId="Heading{0}"><w:name w:val="heading {0}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="{1}"/></w:pPr><w:rPr><w:b/></w:rPr></w:style>"#,
            level,
            level - 1
        ));
    }
    xml.push_str(r#"<w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/><w:tblPr><w:tblInd w:w="0" w:type="dxa"/><w:tblCellMar><w:top w:w="0" w:type="dxa"/><w:left w:w="108" w:type="dxa"/><w:bottom w:w="0" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style>"#);
    xml.push_str(r#"<w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/><w:basedOn w:val="TableNormal"/><w:tblPr><w:tblBorders>"#);
    for side in ["top", "left", "bottom", "right", "insideH", "insideV"] {
        xml.push_str(&format!(
            r#"<w:{} w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#,
            side
        ));
    }
    xml.push_str("</w:tblBorders></w:tblPr></w:style></w:styles>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::styles::StyleSheet;

    #[test]
    fn test_insert_before_body_sect_pr() {
        let doc = r#"<w:document><w:body><w:p><w:r><w:t>old</w:t></w:r></w:p><w:sectPr><w:pgSz/></w:sectPr></w:body></w:document>"#;
        let out = insert_into_body(doc, "<w:p>NEW</w:p>").unwrap();
        assert!(out.contains("old</w:t></w:r></w:p><w:p>NEW</w:p><w:sectPr>"));
    }

    #[test]
    fn test_paragraph_sect_pr_not_used() {
        // A sectPr inside a paragraph ends an earlier section, not the body.
        let doc = r#"<w:body><w:p><w:pPr><w:sectPr/></w:pPr></w:p><w:p>last</w:p></w:body>"#;
        let out = insert_into_body(doc, "<X/>").unwrap();
        assert!(out.ends_with("<w:p>last</w:p><X/></w:body>"));
    }

    #[test]
    fn test_insert_without_sect_pr() {
        let out = insert_into_body("<w:body><w:p/></w:body>", "<X/>").unwrap();
        assert_eq!(out, "<w:body><w:p/><X/></w:body>");
    }

    #[test]
    fn test_insert_into_empty_body() {
        let out = insert_into_body("<w:document><w:body/></w:document>", "<X/>").unwrap();
        assert_eq!(out, "<w:document><w:body><X/></w:body></w:document>");
    }

    #[test]
    fn test_missing_body() {
        assert!(matches!(
            insert_into_body("<w:document/>", "<X/>"),
            Err(Error::InvalidPackage(_))
        ));
    }

    #[test]
    fn test_sect_pr_change_is_not_sect_pr() {
        let doc = r#"<w:body><w:p/><w:sectPrChange/></w:body>"#;
        assert_eq!(locate_body_slot(doc).unwrap(), BodySlot::Before(doc.len() - 9));
    }

    #[test]
    fn test_body_slot_with_whitespace() {
        let doc = "<w:document>\n  <w:body>\n    <w:p/>\n    <w:sectPr/>\n  </w:body>\n</w:document>";
        let out = insert_into_body(doc, "<X/>").unwrap();
        assert!(out.contains("<w:p/>\n    <X/><w:sectPr/>"));
    }

    #[test]
    fn test_malformed_document_part() {
        assert!(matches!(
            insert_into_body("<w:document><w:body></w:document>", "<X/>"),
            Err(Error::Xml(_))
        ));
    }

    #[test]
    fn test_relationships() {
        let rels = br#"<Relationships><Relationship Id="rId2" Type="http://x/thumbnail" Target="docProps/thumb.jpeg"/><Relationship Target='word/document2.xml' Id='rId1' Type='http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument'/><Relationship Id="rId3" Type="http://x/link" Target="https://example.com/a?b&amp;c" TargetMode="External"/></Relationships>"#;
        let parsed = relationships(rels).unwrap();

        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[1].target, "word/document2.xml");
        assert_eq!(parsed[1].rel_type, OFFICE_DOCUMENT_REL);
        assert_eq!(parsed[2].target, "https://example.com/a?b&c");
        assert!(parsed[2].external);
    }

    #[test]
    fn test_related_parts() {
        let mut package = Package::template();
        package.set_part(
            "_rels/.rels",
            br#"<Relationships><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="/doc/main.xml"/></Relationships>"#.to_vec(),
        );
        package.set_part(
            "doc/_rels/main.xml.rels",
            br#"<Relationships><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="theme/styles2.xml"/></Relationships>"#.to_vec(),
        );

        let main = package.main_part_name();
        assert_eq!(main, "doc/main.xml");
        assert_eq!(package.styles_part_name(&main), "doc/theme/styles2.xml");
        assert_eq!(package.styles_part_name("other/x.xml"), "other/styles.xml");
        assert_eq!(rels_part_name(""), "_rels/.rels");
    }

    #[test]
    fn test_template_roundtrip() {
        let package = Package::template();
        let bytes = package.to_bytes().unwrap();
        let reread = Package::read(Cursor::new(bytes)).unwrap();

        let main = reread.main_part_name();
        assert_eq!(main, DEFAULT_MAIN_PART);
        let styles_part = reread.styles_part_name(&main);
        assert_eq!(styles_part, "word/styles.xml");

        let styles = StyleSheet::parse(reread.part(&styles_part).unwrap()).unwrap();
        assert_eq!(styles.heading_id(4), "Heading4");
        assert_eq!(styles.resolve("Table Grid", "table"), Some("TableGrid"));
        assert_eq!(styles.resolve("Light Grid Accent 1", "table"), None);
        assert_eq!(
            reread.part_names().collect::<Vec<_>>(),
            package.part_names().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_part_dir() {
        assert_eq!(part_dir("word/document.xml"), "word/");
        assert_eq!(part_dir("document.xml"), "");
    }
}
