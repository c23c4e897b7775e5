//! Style definitions read from a package's styles part.
//!
//! Word stores built-in styles under a fixed name (`heading 1`,
//! `Table Grid`) but localized documents give them other IDs, so lookups
//! go by ID first and then by name.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};

/// One `<w:style>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StyleEntry {
    id: String,
    name: Option<String>,
    /// `w:type`: paragraph, character, table or numbering
    kind: Option<String>,
}

/// The styles a document defines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct StyleSheet {
    styles: Vec<StyleEntry>,
}

impl StyleSheet {
    /// Parse a `styles.xml` part.
    pub(crate) fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut styles = Vec::new();
        let mut current: Option<StyleEntry> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) if e.local_name().as_ref() == b"style" => {
                    current = style_entry(&reader, &e);
                }
                Ok(Event::Empty(e)) if e.local_name().as_ref() == b"style" => {
                    styles.extend(style_entry(&reader, &e));
                }
                Ok(Event::Empty(e)) if e.local_name().as_ref() == b"name" => {
                    if let Some(entry) = current.as_mut() {
                        entry.name = attribute(&reader, &e, b"val");
                    }
                }
                Ok(Event::End(e)) if e.local_name().as_ref() == b"style" => {
                    styles.extend(current.take());
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Xml(format!("styles part: {}", e))),
                _ => {}
            }
        }

        Ok(Self { styles })
    }

    /// Number of styles.
    pub(crate) fn len(&self) -> usize {
        self.styles.len()
    }

    /// Resolve a style of `kind` given by ID or name to the ID the document uses.
    pub(crate) fn resolve(&self, id_or_name: &str, kind: &str) -> Option<&str> {
        let of_kind = |s: &&StyleEntry| s.kind.as_deref().map_or(true, |k| k == kind);
        self.styles
            .iter()
            .filter(of_kind)
            .find(|s| s.id == id_or_name)
            .or_else(|| {
                self.styles
                    .iter()
                    .filter(of_kind)
                    .find(|s| s.has_name(id_or_name))
            })
            .map(|s| s.id.as_str())
    }

    /// Paragraph style ID for a heading level, `HeadingN` if none is named.
    pub(crate) fn heading_id(&self, level: u8) -> String {
        let level = level.clamp(1, 9);
        match self.resolve(&format!("heading {}", level), "paragraph") {
            Some(id) => id.to_string(),
            None => format!("Heading{}", level),
        }
    }
}

impl StyleEntry {
    fn has_name(&self, name: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|n| n.eq_ignore_ascii_case(name))
    }
}

fn style_entry(reader: &Reader<&[u8]>, e: &BytesStart<'_>) -> Option<StyleEntry> {
    Some(StyleEntry {
        id: attribute(reader, e, b"styleId")?,
        name: None,
        kind: attribute(reader, e, b"type"),
    })
}

fn attribute(reader: &Reader<&[u8]>, e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == key)
        .and_then(|attr| attr.decode_and_unescape_value(reader.decoder()).ok())
        .map(|value| value.into_owned())
}
