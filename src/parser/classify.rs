//! Line classification.

/// Heading prefixes, longest first so `#### ` never reads as `# `.
const HEADING_PREFIXES: [(&str, u8); 4] = [("#### ", 4), ("### ", 3), ("## ", 2), ("# ", 1)];

/// Marker that identifies a table separator row.
pub(crate) const SEPARATOR_MARKER: &str = "|---";

/// What a single input line is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty or whitespace-only line
    Blank,
    /// A `---` horizontal rule
    Rule,
    /// A heading with its level and text
    Heading {
        /// Heading level (1-4)
        level: u8,
        /// Text after the prefix
        text: &'a str,
    },
    /// First line of a pipe table
    TableStart,
    /// Paragraph text
    Paragraph(&'a str),
}

impl LineKind<'_> {
    /// Check if this line never produces an operation.
    pub fn is_dropped(&self) -> bool {
        matches!(self, LineKind::Blank | LineKind::Rule)
    }
}

/// Classify `line` given the line after it.
///
/// `line` must already have trailing whitespace stripped.
pub fn classify<'a>(line: &'a str, next: Option<&str>) -> LineKind<'a> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if trimmed == "---" {
        return LineKind::Rule;
    }

    for (prefix, level) in HEADING_PREFIXES {
        if let Some(text) = line.strip_prefix(prefix) {
            return LineKind::Heading { level, text };
        }
    }

    if line.contains('|') && next.is_some_and(|n| n.contains(SEPARATOR_MARKER)) {
        return LineKind::TableStart;
    }

    LineKind::Paragraph(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_rule() {
        assert_eq!(classify("", None), LineKind::Blank);
        assert_eq!(classify("   ", None), LineKind::Blank);
        assert_eq!(classify("---", None), LineKind::Rule);
        assert_eq!(classify("  ---", None), LineKind::Rule);
        assert!(LineKind::Rule.is_dropped());
        assert_eq!(classify("----", None), LineKind::Paragraph("----"));
    }

    #[test]
    fn test_heading_levels() {
        for level in 1..=4u8 {
            let line = format!("{} Section", "#".repeat(level as usize));
            assert_eq!(
                classify(&line, None),
                LineKind::Heading {
                    level,
                    text: "Section"
                }
            );
        }
    }

    #[test]
    fn test_deep_heading_is_paragraph() {
        assert_eq!(classify("##### Five", None), LineKind::Paragraph("##### Five"));
        assert_eq!(classify("#NoSpace", None), LineKind::Paragraph("#NoSpace"));
    }

    #[test]
    fn test_heading_keeps_inner_hashes() {
        assert_eq!(
            classify("# ### odd", None),
            LineKind::Heading {
                level: 1,
                text: "### odd"
            }
        );
    }

    #[test]
    fn test_table_start_needs_separator() {
        assert_eq!(
            classify("| A | B |", Some("|---|---|")),
            LineKind::TableStart
        );
        assert_eq!(
            classify("| A | B |", Some("| 1 | 2 |")),
            LineKind::Paragraph("| A | B |")
        );
        assert_eq!(classify("a | b", None), LineKind::Paragraph("a | b"));
    }

    #[test]
    fn test_heading_beats_table() {
        assert_eq!(
            classify("## A | B", Some("|---|")),
            LineKind::Heading {
                level: 2,
                text: "A | B"
            }
        );
    }
}
