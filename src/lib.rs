//! # mdmerge
//!
//! Converts a small markdown dialect into word-processing operations and
//! appends them to a `.docx` document.
//!
//! The dialect has four block kinds: `#`-`####` headings, pipe tables with
//! a `|---` separator row, horizontal rules (`---`, dropped) and paragraphs
//! with `**bold**` and `*italic*` spans.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mdmerge::MdMerge;
//!
//! fn main() -> mdmerge::Result<()> {
//!     let report = MdMerge::new()
//!         .with_base("thesis.docx")
//!         .merge(&["chapter5.md", "chapter6.md"], "thesis_full.docx")?;
//!
//!     println!("{} files merged", report.merged_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Pieces
//!
//! - [`parser`]: line classifier, table parser and inline tokenizer
//! - [`sink`]: the [`DocumentSink`] trait and operation dispatch
//! - [`docx`]: a sink that edits `.docx` packages
//! - [`merge`]: the multi-file driver with recovery and reporting

pub mod docx;
pub mod error;
pub mod json;
pub mod merge;
pub mod model;
pub mod parser;
pub mod sink;

// Re-export commonly used types
pub use docx::{DocxDocument, DocxStyle};
pub use error::{Error, Result};
pub use json::{to_json, JsonFormat};
pub use merge::{ErrorMode, FileReport, FileStatus, MergeOptions, MergeReport, Merger};
pub use model::{ConversionStats, Operation, StyledRun, TableGrid};
pub use parser::{MarkdownParser, ParseOptions, ParseWarning, ParsedDocument};
pub use sink::{apply, apply_all, DocumentSink, ParagraphSink, RecordingSink, TableSink};

use std::path::{Path, PathBuf};

/// Convert markdown text to operations.
///
/// # Example
///
/// ```
/// use mdmerge::{parse, Operation};
///
/// let ops = parse("## Results\n---\n");
/// assert_eq!(ops, vec![Operation::heading("Results", 2)]);
/// ```
pub fn parse(text: &str) -> Vec<Operation> {
    MarkdownParser::new().parse(text).operations
}

/// Convert markdown text with custom options, keeping warnings.
pub fn parse_with_options(text: &str, options: ParseOptions) -> ParsedDocument {
    MarkdownParser::with_options(options).parse(text)
}

/// Read and convert a markdown file.
///
/// # Example
///
/// ```no_run
/// use mdmerge::parse_file;
///
/// let parsed = parse_file("chapter5.md").unwrap();
/// println!("{} operations", parsed.operations.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ParsedDocument> {
    let text = merge::read_input(path.as_ref())?;
    Ok(MarkdownParser::new().parse(&text))
}

/// Convert markdown text to a JSON array of operations.
pub fn operations_to_json(text: &str, format: JsonFormat) -> Result<String> {
    to_json(&parse(text), format)
}

/// Merge markdown files into `base` (or a new document) and save to `output`.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// let report = mdmerge::merge_files(
///     &["a.md", "b.md"],
///     Some(Path::new("base.docx")),
///     Path::new("out.docx"),
/// )
/// .unwrap();
/// assert_eq!(report.files.len(), 2);
/// ```
pub fn merge_files<P: AsRef<Path>>(
    inputs: &[P],
    base: Option<&Path>,
    output: &Path,
) -> Result<MergeReport> {
    Merger::new().merge_files(inputs, base, output)
}

/// Builder for merging markdown files into a document.
///
/// # Example
///
/// ```no_run
/// use mdmerge::MdMerge;
///
/// let report = MdMerge::new()
///     .with_font("Arial")
///     .with_body_size(11.0)
///     .without_leading_break()
///     .merge(&["notes.md"], "notes.docx")?;
/// # Ok::<(), mdmerge::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MdMerge {
    options: MergeOptions,
    base: Option<PathBuf>,
}

impl MdMerge {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to an existing document.
    pub fn with_base(mut self, path: impl Into<PathBuf>) -> Self {
        self.base = Some(path.into());
        self
    }

    /// Set the font used for appended text.
    pub fn with_font(mut self, name: impl Into<String>) -> Self {
        self.options.style = self.options.style.with_font(name);
        self
    }

    /// Set body text size in points.
    pub fn with_body_size(mut self, size: f32) -> Self {
        self.options.style = self.options.style.with_body_size(size);
        self
    }

    /// Start appended content on the current page.
    pub fn without_leading_break(mut self) -> Self {
        self.options.leading_page_break = false;
        self
    }

    /// Drop the blank paragraph after each table.
    pub fn without_table_spacer(mut self) -> Self {
        self.options.parse = self.options.parse.with_table_spacer(false);
        self
    }

    /// Report unterminated `*` markers as warnings.
    pub fn with_emphasis_warnings(mut self) -> Self {
        self.options.parse = self.options.parse.with_emphasis_warnings(true);
        self
    }

    /// Fail on the first recoverable problem.
    pub fn strict(mut self) -> Self {
        self.options.error_mode = ErrorMode::Strict;
        self
    }

    /// Get the merge options built so far.
    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Merge `inputs` in order and save the document to `output`.
    pub fn merge<P: AsRef<Path>>(self, inputs: &[P], output: impl AsRef<Path>) -> Result<MergeReport> {
        Merger::with_options(self.options).merge_files(inputs, self.base.as_deref(), output.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chained() {
        let builder = MdMerge::new()
            .with_font("Arial")
            .with_body_size(11.0)
            .without_leading_break()
            .without_table_spacer()
            .with_emphasis_warnings()
            .strict();

        let options = builder.options();
        assert_eq!(options.style.font_name, "Arial");
        assert_eq!(options.style.body_size, 11.0);
        assert!(!options.leading_page_break);
        assert!(!options.parse.table_spacer);
        assert!(options.parse.emphasis_warnings);
        assert_eq!(options.error_mode, ErrorMode::Strict);
    }

    #[test]
    fn test_builder_default() {
        let builder = MdMerge::default();
        assert!(builder.base.is_none());
        assert!(builder.options().leading_page_break);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_parse_with_options_keeps_warnings() {
        let parsed = parse_with_options("a *b", ParseOptions::new().with_emphasis_warnings(true));
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.operations.len(), 1);
    }

    #[test]
    fn test_operations_to_json() {
        let json = operations_to_json("# T", JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"[{"type":"heading","text":"T","level":1}]"#);
    }

    #[test]
    fn test_parse_file_missing() {
        assert!(matches!(
            parse_file("/nonexistent/chapter.md"),
            Err(Error::MissingInputFile(_))
        ));
    }

    #[test]
    fn test_merge_into_new_document() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.md");
        std::fs::write(&input, "# Title\n\nBody\n").unwrap();
        let output = dir.path().join("out.docx");

        let report = MdMerge::new().merge(&[&input], &output).unwrap();
        assert_eq!(report.merged_count(), 1);
        assert_eq!(report.output.as_deref(), Some(output.as_path()));

        let doc = DocxDocument::open(&output).unwrap();
        let xml = doc.document_xml().unwrap();
        assert!(xml.contains(">Title<"));
        assert!(xml.contains(">Body<"));
    }
}
