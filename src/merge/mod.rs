//! Merge driver.
//!
//! Reads markdown files in order, streams their operations into a sink and
//! separates files with page breaks. Missing or unreadable inputs and an
//! unloadable base document are recovered from; failing to save is not.
//!
//! # Example
//!
//! ```no_run
//! use mdmerge::merge::{MergeOptions, Merger};
//! use std::path::Path;
//!
//! fn main() -> mdmerge::Result<()> {
//!     let merger = Merger::with_options(MergeOptions::new().with_leading_page_break(false));
//!     let report = merger.merge_files(
//!         &["chapter5.md", "chapter6.md"],
//!         Some(Path::new("thesis.docx")),
//!         Path::new("thesis_full.docx"),
//!     )?;
//!     println!("{} files merged", report.merged_count());
//!     Ok(())
//! }
//! ```

mod options;
mod report;

pub use options::{ErrorMode, MergeOptions};
pub use report::{FileReport, FileStatus, MergeReport};

use std::fs;
use std::io;
use std::path::Path;

use crate::docx::DocxDocument;
use crate::error::{Error, Result};
use crate::model::{ConversionStats, Operation};
use crate::parser::{MarkdownParser, ParseWarning};
use crate::sink::{apply, DocumentSink};

/// Read an input file as UTF-8 text.
///
/// A path that does not exist is [`Error::MissingInputFile`]; any other
/// read failure, invalid UTF-8 included, is [`Error::UnreadableInput`].
pub fn read_input(path: &Path) -> Result<String> {
    let data = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::MissingInputFile(path.to_path_buf()),
        _ => Error::UnreadableInput {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;

    String::from_utf8(data).map_err(|e| Error::UnreadableInput {
        path: path.to_path_buf(),
        reason: format!("invalid UTF-8: {}", e.utf8_error()),
    })
}

/// Merges markdown files into a document sink.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    options: MergeOptions,
    parser: MarkdownParser,
}

impl Merger {
    /// Create a merger with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a merger with custom options.
    pub fn with_options(options: MergeOptions) -> Self {
        let parser = MarkdownParser::with_options(options.parse.clone());
        Self { options, parser }
    }

    /// Get the merge options.
    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    fn is_strict(&self) -> bool {
        self.options.error_mode == ErrorMode::Strict
    }

    /// Open the base document, or a fresh one when `base` is `None`.
    ///
    /// In lenient mode an unloadable base is replaced by a fresh document
    /// and the reason is returned alongside it.
    pub fn load_base(&self, base: Option<&Path>) -> Result<(DocxDocument, Option<String>)> {
        let Some(path) = base else {
            log::debug!("No base document, starting from an empty one");
            return Ok((DocxDocument::new().with_style(self.options.style.clone()), None));
        };

        match DocxDocument::open(path) {
            Ok(doc) => {
                log::debug!("Loaded base document {}", path.display());
                Ok((doc.with_style(self.options.style.clone()), None))
            }
            Err(e) => {
                let err = Error::UnloadableBaseDocument {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                };
                if self.is_strict() {
                    return Err(err);
                }
                log::warn!("{}, starting from an empty document", err);
                let doc = DocxDocument::new().with_style(self.options.style.clone());
                Ok((doc, Some(err.to_string())))
            }
        }
    }

    /// Append one file to `sink`, followed by a page break.
    ///
    /// Read failures are returned without touching the sink.
    pub fn merge_file<S>(&self, sink: &mut S, path: &Path) -> Result<FileReport>
    where
        S: DocumentSink + ?Sized,
    {
        let text = read_input(path)?;
        log::debug!("Merging {}", path.display());

        let mut stats = ConversionStats::new();
        let mut stream = self.parser.operations(&text);
        for op in stream.by_ref() {
            log::trace!("Applying {} operation", op.kind());
            apply(sink, &op)?;
            stats.record(&op);
        }
        let warnings = stream.into_warnings();

        if self.is_strict() {
            if let Some(first) = warnings.first() {
                return Err(first.clone().into());
            }
        }

        apply(sink, &Operation::PageBreak)?;
        stats.record(&Operation::PageBreak);
        stats.normalized_row_count = warnings
            .iter()
            .filter(|w| matches!(w, ParseWarning::MalformedTableRow { .. }))
            .count() as u32;

        Ok(FileReport::merged(path.to_path_buf(), stats, warnings))
    }

    /// Append every input to `sink` in order.
    pub fn merge_into<S, P>(&self, sink: &mut S, inputs: &[P]) -> Result<MergeReport>
    where
        S: DocumentSink + ?Sized,
        P: AsRef<Path>,
    {
        self.merge_into_with(sink, inputs, |_| {})
    }

    /// Like [`merge_into`](Self::merge_into), calling `on_file` after each input.
    pub fn merge_into_with<S, P, F>(
        &self,
        sink: &mut S,
        inputs: &[P],
        mut on_file: F,
    ) -> Result<MergeReport>
    where
        S: DocumentSink + ?Sized,
        P: AsRef<Path>,
        F: FnMut(&FileReport),
    {
        let mut report = MergeReport::new();

        if self.options.leading_page_break {
            apply(sink, &Operation::PageBreak)?;
            report.stats.record(&Operation::PageBreak);
        }

        for input in inputs {
            let path = input.as_ref();
            let file = match self.merge_file(&mut *sink, path) {
                Ok(file) => file,
                Err(e) if e.is_recoverable() && !self.is_strict() => {
                    log::warn!("Skipping {}: {}", path.display(), e);
                    FileReport::skipped(path.to_path_buf(), e.to_string())
                }
                Err(e) => return Err(e),
            };
            report.stats.merge(&file.stats);
            on_file(&file);
            report.files.push(file);
        }

        Ok(report)
    }

    /// Merge `inputs` into `base` (or a fresh document) and save to `output`.
    pub fn merge_files<P: AsRef<Path>>(
        &self,
        inputs: &[P],
        base: Option<&Path>,
        output: &Path,
    ) -> Result<MergeReport> {
        let (mut doc, fallback) = self.load_base(base)?;
        let mut report = self.merge_into(&mut doc, inputs)?;
        doc.save(output)?;

        report.base_document = base.map(Path::to_path_buf);
        report.base_fallback = fallback;
        report.output = Some(output.to_path_buf());
        log::debug!(
            "Merged {} of {} files into {}",
            report.merged_count(),
            inputs.len(),
            output.display()
        );
        Ok(report)
    }
}
