//! Line-driven markdown to operation conversion.

use std::collections::VecDeque;

use super::classify::{classify, LineKind};
use super::inline::InlineTokenizer;
use super::table::{is_separator_row, parse_table};
use super::{ParseOptions, ParseWarning};
use crate::model::Operation;

/// Converter from the restricted markdown dialect to [`Operation`]s.
///
/// # Example
///
/// ```
/// use mdmerge::parser::MarkdownParser;
/// use mdmerge::model::{Operation, StyledRun};
///
/// let parser = MarkdownParser::new();
/// let ops: Vec<_> = parser.operations("# Title\n\nSome **bold** text.\n").collect();
///
/// assert_eq!(ops[0], Operation::heading("Title", 1));
/// assert_eq!(
///     ops[1],
///     Operation::paragraph(vec![
///         StyledRun::plain("Some "),
///         StyledRun::bold("bold"),
///         StyledRun::plain(" text."),
///     ])
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MarkdownParser {
    options: ParseOptions,
    tokenizer: InlineTokenizer,
}

/// Operations and warnings from one input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Operations in input order
    pub operations: Vec<Operation>,

    /// Recoverable problems found along the way
    pub warnings: Vec<ParseWarning>,
}

impl MarkdownParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            options,
            tokenizer: InlineTokenizer::new(),
        }
    }

    /// Get the parse options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Stream operations for `text` one at a time.
    pub fn operations<'a>(&'a self, text: &'a str) -> Operations<'a> {
        Operations::new(self, text)
    }

    /// Parse `text` completely.
    pub fn parse(&self, text: &str) -> ParsedDocument {
        let mut stream = self.operations(text);
        let operations = stream.by_ref().collect();
        ParsedDocument {
            operations,
            warnings: stream.into_warnings(),
        }
    }
}

/// Iterator over the operations of one input, in input order.
///
/// At most one table block is buffered at a time.
#[derive(Debug)]
pub struct Operations<'a> {
    parser: &'a MarkdownParser,
    lines: Vec<&'a str>,
    index: usize,
    pending: VecDeque<Operation>,
    warnings: Vec<ParseWarning>,
}

impl<'a> Operations<'a> {
    fn new(parser: &'a MarkdownParser, text: &'a str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Self {
            parser,
            lines: text.lines().map(str::trim_end).collect(),
            index: 0,
            pending: VecDeque::new(),
            warnings: Vec::new(),
        }
    }

    /// Warnings collected so far.
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Consume the stream and return its warnings.
    pub fn into_warnings(self) -> Vec<ParseWarning> {
        self.warnings
    }

    /// Number of input lines consumed so far.
    pub fn lines_consumed(&self) -> usize {
        self.index
    }

    /// Classify the line at the cursor and queue what it produces.
    fn advance(&mut self) {
        let line = self.lines[self.index];
        let next = self.lines.get(self.index + 1).copied();
        let line_number = self.index + 1;

        match classify(line, next) {
            LineKind::Blank | LineKind::Rule => {
                self.index += 1;
            }
            LineKind::Heading { level, text } => {
                self.pending.push_back(Operation::heading(text, level));
                self.index += 1;
            }
            LineKind::TableStart => {
                let block = parse_table(&self.lines, self.index, line_number);
                let end = self.index + block.consumed;
                self.warnings.extend(block.warnings);

                if block.grid.column_count() == 0 {
                    log::warn!(
                        "Table header on line {} has no cells, keeping block as text",
                        line_number
                    );
                    self.warnings
                        .push(ParseWarning::HeaderlessTable { line: line_number });
                    for idx in self.index..end {
                        let text = self.lines[idx];
                        if !is_separator_row(text) {
                            let op = self.paragraph(text, idx + 1);
                            self.pending.push_back(op);
                        }
                    }
                } else {
                    self.pending.push_back(Operation::table(block.grid));
                    if self.parser.options.table_spacer {
                        self.pending.push_back(Operation::spacer());
                    }
                }
                self.index = end;
            }
            LineKind::Paragraph(text) => {
                let op = self.paragraph(text, line_number);
                self.pending.push_back(op);
                self.index += 1;
            }
        }
    }

    fn paragraph(&mut self, text: &str, line_number: usize) -> Operation {
        let runs = self.parser.tokenizer.tokenize(text);
        if self.parser.options.emphasis_warnings {
            if InlineTokenizer::has_unmatched_marker(&runs) {
                log::warn!("Unterminated emphasis marker on line {}", line_number);
                self.warnings
                    .push(ParseWarning::UnmatchedEmphasis { line: line_number });
            }
            if InlineTokenizer::has_empty_span(&runs) {
                log::warn!("Empty emphasis span on line {}", line_number);
                self.warnings
                    .push(ParseWarning::EmptyEmphasis { line: line_number });
            }
        }
        Operation::paragraph(runs)
    }
}

impl Iterator for Operations<'_> {
    type Item = Operation;

    fn next(&mut self) -> Option<Operation> {
        loop {
            if let Some(op) = self.pending.pop_front() {
                return Some(op);
            }
            if self.index >= self.lines.len() {
                return None;
            }
            self.advance();
        }
    }
}
