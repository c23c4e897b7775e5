//! Markdown parsing module.
//!
//! Raw lines go through the line classifier; table blocks go to the table
//! parser and paragraph lines to the inline tokenizer. The result is a
//! stream of [`Operation`](crate::model::Operation)s in input order.

mod classify;
mod inline;
mod markdown;
mod options;
mod table;
mod warning;

pub use classify::{classify, LineKind};
pub use inline::InlineTokenizer;
pub use markdown::{MarkdownParser, Operations, ParsedDocument};
pub use options::ParseOptions;
pub use table::{is_separator_row, parse_table, split_row, TableBlock};
pub use warning::ParseWarning;
