//! Merge options and configuration.

use crate::docx::DocxStyle;
use crate::parser::ParseOptions;

/// Options for merging markdown files into a document.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Markdown parsing options
    pub parse: ParseOptions,

    /// Presentation settings for the DOCX sink
    pub style: DocxStyle,

    /// Insert a page break before the first merged file
    pub leading_page_break: bool,

    /// How recoverable problems are handled
    pub error_mode: ErrorMode,
}

impl MergeOptions {
    /// Create new merge options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set DOCX presentation settings.
    pub fn with_style(mut self, style: DocxStyle) -> Self {
        self.style = style;
        self
    }

    /// Enable or disable the page break before new content.
    pub fn with_leading_page_break(mut self, enabled: bool) -> Self {
        self.leading_page_break = enabled;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Stop at the first recoverable problem.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            style: DocxStyle::default(),
            leading_page_break: true,
            error_mode: ErrorMode::Lenient,
        }
    }
}

/// Error handling mode while merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Log recoverable problems and keep going
    #[default]
    Lenient,
    /// Fail on the first missing file, unreadable base or malformed row
    Strict,
}
