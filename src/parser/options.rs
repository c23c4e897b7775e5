//! Parsing options and configuration.

/// Options for converting markdown lines into operations.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Emit a blank paragraph after every table
    pub table_spacer: bool,

    /// Report leftover `*` characters in plain text as warnings
    pub emphasis_warnings: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the spacer paragraph after tables.
    pub fn with_table_spacer(mut self, spacer: bool) -> Self {
        self.table_spacer = spacer;
        self
    }

    /// Enable or disable warnings for unterminated emphasis markers.
    pub fn with_emphasis_warnings(mut self, warn: bool) -> Self {
        self.emphasis_warnings = warn;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            table_spacer: true,
            emphasis_warnings: false,
        }
    }
}
