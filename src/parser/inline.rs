//! Inline emphasis tokenizer.
//!
//! Splits one paragraph line into [`StyledRun`]s. Two span markers are
//! recognized: `**bold**` and `*italic*`. Matching is leftmost-first and
//! non-overlapping, with the double marker tried first at each position.
//! Markers do not nest, and an unterminated `*` stays in the text. A lone
//! `**` is an italic span with no text.

use regex::Regex;

use crate::model::StyledRun;

/// Bold alternative first so `**` wins over `*` at the same offset.
const EMPHASIS_PATTERN: &str = r"\*\*(?P<bold>.*?)\*\*|\*(?P<italic>.*?)\*";

/// Tokenizer for `**bold**` and `*italic*` spans.
#[derive(Debug, Clone)]
pub struct InlineTokenizer {
    pattern: Regex,
}

impl InlineTokenizer {
    /// Create a new tokenizer.
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(EMPHASIS_PATTERN).expect("emphasis pattern is valid"),
        }
    }

    /// Split a line into styled runs. The result is never empty.
    pub fn tokenize(&self, text: &str) -> Vec<StyledRun> {
        let mut runs = Vec::new();
        let mut pos = 0;

        for caps in self.pattern.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if whole.start() > pos {
                runs.push(StyledRun::plain(&text[pos..whole.start()]));
            }
            if let Some(bold) = caps.name("bold") {
                runs.push(StyledRun::bold(bold.as_str()));
            } else if let Some(italic) = caps.name("italic") {
                runs.push(StyledRun::italic(italic.as_str()));
            }
            pos = whole.end();
        }

        if pos < text.len() {
            runs.push(StyledRun::plain(&text[pos..]));
        }

        if runs.is_empty() {
            runs.push(StyledRun::plain(text));
        }
        runs
    }

    /// Check whether any plain run still carries a literal `*`.
    pub fn has_unmatched_marker(runs: &[StyledRun]) -> bool {
        runs.iter().any(|r| !r.has_styling() && r.text.contains('*'))
    }

    /// Check whether any styled run is empty.
    pub fn has_empty_span(runs: &[StyledRun]) -> bool {
        runs.iter().any(|r| r.has_styling() && r.text.is_empty())
    }
}

impl Default for InlineTokenizer {
    fn default() -> Self {
        Self::new()
    }
}
