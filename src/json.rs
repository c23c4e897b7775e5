//! JSON output for operation streams and merge reports.

use serde::Serialize;

use crate::error::Result;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize any model value to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value)?,
        JsonFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Operation, StyledRun};

    #[test]
    fn test_operations_pretty() {
        let ops = vec![
            Operation::heading("Title", 1),
            Operation::paragraph(vec![StyledRun::italic("x")]),
        ];
        let json = to_json(&ops, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"type\": \"heading\""));
        assert!(json.contains("\"italic\": true"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_page_break_compact() {
        let json = to_json(&[Operation::PageBreak], JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"[{"type":"page_break"}]"#);
    }
}
