//! Table formatting utilities for CLI output.

use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use tabula::Value;

/// One evaluated line of a batch file.
pub struct BatchRow {
    /// One-based line number in the file.
    pub line: usize,
    /// The formula text as written.
    pub expression: String,
    /// The evaluation result.
    pub value: Value,
}

/// Format batch results as a table; error results are highlighted.
pub fn format_batch_table(rows: &[BatchRow]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Line", "Formula", "Result"]);

    for row in rows {
        let result = Cell::new(row.value.to_string());
        let result = if row.value.is_error() {
            result.fg(Color::Red)
        } else {
            result
        };
        table.add_row(vec![
            Cell::new(row.line),
            Cell::new(&row.expression),
            result,
        ]);
    }

    table
}

/// Format a token sequence as a table, one token per row.
///
/// Whitespace tokens are shown as `␠` so they stay visible.
pub fn format_token_table(tokens: &[String]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Token"]);

    for (index, token) in tokens.iter().enumerate() {
        let shown = if token == " " { "␠" } else { token.as_str() };
        table.add_row(vec![index.to_string(), shown.to_string()]);
    }

    table
}

#[cfg(test)]
mod tests {
    use tabula::ErrorCode;

    use super::*;

    #[test]
    fn batch_table_lists_every_row() {
        let rows = vec![
            BatchRow {
                line: 1,
                expression: "1+1".to_string(),
                value: Value::Number(2.0),
            },
            BatchRow {
                line: 3,
                expression: "1/0".to_string(),
                value: Value::Error(ErrorCode::DivZero),
            },
        ];
        let rendered = format_batch_table(&rows).to_string();
        assert!(rendered.contains("Formula"));
        assert!(rendered.contains("1/0"));
        assert!(rendered.contains("#DIV/0"));
    }

    #[test]
    fn token_table_marks_spaces() {
        let tokens = vec!["1".to_string(), " ".to_string(), "+".to_string()];
        let rendered = format_token_table(&tokens).to_string();
        assert!(rendered.contains('␠'));
        assert!(rendered.contains('+'));
    }
}
