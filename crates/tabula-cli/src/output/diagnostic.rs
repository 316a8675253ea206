//! Miette diagnostic for malformed scope files.

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for a scope file that is not valid JSON or
/// holds a value that is not a number, string, boolean or `{"error": "#CODE"}`.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid scope file: {message}")]
#[diagnostic(
    code(tabula::scope),
    help("scope files hold one JSON object mapping names to values")
)]
pub struct ScopeDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    message: String,
}

impl ScopeDiagnostic {
    /// Create a diagnostic pointing at the location serde_json reported.
    pub fn from_json_error(path: &Path, content: &str, err: &serde_json::Error) -> Self {
        // Sum of (line_length + 1) for lines before the error line, plus column.
        let offset = content
            .lines()
            .take(err.line().saturating_sub(1))
            .map(|l| l.len() + 1)
            .sum::<usize>()
            + err.column().saturating_sub(1);

        // Clamp so the label stays inside the source.
        let offset = offset.min(content.len().saturating_sub(1));

        ScopeDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, 1).into(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tabula::Scope;

    use super::*;

    fn diagnose(content: &str) -> ScopeDiagnostic {
        let err = serde_json::from_str::<Scope>(content).unwrap_err();
        ScopeDiagnostic::from_json_error(&PathBuf::from("scope.json"), content, &err)
    }

    #[test]
    fn points_at_the_reported_line_and_column() {
        let content = "{\n  \"x\": 1,\n  \"y\": ?\n}";
        let diagnostic = diagnose(content);
        assert_eq!(&content[diagnostic.span.offset()..=diagnostic.span.offset()], "?");
    }

    #[test]
    fn clamps_to_the_source() {
        let diagnostic = diagnose("{\"x\": ");
        assert!(diagnostic.span.offset() < "{\"x\": ".len());
    }

    #[test]
    fn message_names_the_problem() {
        let diagnostic = diagnose(r#"{"x": [1, 2]}"#);
        assert!(diagnostic.to_string().starts_with("invalid scope file:"));
    }
}
