use std::fmt::{Display, Formatter};
use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use annotate_snippets::display_list::{DisplayList, FormatOptions};
use annotate_snippets::snippet::{Annotation, AnnotationType, Slice, Snippet, SourceAnnotation};
use thiserror::Error;

use crate::lexer::Span;

/// The category of problem found in a line, if any.
///
/// `None` means the line is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Semantic,
    None,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Lexical => "Lexical",
            ErrorKind::Syntax => "Syntax",
            ErrorKind::Semantic => "Semantic",
            ErrorKind::None => "None",
        };
        f.write_str(name)
    }
}

/// The single highest-priority problem found in a line.
///
/// Every variant records the byte range of the offending text
/// within the line so it can be pointed out in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("Lexical Error: invalid keyword \"{word}\"")]
    InvalidKeyword { word: String, span: Span },
    #[error("Syntax Error: numbers not allowed")]
    NumbersNotAllowed { digit: char, span: Span },
    #[error("Semantic Error: invalid symbol '{symbol}'")]
    InvalidSymbol { symbol: char, span: Span },
    #[error("Syntax Error: combined operators not allowed")]
    CombinedOperators { operators: &'static str, span: Span },
    #[error("Syntax Error: semicolon at end not allowed")]
    TrailingSemicolon { span: Span },
}

impl LineError {
    pub fn kind(&self) -> ErrorKind {
        use LineError::*;
        match self {
            InvalidKeyword { .. } => ErrorKind::Lexical,
            NumbersNotAllowed { .. }
            | CombinedOperators { .. }
            | TrailingSemicolon { .. } => ErrorKind::Syntax,
            InvalidSymbol { .. } => ErrorKind::Semantic,
        }
    }

    pub fn span(&self) -> Span {
        use LineError::*;
        match self {
            InvalidKeyword { span, .. }
            | NumbersNotAllowed { span, .. }
            | InvalidSymbol { span, .. }
            | CombinedOperators { span, .. }
            | TrailingSemicolon { span } => span.clone(),
        }
    }

    fn label(&self) -> String {
        use LineError::*;
        match self {
            InvalidKeyword { .. } => "not a keyword".to_string(),
            NumbersNotAllowed { digit, .. } => format!("number '{}' here", digit),
            InvalidSymbol { .. } => "invalid symbol here".to_string(),
            CombinedOperators { operators, .. } => format!("'{}' here", operators),
            TrailingSemicolon { .. } => "remove this semicolon".to_string(),
        }
    }

    /// Renders this error as an annotated snippet of `source`, the line it was found in.
    ///
    /// `line_number` is the 1-based position of the line in its file,
    /// and `origin` is the file name to show, if any.
    pub fn render(&self, source: &str, origin: Option<&str>, line_number: usize, color: bool) -> String {
        let title = self.to_string();
        let label = self.label();
        let snippet = Snippet {
            title: Some(Annotation {
                label: Some(title.as_str()),
                id: None,
                annotation_type: AnnotationType::Error,
            }),
            footer: vec![],
            slices: vec![
                Slice {
                    source,
                    line_start: line_number,
                    origin,
                    fold: false,
                    annotations: vec![
                        SourceAnnotation {
                            range: char_range(source, self.span()),
                            label: label.as_str(),
                            annotation_type: AnnotationType::Error,
                        }
                    ],
                }
            ],
            opt: FormatOptions {
                color,
                ..Default::default()
            },
        };
        DisplayList::from(snippet).to_string()
    }
}

// Snippet annotations count characters, not bytes.
fn char_range(source: &str, span: Span) -> (usize, usize) {
    let count = |end: usize| source.get(..end).map_or(0, |s| s.chars().count());
    let start = count(span.start);
    let end = count(span.end).max(start + 1).min(source.chars().count());
    (start.min(end), end)
}

/// Failure to turn a target machine code listing back into text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("group {index} ({group:?}) is not a binary number")]
    NotBinary { index: usize, group: String, #[source] source: ParseIntError },
    #[error("group {index} ({group:?}) is not a valid character code")]
    NotACharacter { index: usize, group: String },
}

/// Errors from loading programs to check or compile.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {}", path.display(), source)]
    ReadFile { path: PathBuf, #[source] source: io::Error },
    #[error("failed to read standard input: {0}")]
    ReadStdin(#[source] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn messages() {
        let invalid_keyword = LineError::InvalidKeyword { word: "WRITEE".to_string(), span: 0..6 };
        assert_eq!(invalid_keyword.to_string(), "Lexical Error: invalid keyword \"WRITEE\"");
        assert_eq!(invalid_keyword.kind(), ErrorKind::Lexical);

        let invalid_symbol = LineError::InvalidSymbol { symbol: '<', span: 7..8 };
        assert_eq!(invalid_symbol.to_string(), "Semantic Error: invalid symbol '<'");
        assert_eq!(invalid_symbol.kind(), ErrorKind::Semantic);

        let semicolon = LineError::TrailingSemicolon { span: 3..4 };
        assert_eq!(semicolon.to_string(), "Syntax Error: semicolon at end not allowed");
        assert_eq!(semicolon.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn render_points_at_span() {
        let error = LineError::CombinedOperators { operators: "*/", span: 10..12 };
        let rendered = error.render("LET B = A */ M", Some("prog.v"), 4, false);
        assert!(rendered.contains("Syntax Error: combined operators not allowed"));
        assert!(rendered.contains("prog.v"));
        assert!(rendered.contains("LET B = A */ M"));
        assert!(rendered.contains("^^"));
    }

    #[test]
    fn char_ranges_count_characters() {
        assert_eq!(char_range("é<", 2..3), (1, 2));
        assert_eq!(char_range("ab", 0..0), (0, 1));
        assert_eq!(char_range("", 0..0), (0, 0));
    }
}
