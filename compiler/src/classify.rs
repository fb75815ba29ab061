//! Deciding whether a single line of V is valid.
//!
//! A line is checked against four rules, in a fixed order. The first rule
//! that finds a problem decides the result, and the remaining rules are never run:
//!
//! 1. Every word of two or more characters which starts with an uppercase letter
//!    must be a keyword. Misspelled keywords like `WRITEE` are lexical errors.
//! 2. Scanning the line character by character, the first digit is a syntax error
//!    and the first invalid symbol (`%`, `$`, `&`, `<`, `>`, `;`) is a semantic error,
//!    whichever comes first.
//! 3. Combined operators (`+*`, `*/`, `*+`, `-/`) are syntax errors.
//! 4. A semicolon at the end of the line is a syntax error.
//!
//! ```
//! # use v_line_compiler::classify::classify;
//! # use v_line_compiler::error::ErrorKind;
//! assert_eq!(classify("WRITEE F").kind(), ErrorKind::Lexical);
//! assert_eq!(classify("LET B = A */ M").kind(), ErrorKind::Syntax);
//! assert_eq!(classify("temp = <s%**h - j / w +d +*$&;").kind(), ErrorKind::Semantic);
//! assert_eq!(classify("N = G/H-I+a*B/c").kind(), ErrorKind::None);
//! ```
//!
//! Classification only looks at the text of the line, so classifying the same line
//! twice always gives the same answer.
use tracing::{debug, trace};

use crate::error::{ErrorKind, LineError};
use crate::language::{is_invalid_symbol, is_keyword_candidate, COMBINED_OPERATORS};
use crate::lexer::{words, TokenType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Valid,
    Invalid(LineError),
}

impl Classification {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Classification::Valid => ErrorKind::None,
            Classification::Invalid(error) => error.kind(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Classification::Valid)
    }

    pub fn error(&self) -> Option<&LineError> {
        match self {
            Classification::Valid => None,
            Classification::Invalid(error) => Some(error),
        }
    }

    pub fn into_result(self) -> Result<(), LineError> {
        match self {
            Classification::Valid => Ok(()),
            Classification::Invalid(error) => Err(error),
        }
    }
}

impl From<Result<(), LineError>> for Classification {
    fn from(result: Result<(), LineError>) -> Self {
        match result {
            Ok(()) => Classification::Valid,
            Err(error) => Classification::Invalid(error),
        }
    }
}

pub fn classify(line: &str) -> Classification {
    let classification = Classification::from(check(line));
    match classification.error() {
        Some(error) => debug!(line, kind = %error.kind(), %error, "line rejected"),
        None => trace!(line, "line valid"),
    }
    classification
}

/// Runs every rule in priority order, stopping at the first error.
pub fn check(line: &str) -> Result<(), LineError> {
    check_keywords(line)?;
    check_characters(line)?;
    check_combined_operators(line)?;
    check_trailing_semicolon(line)?;
    Ok(())
}

fn check_keywords(line: &str) -> Result<(), LineError> {
    for token in words(line) {
        if token.ty == TokenType::Word && is_keyword_candidate(token.src) {
            return Err(LineError::InvalidKeyword { word: token.src.to_string(), span: token.span() });
        }
    }
    Ok(())
}

// Digits and invalid symbols are checked in the same pass,
// so whichever shows up first in the line is reported.
fn check_characters(line: &str) -> Result<(), LineError> {
    for (i, c) in line.char_indices() {
        let span = i..i + c.len_utf8();
        if c.is_ascii_digit() {
            return Err(LineError::NumbersNotAllowed { digit: c, span });
        }
        if is_invalid_symbol(c) {
            return Err(LineError::InvalidSymbol { symbol: c, span });
        }
    }
    Ok(())
}

fn check_combined_operators(line: &str) -> Result<(), LineError> {
    for operators in COMBINED_OPERATORS.iter().copied() {
        if let Some(start) = line.find(operators) {
            return Err(LineError::CombinedOperators { operators, span: start..start + operators.len() });
        }
    }
    Ok(())
}

fn check_trailing_semicolon(line: &str) -> Result<(), LineError> {
    let trimmed = line.trim_end();
    if trimmed.ends_with(';') {
        let end = trimmed.len();
        return Err(LineError::TrailingSemicolon { span: end - 1..end });
    }
    Ok(())
}
