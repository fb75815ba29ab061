//! Functions and data structures for splitting a line of V into tokens.
//!
//! A line is split on the delimiter characters: spaces, commas, `=`, and the
//! four arithmetic operators. Everything between delimiters is a [`Word`](TokenType::Word),
//! unless it spells one of the [`Keyword`]s exactly. Here's an example:
//!
//! ```
//! # use v_line_compiler::lexer::*;
//! let words = Lexer::new("LET G = a + c")
//!     .filter(|token| token.is_word_like())
//!     .map(|token| token.src)
//!     .collect::<Vec<_>>();
//! assert_eq!(words, vec!["LET", "G", "a", "c"]);
//! ```
//!
//! Lexing never fails. Every character of the input ends up in exactly one token,
//! so the source can be reconstructed by concatenating the tokens in order.
use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

use itertools::Itertools;
use regex::Regex;

use crate::language::Keyword;

pub type Span = std::ops::Range<usize>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'input> {
    pub src: &'input str,
    pub start: usize,
    pub end: usize,
    pub ty: TokenType,
}

impl<'input> Token<'input> {
    pub fn span(&self) -> Span {
        self.start..self.end
    }

    /// Whether this token is a keyword or a word; i.e., not a delimiter.
    pub fn is_word_like(&self) -> bool {
        matches!(self.ty, TokenType::Word | TokenType::Keyword(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    // Runs of spaces. Tabs and other whitespace are *not* delimiters.
    Whitespace,

    Keyword(Keyword),
    Operator(Operator),

    // Punctuation
    Assign,
    Comma,

    // Chunk of non-delimiter text.
    // Identifiers, misspelled keywords, and anything containing
    // digits or stray symbols all end up here; sorting those out is
    // the classifier's job.
    Word,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    pub fn from_char(c: char) -> Option<Operator> {
        Self::ALL.iter().copied().find(|op| op.symbol() == c)
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// The lexer tries to find these patterns in this order.
// Each is anchored with ^ when registered, so don't use ^ here.
const PATTERNS: [(&str, Class); 5] = [
    (r" +",         Class::Whitespace),
    (r"[-+*/]",     Class::Operator),
    (r"=",          Class::Assign),
    (r",",          Class::Comma),
    (r"[^ ,=+*/-]+", Class::Word), // At least one non-delimiter character.
];

#[derive(Debug, Clone, Copy)]
enum Class {
    Whitespace,
    Operator,
    Assign,
    Comma,
    Word,
}

fn patterns() -> &'static [(Regex, Class)] {
    static PATTERNS_CELL: OnceLock<Vec<(Regex, Class)>> = OnceLock::new();
    PATTERNS_CELL.get_or_init(|| {
        PATTERNS.iter()
            .map(|(pattern, class)| {
                let pattern = format!("^{}", pattern);
                let regex = Regex::new(pattern.as_str()).expect("Invalid regex");
                (regex, *class)
            })
            .collect()
    })
}

pub struct Lexer<'input> {
    src: &'input str,
    cur_pos: usize,
}

impl<'input> Lexer<'input> {
    pub fn new(src: &'input str) -> Lexer<'input> {
        Lexer { src, cur_pos: 0 }
    }

    fn tail(&self) -> &'input str {
        self.src.get(self.cur_pos..).unwrap_or("")
    }

    fn token_type(class: Class, src: &str) -> TokenType {
        match class {
            Class::Whitespace => TokenType::Whitespace,
            Class::Operator => src.chars().next()
                .and_then(Operator::from_char)
                .map_or(TokenType::Word, TokenType::Operator),
            Class::Assign => TokenType::Assign,
            Class::Comma => TokenType::Comma,
            Class::Word => Keyword::parse(src).map_or(TokenType::Word, TokenType::Keyword),
        }
    }
}

impl<'input> Iterator for Lexer<'input> {
    type Item = Token<'input>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.cur_pos;
        let tail = self.tail();
        if tail.is_empty() {
            return None;
        }

        for (pattern, class) in patterns() {
            if let Some(found) = pattern.find(tail) {
                self.cur_pos += found.end();
                return Some(Token {
                    src: found.as_str(),
                    start,
                    end: self.cur_pos,
                    ty: Self::token_type(*class, found.as_str()),
                });
            }
        }

        // Every character is either a delimiter or word text, so this is only
        // reachable if the patterns above change. Consume one char as a word.
        let width = tail.chars().next().map_or(tail.len(), char::len_utf8);
        self.cur_pos += width;
        Some(Token {
            src: &tail[..width],
            start,
            end: self.cur_pos,
            ty: TokenType::Word,
        })
    }
}

/// The non-empty, non-delimiter tokens of `line`, in order.
pub fn words(line: &str) -> impl Iterator<Item=Token<'_>> {
    Lexer::new(line).filter(Token::is_word_like)
}

/// Collapses every run of whitespace to a single space and trims both ends.
pub fn normalize_whitespace(src: &str) -> String {
    src.split_whitespace().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn types(src: &str) -> Vec<(&str, TokenType)> {
        Lexer::new(src).map(|token| (token.src, token.ty)).collect()
    }

    #[test]
    fn assignment() {
        use TokenType::*;
        assert_eq!(types("LET G = a + c"), vec![
            ("LET", Keyword(crate::language::Keyword::Let)),
            (" ",   Whitespace),
            ("G",   Word),
            (" ",   Whitespace),
            ("=",   Assign),
            (" ",   Whitespace),
            ("a",   Word),
            (" ",   Whitespace),
            ("+",   Operator(super::Operator::Add)),
            (" ",   Whitespace),
            ("c",   Word),
        ]);
    }

    #[test]
    fn declaration_list() {
        let words = words("INTEGER A, B,C").map(|t| t.src).collect::<Vec<_>>();
        assert_eq!(words, vec!["INTEGER", "A", "B", "C"]);
    }

    #[test]
    fn spans_cover_source() {
        let src = "temp = <s%**h - j / w +d +*$&;";
        let mut expected_start = 0;
        for token in Lexer::new(src) {
            assert_eq!(token.start, expected_start);
            assert_eq!(&src[token.span()], token.src);
            expected_start = token.end;
        }
        assert_eq!(expected_start, src.len());
    }

    #[test]
    fn stray_symbols_stay_inside_words() {
        let words = words("temp = <s%**h").map(|t| t.src).collect::<Vec<_>>();
        assert_eq!(words, vec!["temp", "<s%", "h"]);
    }

    #[test]
    fn tabs_are_not_delimiters() {
        let words = words("\tWRITE M").map(|t| (t.src, t.ty)).collect::<Vec<_>>();
        assert_eq!(words, vec![("\tWRITE", TokenType::Word), ("M", TokenType::Word)]);
    }

    #[test]
    fn empty_and_delimiter_only_lines() {
        assert_eq!(Lexer::new("").count(), 0);
        assert_eq!(words(" ,=+-*/ ").count(), 0);
    }

    #[test]
    fn non_ascii() {
        let words = words("é = ü+ß").map(|t| t.src).collect::<Vec<_>>();
        assert_eq!(words, vec!["é", "ü", "ß"]);
    }

    #[test]
    fn whitespace_normalization() {
        assert_eq!(normalize_whitespace("  LET   G =\ta +  c "), "LET G = a + c");
        assert_eq!(normalize_whitespace("   "), "");
    }
}
