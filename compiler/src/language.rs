//! The fixed vocabulary of V: keywords, forbidden symbols, and operator pairs.
use std::fmt::{Display, Formatter};

/// A reserved word of V.
///
/// Keywords are case-sensitive: `LET` is a keyword, `let` and `Let` are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Begin,
    Integer,
    Let,
    Input,
    Write,
    End,
}

impl Keyword {
    pub const ALL: [Keyword; 6] = [
        Keyword::Begin,
        Keyword::Integer,
        Keyword::Let,
        Keyword::Input,
        Keyword::Write,
        Keyword::End,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Begin => "BEGIN",
            Keyword::Integer => "INTEGER",
            Keyword::Let => "LET",
            Keyword::Input => "INPUT",
            Keyword::Write => "WRITE",
            Keyword::End => "END",
        }
    }

    pub fn parse(word: &str) -> Option<Keyword> {
        Self::ALL.iter().copied().find(|keyword| keyword.as_str() == word)
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Characters which may never appear anywhere in a line.
pub const INVALID_SYMBOLS: [char; 6] = ['%', '$', '&', '<', '>', ';'];

/// Adjacent operator pairs which are rejected even though each operator is fine on its own.
pub const COMBINED_OPERATORS: [&str; 4] = ["+*", "*/", "*+", "-/"];

pub fn is_invalid_symbol(c: char) -> bool {
    INVALID_SYMBOLS.contains(&c)
}

/// Whether `word` has to be a keyword to be valid.
///
/// V variables are single letters (`INTEGER A, B, C, a, c`), so only
/// longer words starting with an uppercase ASCII letter are held to the keyword list.
pub fn is_keyword_candidate(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.is_ascii_uppercase() && chars.next().is_some(),
        None => false,
    }
}
