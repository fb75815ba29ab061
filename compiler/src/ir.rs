//! Three-address intermediate code for the handful of expressions V can decompose.
//!
//! There is no general expression parser. Instead, a fixed table maps each
//! recognized right-hand side to the steps it decomposes into. Each step assigns
//! either a temporary (`t1`, `t2`, ...) or, finally, the assignment target:
//!
//! ```
//! # use v_line_compiler::ir::{decompose, IrListing};
//! let listing = decompose("M = A/B+C");
//! assert_eq!(listing.to_string(), "t1=A/B; M=t1+C");
//!
//! // Anything else is still fine, there's just nothing to show.
//! assert_eq!(decompose("M = A/C+B"), IrListing::NotImplemented);
//! ```
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

use itertools::Itertools;

use crate::lexer::{normalize_whitespace, Operator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Name(&'static str),
    Temp(u8),
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Name(name) => f.write_str(name),
            Operand::Temp(n) => write!(f, "t{}", n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dest {
    Temp(u8),
    /// The variable being assigned on the line.
    Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Copy(Operand),
    Binary(Operand, Operator, Operand),
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Copy(operand) => write!(f, "{}", operand),
            Value::Binary(a, op, b) => write!(f, "{}{}{}", a, op, b),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub dest: Dest,
    pub value: Value,
}

impl Step {
    pub fn render(&self, target: &str) -> String {
        match self.dest {
            Dest::Temp(n) => format!("t{}={}", n, self.value),
            Dest::Target => format!("{}={}", target, self.value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecognizedExpression {
    /// The full line this expression is whitelisted on.
    pub line: &'static str,
    /// The right-hand side of the assignment.
    pub expression: &'static str,
    pub steps: &'static [Step],
}

use Operand::{Name, Temp};
use Operator::{Add, Div, Mul, Sub};

pub static RECOGNIZED_EXPRESSIONS: [RecognizedExpression; 3] = [
    RecognizedExpression {
        line: "LET G = a + c",
        expression: "a + c",
        steps: &[
            Step { dest: Dest::Temp(1), value: Value::Copy(Name("a")) },
            Step { dest: Dest::Temp(2), value: Value::Copy(Name("c")) },
            Step { dest: Dest::Temp(3), value: Value::Binary(Temp(1), Add, Temp(2)) },
            Step { dest: Dest::Target,  value: Value::Copy(Temp(3)) },
        ],
    },
    RecognizedExpression {
        line: "M = A/B+C",
        expression: "A/B+C",
        steps: &[
            Step { dest: Dest::Temp(1), value: Value::Binary(Name("A"), Div, Name("B")) },
            Step { dest: Dest::Target,  value: Value::Binary(Temp(1), Add, Name("C")) },
        ],
    },
    RecognizedExpression {
        line: "N = G/H-I+a*B/c",
        expression: "G/H-I+a*B/c",
        steps: &[
            Step { dest: Dest::Temp(1), value: Value::Binary(Name("G"), Div, Name("H")) },
            Step { dest: Dest::Temp(2), value: Value::Binary(Name("a"), Mul, Name("B")) },
            Step { dest: Dest::Temp(3), value: Value::Binary(Temp(2), Div, Name("c")) },
            Step { dest: Dest::Temp(4), value: Value::Binary(Temp(1), Sub, Name("I")) },
            Step { dest: Dest::Target,  value: Value::Binary(Temp(4), Add, Temp(3)) },
        ],
    },
];

fn expressions_table() -> &'static HashMap<String, &'static RecognizedExpression> {
    static TABLE: OnceLock<HashMap<String, &'static RecognizedExpression>> = OnceLock::new();
    TABLE.get_or_init(|| {
        RECOGNIZED_EXPRESSIONS.iter()
            .map(|recognized| (normalize_whitespace(recognized.expression), recognized))
            .collect()
    })
}

/// Looks up a right-hand side. Runs of whitespace don't matter.
pub fn lookup(expression: &str) -> Option<&'static RecognizedExpression> {
    expressions_table().get(&normalize_whitespace(expression)).copied()
}

/// Whether `line` is, character for character, one of the lines that get compiled.
pub fn is_whitelisted(line: &str) -> bool {
    RECOGNIZED_EXPRESSIONS.iter().any(|recognized| recognized.line == line)
}

/// The text between the first and second `=`, trimmed.
pub fn right_hand_side(line: &str) -> Option<&str> {
    line.split('=').nth(1).map(str::trim)
}

/// The last word before the first `=` (`G` in `LET G = a + c`).
pub fn assignment_target(line: &str) -> Option<&str> {
    line.split('=').next()?.split_whitespace().last()
}

/// The human-readable intermediate code shown for a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrListing {
    Decomposed { target: String, steps: &'static [Step] },
    NotImplemented,
}

impl IrListing {
    pub fn lines(&self) -> Vec<String> {
        match self {
            IrListing::Decomposed { target, steps } =>
                steps.iter().map(|step| step.render(target)).collect(),
            IrListing::NotImplemented => vec![NOT_IMPLEMENTED.to_string()],
        }
    }
}

const NOT_IMPLEMENTED: &str = "[IR not implemented for this expression]";

impl Display for IrListing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lines().iter().join("; "))
    }
}

pub fn decompose(line: &str) -> IrListing {
    let recognized = right_hand_side(line).and_then(lookup);
    match (recognized, assignment_target(line)) {
        (Some(recognized), Some(target)) => IrListing::Decomposed {
            target: target.to_string(),
            steps: recognized.steps,
        },
        _ => IrListing::NotImplemented,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn decompositions() {
        assert_eq!(decompose("LET G = a + c").to_string(), "t1=a; t2=c; t3=t1+t2; G=t3");
        assert_eq!(decompose("M = A/B+C").to_string(), "t1=A/B; M=t1+C");
        assert_eq!(
            decompose("N = G/H-I+a*B/c").to_string(),
            "t1=G/H; t2=a*B; t3=t2/c; t4=t1-I; N=t4+t3"
        );
    }

    #[test]
    fn listing_lines() {
        assert_eq!(
            decompose("M = A/B+C").lines(),
            vec!["t1=A/B".to_string(), "M=t1+C".to_string()]
        );
    }

    #[test]
    fn target_comes_from_the_line() {
        assert_eq!(decompose("K = A/B+C").to_string(), "t1=A/B; K=t1+C");
        assert_eq!(decompose("LET  G=a   +  c").to_string(), "t1=a; t2=c; t3=t1+t2; G=t3");
    }

    #[test]
    fn unrecognized() {
        assert_eq!(decompose("WRITE M"), IrListing::NotImplemented);
        assert_eq!(decompose("LET G = c + a"), IrListing::NotImplemented);
        assert_eq!(decompose("= a + c"), IrListing::NotImplemented);
        assert_eq!(decompose(""), IrListing::NotImplemented);
        assert_eq!(IrListing::NotImplemented.to_string(), "[IR not implemented for this expression]");
    }

    #[test]
    fn whitelist_is_exact() {
        assert!(is_whitelisted("LET G = a + c"));
        assert!(is_whitelisted("N = G/H-I+a*B/c"));
        assert!(!is_whitelisted("LET G = a  + c"));
        assert!(!is_whitelisted(" M = A/B+C"));
        assert!(!is_whitelisted("WRITE M"));
    }

    #[test]
    fn line_parts() {
        assert_eq!(right_hand_side("LET G = a + c"), Some("a + c"));
        assert_eq!(right_hand_side("a = b = c"), Some("b"));
        assert_eq!(right_hand_side("WRITE M"), None);
        assert_eq!(assignment_target("LET G = a + c"), Some("G"));
        assert_eq!(assignment_target("M = A/B+C"), Some("M"));
        assert_eq!(assignment_target("= a"), None);
    }

    #[test]
    fn every_entry_is_reachable_from_its_line() {
        for recognized in RECOGNIZED_EXPRESSIONS.iter() {
            let rhs = right_hand_side(recognized.line);
            assert_eq!(rhs, Some(recognized.expression));
            assert_eq!(lookup(recognized.expression), Some(recognized));
        }
    }
}
