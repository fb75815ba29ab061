//! Checking and compiling whole programs, one line at a time.
//!
//! Lines never influence each other: each one is classified on its own, and only
//! valid lines on the whitelist are compiled.
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::classify::{classify, Classification};
use crate::error::{Error, ErrorKind, LineError};
use crate::ir::is_whitelisted;
use crate::pipeline::{compile, PipelineResult};

/// The program the V assignment ships with.
pub const SAMPLE_PROGRAM: [&str; 11] = [
    "BEGIN",
    "INTEGER A, B, C, E, M, N, G, H, I, a, c",
    "INPUT A, B, C",
    "LET B = A */ M",
    "LET G = a + c",
    "temp = <s%**h - j / w +d +*$&;",
    "M = A/B+C",
    "N = G/H-I+a*B/c",
    "WRITE M",
    "WRITEE F;",
    "END",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Rejected(LineError),
    /// Valid, but not an expression that gets compiled.
    Accepted,
    Compiled(PipelineResult),
}

impl LineOutcome {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LineOutcome::Rejected(error) => error.kind(),
            LineOutcome::Accepted | LineOutcome::Compiled(_) => ErrorKind::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineReport {
    /// 1-based.
    pub line_number: usize,
    pub source: String,
    pub outcome: LineOutcome,
}

pub fn process_line(line_number: usize, line: &str) -> LineReport {
    let outcome = match classify(line) {
        Classification::Invalid(error) => LineOutcome::Rejected(error),
        Classification::Valid if is_whitelisted(line) => LineOutcome::Compiled(compile(line)),
        Classification::Valid => LineOutcome::Accepted,
    };
    info!(line_number, line, kind = %outcome.kind(), "processed line");
    LineReport { line_number, source: line.to_string(), outcome }
}

pub fn process_program<I, S>(lines: I) -> Vec<LineReport>
    where I: IntoIterator<Item=S>, S: AsRef<str>
{
    lines.into_iter()
        .enumerate()
        .map(|(i, line)| process_line(i + 1, line.as_ref()))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub rejected: usize,
    pub accepted: usize,
    pub compiled: usize,
}

impl Summary {
    pub fn of(reports: &[LineReport]) -> Summary {
        reports.iter().fold(Summary::default(), |mut summary, report| {
            match report.outcome {
                LineOutcome::Rejected(_) => summary.rejected += 1,
                LineOutcome::Accepted => summary.accepted += 1,
                LineOutcome::Compiled(_) => summary.compiled += 1,
            }
            summary
        })
    }

    pub fn total(&self) -> usize {
        self.rejected + self.accepted + self.compiled
    }
}

/// A named program to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub lines: Vec<String>,
}

impl Source {
    pub fn sample() -> Source {
        Source {
            name: "<sample>".to_string(),
            lines: SAMPLE_PROGRAM.iter().map(|line| line.to_string()).collect(),
        }
    }

    pub fn from_text(name: impl Into<String>, text: &str) -> Source {
        Source {
            name: name.into(),
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn read_file(path: &Path) -> Result<Source, Error> {
        let text = fs::read_to_string(path)
            .map_err(|source| Error::ReadFile { path: PathBuf::from(path), source })?;
        Ok(Source::from_text(path.display().to_string(), &text))
    }

    pub fn read_stdin() -> Result<Source, Error> {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map_err(Error::ReadStdin)?;
        Ok(Source::from_text("<stdin>", &text))
    }

    pub fn process(&self) -> Vec<LineReport> {
        process_program(&self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn sample_program_outcomes() {
        let reports = process_program(SAMPLE_PROGRAM.iter());
        let kinds = reports.iter()
            .map(|report| match &report.outcome {
                LineOutcome::Rejected(error) => format!("{}", error.kind()),
                LineOutcome::Accepted => "accepted".to_string(),
                LineOutcome::Compiled(_) => "compiled".to_string(),
            })
            .collect::<Vec<_>>();
        assert_eq!(kinds, vec![
            "accepted",
            "accepted",
            "accepted",
            "Syntax",
            "compiled",
            "Semantic",
            "compiled",
            "compiled",
            "accepted",
            "Lexical",
            "accepted",
        ]);
        assert_eq!(reports[9].line_number, 10);
        assert_eq!(reports[9].source, "WRITEE F;");
    }

    #[test]
    fn summary() {
        let reports = process_program(SAMPLE_PROGRAM.iter());
        assert_eq!(Summary::of(&reports), Summary { rejected: 3, accepted: 5, compiled: 3 });
        assert_eq!(Summary::of(&reports).total(), SAMPLE_PROGRAM.len());
    }

    #[test]
    fn valid_lines_off_the_whitelist_are_not_compiled() {
        // Same expression, different spacing.
        let report = process_line(1, "LET G = a  + c");
        assert_eq!(report.outcome, LineOutcome::Accepted);
    }

    #[test]
    fn lines_are_independent() {
        let alone = process_line(1, "M = A/B+C");
        let in_program = process_program(vec!["WRITEE F", "M = A/B+C"]).remove(1);
        assert_eq!(alone.outcome, in_program.outcome);
    }

    #[test]
    fn sources_split_lines() {
        let source = Source::from_text("prog.v", "BEGIN\r\nWRITE M\nEND\n");
        assert_eq!(source.lines, vec!["BEGIN", "WRITE M", "END"]);
        assert_eq!(Source::sample().lines.len(), 11);
    }

    #[test]
    fn missing_file() {
        let error = Source::read_file(Path::new("definitely/not/here.v")).unwrap_err();
        assert!(error.to_string().starts_with("failed to read definitely"));
    }
}
