//! Checks and "compiles" programs in V, a tiny teaching language, one line at a time.
//!
//! Each line is [classified](classify::classify) on its own: it either has a single
//! lexical, syntax, or semantic error, or it is valid. Valid lines with one of the
//! [recognized expressions](ir::RECOGNIZED_EXPRESSIONS) are then run through a
//! simulated [compiler pipeline](pipeline::compile) which ends in a binary dump.
//!
//! ```
//! # use v_line_compiler::program::{process_line, LineOutcome};
//! let report = process_line(1, "LET G = a + c");
//! match report.outcome {
//!     LineOutcome::Compiled(result) =>
//!         assert_eq!(result.ir_listing().to_string(), "t1=a; t2=c; t3=t1+t2; G=t3"),
//!     _ => unreachable!(),
//! }
//! ```

pub mod error;
pub mod language;
pub mod lexer;
pub mod classify;
pub mod ir;
pub mod pipeline;
pub mod program;
pub mod report;
pub mod cli;

pub use classify::{classify, Classification};
pub use error::{ErrorKind, LineError};
pub use pipeline::{compile, PipelineResult};
