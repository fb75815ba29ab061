//! The simulated compiler pipeline.
//!
//! A valid line is pushed through seven stages. Each stage is a pure function of
//! the previous stage's text; the first stage gets the raw line.
//!
//! | Stage | Output |
//! |---|---|
//! | Lexical analysis | the line with whitespace runs collapsed and ends trimmed |
//! | Syntax analysis | `Parsed(..)` |
//! | Semantic analysis | `Semantically Checked(..)` |
//! | Intermediate code | `IR(..)` |
//! | Code generation | `CG(..)` |
//! | Optimization | `Optimized(..)` |
//! | Target machine code | each character's code as 8-digit binary, space separated |
//!
//! The intermediate code stage also produces an [`IrListing`] for display. It is
//! not fed into code generation.
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use tracing::{debug, trace};

use crate::error::DecodeError;
use crate::ir::{decompose, IrListing};
use crate::lexer::normalize_whitespace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    LexicalAnalysis,
    SyntaxAnalysis,
    SemanticAnalysis,
    IntermediateCode,
    CodeGeneration,
    Optimization,
    TargetMachineCode,
}

impl Stage {
    pub const ALL: [Stage; 7] = [
        Stage::LexicalAnalysis,
        Stage::SyntaxAnalysis,
        Stage::SemanticAnalysis,
        Stage::IntermediateCode,
        Stage::CodeGeneration,
        Stage::Optimization,
        Stage::TargetMachineCode,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::LexicalAnalysis => "Lexical Analysis",
            Stage::SyntaxAnalysis => "Syntax Analysis",
            Stage::SemanticAnalysis => "Semantic Analysis",
            Stage::IntermediateCode => "Intermediate Code",
            Stage::CodeGeneration => "Generated Code",
            Stage::Optimization => "Optimized Code",
            Stage::TargetMachineCode => "Target Machine Code",
        }
    }

    /// The marker a wrapping stage puts around its input.
    pub fn marker(self) -> Option<&'static str> {
        match self {
            Stage::SyntaxAnalysis => Some("Parsed"),
            Stage::SemanticAnalysis => Some("Semantically Checked"),
            Stage::IntermediateCode => Some("IR"),
            Stage::CodeGeneration => Some("CG"),
            Stage::Optimization => Some("Optimized"),
            Stage::LexicalAnalysis | Stage::TargetMachineCode => None,
        }
    }

    pub fn apply(self, input: &str) -> String {
        match self {
            Stage::LexicalAnalysis => normalize_whitespace(input),
            Stage::TargetMachineCode => encode_machine_code(input),
            _ => match self.marker() {
                Some(marker) => format!("{}({})", marker, input),
                None => input.to_string(),
            },
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutput {
    pub stage: Stage,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineResult {
    outputs: Vec<StageOutput>,
    ir_listing: IrListing,
}

impl PipelineResult {
    /// Every stage's output, in pipeline order.
    pub fn outputs(&self) -> &[StageOutput] {
        &self.outputs
    }

    pub fn output(&self, stage: Stage) -> &str {
        self.outputs.iter()
            .find(|output| output.stage == stage)
            .map_or("", |output| output.text.as_str())
    }

    pub fn optimized(&self) -> &str {
        self.output(Stage::Optimization)
    }

    pub fn machine_code(&self) -> &str {
        self.output(Stage::TargetMachineCode)
    }

    pub fn ir_listing(&self) -> &IrListing {
        &self.ir_listing
    }
}

/// Runs `line` through every stage.
///
/// This never fails: a line whose expression isn't recognized still goes through
/// every stage, only its [`IrListing`] is [`NotImplemented`](IrListing::NotImplemented).
pub fn compile(line: &str) -> PipelineResult {
    debug!(line, "compiling");
    let mut outputs = Vec::with_capacity(Stage::ALL.len());
    let mut text = line.to_string();
    for stage in Stage::ALL.iter().copied() {
        text = stage.apply(&text);
        trace!(%stage, output = text.as_str());
        outputs.push(StageOutput { stage, text: text.clone() });
    }

    let ir_listing = decompose(line);
    if ir_listing == IrListing::NotImplemented {
        debug!(line, "no intermediate code listing for expression");
    }

    PipelineResult { outputs, ir_listing }
}

/// Each character's code in binary, at least 8 digits wide, separated by spaces.
pub fn encode_machine_code(text: &str) -> String {
    text.chars()
        .map(|c| format!("{:08b}", u32::from(c)))
        .join(" ")
}

/// Turns [`encode_machine_code`] output back into text.
pub fn decode_machine_code(code: &str) -> Result<String, DecodeError> {
    code.split_whitespace()
        .enumerate()
        .map(|(index, group)| {
            let value = u32::from_str_radix(group, 2)
                .map_err(|source| DecodeError::NotBinary { index, group: group.to_string(), source })?;
            std::char::from_u32(value)
                .ok_or_else(|| DecodeError::NotACharacter { index, group: group.to_string() })
        })
        .collect()
}
