use crate::program::{LineOutcome, LineReport, Summary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub color: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options { color: true }
    }
}

/// The console narration for one processed line.
pub fn narrate(report: &LineReport) -> String {
    let mut lines = vec![format!("Processing line: {}", report.source)];
    match &report.outcome {
        LineOutcome::Rejected(error) => lines.push(format!("Error: {}", error)),
        LineOutcome::Accepted => lines.push("Line is valid (no compilation needed).".to_string()),
        LineOutcome::Compiled(result) => {
            lines.push("Line is valid. Running compiler stages...".to_string());
            lines.extend(result.outputs().iter()
                .map(|output| format!("  {} Output: {}", output.stage, output.text)));
            lines.push("  Intermediate Code Listing:".to_string());
            lines.extend(result.ir_listing().lines().iter().map(|line| format!("    {}", line)));
        }
    }
    lines.iter().map(|line| format!("{}\n", line)).collect()
}

/// An annotated snippet for a rejected line; `None` for anything else.
pub fn diagnostic(report: &LineReport, origin: Option<&str>, options: Options) -> Option<String> {
    match &report.outcome {
        LineOutcome::Rejected(error) =>
            Some(error.render(&report.source, origin, report.line_number, options.color)),
        LineOutcome::Accepted | LineOutcome::Compiled(_) => None,
    }
}

pub fn summarize(name: &str, summary: &Summary) -> String {
    format!(
        "{}: {} lines, {} with errors, {} compiled, {} valid without compilation",
        name, summary.total(), summary.rejected, summary.compiled, summary.accepted
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::process_line;

    use pretty_assertions::assert_eq;

    #[test]
    fn rejected() {
        let report = process_line(10, "WRITEE F");
        assert_eq!(
            narrate(&report),
            "Processing line: WRITEE F\nError: Lexical Error: invalid keyword \"WRITEE\"\n"
        );
    }

    #[test]
    fn accepted() {
        let report = process_line(1, "BEGIN");
        assert_eq!(narrate(&report), "Processing line: BEGIN\nLine is valid (no compilation needed).\n");
        assert_eq!(diagnostic(&report, None, Options::default()), None);
    }

    #[test]
    fn compiled() {
        let narration = narrate(&process_line(7, "M = A/B+C"));
        let lines = narration.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "Processing line: M = A/B+C");
        assert_eq!(lines[1], "Line is valid. Running compiler stages...");
        assert_eq!(lines[2], "  Lexical Analysis Output: M = A/B+C");
        assert_eq!(lines[7], "  Optimized Code Output: Optimized(CG(IR(Semantically Checked(Parsed(M = A/B+C)))))");
        assert!(lines[8].starts_with("  Target Machine Code Output: 01001111 "));
        assert_eq!(lines[9..].to_vec(), vec!["  Intermediate Code Listing:", "    t1=A/B", "    M=t1+C"]);
    }

    #[test]
    fn diagnostics_name_the_line() {
        let report = process_line(4, "LET B = A */ M");
        let rendered = diagnostic(&report, Some("prog.v"), Options { color: false }).unwrap();
        assert!(rendered.contains("Syntax Error: combined operators not allowed"));
        assert!(rendered.contains("prog.v:4"));
    }

    #[test]
    fn summary_line() {
        let summary = Summary { rejected: 3, accepted: 5, compiled: 3 };
        assert_eq!(
            summarize("<sample>", &summary),
            "<sample>: 11 lines, 3 with errors, 3 compiled, 5 valid without compilation"
        );
    }
}
