extern crate v_line_compiler;

use std::process;

use tracing::{error, info};
use v_line_compiler::cli;
use v_line_compiler::program::{LineReport, Source};
use v_line_compiler::report::{diagnostic, Options};

fn main() {
    let matches = cli::app("vlc-check", "Reports the errors in each line of a V program.")
        .get_matches();
    cli::init_tracing(matches.occurrences_of("verbose"));
    let options = cli::options(&matches);

    let sources = match cli::sources(&matches) {
        Ok(sources) => sources,
        Err(e) => {
            error!(error = %e, "couldn't load program");
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };

    let mut found_errors = false;
    for source in sources {
        let diagnostics = extract_source_errors(&source, options);
        if diagnostics.len() > 0 {
            found_errors = true;
            for diagnostic in diagnostics {
                println!("{}\n", diagnostic);
            }
        } else {
            println!("{}: found no errors", source.name);
        }
    }

    if found_errors {
        process::exit(1);
    }
}

fn extract_source_errors(source: &Source, options: Options) -> Vec<String> {
    let reports = source.process();
    info!(source = source.name.as_str(), lines = reports.len(), "checked");
    reports.iter()
        .filter_map(|report: &LineReport| diagnostic(report, Some(source.name.as_str()), options))
        .collect()
}
