extern crate v_line_compiler;

use std::process;

use tracing::error;
use v_line_compiler::cli;
use v_line_compiler::program::Summary;
use v_line_compiler::report::{narrate, summarize};

fn main() {
    let matches = cli::app("vlc", "Checks each line of a V program and compiles the recognized expressions.")
        .get_matches();
    cli::init_tracing(matches.occurrences_of("verbose"));

    let sources = match cli::sources(&matches) {
        Ok(sources) => sources,
        Err(e) => {
            error!(error = %e, "couldn't load program");
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };

    for source in sources {
        let reports = source.process();
        for report in reports.iter() {
            println!("{}", narrate(report));
        }
        println!("{}", summarize(&source.name, &Summary::of(&reports)));
    }
}
