//! Pieces shared by the command-line tools.
use std::path::Path;

use clap::{App, Arg, ArgMatches};
use tracing_subscriber::EnvFilter;

use crate::error::Error;
use crate::program::Source;
use crate::report::Options;

pub fn app(name: &'static str, about: &'static str) -> App<'static, 'static> {
    App::new(name)
        .version(env!("CARGO_PKG_VERSION"))
        .about(about)
        .arg(Arg::with_name("FILE")
            .help("V source files to process, one statement per line. Use - for standard input.")
            .multiple(true))
        .arg(Arg::with_name("sample")
            .long("sample")
            .help("Process the built-in sample program (the default when no files are given)"))
        .arg(Arg::with_name("no-color")
            .long("no-color")
            .help("Don't color diagnostics"))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .help("Log more (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence."))
}

/// Sends logs to stderr, filtered by `RUST_LOG` or else by the number of `-v` flags.
pub fn init_tracing(verbosity: u64) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn options(matches: &ArgMatches) -> Options {
    Options { color: !matches.is_present("no-color") }
}

pub fn sources(matches: &ArgMatches) -> Result<Vec<Source>, Error> {
    let mut sources = Vec::new();
    if matches.is_present("sample") {
        sources.push(Source::sample());
    }
    if let Some(files) = matches.values_of("FILE") {
        for file in files {
            let source = if file == "-" {
                Source::read_stdin()?
            } else {
                Source::read_file(Path::new(file))?
            };
            sources.push(source);
        }
    }
    if sources.is_empty() {
        sources.push(Source::sample());
    }
    Ok(sources)
}
