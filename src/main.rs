use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use imperative::{
    compile,
    errors::errors::{Error, ErrorTip},
    Options,
};
use log::{debug, LevelFilter};

/// Checks a source file and reports every diagnostic found.
#[derive(Debug, Parser)]
#[clap(name = "imperc", version)]
struct App {
    /// Source file to check
    file: PathBuf,
    /// Run the remaining passes after one reports errors
    #[clap(long)]
    keep_going: bool,
    /// Log every stage (RUST_LOG takes a finer filter)
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let app = App::parse();
    init_logging(app.verbose);
    debug!("starting imperc with args {app:?}");

    let source = match read_to_string(&app.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: could not read {} ({})", app.file.display(), error);
            return ExitCode::FAILURE;
        }
    };

    let options = Options {
        halt_on_error: !app.keep_going,
    };
    let compilation = compile(&source, &options);

    for error in &compilation.errors {
        display_error(error, &app.file, &source);
    }
    if let Some(stage) = compilation.halted_at {
        debug!("stopped after {}", stage);
    }

    if compilation.is_generatable() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn display_error(error: &Error, file: &Path, source: &str) {
    /*
        Error: name (message)
        -> main.imp:20:9
           |
        20 | var a is #
           | --------^
    */

    let position = error.get_position();
    let line_text = source
        .lines()
        .nth(position.line.saturating_sub(1) as usize)
        .unwrap_or("");

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    eprintln!("Error: {} ({})", error.get_error_name(), error.message());
    eprintln!("-> {}:{}", file.display(), position);
    eprintln!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    eprintln!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = (position.column as usize)
        .saturating_sub(removed_whitespace)
        .max(1);
    eprintln!("{:>padding$} {:->arrows$}", "|", "^");

    if let tip @ ErrorTip::Suggestion(_) = error.get_tip() {
        eprintln!("{:>padding$} tip: {}", "=", tip);
    }
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (&string[start..], start)
}
