//! Run command - parse and execute a Prose script.

use std::fs;

use prosec::errors;
use prosec::eval::PrintSink;
use prosec::intern::Interner;
use prosec::{report, run_source};

/// Run a script file: print statements stream to stdout as they execute,
/// then the final variable states are reported. The first error renders
/// to stderr and the process exits non-zero.
pub fn run_file_and_print(path: &str) {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading file '{path}': {e}");
            std::process::exit(1);
        }
    };

    let interner = Interner::new();
    let mut sink = PrintSink::Stdout;

    match run_source(&source, &interner, &mut sink) {
        Ok(store) => {
            report::print_final_state(&interner, &store);
        }
        Err(err) => {
            errors::render(path, &source, &err);
            std::process::exit(1);
        }
    }
}
