//! Check command - parse a Prose script without executing it.

use std::fs;

use prosec::errors::{self, Error};
use prosec::intern::Interner;
use prosec::syntax::{Lexer, Parser};

/// Parse a script file and report the result.
pub fn check_file_and_print(path: &str) {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading file '{path}': {e}");
            std::process::exit(1);
        }
    };

    let interner = Interner::new();
    let tokens = Lexer::new(&source, &interner).lex_all();

    match Parser::new(&tokens).parse_script() {
        Ok(script) => {
            println!("{path}: ok ({} statements)", script.stmts.len());
        }
        Err(err) => {
            errors::render(path, &source, &Error::Parse(err));
            std::process::exit(1);
        }
    }
}
