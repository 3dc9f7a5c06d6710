//! CLI commands for the Prose interpreter.
//!
//! - `run` - Parse and execute a script, then report final variable states
//! - `check` - Parse a script without executing it

pub mod check;
pub mod run;

/// Print usage information
pub fn print_usage() {
    eprintln!("Prose interpreter v{}", env!("CARGO_PKG_VERSION"));
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  prose run <file.prose>      Parse and run a script");
    eprintln!("  prose check <file.prose>    Parse a script without running it");
    eprintln!("  prose <file.prose>          Run script (shorthand for run)");
}
