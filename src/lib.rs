//! Prose interpreter.
//!
//! Prose is a tiny scripting language whose statements read as English
//! prose: `Set x to 2`, `Def z as Integer`, `If z is Null then Print(x)
//! else Print((x+y)*3).` Variables take their type from the bound value,
//! mixed Integer/Float arithmetic widens silently, and "uninitialized" is
//! a first-class Null value that conditions can test.
//!
//! The pipeline is lex (`syntax::Lexer`) to parse (`syntax::Parser`) to
//! execute (`eval::Executor`), with `run_source` wiring the stages
//! together over a caller-supplied print sink.

pub mod errors;
pub mod eval;
pub mod intern;
pub mod report;
pub mod syntax;

pub use errors::{Error, ParseError, RuntimeError};
pub use eval::{Executor, PrintSink, Value, VariableStore};
pub use intern::{Interner, Name};
pub use syntax::{Lexer, Parser, Script, Span, Ty};

/// Parse and execute a script, printing through `sink`.
///
/// Returns the final variable store on success, or the first error (parse
/// errors halt before any execution; runtime errors halt at the failing
/// statement).
pub fn run_source(
    source: &str,
    interner: &Interner,
    sink: &mut PrintSink,
) -> Result<VariableStore, Error> {
    let tokens = Lexer::new(source, interner).lex_all();
    let script = Parser::new(&tokens).parse_script()?;

    let mut executor = Executor::new(interner);
    executor.run(&script, sink)?;
    Ok(executor.into_store())
}
