//! Statement execution.
//!
//! Walks the statement list in document order, exactly once. `Set`, `Def`
//! and cast-binds mutate the store synchronously before the next statement
//! runs, so every later statement observes every earlier binding. The
//! executor owns the store as an explicit context object; independent runs
//! do not interfere.

use super::evaluator::{cast_value, Evaluator};
use super::sink::PrintSink;
use super::store::VariableStore;
use crate::errors::RuntimeError;
use crate::intern::Interner;
use crate::syntax::{Script, Stmt, StmtKind};

/// Run state of the executor.
///
/// Starts `Running`; transitions to `Halted` after the last statement or
/// at the first failing statement, whichever comes first.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RunState {
    Running,
    Halted,
}

/// Statement executor.
pub struct Executor<'i> {
    interner: &'i Interner,
    store: VariableStore,
    state: RunState,
}

impl<'i> Executor<'i> {
    /// Create an executor with an empty store.
    pub fn new(interner: &'i Interner) -> Self {
        Executor {
            interner,
            store: VariableStore::new(),
            state: RunState::Running,
        }
    }

    /// Execute a script top to bottom, printing through `sink`.
    ///
    /// On the first failing statement the executor halts, commits nothing
    /// for that statement, and returns the error; no further statements
    /// run.
    pub fn run(&mut self, script: &Script, sink: &mut PrintSink) -> Result<(), RuntimeError> {
        for stmt in &script.stmts {
            if self.state == RunState::Halted {
                break;
            }
            if let Err(err) = self.exec_stmt(script, stmt, sink) {
                self.state = RunState::Halted;
                return Err(err);
            }
        }
        self.state = RunState::Halted;
        Ok(())
    }

    fn exec_stmt(
        &mut self,
        script: &Script,
        stmt: &Stmt,
        sink: &mut PrintSink,
    ) -> Result<(), RuntimeError> {
        match &stmt.kind {
            StmtKind::Set { name, expr } => {
                let value =
                    Evaluator::new(self.interner, &script.arena, &self.store).eval(*expr)?;
                self.store.bind(*name, value);
            }

            StmtKind::Decl { name, ty } => {
                self.store.declare(*name, *ty);
            }

            StmtKind::SetCast { name, expr, ty } => {
                let value =
                    Evaluator::new(self.interner, &script.arena, &self.store).eval(*expr)?;
                let value = cast_value(value, *ty, stmt.span)?;
                self.store.bind(*name, value);
            }

            StmtKind::If {
                name,
                negated,
                then_stmt,
                else_stmt,
            } => {
                let value =
                    self.store
                        .lookup(*name)
                        .ok_or_else(|| RuntimeError::UndefinedVariable {
                            name: self.interner.lookup(*name).to_string(),
                            span: stmt.span,
                        })?;
                // Exactly one branch runs; the other is never evaluated.
                let take_then = value.is_null() != *negated;
                if take_then {
                    self.exec_stmt(script, then_stmt, sink)?;
                } else {
                    self.exec_stmt(script, else_stmt, sink)?;
                }
            }

            StmtKind::Print { expr } => {
                let value =
                    Evaluator::new(self.interner, &script.arena, &self.store).eval(*expr)?;
                sink.println(&value.display_value());
            }
        }
        Ok(())
    }

    /// Current run state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Read access to the store.
    pub fn store(&self) -> &VariableStore {
        &self.store
    }

    /// Tear the executor down, handing the store to the reporting side.
    pub fn into_store(self) -> VariableStore {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::Value;
    use crate::syntax::{Lexer, Parser};
    use pretty_assertions::assert_eq;

    fn run(source: &str) -> (Interner, Result<(), RuntimeError>, VariableStore, String) {
        let interner = Interner::new();
        let tokens = Lexer::new(source, &interner).lex_all();
        let script = Parser::new(&tokens).parse_script().expect("should parse");
        let mut executor = Executor::new(&interner);
        let mut sink = PrintSink::buffer();
        let result = executor.run(&script, &mut sink);
        let output = sink.output().to_string();
        let store = executor.into_store();
        (interner, result, store, output)
    }

    fn lookup(interner: &Interner, store: &VariableStore, name: &str) -> Option<Value> {
        store.lookup(interner.intern(name)).cloned()
    }

    #[test]
    fn test_set_infers_type_from_value() {
        let (interner, result, store, _) = run("Set x to 2\nSet y to 1.3");
        assert_eq!(result, Ok(()));
        assert_eq!(lookup(&interner, &store, "x"), Some(Value::Int(2)));
        assert_eq!(lookup(&interner, &store, "y"), Some(Value::Float(1.3)));
    }

    #[test]
    fn test_later_statements_observe_earlier_bindings() {
        let (interner, result, store, _) = run("Set x to 2\nSet y to x * 3");
        assert_eq!(result, Ok(()));
        assert_eq!(lookup(&interner, &store, "y"), Some(Value::Int(6)));
    }

    #[test]
    fn test_mixed_arithmetic_promotes() {
        let (interner, result, store, _) = run("Set x to 2\nSet y to 1.3\nSet m to x+y - 3");
        assert_eq!(result, Ok(()));
        let Some(Value::Float(m)) = lookup(&interner, &store, "m") else {
            panic!("m should be Float");
        };
        assert!((m - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_cast_at_bind_truncates() {
        let (interner, result, store, _) = run("Set n to 1.9 as Integer");
        assert_eq!(result, Ok(()));
        assert_eq!(lookup(&interner, &store, "n"), Some(Value::Int(1)));
    }

    #[test]
    fn test_decl_binds_null() {
        let (interner, result, store, _) = run("Def z as Integer\nSet nm as String");
        assert_eq!(result, Ok(()));
        assert_eq!(lookup(&interner, &store, "z"), Some(Value::Null));
        assert_eq!(lookup(&interner, &store, "nm"), Some(Value::Null));
    }

    #[test]
    fn test_if_null_takes_then_branch_only() {
        let (_, result, _, output) =
            run("Set x to 2\nDef z as Integer\nIf z is Null then Print(x) else Print(x*1000)");
        assert_eq!(result, Ok(()));
        assert_eq!(output, "2\n");
    }

    #[test]
    fn test_if_not_null_takes_else_branch() {
        let (_, result, _, output) =
            run("Set x to 2\nIf x is Null then Print(0) else Print(x)");
        assert_eq!(result, Ok(()));
        assert_eq!(output, "2\n");
    }

    #[test]
    fn test_if_negated() {
        let (_, result, _, output) =
            run("Set x to 2\nIf x is not Null then Print(1) else Print(0)");
        assert_eq!(result, Ok(()));
        assert_eq!(output, "1\n");
    }

    #[test]
    fn test_else_branch_not_evaluated() {
        // The else expression divides by zero; taking the then branch
        // must never evaluate it.
        let (_, result, _, output) =
            run("Set x to 2\nDef z as Integer\nIf z is Null then Print(x) else Print(x/0)");
        assert_eq!(result, Ok(()));
        assert_eq!(output, "2\n");
    }

    #[test]
    fn test_rebinding_changes_type() {
        let (interner, result, store, _) = run("Set x to 2\nSet x to \"hi\"");
        assert_eq!(result, Ok(()));
        assert_eq!(lookup(&interner, &store, "x"), Some(Value::str("hi")));
    }

    #[test]
    fn test_halts_on_first_error() {
        let (interner, result, store, output) =
            run("Set x to 2\nSet q to 5/0\nSet after to 1\nPrint(x)");
        assert!(matches!(result, Err(RuntimeError::DivideByZero { .. })));
        // The failing statement commits nothing and later statements
        // never run.
        assert_eq!(lookup(&interner, &store, "q"), None);
        assert_eq!(lookup(&interner, &store, "after"), None);
        assert_eq!(output, "");
    }

    #[test]
    fn test_undefined_variable() {
        let (_, result, _, _) = run("Print(ghost)");
        assert!(matches!(
            result,
            Err(RuntimeError::UndefinedVariable { ref name, .. }) if name == "ghost"
        ));
    }

    #[test]
    fn test_undefined_variable_in_condition() {
        let (_, result, _, _) = run("If ghost is Null then Print(1) else Print(2)");
        assert!(matches!(result, Err(RuntimeError::UndefinedVariable { .. })));
    }

    #[test]
    fn test_state_transitions() {
        let interner = Interner::new();
        let tokens = Lexer::new("Set x to 2", &interner).lex_all();
        let script = Parser::new(&tokens).parse_script().expect("should parse");
        let mut executor = Executor::new(&interner);
        assert_eq!(executor.state(), RunState::Running);
        let mut sink = PrintSink::buffer();
        executor.run(&script, &mut sink).expect("should run");
        assert_eq!(executor.state(), RunState::Halted);
    }

    #[test]
    fn test_print_and_set_interleave_in_source_order() {
        let (_, result, _, output) =
            run("Set x to 1\nPrint(x)\nSet x to 2\nPrint(x)");
        assert_eq!(result, Ok(()));
        assert_eq!(output, "1\n2\n");
    }
}
