//! The variable store: the single piece of mutable state in a run.
//!
//! One flat, case-sensitive namespace. A later `Set`/`Def` on a name
//! replaces the prior binding entirely, so the type may change across
//! rebinds. The store is created empty, owned by the executor, and lives
//! for the whole run; there is no deletion statement.

use rustc_hash::FxHashMap;

use super::value::Value;
use crate::intern::Name;
use crate::syntax::Ty;

/// A stored binding: the current value plus an optional reserved type
/// recorded by a value-less declaration. The reserved type is
/// informational; the runtime enforces nothing from it.
#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    pub value: Value,
    pub reserved: Option<Ty>,
}

/// Mapping from variable name to its current binding.
#[derive(Clone, Debug, Default)]
pub struct VariableStore {
    bindings: FxHashMap<Name, Binding>,
}

impl VariableStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a name to a value, replacing any prior binding.
    pub fn bind(&mut self, name: Name, value: Value) {
        self.bindings.insert(
            name,
            Binding {
                value,
                reserved: None,
            },
        );
    }

    /// Declare a name with Null value, optionally reserved for a type.
    pub fn declare(&mut self, name: Name, reserved: Option<Ty>) {
        self.bindings.insert(
            name,
            Binding {
                value: Value::Null,
                reserved,
            },
        );
    }

    /// Look up the current value of a name.
    pub fn lookup(&self, name: Name) -> Option<&Value> {
        self.bindings.get(&name).map(|b| &b.value)
    }

    /// Look up the full binding of a name.
    pub fn get(&self, name: Name) -> Option<&Binding> {
        self.bindings.get(&name)
    }

    /// Iterate over all bindings. Order is not deterministic.
    pub fn iter(&self) -> impl Iterator<Item = (Name, &Binding)> {
        self.bindings.iter().map(|(name, binding)| (*name, binding))
    }

    /// Number of bound names.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
