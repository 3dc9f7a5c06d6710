//! Final-state reporting.
//!
//! After a successful run the store is handed here and rendered as one
//! line per variable: `name: value (TypeName)`, strings quoted, a
//! Null-valued variable as the bare `name: Null`. Iteration order over
//! the store is not deterministic; consumers that need stability should
//! compare the lines as a set.

use crate::eval::{Value, VariableStore};
use crate::intern::Interner;

/// Heading printed above the final-state lines.
pub const HEADING: &str = "Final variable states:";

/// Render one line per variable in store order.
pub fn final_state_lines(interner: &Interner, store: &VariableStore) -> Vec<String> {
    store
        .iter()
        .map(|(name, binding)| {
            let name = interner.lookup(name);
            match &binding.value {
                Value::Null => format!("{name}: Null"),
                value => format!("{name}: {value} ({ty})", ty = value.ty()),
            }
        })
        .collect()
}

/// Print the report to stdout.
pub fn print_final_state(interner: &Interner, store: &VariableStore) {
    println!();
    println!("{HEADING}");
    for line in final_state_lines(interner, store) {
        println!("{line}");
    }
}
