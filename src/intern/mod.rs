//! String interning for identifiers and string literals.
//!
//! Every identifier in a script is interned once at lex time; the rest of
//! the pipeline compares and hashes `Name` values as plain u32s. Interned
//! strings are stored contiguously and never deallocated.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;

/// Interned string identifier.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Create from raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

struct InternTable {
    /// Map from string content to index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents.
    strings: Vec<&'static str>,
}

/// Interner providing O(1) lookup and equality for interned strings.
pub struct Interner {
    table: RwLock<InternTable>,
}

impl Interner {
    /// Create a new empty interner.
    pub fn new() -> Self {
        Interner {
            table: RwLock::new(InternTable {
                map: FxHashMap::default(),
                strings: Vec::with_capacity(64),
            }),
        }
    }

    /// Intern a string, returning its `Name`.
    pub fn intern(&self, s: &str) -> Name {
        if let Some(&index) = self.table.read().map.get(s) {
            return Name(index);
        }
        let mut table = self.table.write();
        // Re-check under the write lock.
        if let Some(&index) = table.map.get(s) {
            return Name(index);
        }
        let stored: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let index = table.strings.len() as u32;
        table.strings.push(stored);
        table.map.insert(stored, index);
        Name(index)
    }

    /// Look up the string content of a `Name`.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table.read().strings[name.0 as usize]
    }

    /// Number of distinct interned strings.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Check if nothing has been interned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}
