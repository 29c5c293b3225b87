//! Case-insensitive symbol table
//!
//! Names are matched ignoring ASCII case, but each binding remembers the
//! spelling it was first created with for diagnostics.

use crate::value::Value;
use indexmap::IndexMap;

/// A named value in one scope
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// Spelling used when the binding was created
    pub name: String,
    pub value: Value,
    /// Set when a function body declared this name `global`
    pub global: bool,
}

/// Bindings of a single scope, in insertion order
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: IndexMap<String, Binding>,
}

fn fold(name: &str) -> String {
    name.to_ascii_lowercase()
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.binding(name).map(|b| &b.value)
    }

    pub fn binding(&self, name: &str) -> Option<&Binding> {
        self.symbols.get(&fold(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(&fold(name))
    }

    /// Create or overwrite a binding.
    ///
    /// An existing binding keeps its original spelling, and once marked
    /// global it stays global.
    pub fn set(&mut self, name: &str, value: Value, global: bool) {
        match self.symbols.get_mut(&fold(name)) {
            Some(binding) => {
                binding.value = value;
                binding.global |= global;
            }
            None => {
                self.symbols.insert(
                    fold(name),
                    Binding {
                        name: name.to_string(),
                        value,
                        global,
                    },
                );
            }
        }
    }

    /// Whether a child scope declared `name` global in this table
    pub fn global_from_child(&self, name: &str) -> bool {
        self.binding(name).is_some_and(|b| b.global)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.symbols.values()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
